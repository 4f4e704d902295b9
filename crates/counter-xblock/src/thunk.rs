//! Thunks - asynchronous work dispatched like actions
//!
//! A thunk receives a [`ThunkContext`]: the dispatcher, a handle on the
//! latest state, the composed action creators and the [`Globals`] the
//! block was started with.

use crate::dispatcher::Dispatcher;
use crate::xblock::Element;
use anyhow::Context;
use ns_store::{ActionCreator, State, StrictDict, StrictNode};
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::watch;
use xblock_client::CounterClient;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Dispatchable asynchronous work
pub type Thunk = Arc<dyn Fn(ThunkContext) -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync>;

/// Thunk creator, the counterpart of an action creator
pub type ThunkAction = Arc<dyn Fn(&[Value]) -> Thunk + Send + Sync>;

/// Resolves a handler name to the block's handler URL
pub type MakeUrl = Arc<dyn Fn(&str) -> String + Send + Sync>;

pub type Actions = StrictDict<StrictNode<ActionCreator>>;

/// Wrap an async closure as a [`Thunk`]
pub fn thunk<F, Fut>(run: F) -> Thunk
where
    F: Fn(ThunkContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    Arc::new(move |ctx| Box::pin(run(ctx)))
}

/// Extra argument handed to every thunk
#[derive(Clone)]
pub struct Globals {
    pub make_url: MakeUrl,
    pub xblock: Element,
    pub client: Arc<dyn CounterClient>,
}

/// Read access to the latest state
#[derive(Clone, Debug)]
pub struct StateHandle(watch::Receiver<State>);

impl StateHandle {
    pub fn new(rx: watch::Receiver<State>) -> Self {
        Self(rx)
    }

    pub fn get(&self) -> State {
        self.0.borrow().clone()
    }
}

#[derive(Clone)]
pub struct ThunkContext {
    pub dispatcher: Dispatcher,
    pub state: StateHandle,
    pub actions: Arc<Actions>,
    pub extra: Arc<Globals>,
}

impl ThunkContext {
    /// Action creator at a dotted path, failing when it is unknown
    pub fn action(&self, path: &str) -> anyhow::Result<&ActionCreator> {
        self.actions
            .leaf(path)?
            .with_context(|| format!("no action registered at \"{}\"", path))
    }
}
