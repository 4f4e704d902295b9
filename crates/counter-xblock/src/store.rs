use crate::actions::Dispatch;
use crate::dispatcher::Dispatcher;
use crate::middleware::Middleware;
use crate::thunk::StateHandle;
use ns_store::{Reducer, State};
use tokio::sync::{mpsc, watch};

/// Type of the action used to compute the initial state
pub const INIT: &str = "@@INIT";

/// Store - holds the state and runs the Redux loop
pub struct Store {
    state: State,
    reducer: Reducer,
    middleware: Vec<Box<dyn Middleware>>,
    dispatcher: Dispatcher,
    pending: mpsc::UnboundedReceiver<Dispatch>,
    published: watch::Sender<State>,
}

impl Store {
    /// Create a store whose state starts as `reducer`'s answer to [`INIT`]
    pub fn new(reducer: Reducer) -> Self {
        let state = reducer.reduce_type(None, INIT);
        let (tx, pending) = mpsc::unbounded_channel();
        let (published, _) = watch::channel(state.clone());
        Self {
            state,
            reducer,
            middleware: Vec::new(),
            dispatcher: Dispatcher::new(tx),
            pending,
            published,
        }
    }

    /// Add middleware to the store; they run in insertion order
    pub fn add_middleware(&mut self, middleware: Box<dyn Middleware>) {
        self.middleware.push(middleware);
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Handle that always reads the latest state, usable from other tasks
    pub fn state_handle(&self) -> StateHandle {
        StateHandle::new(self.published.subscribe())
    }

    /// Process an item through the middleware chain and reducer, then
    /// everything it queued
    pub fn dispatch(&mut self, item: impl Into<Dispatch>) {
        self.apply(item.into());
        self.process_pending();
    }

    /// Process items queued through the dispatcher; returns how many ran
    pub fn process_pending(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(item) = self.pending.try_recv() {
            self.apply(item);
            processed += 1;
        }
        processed
    }

    fn apply(&mut self, item: Dispatch) {
        for middleware in &mut self.middleware {
            if !middleware.handle(&item, &self.state, &self.dispatcher) {
                return;
            }
        }

        match item {
            Dispatch::Action(action) => {
                self.state = self.reducer.reduce(Some(self.state.clone()), &action);
                self.published.send_replace(self.state.clone());
            }
            Dispatch::Thunk(_) => log::warn!("Dropping thunk: no middleware runs thunks"),
        }
    }
}
