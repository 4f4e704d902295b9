//! Runs thunks on the tokio runtime

use crate::actions::Dispatch;
use crate::dispatcher::Dispatcher;
use crate::middleware::Middleware;
use crate::thunk::{Actions, Globals, StateHandle, ThunkContext};
use ns_store::State;
use std::sync::Arc;

/// ThunkMiddleware - consumes thunks and spawns them
///
/// Errors returned by a thunk are logged; nothing is dispatched for them.
pub struct ThunkMiddleware {
    state: StateHandle,
    actions: Arc<Actions>,
    extra: Arc<Globals>,
}

impl ThunkMiddleware {
    pub fn new(state: StateHandle, actions: Arc<Actions>, extra: Arc<Globals>) -> Self {
        Self {
            state,
            actions,
            extra,
        }
    }
}

impl Middleware for ThunkMiddleware {
    fn handle(&mut self, item: &Dispatch, _state: &State, dispatcher: &Dispatcher) -> bool {
        let Dispatch::Thunk(thunk) = item else {
            return true;
        };

        let ctx = ThunkContext {
            dispatcher: dispatcher.clone(),
            state: self.state.clone(),
            actions: Arc::clone(&self.actions),
            extra: Arc::clone(&self.extra),
        };
        let work = thunk(ctx);
        tokio::spawn(async move {
            if let Err(e) = work.await {
                log::error!("Thunk failed: {:#}", e);
            }
        });
        false
    }
}
