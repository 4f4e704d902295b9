use crate::actions::Dispatch;
use crate::dispatcher::Dispatcher;
use crate::middleware::Middleware;
use ns_store::State;

/// LoggingMiddleware - logs every action passing through
pub struct LoggingMiddleware;

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LoggingMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl Middleware for LoggingMiddleware {
    fn handle(&mut self, item: &Dispatch, state: &State, _dispatcher: &Dispatcher) -> bool {
        match item {
            Dispatch::Action(action) => {
                log::debug!("Action: {:?}", action);
                log::trace!("State before {}: {}", action.kind(), state);
            }
            Dispatch::Thunk(_) => log::debug!("Thunk dispatched"),
        }
        true
    }
}
