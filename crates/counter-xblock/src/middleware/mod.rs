use crate::actions::Dispatch;
use crate::dispatcher::Dispatcher;
use ns_store::State;

pub mod logging;
pub mod thunk;

/// Middleware trait - intercepts dispatched items before they reach the reducer
pub trait Middleware: Send {
    /// Handle a dispatched item
    ///
    /// - `item`: The action or thunk being dispatched
    /// - `state`: Current state (read-only snapshot)
    /// - `dispatcher`: Use to dispatch items that should re-enter the chain
    ///
    /// Returns `true` to continue the chain, `false` to consume the item
    fn handle(&mut self, item: &Dispatch, state: &State, dispatcher: &Dispatcher) -> bool;
}
