//! Items the store accepts: plain actions and thunks

use crate::thunk::Thunk;
use ns_store::Action;
use std::fmt;

/// Something handed to [`crate::store::Store::dispatch`]
#[derive(Clone)]
pub enum Dispatch {
    /// Reduced into the next state
    Action(Action),
    /// Run by the thunk middleware; never reaches the reducer
    Thunk(Thunk),
}

impl Dispatch {
    pub fn as_action(&self) -> Option<&Action> {
        match self {
            Dispatch::Action(action) => Some(action),
            Dispatch::Thunk(_) => None,
        }
    }
}

impl From<Action> for Dispatch {
    fn from(action: Action) -> Self {
        Dispatch::Action(action)
    }
}

impl From<Thunk> for Dispatch {
    fn from(thunk: Thunk) -> Self {
        Dispatch::Thunk(thunk)
    }
}

impl fmt::Debug for Dispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dispatch::Action(action) => f.debug_tuple("Action").field(action).finish(),
            Dispatch::Thunk(_) => f.write_str("Thunk(..)"),
        }
    }
}
