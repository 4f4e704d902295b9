//! Namespaced Redux-style store composition
//!
//! State modules are written in isolation: each declares its own actions,
//! reducer, selectors, thunk actions and type constants using module-local
//! names. [`connect_reducers`] mounts a mapping of such modules at their keys
//! and produces one store where
//!
//! - action types are prefixed with the module namespace (`counter.LOAD`),
//! - each reducer sees its own actions un-prefixed and everything else as
//!   `Global.<type>`,
//! - selectors receive only the module's slice of the global state,
//! - thunk actions and type constants are placed at the module's path as-is.
//!
//! # Example
//!
//! ```
//! use indexmap::IndexMap;
//! use ns_store::{connect_reducers, action, handler, mk_reducer, simple_selectors, Handlers, ModuleDef};
//! use serde_json::{json, Value};
//!
//! let mut handlers = Handlers::new();
//! handlers.insert(
//!     "LOAD".to_string(),
//!     handler(|_, action| json!({ "value": action.field("value").cloned().unwrap_or(Value::Null) })),
//! );
//!
//! let counter = ModuleDef::<()>::new()
//!     .with_action("load", action("LOAD", &["value"]))
//!     .with_reducer(mk_reducer(json!({ "value": 0 }), handlers))
//!     .with_selectors(simple_selectors(["value"]));
//!
//! let mut mapping = IndexMap::new();
//! mapping.insert("counter".to_string(), counter);
//! let store = connect_reducers(mapping);
//!
//! let load = store.action("counter.load")?.call(&[json!(5)]);
//! let state = store.reducer.reduce(None, &load);
//! assert_eq!(store.selector("counter.value")?.select(&state), json!(5));
//! # Ok::<(), ns_store::StoreError>(())
//! ```

mod action;
mod connected;
mod error;
mod module;
mod path;
mod reducer;
mod selector;
mod strict;
mod tree;

pub use action::{Action, ActionCreator, ActionDef, Payload, action};
pub use connected::{ComposedStore, ConnectedStore, connect_reducers};
pub use error::{Result, StoreError};
pub use module::{Module, ModuleDef, ModuleParts};
pub use path::{GLOBAL_NAMESPACE, NsPath, SEPARATOR, global, join};
pub use reducer::{
    Handler, Handlers, Reducer, State, combine_reducers, connect_handlers, handler, mk_reducer,
};
pub use selector::{
    ROOT_SELECTOR, Selector, SelectorGroup, SelectorNode, simple_selectors, simple_selectors_for,
};
pub use strict::{MODE_ENV_VAR, Mode, StrictDict, StrictNode, deep_strict};
pub use tree::{Node, Tree};
