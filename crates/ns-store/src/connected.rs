//! Connected store - composes a mapping of modules into one store
//!
//! ```text
//! { counter: ModuleDef, course: ModuleDef { modules: { progress: .. } } }
//!        │
//!        ▼  Module::load per entry, merged
//! ModuleParts (actions, action_types, reducers, selectors, thunks, types)
//!        │
//!        ▼  deep combine of the reducer tree
//! ComposedStore { actions, action_types, reducer, selectors, thunk_actions, .. }
//! ```
//!
//! Each leaf reducer is mounted at its full path: it sees its own actions
//! without the namespace prefix, and every other action as `Global.<type>`.

use crate::action::ActionCreator;
use crate::error::{Result, StoreError};
use crate::module::{Module, ModuleDef, ModuleParts};
use crate::path::{NsPath, global};
use crate::reducer::{Reducer, combine_reducers};
use crate::selector::Selector;
use crate::strict::{Mode, StrictDict, StrictNode, deep_strict};
use crate::tree::{Node, Tree};
use indexmap::IndexMap;
use serde_json::Value;

/// The composed, namespaced store
#[derive(Debug, Clone)]
pub struct ComposedStore<T> {
    pub actions: Tree<ActionCreator>,
    pub action_types: Tree<String>,
    pub reducer: Reducer,
    pub selectors: Tree<Selector>,
    pub thunk_actions: Tree<T>,
    pub types: Tree<Value>,
    /// Every action type, prefixed with `Global.`
    pub global_action_types: Tree<String>,
}

impl<T> ComposedStore<T> {
    pub fn action(&self, path: &str) -> Result<&ActionCreator> {
        self.actions.leaf(path).ok_or_else(|| not_found(path))
    }

    pub fn action_type(&self, path: &str) -> Result<&str> {
        self.action_types
            .leaf(path)
            .map(String::as_str)
            .ok_or_else(|| not_found(path))
    }

    pub fn selector(&self, path: &str) -> Result<&Selector> {
        self.selectors.leaf(path).ok_or_else(|| not_found(path))
    }

    pub fn thunk(&self, path: &str) -> Result<&T> {
        self.thunk_actions.leaf(path).ok_or_else(|| not_found(path))
    }

    /// Actions behind checked reads at every level
    pub fn strict_actions(&self, mode: Mode) -> StrictDict<StrictNode<ActionCreator>> {
        deep_strict(self.actions.clone(), mode)
    }

    /// Selectors behind checked reads at every level
    pub fn strict_selectors(&self, mode: Mode) -> StrictDict<StrictNode<Selector>> {
        deep_strict(self.selectors.clone(), mode)
    }
}

impl<T: Clone> ComposedStore<T> {
    /// Thunks behind checked reads at every level
    pub fn strict_thunks(&self, mode: Mode) -> StrictDict<StrictNode<T>> {
        deep_strict(self.thunk_actions.clone(), mode)
    }
}

fn not_found(path: &str) -> StoreError {
    StoreError::KeyNotFound {
        path: path.to_string(),
    }
}

/// Builder that walks a module mapping and assembles a [`ComposedStore`].
///
/// ```
/// use ns_store::{ConnectedStore, ModuleDef, action, mk_reducer, Handlers};
/// use serde_json::json;
///
/// let mut mapping = indexmap::IndexMap::new();
/// mapping.insert(
///     "counter".to_string(),
///     ModuleDef::<()>::new()
///         .with_action("load", action("LOAD", &["value"]))
///         .with_reducer(mk_reducer(json!({ "value": 0 }), Handlers::new())),
/// );
///
/// let mut connected = ConnectedStore::new(mapping);
/// connected.load();
/// let store = connected.store();
/// assert_eq!(store.action_type("counter.load").unwrap(), "counter.LOAD");
/// ```
pub struct ConnectedStore<T> {
    mapping: IndexMap<String, ModuleDef<T>>,
    parts: ModuleParts<T>,
    reducer: Reducer,
    global_action_types: Tree<String>,
}

impl<T: Clone> ConnectedStore<T> {
    pub fn new(mapping: IndexMap<String, ModuleDef<T>>) -> Self {
        Self {
            mapping,
            parts: ModuleParts::default(),
            reducer: combine_reducers(IndexMap::new()),
            global_action_types: Tree::new(),
        }
    }

    /// Mount every module, then combine reducers and derive global types
    pub fn load(&mut self) {
        let mut parts = ModuleParts::default();
        for (name, def) in &self.mapping {
            parts.merge(Module::new(&NsPath::root(), name, def).load());
        }
        log::debug!(
            "Connected {} module(s): {} action(s), {} selector(s), {} reducer(s)",
            self.mapping.len(),
            parts.action_types.leaves().len(),
            parts.selectors.leaves().len(),
            parts.reducers.leaves().len(),
        );

        self.reducer = deep_combine_reducers(&parts.reducers, &NsPath::root());
        self.global_action_types = make_global_types(&parts.action_types);
        self.parts = parts;
    }

    pub fn store(&self) -> ComposedStore<T> {
        ComposedStore {
            actions: self.parts.actions.clone(),
            action_types: self.parts.action_types.clone(),
            reducer: self.reducer.clone(),
            selectors: self.parts.selectors.clone(),
            thunk_actions: self.parts.thunk_actions.clone(),
            types: self.parts.types.clone(),
            global_action_types: self.global_action_types.clone(),
        }
    }
}

/// Compose a module mapping in one call
pub fn connect_reducers<T: Clone>(mapping: IndexMap<String, ModuleDef<T>>) -> ComposedStore<T> {
    let mut connected = ConnectedStore::new(mapping);
    connected.load();
    connected.store()
}

/// Combine a reducer tree level by level. Leaves are mounted at their full path.
fn deep_combine_reducers(tree: &Tree<Reducer>, namespace: &NsPath) -> Reducer {
    let reducers = tree
        .iter()
        .map(|(key, node)| {
            let path = namespace.child(key);
            let reducer = match node {
                Node::Leaf(reducer) => reducer.namespaced(path),
                Node::Branch(branch) => deep_combine_reducers(branch, &path),
            };
            (key.clone(), reducer)
        })
        .collect();
    combine_reducers(reducers)
}

fn make_global_types(action_types: &Tree<String>) -> Tree<String> {
    action_types.map_with_path(|_, kind| global(kind))
}
