//! Modules - independently authored slices of the store
//!
//! A [`ModuleDef`] describes one slice without knowing where it will be
//! mounted. [`Module`] mounts a definition at a namespace path and produces
//! the namespaced [`ModuleParts`], recursing into child modules.

use crate::action::{ActionCreator, ActionDef};
use crate::path::NsPath;
use crate::reducer::Reducer;
use crate::selector::{Selector, SelectorGroup, SelectorNode};
use crate::tree::Tree;
use indexmap::IndexMap;
use serde_json::Value;

/// Everything a module contributes to the store
///
/// `T` is the thunk action type; the namespacing layer only copies thunks.
#[derive(Debug, Clone)]
pub struct ModuleDef<T> {
    pub actions: IndexMap<String, ActionDef>,
    pub reducer: Option<Reducer>,
    pub selectors: SelectorGroup,
    pub thunk_actions: IndexMap<String, T>,
    pub types: IndexMap<String, Value>,
    pub modules: IndexMap<String, ModuleDef<T>>,
}

impl<T> Default for ModuleDef<T> {
    fn default() -> Self {
        Self {
            actions: IndexMap::new(),
            reducer: None,
            selectors: SelectorGroup::new(),
            thunk_actions: IndexMap::new(),
            types: IndexMap::new(),
            modules: IndexMap::new(),
        }
    }
}

impl<T> ModuleDef<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_action(mut self, name: impl Into<String>, action: ActionDef) -> Self {
        self.actions.insert(name.into(), action);
        self
    }

    pub fn with_reducer(mut self, reducer: Reducer) -> Self {
        self.reducer = Some(reducer);
        self
    }

    pub fn with_selector(mut self, name: impl Into<String>, selector: impl Into<SelectorNode>) -> Self {
        self.selectors.insert(name.into(), selector.into());
        self
    }

    pub fn with_selectors(mut self, selectors: SelectorGroup) -> Self {
        self.selectors.extend(selectors);
        self
    }

    pub fn with_thunk(mut self, name: impl Into<String>, thunk: T) -> Self {
        self.thunk_actions.insert(name.into(), thunk);
        self
    }

    pub fn with_type(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.types.insert(name.into(), value.into());
        self
    }

    pub fn with_module(mut self, name: impl Into<String>, module: ModuleDef<T>) -> Self {
        self.modules.insert(name.into(), module);
        self
    }
}

/// Namespaced contributions of a module and all of its children
#[derive(Debug, Clone)]
pub struct ModuleParts<T> {
    pub actions: Tree<ActionCreator>,
    pub action_types: Tree<String>,
    pub reducers: Tree<Reducer>,
    pub selectors: Tree<Selector>,
    pub thunk_actions: Tree<T>,
    pub types: Tree<Value>,
}

impl<T> Default for ModuleParts<T> {
    fn default() -> Self {
        Self {
            actions: Tree::new(),
            action_types: Tree::new(),
            reducers: Tree::new(),
            selectors: Tree::new(),
            thunk_actions: Tree::new(),
            types: Tree::new(),
        }
    }
}

impl<T> ModuleParts<T> {
    /// Deep-merge another module's parts into these
    pub fn merge(&mut self, other: ModuleParts<T>) {
        self.actions.merge(other.actions);
        self.action_types.merge(other.action_types);
        self.reducers.merge(other.reducers);
        self.selectors.merge(other.selectors);
        self.thunk_actions.merge(other.thunk_actions);
        self.types.merge(other.types);
    }
}

/// A module definition mounted at a namespace
pub struct Module<'a, T> {
    namespace: NsPath,
    def: &'a ModuleDef<T>,
}

impl<'a, T: Clone> Module<'a, T> {
    pub fn new(parent: &NsPath, name: &str, def: &'a ModuleDef<T>) -> Self {
        let namespace = parent.child(name);
        log::trace!("Mounting module at \"{}\"", namespace);
        Self { namespace, def }
    }

    pub fn namespace(&self) -> &NsPath {
        &self.namespace
    }

    /// Namespace this module and, recursively, its children
    pub fn load(&self) -> ModuleParts<T> {
        let (actions, action_types) = self.load_actions();
        let mut parts = ModuleParts {
            actions,
            action_types,
            reducers: self.load_reducer(),
            selectors: self.load_selectors(),
            thunk_actions: self.load_thunk_actions(),
            types: self.load_types(),
        };
        for child in self.load_modules() {
            parts.merge(child);
        }
        parts
    }

    fn load_actions(&self) -> (Tree<ActionCreator>, Tree<String>) {
        let mut actions = Tree::new();
        let mut action_types = Tree::new();
        for (name, def) in &self.def.actions {
            let path = self.namespace.child(name);
            let creator = def.namespaced(&self.namespace);
            action_types.insert(&path, creator.kind().to_string());
            actions.insert(&path, creator);
        }
        (actions, action_types)
    }

    fn load_reducer(&self) -> Tree<Reducer> {
        let mut reducers = Tree::new();
        if let Some(reducer) = &self.def.reducer {
            reducers.insert(&self.namespace, reducer.clone());
        }
        reducers
    }

    fn load_selectors(&self) -> Tree<Selector> {
        let mut selectors = Tree::new();
        self.collect_selectors(&self.def.selectors, &NsPath::root(), &mut selectors);
        selectors
    }

    /// Leaves of a group at `group_path` read the state at `namespace.group_path`
    fn collect_selectors(&self, group: &SelectorGroup, group_path: &NsPath, out: &mut Tree<Selector>) {
        for (name, node) in group {
            match node {
                SelectorNode::Leaf(selector) => {
                    let state_path = self.namespace.concat(group_path);
                    log::trace!("Selector \"{}\" reads \"{}\"", state_path.child(name), state_path);
                    out.insert(&state_path.child(name), selector.scoped(state_path.clone()));
                }
                SelectorNode::Group(inner) => {
                    self.collect_selectors(inner, &group_path.child(name), out)
                }
            }
        }
    }

    fn load_thunk_actions(&self) -> Tree<T> {
        let mut thunks = Tree::new();
        for (name, thunk) in &self.def.thunk_actions {
            thunks.insert(&self.namespace.child(name), thunk.clone());
        }
        thunks
    }

    fn load_types(&self) -> Tree<Value> {
        let mut types = Tree::new();
        for (name, value) in &self.def.types {
            types.insert(&self.namespace.child(name), value.clone());
        }
        types
    }

    fn load_modules(&self) -> Vec<ModuleParts<T>> {
        self.def
            .modules
            .iter()
            .map(|(name, def)| Module::new(&self.namespace, name, def).load())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{Action, action};
    use crate::selector::simple_selectors;
    use serde_json::json;
    use std::sync::Arc;

    type Thunk = Arc<dyn Fn() -> i32 + Send + Sync>;

    fn leaf_module() -> ModuleDef<Thunk> {
        ModuleDef::new()
            .with_action("load", action("LOAD", &["value"]))
            .with_reducer(Reducer::new(|state, _| state.unwrap_or(json!({}))))
            .with_selectors(simple_selectors(["value"]))
            .with_thunk("fetch", Arc::new(|| 42) as Thunk)
            .with_type("limit", 3)
    }

    #[test]
    fn test_namespace_is_parent_plus_name() {
        let def = leaf_module();
        let module = Module::new(&NsPath::parse("course"), "counter", &def);
        assert_eq!(module.namespace().to_string(), "course.counter");
    }

    #[test]
    fn test_actions_are_namespaced() {
        let def = leaf_module();
        let parts = Module::new(&NsPath::root(), "counter", &def).load();

        assert_eq!(
            parts.action_types.leaf("counter.load").map(String::as_str),
            Some("counter.LOAD")
        );
        let creator = parts.actions.leaf("counter.load").unwrap();
        assert_eq!(
            creator.call(&[json!(5)]),
            Action::new("counter.LOAD").with("value", 5)
        );
    }

    #[test]
    fn test_reducer_is_registered_unwrapped_at_namespace() {
        let def = leaf_module();
        let parts = Module::new(&NsPath::root(), "counter", &def).load();
        let reducer = parts.reducers.leaf("counter").unwrap();
        assert_eq!(reducer.reduce_type(None, "ANY"), json!({}));
    }

    #[test]
    fn test_thunks_and_types_are_copied_unchanged() {
        let def = leaf_module();
        let parts = Module::new(&NsPath::root(), "counter", &def).load();

        let copied = parts.thunk_actions.leaf("counter.fetch").unwrap();
        assert!(Arc::ptr_eq(copied, &def.thunk_actions["fetch"]));
        assert_eq!(copied(), 42);
        assert_eq!(parts.types.leaf("counter.limit"), Some(&json!(3)));
    }

    #[test]
    fn test_selectors_read_module_slice() {
        let def = leaf_module();
        let parts = Module::new(&NsPath::root(), "counter", &def).load();
        let state = json!({ "counter": { "value": 9 }, "other": { "value": 1 } });

        let value = parts.selectors.leaf("counter.value").unwrap();
        assert_eq!(value.select(&state), json!(9));
        let root = parts.selectors.leaf("counter.root").unwrap();
        assert_eq!(root.select(&state), json!({ "value": 9 }));
    }

    #[test]
    fn test_grouped_selectors_read_group_slice() {
        let mut inner = SelectorGroup::new();
        inner.insert("deep".into(), SelectorNode::leaf(|state, _| state.clone()));
        let mut group = SelectorGroup::new();
        group.insert("label".into(), SelectorNode::leaf(|state, _| state["text"].clone()));
        group.insert("inner".into(), SelectorNode::Group(inner));

        let def: ModuleDef<Thunk> = ModuleDef::new().with_selector("view", group);
        let parts = Module::new(&NsPath::root(), "m", &def).load();
        let state = json!({ "m": { "view": { "text": "hi", "inner": 4 } } });

        assert_eq!(parts.selectors.leaf("m.view.label").unwrap().select(&state), json!("hi"));
        assert_eq!(parts.selectors.leaf("m.view.inner.deep").unwrap().select(&state), json!(4));
    }

    #[test]
    fn test_child_modules_are_mounted_below_parent() {
        let def: ModuleDef<Thunk> = ModuleDef::new()
            .with_action("reset", action("RESET", &[]))
            .with_module("counter", leaf_module());
        let parts = Module::new(&NsPath::root(), "course", &def).load();

        assert_eq!(
            parts.action_types.leaf("course.counter.load").map(String::as_str),
            Some("course.counter.LOAD")
        );
        assert_eq!(
            parts.action_types.leaf("course.reset").map(String::as_str),
            Some("course.RESET")
        );
        assert!(parts.reducers.leaf("course.counter").is_some());
        assert!(parts.thunk_actions.leaf("course.counter.fetch").is_some());
    }

    #[test]
    fn test_child_reducer_is_shadowed_by_parent_reducer() {
        let def = leaf_module().with_module("child", leaf_module());
        let parts = Module::new(&NsPath::root(), "parent", &def).load();

        assert!(parts.reducers.leaf("parent").is_some());
        assert!(parts.reducers.leaf("parent.child").is_none());
        // everything else of the child is still mounted
        assert!(parts.actions.leaf("parent.child.load").is_some());
    }
}
