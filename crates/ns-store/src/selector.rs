//! Selectors - read-only accessors over state

use crate::path::NsPath;
use crate::reducer::State;
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

type SelectFn = dyn Fn(&State, &[Value]) -> Value + Send + Sync;

/// Selector - `(state, ...args) -> value`
#[derive(Clone)]
pub struct Selector(Arc<SelectFn>);

impl Selector {
    pub fn new<F>(select: F) -> Self
    where
        F: Fn(&State, &[Value]) -> Value + Send + Sync + 'static,
    {
        Self(Arc::new(select))
    }

    pub fn select(&self, state: &State) -> Value {
        self.select_with(state, &[])
    }

    pub fn select_with(&self, state: &State, args: &[Value]) -> Value {
        (self.0)(state, args)
    }

    /// Selector that only ever sees the slice of state at `path`
    pub fn scoped(&self, path: NsPath) -> Selector {
        let inner = self.clone();
        Selector::new(move |state, args| inner.select_with(path.substate(state), args))
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Selector")
    }
}

/// Entry of a module's selector tree
#[derive(Debug, Clone)]
pub enum SelectorNode {
    Leaf(Selector),
    Group(SelectorGroup),
}

/// Named selectors, possibly grouped under sub-paths
pub type SelectorGroup = IndexMap<String, SelectorNode>;

impl SelectorNode {
    pub fn leaf<F>(select: F) -> Self
    where
        F: Fn(&State, &[Value]) -> Value + Send + Sync + 'static,
    {
        SelectorNode::Leaf(Selector::new(select))
    }
}

impl From<Selector> for SelectorNode {
    fn from(selector: Selector) -> Self {
        SelectorNode::Leaf(selector)
    }
}

impl From<SelectorGroup> for SelectorNode {
    fn from(group: SelectorGroup) -> Self {
        SelectorNode::Group(group)
    }
}

/// Name of the identity selector added by [`simple_selectors`]
pub const ROOT_SELECTOR: &str = "root";

/// One field accessor per key, preceded by a `root` identity selector.
pub fn simple_selectors<I, S>(keys: I) -> SelectorGroup
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut selectors = SelectorGroup::new();
    selectors.insert(
        ROOT_SELECTOR.to_string(),
        SelectorNode::leaf(|state, _| state.clone()),
    );
    for key in keys {
        let key = key.into();
        let field = key.clone();
        selectors.insert(
            key,
            SelectorNode::leaf(move |state, _| {
                state.get(field.as_str()).cloned().unwrap_or(Value::Null)
            }),
        );
    }
    selectors
}

/// [`simple_selectors`] over the keys of an object (typically the initial state)
pub fn simple_selectors_for(shape: &Value) -> SelectorGroup {
    let keys: Vec<String> = shape
        .as_object()
        .map(|entries| entries.keys().cloned().collect())
        .unwrap_or_default();
    simple_selectors(keys)
}
