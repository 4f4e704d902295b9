//! Actions and action creators
//!
//! A module declares its actions as [`ActionDef`]s: a module-local type plus
//! a function turning positional arguments into named fields. Once the module
//! is mounted, each definition becomes an [`ActionCreator`] whose type is
//! qualified with the module's namespace.

use crate::path::NsPath;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Named fields carried by an action
pub type Payload = Map<String, Value>;

type PayloadFn = dyn Fn(&[Value]) -> Payload + Send + Sync;

/// A dispatched action: `{"type": ..., ...fields}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub fields: Payload,
}

impl Action {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            fields: Payload::new(),
        }
    }

    /// Add a named field
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Same action under a different type
    pub fn retyped(&self, kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            fields: self.fields.clone(),
        }
    }
}

impl From<&str> for Action {
    fn from(kind: &str) -> Self {
        Self::new(kind)
    }
}

impl From<String> for Action {
    fn from(kind: String) -> Self {
        Self::new(kind)
    }
}

/// Module-local action definition
#[derive(Clone)]
pub struct ActionDef {
    kind: String,
    build: Arc<PayloadFn>,
}

impl ActionDef {
    /// Definition with a custom payload builder
    pub fn new<F>(kind: impl Into<String>, build: F) -> Self
    where
        F: Fn(&[Value]) -> Payload + Send + Sync + 'static,
    {
        Self {
            kind: kind.into(),
            build: Arc::new(build),
        }
    }

    /// Module-local type
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Named fields for the given positional arguments
    pub fn payload(&self, args: &[Value]) -> Payload {
        (self.build)(args)
    }

    /// Un-namespaced action, as the module sees it locally
    pub fn create(&self, args: &[Value]) -> Action {
        let mut fields = self.payload(args);
        fields.remove("type");
        Action {
            kind: self.kind.clone(),
            fields,
        }
    }

    /// Creator whose actions carry the type qualified with `namespace`
    pub fn namespaced(&self, namespace: &NsPath) -> ActionCreator {
        ActionCreator {
            kind: namespace.qualify(&self.kind),
            build: Arc::clone(&self.build),
        }
    }
}

impl fmt::Debug for ActionDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionDef").field("kind", &self.kind).finish()
    }
}

/// Action creator from a type and an ordered list of parameter names.
///
/// Argument `i` is stored under `params[i]`. Surplus arguments are ignored,
/// missing ones become `null`. With duplicate names the later argument wins.
///
/// ```
/// use ns_store::action;
/// use serde_json::json;
///
/// let load = action("LOAD", &["value"]);
/// assert_eq!(load.payload(&[json!(3)])["value"], json!(3));
/// ```
pub fn action(kind: impl Into<String>, params: &[&str]) -> ActionDef {
    let params: Vec<String> = params.iter().map(|param| param.to_string()).collect();
    ActionDef::new(kind, move |args| {
        params
            .iter()
            .enumerate()
            .map(|(index, name)| (name.clone(), args.get(index).cloned().unwrap_or(Value::Null)))
            .collect()
    })
}

/// Store-level action creator with a namespace-qualified type
#[derive(Clone)]
pub struct ActionCreator {
    kind: String,
    build: Arc<PayloadFn>,
}

impl ActionCreator {
    /// Qualified type of the created actions
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn call(&self, args: &[Value]) -> Action {
        let mut fields = (self.build)(args);
        fields.remove("type");
        Action {
            kind: self.kind.clone(),
            fields,
        }
    }
}

impl fmt::Debug for ActionCreator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionCreator").field("kind", &self.kind).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_action_maps_positional_args_to_names() {
        let def = action("TyPE", &["param1", "param2"]);
        assert_eq!(def.kind(), "TyPE");

        let payload = def.payload(&[json!("P1"), json!("p3")]);
        assert_eq!(Value::Object(payload), json!({ "param1": "P1", "param2": "p3" }));
    }

    #[test]
    fn test_action_create_includes_type() {
        let action = action("T", &["a", "b"]).create(&[json!(1), json!(2)]);
        assert_eq!(action, Action::new("T").with("a", 1).with("b", 2));
        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            json!({ "type": "T", "a": 1, "b": 2 })
        );
    }

    #[test]
    fn test_action_ignores_surplus_and_nulls_missing_args() {
        let def = action("T", &["a", "b"]);
        let surplus = def.payload(&[json!(1), json!(2), json!(3)]);
        assert_eq!(Value::Object(surplus), json!({ "a": 1, "b": 2 }));

        let missing = def.payload(&[json!(1)]);
        assert_eq!(Value::Object(missing), json!({ "a": 1, "b": null }));
    }

    #[test]
    fn test_action_duplicate_names_keep_last_argument() {
        let payload = action("T", &["a", "a"]).payload(&[json!(1), json!(2)]);
        assert_eq!(Value::Object(payload), json!({ "a": 2 }));
    }

    #[test]
    fn test_namespaced_creator_overrides_type() {
        let def = ActionDef::new("LOAD", |args| {
            let mut payload = Payload::new();
            payload.insert("type".into(), json!("SOMETHING_ELSE"));
            payload.insert("value".into(), args.first().cloned().unwrap_or(Value::Null));
            payload
        });
        let creator = def.namespaced(&NsPath::parse("module1"));

        assert_eq!(creator.kind(), "module1.LOAD");
        assert_eq!(
            creator.call(&[json!("x")]),
            Action::new("module1.LOAD").with("value", "x")
        );
    }

    #[test]
    fn test_action_deserializes_from_record() {
        let action: Action =
            serde_json::from_value(json!({ "type": "counter.LOAD", "value": 4 })).unwrap();
        assert_eq!(action.kind(), "counter.LOAD");
        assert_eq!(action.field("value"), Some(&json!(4)));
    }

    #[test]
    fn test_bare_type_converts_to_action() {
        let action: Action = "UPDATE".into();
        assert_eq!(action, Action::new("UPDATE"));
        assert!(action.fields.is_empty());
    }
}
