//! Reducers - pure functions producing the next state from state + action

use crate::action::{Action, ActionDef};
use crate::error::{Result, StoreError};
use crate::path::NsPath;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Store state. Its shape is decided by the mounted modules.
pub type State = Value;

/// Handler for a single action type
pub type Handler = Arc<dyn Fn(State, &Action) -> State + Send + Sync>;

/// Handlers keyed by action type
pub type Handlers = IndexMap<String, Handler>;

type ReduceFn = dyn Fn(Option<State>, &Action) -> State + Send + Sync;

/// Reducer - `(state, action) -> state`.
///
/// `None` state means "no state yet"; reducers answer it with their initial state.
#[derive(Clone)]
pub struct Reducer(Arc<ReduceFn>);

impl Reducer {
    pub fn new<F>(reduce: F) -> Self
    where
        F: Fn(Option<State>, &Action) -> State + Send + Sync + 'static,
    {
        Self(Arc::new(reduce))
    }

    pub fn reduce(&self, state: Option<State>, action: &Action) -> State {
        (self.0)(state, action)
    }

    /// Dispatch a bare type, without any fields
    pub fn reduce_type(&self, state: Option<State>, kind: &str) -> State {
        self.reduce(state, &Action::new(kind))
    }

    /// Reducer mounted at `namespace`.
    ///
    /// Incoming types addressed to the namespace are stripped of it; all other
    /// types reach the wrapped reducer under `Global.`.
    pub fn namespaced(&self, namespace: NsPath) -> Reducer {
        let inner = self.clone();
        Reducer::new(move |state, action| {
            let local = action.retyped(namespace.unqualify(action.kind()));
            inner.reduce(state, &local)
        })
    }
}

impl fmt::Debug for Reducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Reducer")
    }
}

/// Wrap a closure as a [`Handler`]
pub fn handler<F>(handle: F) -> Handler
where
    F: Fn(State, &Action) -> State + Send + Sync + 'static,
{
    Arc::new(handle)
}

/// Reducer from an initial state and one handler per action type.
///
/// Unknown types leave the state untouched.
pub fn mk_reducer(initial_state: State, handlers: Handlers) -> Reducer {
    Reducer::new(move |state, action| {
        let state = state.unwrap_or_else(|| initial_state.clone());
        match handlers.get(action.kind()) {
            Some(handle) => handle(state, action),
            None => state,
        }
    })
}

/// Combine reducers into one reducer over an object with one entry per key.
///
/// Each reducer only sees its own entry. Entries that are missing from the
/// incoming state (or a non-object state) reach their reducer as `None`.
pub fn combine_reducers(reducers: IndexMap<String, Reducer>) -> Reducer {
    Reducer::new(move |state, action| {
        let mut previous = match state {
            Some(Value::Object(entries)) => entries,
            _ => Map::new(),
        };
        let next: Map<String, Value> = reducers
            .iter()
            .map(|(key, reducer)| (key.clone(), reducer.reduce(previous.remove(key), action)))
            .collect();
        Value::Object(next)
    })
}

/// Re-key handlers from action names to the local type of the same-named action.
///
/// Lets a module write `{ load: handler }` instead of repeating `"LOAD"`.
pub fn connect_handlers(
    actions: &IndexMap<String, ActionDef>,
    handlers: IndexMap<String, Handler>,
) -> Result<Handlers> {
    handlers
        .into_iter()
        .map(|(name, handle)| {
            actions
                .get(&name)
                .map(|def| (def.kind().to_string(), handle))
                .ok_or(StoreError::KeyNotFound { path: name })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::action;
    use serde_json::json;

    fn merge_handler() -> Handler {
        handler(|state, action| {
            let mut merged = state.as_object().cloned().unwrap_or_default();
            merged.extend(action.fields.clone());
            merged.insert("type".into(), json!(action.kind()));
            Value::Object(merged)
        })
    }

    fn reducer() -> Reducer {
        let mut handlers = Handlers::new();
        handlers.insert("Type".into(), merge_handler());
        mk_reducer(json!({ "initial": "state" }), handlers)
    }

    #[test]
    fn test_mk_reducer_ignores_unknown_types() {
        let state = json!({ "a": "state" });
        assert_eq!(reducer().reduce(Some(state.clone()), &Action::new("BAD ACTION")), state);
    }

    #[test]
    fn test_mk_reducer_defaults_to_initial_state() {
        assert_eq!(
            reducer().reduce(None, &Action::new("BAD ACTION")),
            json!({ "initial": "state" })
        );
    }

    #[test]
    fn test_mk_reducer_handles_known_types() {
        let action = Action::new("Type").with("key", "VALUE");
        assert_eq!(
            reducer().reduce(Some(json!({ "a": "state" })), &action),
            json!({ "a": "state", "type": "Type", "key": "VALUE" })
        );
    }

    #[test]
    fn test_mk_reducer_accepts_bare_type() {
        assert_eq!(
            reducer().reduce_type(Some(json!({})), "Type"),
            json!({ "type": "Type" })
        );
    }

    #[test]
    fn test_namespaced_reducer_rewrites_types() {
        let seen = Reducer::new(|_, action| json!(action.kind()));
        let namespaced = seen.namespaced(NsPath::parse("a.b"));

        assert_eq!(namespaced.reduce_type(None, "a.b.LOAD"), json!("LOAD"));
        assert_eq!(namespaced.reduce_type(None, "a.LOAD"), json!("Global.a.LOAD"));
        assert_eq!(namespaced.reduce_type(None, "UPDATE"), json!("Global.UPDATE"));
    }

    #[test]
    fn test_combine_reducers_routes_slices() {
        let mut reducers = IndexMap::new();
        reducers.insert(
            "count".to_string(),
            Reducer::new(|state, action| match action.kind() {
                "INC" => json!(state.and_then(|s| s.as_i64()).unwrap_or(0) + 1),
                _ => state.unwrap_or(json!(0)),
            }),
        );
        reducers.insert(
            "label".to_string(),
            Reducer::new(|state, _| state.unwrap_or(json!("none"))),
        );
        let combined = combine_reducers(reducers);

        assert_eq!(combined.reduce_type(None, "INIT"), json!({ "count": 0, "label": "none" }));
        assert_eq!(
            combined.reduce_type(Some(json!({ "count": 4, "label": "x" })), "INC"),
            json!({ "count": 5, "label": "x" })
        );
    }

    #[test]
    fn test_combine_reducers_without_reducers_yields_empty_object() {
        let combined = combine_reducers(IndexMap::new());
        assert_eq!(combined.reduce_type(Some(json!({ "stale": 1 })), "X"), json!({}));
    }

    #[test]
    fn test_connect_handlers_keys_by_action_type() {
        let mut actions = IndexMap::new();
        actions.insert("action1".to_string(), action("key1", &[]));
        actions.insert("action2".to_string(), action("key2", &[]));

        let mut handlers = IndexMap::new();
        handlers.insert("action1".to_string(), handler(|_, _| json!(1)));
        handlers.insert("action2".to_string(), handler(|_, _| json!(2)));

        let connected = connect_handlers(&actions, handlers).unwrap();
        assert_eq!(connected.keys().collect::<Vec<_>>(), vec!["key1", "key2"]);
        assert_eq!(connected["key2"](json!(null), &Action::new("key2")), json!(2));
    }

    #[test]
    fn test_connect_handlers_rejects_unknown_action() {
        let mut handlers = IndexMap::new();
        handlers.insert("missing".to_string(), handler(|state, _| state));

        let err = connect_handlers(&IndexMap::new(), handlers).err();
        assert_eq!(
            err,
            Some(StoreError::KeyNotFound {
                path: "missing".into()
            })
        );
    }
}
