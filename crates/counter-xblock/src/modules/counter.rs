//! Counter state: the last count received from the backend

use crate::thunk::ThunkAction;
use crate::thunk_actions;
use indexmap::IndexMap;
use ns_store::{
    action, connect_handlers, handler, mk_reducer, simple_selectors_for, ActionDef, Handler,
    ModuleDef, Reducer, SelectorGroup, State,
};
use serde_json::{json, Value};

pub const NAME: &str = "counter";

pub fn initial_state() -> State {
    json!({ "value": 0 })
}

pub fn actions() -> IndexMap<String, ActionDef> {
    let mut actions = IndexMap::new();
    actions.insert("load".to_string(), action("LOAD", &["value"]));
    actions
}

fn action_handlers() -> IndexMap<String, Handler> {
    let mut handlers = IndexMap::new();
    handlers.insert(
        "load".to_string(),
        handler(|state, action| {
            let mut next = state.as_object().cloned().unwrap_or_default();
            next.insert(
                "value".to_string(),
                action.field("value").cloned().unwrap_or(Value::Null),
            );
            Value::Object(next)
        }),
    );
    handlers
}

pub fn reducer() -> ns_store::Result<Reducer> {
    let handlers = connect_handlers(&actions(), action_handlers())?;
    Ok(mk_reducer(initial_state(), handlers))
}

pub fn selectors() -> SelectorGroup {
    simple_selectors_for(&initial_state())
}

pub fn module() -> ns_store::Result<ModuleDef<ThunkAction>> {
    let mut def = ModuleDef::new()
        .with_reducer(reducer()?)
        .with_selectors(selectors())
        .with_thunk("update_count", thunk_actions::counter::update_count());
    def.actions = actions();
    Ok(def)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ns_store::Action;

    #[test]
    fn test_initial_state() {
        let reducer = reducer().unwrap();
        assert_eq!(reducer.reduce_type(None, "@@INIT"), json!({ "value": 0 }));
    }

    #[test]
    fn test_load_sets_value() {
        let reducer = reducer().unwrap();
        let load = actions()["load"].create(&[json!(12)]);
        assert_eq!(load, Action::new("LOAD").with("value", 12));

        let state = reducer.reduce(Some(json!({ "value": 3, "other": true })), &load);
        assert_eq!(state, json!({ "value": 12, "other": true }));
    }

    #[test]
    fn test_unrelated_actions_keep_state() {
        let reducer = reducer().unwrap();
        let state = reducer.reduce_type(Some(json!({ "value": 3 })), "Global.LOAD");
        assert_eq!(state, json!({ "value": 3 }));
    }

    #[test]
    fn test_selectors_mirror_state_keys() {
        let selectors = selectors();
        assert_eq!(selectors.keys().collect::<Vec<_>>(), vec!["root", "value"]);
    }
}
