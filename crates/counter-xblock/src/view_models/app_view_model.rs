use crate::xblock::Element;
use ns_store::{Selector, State};
use serde_json::Value;

/// View model for the counter view - pre-formatted for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    /// Count held by the store
    pub count: String,
    /// Count shown on the block's own label
    pub label: String,
    pub button: &'static str,
}

impl AppViewModel {
    pub fn from_state(state: &State, count: &Selector, element: &Element) -> Self {
        Self {
            count: format_count(&count.select(state)),
            label: element.count_label(),
            button: "Click me to increment!",
        }
    }
}

fn format_count(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_count_formatting() {
        assert_eq!(format_count(&json!(3)), "3");
        assert_eq!(format_count(&json!(null)), "");
        assert_eq!(format_count(&json!("7")), "7");
    }

    #[test]
    fn test_reads_count_through_selector() {
        let selector = Selector::new(|state, _| state["counter"]["value"].clone());
        let element = Element::new("block");
        element.set_count_label("1");

        let vm = AppViewModel::from_state(&json!({ "counter": { "value": 4 } }), &selector, &element);
        assert_eq!(vm.count, "4");
        assert_eq!(vm.label, "1");
    }
}
