//! Namespace paths
//!
//! Modules live at dotted paths such as `counter` or `course.progress`.
//! Internally a path is an ordered list of segments; the dotted string is
//! only produced where it leaves the crate (action `type` fields, log output).

use serde_json::Value;
use std::fmt;

/// Separator between namespace segments
pub const SEPARATOR: &str = ".";

/// Namespace under which a reducer sees actions that were not addressed to it
pub const GLOBAL_NAMESPACE: &str = "Global";

static NULL: Value = Value::Null;

/// Join path segments with `.`, skipping empty segments.
///
/// ```
/// use ns_store::join;
///
/// assert_eq!(join(&["a", "long", "", "path"]), "a.long.path");
/// ```
pub fn join<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(AsRef::as_ref)
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// Prefix an action type with the global namespace
pub fn global(kind: &str) -> String {
    join(&[GLOBAL_NAMESPACE, kind])
}

/// Location of a module (or of anything registered by a module) in the composed store
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NsPath {
    segments: Vec<String>,
}

impl NsPath {
    /// The empty path
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a dotted path. Empty segments are dropped.
    pub fn parse(path: &str) -> Self {
        Self {
            segments: path
                .split(SEPARATOR)
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Last segment, if any
    pub fn name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Path of a child entry. `name` may itself be dotted.
    pub fn child(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(
            name.split(SEPARATOR)
                .filter(|segment| !segment.is_empty())
                .map(str::to_string),
        );
        Self { segments }
    }

    /// Concatenate two paths
    pub fn concat(&self, other: &NsPath) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Self { segments }
    }

    /// Fully qualified form of a module-local action type
    pub fn qualify(&self, local: &str) -> String {
        join(&[self.to_string().as_str(), local])
    }

    /// Translate an incoming action type into what a reducer mounted here sees.
    ///
    /// Types addressed to this path lose the `"<path>."` prefix; every other
    /// type is moved under the global namespace.
    pub fn unqualify(&self, kind: &str) -> String {
        let prefix = format!("{}{}", self, SEPARATOR);
        match kind.strip_prefix(prefix.as_str()) {
            Some(local) => local.to_string(),
            None => global(kind),
        }
    }

    /// Slice of `state` located at this path, or `null` when absent
    pub fn substate<'a>(&self, state: &'a Value) -> &'a Value {
        let mut current = state;
        for segment in &self.segments {
            match current.get(segment.as_str()) {
                Some(next) => current = next,
                None => return &NULL,
            }
        }
        current
    }
}

impl fmt::Display for NsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join(SEPARATOR))
    }
}

impl From<&str> for NsPath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_join_drops_empty_segments() {
        assert_eq!(join(&["a", "", "b", ""]), "a.b");
        assert_eq!(join(&["", ""]), "");
        assert_eq!(join::<&str>(&[]), "");
    }

    #[test]
    fn test_join_is_associative() {
        let inner = join(&["a", "b"]);
        assert_eq!(join(&[inner.as_str(), "c"]), join(&["a", "b", "c"]));

        let inner = join(&["b", "c"]);
        assert_eq!(join(&["a", inner.as_str()]), join(&["a", "b", "c"]));

        let inner = join(&["", "b"]);
        assert_eq!(join(&[inner.as_str(), "c"]), join(&["", "b", "c"]));
    }

    #[test]
    fn test_child_and_display() {
        let path = NsPath::root().child("course").child("counter");
        assert_eq!(path.to_string(), "course.counter");
        assert_eq!(path.name(), Some("counter"));
        assert_eq!(NsPath::root().child("a.b").segments(), &["a", "b"]);
        assert_eq!(NsPath::parse("a..b."), NsPath::parse("a.b"));
    }

    #[test]
    fn test_qualify() {
        assert_eq!(NsPath::parse("module1").qualify("LOAD"), "module1.LOAD");
        assert_eq!(NsPath::root().qualify("LOAD"), "LOAD");
    }

    #[test]
    fn test_unqualify_strips_own_namespace() {
        let path = NsPath::parse("module1");
        assert_eq!(path.unqualify("module1.LOAD"), "LOAD");
        assert_eq!(path.unqualify("module1.sub.LOAD"), "sub.LOAD");
    }

    #[test]
    fn test_unqualify_prefixes_foreign_types_with_global() {
        let path = NsPath::parse("module1");
        assert_eq!(path.unqualify("UPDATE"), "Global.UPDATE");
        assert_eq!(path.unqualify("module2.LOAD"), "Global.module2.LOAD");
        // a sibling sharing a name prefix is not the same namespace
        assert_eq!(path.unqualify("module10.LOAD"), "Global.module10.LOAD");
    }

    #[test]
    fn test_substate() {
        let state = json!({ "a": { "b": { "value": 3 } } });
        assert_eq!(NsPath::parse("a.b").substate(&state), &json!({ "value": 3 }));
        assert_eq!(NsPath::root().substate(&state), &state);
        assert_eq!(NsPath::parse("a.missing").substate(&state), &Value::Null);
    }
}
