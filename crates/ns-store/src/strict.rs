//! Strict dictionaries
//!
//! Reading a key that does not exist is almost always a typo in an action or
//! selector name. A [`StrictDict`] reports such reads: always in the log, and
//! as an error when running in [`Mode::Development`]. In production the read
//! yields `None` so end users never hit the failure.

use crate::error::{Result, StoreError};
use crate::path::NsPath;
use crate::tree::{Node, Tree};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::{Display, EnumString};

/// Environment variable selecting the [`Mode`]
pub const MODE_ENV_VAR: &str = "XBLOCK_ENV";

/// Runtime mode deciding how invalid reads are treated
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Invalid reads are errors
    Development,
    /// Invalid reads are logged and resolve to `None`
    #[default]
    Production,
}

impl Mode {
    /// Mode from `XBLOCK_ENV`, `Production` when unset or unknown.
    pub fn from_env() -> Self {
        Self::from_env_with(|name| std::env::var(name).ok()).unwrap_or_default()
    }

    /// Mode named by `XBLOCK_ENV` as seen through `lookup`.
    ///
    /// `None` when the variable is unset or names no mode; unknown values
    /// are logged.
    pub fn from_env_with(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let value = lookup(MODE_ENV_VAR)?;
        match Mode::from_str(value.trim()) {
            Ok(mode) => Some(mode),
            Err(_) => {
                log::warn!("Ignoring unknown {}={}", MODE_ENV_VAR, value);
                None
            }
        }
    }

    pub fn raises(&self) -> bool {
        matches!(self, Mode::Development)
    }

    /// Report an invalid read of `key`
    fn reject<T>(&self, key: &str, known: impl Iterator<Item = impl fmt::Display>) -> Result<Option<T>> {
        log::error!("{}", invalid_property_message(key, known));
        if self.raises() {
            Err(StoreError::InvalidProperty {
                key: key.to_string(),
            })
        } else {
            Ok(None)
        }
    }
}

fn invalid_property_message(key: &str, known: impl Iterator<Item = impl fmt::Display>) -> String {
    let known: Vec<String> = known.map(|k| k.to_string()).collect();
    format!("invalid property \"{}\" (known: [{}])", key, known.join(", "))
}

/// Insertion-ordered mapping with checked reads
#[derive(Clone, PartialEq)]
pub struct StrictDict<V> {
    entries: IndexMap<String, V>,
    mode: Mode,
}

impl<V> StrictDict<V> {
    pub fn new(entries: IndexMap<String, V>, mode: Mode) -> Self {
        Self { entries, mode }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Checked read.
    ///
    /// Missing keys are logged; they are an error in development mode and
    /// `Ok(None)` otherwise.
    pub fn get(&self, key: &str) -> Result<Option<&V>> {
        match self.entries.get(key) {
            Some(value) => Ok(Some(value)),
            None => self.mode.reject(key, self.entries.keys()),
        }
    }

    /// Read that fails on a missing key regardless of mode
    pub fn try_get(&self, key: &str) -> Result<&V> {
        self.entries
            .get(key)
            .ok_or_else(|| StoreError::InvalidProperty {
                key: key.to_string(),
            })
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.values()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, V> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Unchecked view of the wrapped map
    pub fn as_map(&self) -> &IndexMap<String, V> {
        &self.entries
    }

    pub fn into_inner(self) -> IndexMap<String, V> {
        self.entries
    }
}

impl<V: fmt::Debug> fmt::Debug for StrictDict<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

impl<'a, V> IntoIterator for &'a StrictDict<V> {
    type Item = (&'a String, &'a V);
    type IntoIter = indexmap::map::Iter<'a, String, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<V> IntoIterator for StrictDict<V> {
    type Item = (String, V);
    type IntoIter = indexmap::map::IntoIter<String, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Entry of a deeply strict mapping
#[derive(Debug, Clone, PartialEq)]
pub enum StrictNode<V> {
    Leaf(V),
    Dict(StrictDict<StrictNode<V>>),
}

impl<V> StrictNode<V> {
    pub fn as_leaf(&self) -> Option<&V> {
        match self {
            StrictNode::Leaf(value) => Some(value),
            StrictNode::Dict(_) => None,
        }
    }

    pub fn as_dict(&self) -> Option<&StrictDict<StrictNode<V>>> {
        match self {
            StrictNode::Leaf(_) => None,
            StrictNode::Dict(dict) => Some(dict),
        }
    }
}

impl<V> StrictDict<StrictNode<V>> {
    /// Checked read of a dotted path, level by level.
    ///
    /// Descending into a leaf counts as reading a missing key.
    pub fn lookup(&self, path: &str) -> Result<Option<&StrictNode<V>>> {
        let path = NsPath::parse(path);
        let Some((first, rest)) = path.segments().split_first() else {
            return Ok(None);
        };

        let Some(mut node) = self.get(first)? else {
            return Ok(None);
        };
        for segment in rest {
            node = match node {
                StrictNode::Dict(dict) => match dict.get(segment)? {
                    Some(next) => next,
                    None => return Ok(None),
                },
                StrictNode::Leaf(_) => return self.mode.reject(segment, std::iter::empty::<&str>()),
            };
        }
        Ok(Some(node))
    }

    /// Checked read of the value at a dotted path
    pub fn leaf(&self, path: &str) -> Result<Option<&V>> {
        match self.lookup(path)? {
            Some(StrictNode::Leaf(value)) => Ok(Some(value)),
            Some(StrictNode::Dict(dict)) => dict.mode.reject(path, dict.keys()),
            None => Ok(None),
        }
    }
}

/// Wrap a tree so every level performs checked reads
pub fn deep_strict<V>(tree: Tree<V>, mode: Mode) -> StrictDict<StrictNode<V>> {
    let entries = tree
        .into_children()
        .into_iter()
        .map(|(key, node)| {
            let node = match node {
                Node::Leaf(value) => StrictNode::Leaf(value),
                Node::Branch(branch) => StrictNode::Dict(deep_strict(branch, mode)),
            };
            (key, node)
        })
        .collect();
    StrictDict::new(entries, mode)
}
