//! Namespace trees
//!
//! Every part of a composed store (actions, selectors, reducers, ...) is kept
//! as a nested, insertion-ordered mapping mirroring the module layout.

use crate::path::NsPath;
use indexmap::IndexMap;

/// Entry of a [`Tree`]
#[derive(Debug, Clone, PartialEq)]
pub enum Node<V> {
    Leaf(V),
    Branch(Tree<V>),
}

impl<V> Node<V> {
    pub fn as_leaf(&self) -> Option<&V> {
        match self {
            Node::Leaf(value) => Some(value),
            Node::Branch(_) => None,
        }
    }

    pub fn as_branch(&self) -> Option<&Tree<V>> {
        match self {
            Node::Leaf(_) => None,
            Node::Branch(tree) => Some(tree),
        }
    }
}

/// Nested mapping from path segments to values
#[derive(Debug, Clone, PartialEq)]
pub struct Tree<V> {
    children: IndexMap<String, Node<V>>,
}

impl<V> Default for Tree<V> {
    fn default() -> Self {
        Self {
            children: IndexMap::new(),
        }
    }
}

impl<V> Tree<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.children.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Node<V>)> {
        self.children.iter()
    }

    /// Direct child
    pub fn get(&self, key: &str) -> Option<&Node<V>> {
        self.children.get(key)
    }

    /// Entry at a (possibly nested) path
    pub fn get_path(&self, path: &NsPath) -> Option<&Node<V>> {
        let (first, rest) = path.segments().split_first()?;
        let mut node = self.children.get(first)?;
        for segment in rest {
            node = node.as_branch()?.children.get(segment)?;
        }
        Some(node)
    }

    /// Value stored at a dotted path
    pub fn leaf(&self, path: &str) -> Option<&V> {
        self.get_path(&NsPath::parse(path))?.as_leaf()
    }

    /// Sub-tree stored at a dotted path
    pub fn branch(&self, path: &str) -> Option<&Tree<V>> {
        self.get_path(&NsPath::parse(path))?.as_branch()
    }

    /// Store `value` at `path`, creating intermediate branches.
    ///
    /// An existing entry at `path` is replaced. When an intermediate segment
    /// already holds a leaf the value is dropped and `false` is returned.
    pub fn insert(&mut self, path: &NsPath, value: V) -> bool {
        let Some((last, parents)) = path.segments().split_last() else {
            log::warn!("Ignoring value registered at the root path");
            return false;
        };

        let mut tree = self;
        for segment in parents {
            let node = tree
                .children
                .entry(segment.clone())
                .or_insert_with(|| Node::Branch(Tree::new()));
            match node {
                Node::Branch(next) => tree = next,
                Node::Leaf(_) => {
                    log::warn!("\"{}\" is shadowed by a value at \"{}\"", path, segment);
                    return false;
                }
            }
        }
        tree.children.insert(last.clone(), Node::Leaf(value));
        true
    }

    /// Deep-merge `other` into this tree. On conflicts involving a leaf the
    /// entry already present wins.
    pub fn merge(&mut self, other: Tree<V>) {
        for (key, incoming) in other.children {
            let Some(existing) = self.children.get_mut(&key) else {
                self.children.insert(key, incoming);
                continue;
            };
            match (existing, incoming) {
                (Node::Branch(existing), Node::Branch(incoming)) => existing.merge(incoming),
                _ => log::warn!("Conflicting entries at \"{}\", keeping the first", key),
            }
        }
    }

    /// Transform every leaf, passing along its full path
    pub fn map_with_path<U, F>(&self, f: F) -> Tree<U>
    where
        F: Fn(&NsPath, &V) -> U,
    {
        self.map_at(&NsPath::root(), &f)
    }

    fn map_at<U, F>(&self, at: &NsPath, f: &F) -> Tree<U>
    where
        F: Fn(&NsPath, &V) -> U,
    {
        let children = self
            .children
            .iter()
            .map(|(key, node)| {
                let path = at.child(key);
                let mapped = match node {
                    Node::Leaf(value) => Node::Leaf(f(&path, value)),
                    Node::Branch(tree) => Node::Branch(tree.map_at(&path, f)),
                };
                (key.clone(), mapped)
            })
            .collect();
        Tree { children }
    }

    /// All leaves with their full paths, depth first
    pub fn leaves(&self) -> Vec<(NsPath, &V)> {
        let mut out = Vec::new();
        self.collect_leaves(&NsPath::root(), &mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, at: &NsPath, out: &mut Vec<(NsPath, &'a V)>) {
        for (key, node) in &self.children {
            let path = at.child(key);
            match node {
                Node::Leaf(value) => out.push((path, value)),
                Node::Branch(tree) => tree.collect_leaves(&path, out),
            }
        }
    }

    pub(crate) fn into_children(self) -> IndexMap<String, Node<V>> {
        self.children
    }
}

impl<V> FromIterator<(String, Node<V>)> for Tree<V> {
    fn from_iter<I: IntoIterator<Item = (String, Node<V>)>>(iter: I) -> Self {
        Self {
            children: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(p: &str) -> NsPath {
        NsPath::parse(p)
    }

    #[test]
    fn test_insert_creates_branches() {
        let mut tree = Tree::new();
        assert!(tree.insert(&path("a.b.c"), 1));
        assert!(tree.insert(&path("a.d"), 2));

        assert_eq!(tree.leaf("a.b.c"), Some(&1));
        assert_eq!(tree.leaf("a.d"), Some(&2));
        assert_eq!(tree.branch("a").map(Tree::len), Some(2));
        assert_eq!(tree.leaf("a.b"), None);
    }

    #[test]
    fn test_insert_replaces_existing_entry() {
        let mut tree = Tree::new();
        tree.insert(&path("a"), 1);
        tree.insert(&path("a"), 2);
        assert_eq!(tree.leaf("a"), Some(&2));
    }

    #[test]
    fn test_insert_below_leaf_is_dropped() {
        let mut tree = Tree::new();
        tree.insert(&path("a"), 1);
        assert!(!tree.insert(&path("a.b"), 2));
        assert_eq!(tree.leaf("a"), Some(&1));
    }

    #[test]
    fn test_insert_at_root_is_dropped() {
        let mut tree = Tree::new();
        assert!(!tree.insert(&NsPath::root(), 1));
        assert!(tree.is_empty());
    }

    #[test]
    fn test_merge_is_deep() {
        let mut left = Tree::new();
        left.insert(&path("a.b"), 1);
        left.insert(&path("x"), 9);
        let mut right = Tree::new();
        right.insert(&path("a.c"), 2);
        right.insert(&path("x"), 10);

        left.merge(right);
        assert_eq!(left.leaf("a.b"), Some(&1));
        assert_eq!(left.leaf("a.c"), Some(&2));
        assert_eq!(left.leaf("x"), Some(&9));
    }

    #[test]
    fn test_map_with_path_and_leaves() {
        let mut tree = Tree::new();
        tree.insert(&path("a.b"), 1);
        tree.insert(&path("c"), 2);

        let mapped = tree.map_with_path(|p, v| format!("{p}={v}"));
        assert_eq!(mapped.leaf("a.b").map(String::as_str), Some("a.b=1"));

        let leaves: Vec<_> = tree
            .leaves()
            .into_iter()
            .map(|(p, v)| (p.to_string(), *v))
            .collect();
        assert_eq!(leaves, vec![("a.b".to_string(), 1), ("c".to_string(), 2)]);
    }
}
