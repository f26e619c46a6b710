//! The namespace tree: paths → weak record bindings.

use indexmap::IndexMap;
use vellum_core::{Liveness, RecordRef};

use crate::error::NamespaceError;
use crate::path::NamePath;

/// One node in the namespace tree.
///
/// A node either carries a record binding (a leaf) or children (an
/// interior node), never both — a record and a subtree cannot share a
/// name.
#[derive(Debug, Default)]
struct Node {
    children: IndexMap<String, Node>,
    binding: Option<RecordRef>,
}

impl Node {
    fn is_empty(&self) -> bool {
        self.children.is_empty() && self.binding.is_none()
    }
}

/// Hierarchical namespace of record bindings.
///
/// Bindings are weak: binding a record does not extend its lifetime,
/// and a binding whose record has been freed simply stops resolving.
/// Interior nodes are created on demand by [`Namespace::bind`] and
/// pruned by [`Namespace::unbind`] once nothing hangs off them.
#[derive(Debug, Default)]
pub struct Namespace {
    root: Node,
}

impl Namespace {
    /// Create an empty namespace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `path` to `record`.
    ///
    /// Idempotent for the same record under the same path. Fails with
    /// [`NamespaceError::PathCollision`] when the path is bound to a
    /// different record, when the terminal node already roots a
    /// subtree, or when an interior segment is itself a record binding.
    pub fn bind(&mut self, path: &NamePath, record: RecordRef) -> Result<(), NamespaceError> {
        let collision = || NamespaceError::PathCollision {
            path: path.to_string(),
        };

        let (last, interior) = path
            .segments()
            .split_last()
            .expect("NamePath is never empty");

        let mut node = &mut self.root;
        for segment in interior {
            node = node.children.entry(segment.clone()).or_default();
            if node.binding.is_some() {
                return Err(collision());
            }
        }

        let terminal = node.children.entry(last.clone()).or_default();
        if !terminal.children.is_empty() {
            return Err(collision());
        }
        match terminal.binding {
            Some(existing) if existing == record => Ok(()),
            Some(_) => Err(collision()),
            None => {
                terminal.binding = Some(record);
                Ok(())
            }
        }
    }

    /// Remove the binding at `path`, pruning interior nodes that
    /// become empty. Returns whether a binding was removed. The record
    /// itself is untouched.
    pub fn unbind(&mut self, path: &NamePath) -> bool {
        fn walk(node: &mut Node, segments: &[String]) -> bool {
            let (first, rest) = match segments.split_first() {
                Some(split) => split,
                None => return false,
            };
            let child = match node.children.get_mut(first) {
                Some(child) => child,
                None => return false,
            };
            let removed = if rest.is_empty() {
                child.binding.take().is_some()
            } else {
                walk(child, rest)
            };
            if removed && child.is_empty() {
                node.children.shift_remove(first);
            }
            removed
        }
        walk(&mut self.root, path.segments())
    }

    /// Resolve `path` to a live record reference.
    ///
    /// Returns `None` when the path is unbound *or* when the binding
    /// dangles — presence is not enough, the record must still be live.
    pub fn resolve(&self, path: &NamePath, liveness: &dyn Liveness) -> Option<RecordRef> {
        let mut node = &self.root;
        for segment in path.segments() {
            node = node.children.get(segment)?;
        }
        let record = node.binding?;
        liveness.is_live(record).then_some(record)
    }

    /// Number of bindings in the tree (live or dangling).
    pub fn len(&self) -> usize {
        fn count(node: &Node) -> usize {
            node.binding.is_some() as usize
                + node.children.values().map(count).sum::<usize>()
        }
        count(&self.root)
    }

    /// Whether the namespace holds no bindings.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Collect every binding as `(path, record)`, in tree order.
    ///
    /// Dangling bindings are included — this is the hook an external
    /// maintenance pass uses to sweep them.
    pub fn bindings(&self) -> Vec<(String, RecordRef)> {
        fn walk(node: &Node, prefix: &str, out: &mut Vec<(String, RecordRef)>) {
            if let Some(record) = node.binding {
                out.push((prefix.to_string(), record));
            }
            for (name, child) in &node.children {
                let path = if prefix.is_empty() {
                    name.clone()
                } else {
                    format!("{prefix}/{name}")
                };
                walk(child, &path, out);
            }
        }
        let mut out = Vec::new();
        walk(&self.root, "", &mut out);
        out
    }
}
