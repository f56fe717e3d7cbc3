//! Visitors assembled from closures at runtime.
//!
//! Trait visitors always have a method for every kind, so they cannot miss.
//! A [`VisitorTable`] only handles what was registered on it and reports a
//! [`TypeMismatchError`] for anything else.

use std::fmt;

use tracing::debug;

use crate::error::TypeMismatchError;
use crate::kind::{Category, NodeKind};
use crate::node::TreeNode;

use super::VisitResult;

type Handler<'a> = Box<dyn FnMut(&TreeNode) -> VisitResult + 'a>;

/// Runtime visitor made of per-kind, per-category and catch-all handlers.
///
/// Lookup order is kind, then category, then the catch-all.
///
/// ```rust
/// use amper_tree::{NodeKind, SyntaxTree, TreeBuilder};
/// use amper_tree::visitor::VisitorTable;
///
/// let mut builder = TreeBuilder::new();
/// builder.start_node(NodeKind::File, 0).unwrap();
/// builder.finish_node(0).unwrap();
/// let tree = SyntaxTree::new(builder.finish().unwrap());
///
/// let mut seen = 0;
/// let mut table = VisitorTable::new("files").on_kind(NodeKind::File, |_| {
///     seen += 1;
///     Ok(())
/// });
/// tree.root().unwrap().accept_table(&mut table).unwrap();
/// drop(table);
/// assert_eq!(seen, 1);
/// ```
pub struct VisitorTable<'a> {
    name: String,
    kinds: [Option<Handler<'a>>; NodeKind::ALL.len()],
    categories: [Option<Handler<'a>>; Category::ALL.len()],
    element: Option<Handler<'a>>,
}

impl<'a> VisitorTable<'a> {
    /// Creates an empty table. `name` shows up in mismatch errors.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kinds: std::array::from_fn(|_| None),
            categories: std::array::from_fn(|_| None),
            element: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registers the handler for one kind, replacing any earlier one.
    pub fn on_kind<F>(mut self, kind: NodeKind, handler: F) -> Self
    where
        F: FnMut(&TreeNode) -> VisitResult + 'a,
    {
        self.kinds[kind as usize] = Some(Box::new(handler));
        self
    }

    /// Registers the handler for every kind of a category.
    pub fn on_category<F>(mut self, category: Category, handler: F) -> Self
    where
        F: FnMut(&TreeNode) -> VisitResult + 'a,
    {
        self.categories[category as usize] = Some(Box::new(handler));
        self
    }

    /// Registers the catch-all handler.
    pub fn on_element<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&TreeNode) -> VisitResult + 'a,
    {
        self.element = Some(Box::new(handler));
        self
    }

    /// Returns true if a node of `kind` would reach some handler.
    pub fn handles(&self, kind: NodeKind) -> bool {
        self.element.is_some()
            || self.kinds[kind as usize].is_some()
            || self.categories[kind.category() as usize].is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.element.is_none()
            && self.kinds.iter().all(Option::is_none)
            && self.categories.iter().all(Option::is_none)
    }

    pub(crate) fn dispatch(&mut self, node: &TreeNode) -> VisitResult {
        let kind = node.kind();
        let category = kind.category();
        if let Some(handler) = self.kinds[kind as usize].as_mut() {
            return handler(node);
        }
        if let Some(handler) = self.categories[category as usize].as_mut() {
            return handler(node);
        }
        if let Some(handler) = self.element.as_mut() {
            return handler(node);
        }
        debug!(visitor = %self.name, %kind, "no handler for node");
        Err(TypeMismatchError {
            kind,
            category,
            visitor: self.name.clone(),
        }
        .into())
    }
}

impl fmt::Debug for VisitorTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds: Vec<NodeKind> = NodeKind::ALL
            .into_iter()
            .filter(|kind| self.kinds[*kind as usize].is_some())
            .collect();
        let categories: Vec<Category> = Category::ALL
            .into_iter()
            .filter(|category| self.categories[*category as usize].is_some())
            .collect();
        f.debug_struct("VisitorTable")
            .field("name", &self.name)
            .field("kinds", &kinds)
            .field("categories", &categories)
            .field("element", &self.element.is_some())
            .finish()
    }
}
