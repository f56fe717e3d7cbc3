//! Typed node views.
//!
//! A [`TreeNode`] is a non-owning view of one raw node: the tree handle, the
//! raw id, the generation it was created in and the kind captured at that
//! moment. It never copies structural state out of the raw tree; every
//! navigation call re-reads the arena and fails with [`StaleNodeError`] once
//! the tree has moved on.

use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;
use std::sync::Arc;

use crate::elements::AstElement;
use crate::error::StaleNodeError;
use crate::kind::{Category, NodeKind};
use crate::raw::{RawNode, RawNodeId, RawTree};
use crate::span::{Location, Span};
use crate::tree::SyntaxTree;

/// View of one node of a [`SyntaxTree`].
///
/// Equality and hashing follow the raw node's identity (tree, id and
/// generation), so re-wrapping the same raw node gives an equal value.
#[derive(Clone)]
pub struct TreeNode {
    tree: SyntaxTree,
    id: RawNodeId,
    generation: u64,
    kind: NodeKind,
}

impl TreeNode {
    pub(crate) fn new(tree: SyntaxTree, id: RawNodeId, generation: u64, kind: NodeKind) -> Self {
        Self {
            tree,
            id,
            generation,
            kind,
        }
    }

    /// Kind fixed at construction. Never fails, even on a stale view.
    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    #[inline]
    pub fn category(&self) -> Category {
        self.kind.category()
    }

    #[inline]
    pub fn id(&self) -> RawNodeId {
        self.id
    }

    /// Generation of the tree this view was created in.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    /// Returns true while the backing raw tree is still current.
    pub fn is_valid(&self) -> bool {
        self.check().is_ok()
    }

    /// Fails if the backing raw tree has been replaced.
    pub fn check(&self) -> Result<(), StaleNodeError> {
        self.read(|_, _| ())
    }

    pub fn span(&self) -> Result<Span, StaleNodeError> {
        self.read(|_, node| node.span())
    }

    /// Line/column range of this node within `source`, the text the tree was
    /// parsed from.
    pub fn location(&self, source: &str) -> Result<Location, StaleNodeError> {
        Ok(self.span()?.locate(source))
    }

    /// Token text for leaf kinds, `None` for composites.
    pub fn text(&self) -> Result<Option<Arc<str>>, StaleNodeError> {
        self.read(|_, node| node.text().cloned())
    }

    /// Nearest enclosing node, or `None` for the root.
    pub fn parent(&self) -> Result<Option<TreeNode>, StaleNodeError> {
        self.read(|raw, node| {
            node.parent()
                .and_then(|id| raw.get(id).map(|parent| self.sibling_view(id, parent.kind())))
        })
    }

    /// Immediate children in source order.
    ///
    /// The returned sequence is finite, does not recurse and can be restarted
    /// by cloning it before iteration or by calling this method again.
    pub fn children(&self) -> Result<Children, StaleNodeError> {
        self.read(|raw, node| self.children_of(raw, node.children()))
    }

    /// Children occupying the named slot of this node's shape.
    ///
    /// Absent optional slots produce an empty sequence. Unknown slot names
    /// also produce an empty sequence.
    pub fn slot(&self, name: &str) -> Result<Children, StaleNodeError> {
        let index = self.kind.shape().slot_index(name);
        self.read(|raw, node| match index {
            Some(index) => self.children_of(raw, node.slot_children(index)),
            None => self.children_of(raw, &[]),
        })
    }

    /// First child of the named slot.
    pub fn slot_first(&self, name: &str) -> Result<Option<TreeNode>, StaleNodeError> {
        Ok(self.slot(name)?.next())
    }

    pub fn child_count(&self) -> Result<usize, StaleNodeError> {
        self.read(|_, node| node.children().len())
    }

    /// Casts this view to a typed element, or `None` on kind mismatch.
    pub fn cast<T: AstElement>(self) -> Option<T> {
        T::cast(self)
    }

    fn read<R>(&self, f: impl FnOnce(&RawTree, &RawNode) -> R) -> Result<R, StaleNodeError> {
        self.tree.read(self.id, self.generation, self.kind, f)
    }

    fn sibling_view(&self, id: RawNodeId, kind: NodeKind) -> TreeNode {
        TreeNode::new(self.tree.clone(), id, self.generation, kind)
    }

    fn children_of(&self, raw: &RawTree, ids: &[RawNodeId]) -> Children {
        let entries: Arc<[(RawNodeId, NodeKind)]> = ids
            .iter()
            .filter_map(|id| raw.get(*id).map(|child| (*id, child.kind())))
            .collect();
        Children {
            tree: self.tree.clone(),
            generation: self.generation,
            front: 0,
            back: entries.len(),
            entries,
        }
    }
}

impl PartialEq for TreeNode {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.generation == other.generation && self.tree.ptr_eq(&other.tree)
    }
}

impl Eq for TreeNode {}

impl Hash for TreeNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tree.addr().hash(state);
        self.id.hash(state);
        self.generation.hash(state);
    }
}

impl std::fmt::Debug for TreeNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}@g{}", self.kind, self.id, self.generation)
    }
}

/// Lazy sequence of child views.
///
/// Child ids and kinds are captured when the sequence is created; views are
/// built on demand as the iterator advances.
#[derive(Clone)]
pub struct Children {
    tree: SyntaxTree,
    generation: u64,
    entries: Arc<[(RawNodeId, NodeKind)]>,
    front: usize,
    back: usize,
}

impl Children {
    fn view(&self, index: usize) -> TreeNode {
        let (id, kind) = self.entries[index];
        TreeNode::new(self.tree.clone(), id, self.generation, kind)
    }

    /// Kinds of the remaining children, without building views.
    pub fn kinds(&self) -> impl Iterator<Item = NodeKind> + '_ {
        self.entries[self.front..self.back]
            .iter()
            .map(|(_, kind)| *kind)
    }
}

impl Iterator for Children {
    type Item = TreeNode;

    fn next(&mut self) -> Option<TreeNode> {
        if self.front == self.back {
            return None;
        }
        let node = self.view(self.front);
        self.front += 1;
        Some(node)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }
}

impl DoubleEndedIterator for Children {
    fn next_back(&mut self) -> Option<TreeNode> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(self.view(self.back))
    }
}

impl ExactSizeIterator for Children {}

impl FusedIterator for Children {}

impl std::fmt::Debug for Children {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::TreeBuilder;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    /// `@jvm settings: { enabled }`
    fn statement_tree() -> SyntaxTree {
        let mut b = TreeBuilder::new();
        b.start_node(NodeKind::File, 0).unwrap();
        b.start_node(NodeKind::ContextualStatement, 0).unwrap();
        b.token(NodeKind::ContextName, Span::new(0, 4), "jvm").unwrap();
        b.start_node(NodeKind::Property, 5).unwrap();
        b.token(NodeKind::Identifier, Span::new(5, 13), "settings").unwrap();
        b.start_node(NodeKind::Object, 15).unwrap();
        b.start_node(NodeKind::Property, 17).unwrap();
        b.token(NodeKind::Identifier, Span::new(17, 24), "enabled").unwrap();
        b.finish_node(24).unwrap();
        b.finish_node(26).unwrap();
        b.finish_node(26).unwrap();
        b.finish_node(26).unwrap();
        b.finish_node(26).unwrap();
        SyntaxTree::new(b.finish().unwrap())
    }

    fn kinds(children: Children) -> Vec<NodeKind> {
        children.map(|c| c.kind()).collect()
    }

    #[test]
    fn children_in_source_order() {
        let tree = statement_tree();
        let statement = tree.root().unwrap().children().unwrap().next().unwrap();
        assert_eq!(
            kinds(statement.children().unwrap()),
            vec![NodeKind::ContextName, NodeKind::Property]
        );
    }

    #[test]
    fn children_are_restartable() {
        let tree = statement_tree();
        let statement = tree.root().unwrap().children().unwrap().next().unwrap();
        let children = statement.children().unwrap();
        let first: Vec<_> = children.clone().collect();
        let second: Vec<_> = children.collect();
        assert_eq!(first, second);
        assert_eq!(first, statement.children().unwrap().collect::<Vec<_>>());
    }

    #[test]
    fn children_iterate_from_both_ends() {
        let tree = statement_tree();
        let statement = tree.root().unwrap().children().unwrap().next().unwrap();
        let mut children = statement.children().unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children.next_back().unwrap().kind(), NodeKind::Property);
        assert_eq!(children.next().unwrap().kind(), NodeKind::ContextName);
        assert!(children.next().is_none());
        assert!(children.next_back().is_none());
    }

    #[test]
    fn leaf_has_no_children() {
        let tree = statement_tree();
        let name = tree.wrap(RawNodeId::new(0)).unwrap();
        assert_eq!(name.child_count().unwrap(), 0);
        assert_eq!(name.children().unwrap().len(), 0);
        assert_eq!(name.text().unwrap().as_deref(), Some("jvm"));
    }

    #[test]
    fn parent_of_every_child_is_its_parent() {
        let tree = statement_tree();
        let mut stack = vec![tree.root().unwrap()];
        while let Some(node) = stack.pop() {
            for child in node.children().unwrap() {
                assert_eq!(child.parent().unwrap(), Some(node.clone()));
                stack.push(child);
            }
        }
        assert_eq!(tree.root().unwrap().parent().unwrap(), None);
    }

    #[test]
    fn child_appears_once_in_parent_children() {
        let tree = statement_tree();
        let property = tree.wrap(RawNodeId::new(5)).unwrap();
        assert_eq!(property.kind(), NodeKind::Property);
        let parent = property.parent().unwrap().unwrap();
        let hits = parent.children().unwrap().filter(|c| *c == property).count();
        assert_eq!(hits, 1);
    }

    #[test]
    fn rewrapping_compares_equal() {
        let tree = statement_tree();
        let a = tree.wrap(RawNodeId::new(5)).unwrap();
        let b = tree.wrap(RawNodeId::new(5)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.kind(), b.kind());
        assert_eq!(a.parent().unwrap(), b.parent().unwrap());
        assert_eq!(
            a.children().unwrap().collect::<Vec<_>>(),
            b.children().unwrap().collect::<Vec<_>>()
        );

        let set: HashSet<_> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn same_id_in_other_tree_is_not_equal() {
        let one = statement_tree();
        let two = statement_tree();
        assert_ne!(one.root().unwrap(), two.root().unwrap());
    }

    #[test]
    fn slots_select_children() {
        let tree = statement_tree();
        let statement = tree.root().unwrap().children().unwrap().next().unwrap();
        assert_eq!(
            kinds(statement.slot("contexts").unwrap()),
            vec![NodeKind::ContextName]
        );
        assert_eq!(
            statement.slot_first("property").unwrap().unwrap().kind(),
            NodeKind::Property
        );
        assert_eq!(statement.slot("nonexistent").unwrap().len(), 0);
    }

    #[test]
    fn stale_view_fails_every_navigation() {
        let tree = statement_tree();
        let property = tree.wrap(RawNodeId::new(5)).unwrap();
        let mut b = TreeBuilder::new();
        b.start_node(NodeKind::File, 0).unwrap();
        b.finish_node(0).unwrap();
        tree.replace(b.finish().unwrap());

        assert!(!property.is_valid());
        assert_eq!(property.kind(), NodeKind::Property);
        assert!(property.parent().is_err());
        assert!(property.children().is_err());
        assert!(property.span().is_err());
        assert!(property.text().is_err());
        assert!(property.slot("name").is_err());
    }

    #[test]
    fn debug_shows_kind_id_and_generation() {
        let tree = statement_tree();
        assert_eq!(format!("{:?}", tree.root().unwrap()), "File#7@g0");
    }
}
