//! Raw tree arena.
//!
//! A [`RawTree`] is the untyped result of parsing: a flat arena of nodes
//! addressed by [`RawNodeId`], each holding its kind, span, structural links
//! and, for tokens, the token text. It is immutable once built; re-parsing
//! produces a new arena rather than editing the old one.
//!
//! Trees are assembled with [`TreeBuilder`], which checks every composite node
//! against the shape table so that typed views can rely on the layout.

use std::fmt::Write as _;
use std::sync::Arc;

use crate::error::BuildError;
use crate::kind::NodeKind;
use crate::shape::{SlotLayout, assign_slots};
use crate::span::Span;

/// Stable index of a node within one [`RawTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RawNodeId(u32);

impl RawNodeId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for RawNodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One node of the raw tree.
#[derive(Debug, Clone)]
pub struct RawNode {
    kind: NodeKind,
    span: Span,
    parent: Option<RawNodeId>,
    children: Vec<RawNodeId>,
    text: Option<Arc<str>>,
    layout: SlotLayout,
}

impl RawNode {
    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    #[inline]
    pub fn span(&self) -> Span {
        self.span
    }

    #[inline]
    pub fn parent(&self) -> Option<RawNodeId> {
        self.parent
    }

    #[inline]
    pub fn children(&self) -> &[RawNodeId] {
        &self.children
    }

    /// Token text; `Some` exactly for leaf kinds.
    #[inline]
    pub fn text(&self) -> Option<&Arc<str>> {
        self.text.as_ref()
    }

    /// Children occupying the slot at `index` of this node's shape.
    pub fn slot_children(&self, index: usize) -> &[RawNodeId] {
        &self.children[self.layout.range(index)]
    }
}

/// Immutable arena of raw nodes with a single root.
#[derive(Debug, Clone)]
pub struct RawTree {
    nodes: Vec<RawNode>,
    root: RawNodeId,
}

impl RawTree {
    #[inline]
    pub fn root(&self) -> RawNodeId {
        self.root
    }

    #[inline]
    pub fn get(&self, id: RawNodeId) -> Option<&RawNode> {
        self.nodes.get(id.index())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Indented outline of the tree, one node per line.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_node(self.root, 0, &mut out);
        out
    }

    fn dump_node(&self, id: RawNodeId, depth: usize, out: &mut String) {
        let Some(node) = self.get(id) else {
            return;
        };
        let _ = write!(
            out,
            "{:indent$}{}@{}..{}",
            "",
            node.kind,
            node.span.start,
            node.span.end,
            indent = depth * 2
        );
        if let Some(text) = &node.text {
            let _ = write!(out, " {text:?}");
        }
        out.push('\n');
        for child in &node.children {
            self.dump_node(*child, depth + 1, out);
        }
    }
}

#[derive(Debug)]
struct OpenNode {
    kind: NodeKind,
    start: u32,
    children: Vec<RawNodeId>,
}

/// Event-style builder for [`RawTree`].
///
/// Composite nodes are opened with [`start_node`](Self::start_node) and
/// closed with [`finish_node`](Self::finish_node); tokens are added with
/// [`token`](Self::token). Node ids are assigned in completion order.
///
/// # Example
///
/// ```rust
/// use amper_tree::{NodeKind, Span, TreeBuilder};
///
/// let mut builder = TreeBuilder::new();
/// builder.start_node(NodeKind::File, 0)?;
/// builder.start_node(NodeKind::Property, 0)?;
/// builder.token(NodeKind::Identifier, Span::new(0, 7), "product")?;
/// builder.token(NodeKind::Literal, Span::new(9, 16), "jvm/app")?;
/// builder.finish_node(16)?;
/// builder.finish_node(16)?;
/// let tree = builder.finish()?;
/// assert_eq!(tree.len(), 4);
/// # Ok::<(), amper_tree::BuildError>(())
/// ```
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<RawNode>,
    open: Vec<OpenNode>,
    root: Option<RawNodeId>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a composite node starting at byte `offset`.
    pub fn start_node(&mut self, kind: NodeKind, offset: u32) -> Result<(), BuildError> {
        if kind.is_leaf() {
            return Err(BuildError::LeafAsComposite(kind));
        }
        if self.root.is_some() {
            return Err(BuildError::MultipleRoots { kind });
        }
        self.open.push(OpenNode {
            kind,
            start: offset,
            children: Vec::new(),
        });
        Ok(())
    }

    /// Adds a token to the innermost open node.
    pub fn token(
        &mut self,
        kind: NodeKind,
        span: Span,
        text: impl Into<Arc<str>>,
    ) -> Result<RawNodeId, BuildError> {
        if !kind.is_leaf() {
            return Err(BuildError::CompositeAsLeaf(kind));
        }
        if self.open.is_empty() {
            return Err(BuildError::TokenOutsideNode { kind });
        }
        let id = self.push(RawNode {
            kind,
            span,
            parent: None,
            children: Vec::new(),
            text: Some(text.into()),
            layout: assign_slots(kind, &[])?,
        });
        self.attach(id);
        Ok(id)
    }

    /// Closes the innermost open node, ending at byte `offset`.
    ///
    /// The node's children are checked against its shape. On a mismatch the
    /// node stays open, so the caller may add the missing children and retry.
    pub fn finish_node(&mut self, offset: u32) -> Result<RawNodeId, BuildError> {
        let open = self.open.last().ok_or(BuildError::NothingToFinish)?;
        let child_kinds: Vec<NodeKind> = open
            .children
            .iter()
            .map(|child| self.nodes[child.index()].kind)
            .collect();
        let layout = assign_slots(open.kind, &child_kinds)?;
        let open = self.open.pop().ok_or(BuildError::NothingToFinish)?;

        let span = open
            .children
            .iter()
            .map(|child| self.nodes[child.index()].span)
            .fold(Span::new(open.start, offset.max(open.start)), |acc, s| {
                acc.cover(&s)
            });

        let id = RawNodeId::new(self.nodes.len() as u32);
        for child in &open.children {
            self.nodes[child.index()].parent = Some(id);
        }
        self.push(RawNode {
            kind: open.kind,
            span,
            parent: None,
            children: open.children,
            text: None,
            layout,
        });

        if self.open.is_empty() {
            self.root = Some(id);
        } else {
            self.attach(id);
        }
        Ok(id)
    }

    /// Completes the tree.
    pub fn finish(self) -> Result<RawTree, BuildError> {
        if !self.open.is_empty() {
            return Err(BuildError::Unfinished(self.open.len()));
        }
        let root = self.root.ok_or(BuildError::Empty)?;
        Ok(RawTree {
            nodes: self.nodes,
            root,
        })
    }

    fn push(&mut self, node: RawNode) -> RawNodeId {
        let id = RawNodeId::new(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    fn attach(&mut self, id: RawNodeId) {
        if let Some(parent) = self.open.last_mut() {
            parent.children.push(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShapeMismatch;
    use pretty_assertions::assert_eq;

    fn property_tree() -> RawTree {
        let mut b = TreeBuilder::new();
        b.start_node(NodeKind::File, 0).unwrap();
        b.start_node(NodeKind::Property, 0).unwrap();
        b.token(NodeKind::Identifier, Span::new(0, 7), "product").unwrap();
        b.token(NodeKind::Literal, Span::new(9, 16), "jvm/app").unwrap();
        b.finish_node(16).unwrap();
        b.finish_node(17).unwrap();
        b.finish().unwrap()
    }

    #[test]
    fn ids_follow_completion_order() {
        let tree = property_tree();
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.root(), RawNodeId::new(3));
        let root = tree.get(tree.root()).unwrap();
        assert_eq!(root.kind(), NodeKind::File);
        assert_eq!(root.children(), &[RawNodeId::new(2)]);
    }

    #[test]
    fn parent_links_are_set() {
        let tree = property_tree();
        let property = tree.get(RawNodeId::new(2)).unwrap();
        assert_eq!(property.parent(), Some(RawNodeId::new(3)));
        assert_eq!(
            tree.get(RawNodeId::new(0)).unwrap().parent(),
            Some(RawNodeId::new(2))
        );
        assert_eq!(tree.get(tree.root()).unwrap().parent(), None);
    }

    #[test]
    fn composite_span_covers_children() {
        let tree = property_tree();
        assert_eq!(tree.get(RawNodeId::new(2)).unwrap().span(), Span::new(0, 16));
        assert_eq!(tree.get(tree.root()).unwrap().span(), Span::new(0, 17));
    }

    #[test]
    fn slot_children_follow_layout() {
        let tree = property_tree();
        let property = tree.get(RawNodeId::new(2)).unwrap();
        assert_eq!(property.slot_children(0), &[RawNodeId::new(0)]);
        assert_eq!(property.slot_children(1), &[RawNodeId::new(1)]);
    }

    #[test]
    fn token_text_is_kept() {
        let tree = property_tree();
        let literal = tree.get(RawNodeId::new(1)).unwrap();
        assert_eq!(literal.text().map(|t| &**t), Some("jvm/app"));
        assert!(tree.get(tree.root()).unwrap().text().is_none());
    }

    #[test]
    fn empty_object_takes_explicit_span() {
        let mut b = TreeBuilder::new();
        b.start_node(NodeKind::Object, 4).unwrap();
        b.finish_node(6).unwrap();
        let tree = b.finish().unwrap();
        assert_eq!(tree.get(tree.root()).unwrap().span(), Span::new(4, 6));
    }

    #[test]
    fn rejects_shape_violations() {
        let mut b = TreeBuilder::new();
        b.start_node(NodeKind::ContextualStatement, 0).unwrap();
        b.token(NodeKind::ContextName, Span::new(0, 4), "jvm").unwrap();
        let err = b.finish_node(4).unwrap_err();
        assert_eq!(
            err,
            BuildError::Shape(ShapeMismatch::MissingSlot {
                kind: NodeKind::ContextualStatement,
                slot: "property",
                index: 1,
            })
        );
    }

    #[test]
    fn failed_finish_keeps_the_node_open() {
        let mut b = TreeBuilder::new();
        b.start_node(NodeKind::File, 0).unwrap();
        b.start_node(NodeKind::ContextualStatement, 0).unwrap();
        b.token(NodeKind::ContextName, Span::new(0, 4), "@jvm").unwrap();
        assert!(b.finish_node(4).is_err());

        // Closing again retries the same statement instead of the file.
        assert!(b.finish_node(4).is_err());
        assert_eq!(b.finish().unwrap_err(), BuildError::Unfinished(2));
    }

    #[test]
    fn failed_finish_can_be_completed() {
        let mut b = TreeBuilder::new();
        b.start_node(NodeKind::File, 0).unwrap();
        b.start_node(NodeKind::ContextualStatement, 0).unwrap();
        b.token(NodeKind::ContextName, Span::new(0, 4), "@jvm").unwrap();
        assert!(b.finish_node(4).is_err());

        b.start_node(NodeKind::Property, 5).unwrap();
        b.token(NodeKind::Identifier, Span::new(5, 11), "target").unwrap();
        b.finish_node(11).unwrap();
        b.finish_node(11).unwrap();
        b.finish_node(11).unwrap();
        let tree = b.finish().unwrap();

        assert_eq!(tree.len(), 5);
        for index in 0..tree.len() as u32 {
            let id = RawNodeId::new(index);
            let node = tree.get(id).unwrap();
            match node.parent() {
                Some(parent) => assert!(tree.get(parent).unwrap().children().contains(&id)),
                None => assert_eq!(id, tree.root()),
            }
        }
    }

    #[test]
    fn rejects_kind_misuse() {
        let mut b = TreeBuilder::new();
        assert_eq!(
            b.start_node(NodeKind::Literal, 0),
            Err(BuildError::LeafAsComposite(NodeKind::Literal))
        );
        assert_eq!(
            b.token(NodeKind::Identifier, Span::new(0, 1), "x"),
            Err(BuildError::TokenOutsideNode {
                kind: NodeKind::Identifier
            })
        );
        b.start_node(NodeKind::File, 0).unwrap();
        assert_eq!(
            b.token(NodeKind::Object, Span::new(0, 1), "{}"),
            Err(BuildError::CompositeAsLeaf(NodeKind::Object))
        );
    }

    #[test]
    fn rejects_unbalanced_input() {
        let mut b = TreeBuilder::new();
        assert_eq!(b.finish_node(0), Err(BuildError::NothingToFinish));
        b.start_node(NodeKind::File, 0).unwrap();
        b.start_node(NodeKind::Object, 0).unwrap();
        assert_eq!(b.finish().unwrap_err(), BuildError::Unfinished(2));

        assert_eq!(TreeBuilder::new().finish().unwrap_err(), BuildError::Empty);
    }

    #[test]
    fn rejects_second_root() {
        let mut b = TreeBuilder::new();
        b.start_node(NodeKind::File, 0).unwrap();
        b.finish_node(0).unwrap();
        assert_eq!(
            b.start_node(NodeKind::File, 0),
            Err(BuildError::MultipleRoots {
                kind: NodeKind::File
            })
        );
    }

    #[test]
    fn dump_outlines_the_tree() {
        insta::assert_snapshot!(property_tree().dump(), @r#"
        File@0..17
          Property@0..16
            Identifier@0..7 "product"
            Literal@9..16 "jvm/app"
        "#);
    }
}
