//! Double dispatch from nodes into visitors.
//!
//! Two entry points exist:
//!
//! - [`TreeNode::accept`] takes a generic [`ElementVisitor`]. If the visitor
//!   exposes an [`AmperVisitor`] through `as_amper_visitor`, the call goes to
//!   the kind-specific method; otherwise it goes to the category method.
//! - [`TreeNode::accept_amper`] goes straight to the kind-specific method.
//!
//! Neither entry point recurses. Both check that the view is still current
//! before calling into the visitor.

use tracing::trace;

use crate::elements::{
    ContextBlock, ContextName, ContextualStatement, File, Identifier, Invocation, Literal, Object,
    Property, Reference,
};
use crate::kind::{Category, NodeKind};
use crate::node::TreeNode;

use super::{AmperVisitor, ElementVisitor, VisitResult, VisitorTable};

impl TreeNode {
    /// Visits this node with a generic visitor.
    pub fn accept<V>(&self, visitor: &mut V) -> VisitResult
    where
        V: ElementVisitor + ?Sized,
    {
        self.check()?;
        if let Some(amper) = visitor.as_amper_visitor() {
            trace!(kind = %self.kind(), entry = "generic", "routing to kind method");
            return dispatch_kind(self, amper);
        }
        trace!(kind = %self.kind(), category = %self.category(), "routing to category method");
        dispatch_category(self, visitor)
    }

    /// Visits this node with a kind-specific visitor.
    pub fn accept_amper<V>(&self, visitor: &mut V) -> VisitResult
    where
        V: AmperVisitor + ?Sized,
    {
        self.check()?;
        trace!(kind = %self.kind(), entry = "amper", "routing to kind method");
        dispatch_kind(self, visitor)
    }

    /// Visits this node with a table of handler closures.
    ///
    /// Fails with [`TypeMismatchError`] if the table has no handler for this
    /// node's kind, its category or elements in general.
    ///
    /// [`TypeMismatchError`]: crate::TypeMismatchError
    pub fn accept_table(&self, table: &mut VisitorTable<'_>) -> VisitResult {
        self.check()?;
        table.dispatch(self)
    }

    /// Calls [`accept`](Self::accept) on each immediate child in order.
    pub fn accept_children<V>(&self, visitor: &mut V) -> VisitResult
    where
        V: ElementVisitor + ?Sized,
    {
        for child in self.children()? {
            child.accept(visitor)?;
        }
        Ok(())
    }
}

fn dispatch_kind<V>(node: &TreeNode, visitor: &mut V) -> VisitResult
where
    V: AmperVisitor + ?Sized,
{
    let node = node.clone();
    match node.kind() {
        NodeKind::File => visitor.visit_file(&File(node)),
        NodeKind::Object => visitor.visit_object(&Object(node)),
        NodeKind::Property => visitor.visit_property(&Property(node)),
        NodeKind::ContextBlock => visitor.visit_context_block(&ContextBlock(node)),
        NodeKind::ContextualStatement => {
            visitor.visit_contextual_statement(&ContextualStatement(node))
        }
        NodeKind::ContextName => visitor.visit_context_name(&ContextName(node)),
        NodeKind::Identifier => visitor.visit_identifier(&Identifier(node)),
        NodeKind::Literal => visitor.visit_literal(&Literal(node)),
        NodeKind::Reference => visitor.visit_reference(&Reference(node)),
        NodeKind::Invocation => visitor.visit_invocation(&Invocation(node)),
    }
}

fn dispatch_category<V>(node: &TreeNode, visitor: &mut V) -> VisitResult
where
    V: ElementVisitor + ?Sized,
{
    match node.category() {
        Category::Document => visitor.visit_document(node),
        Category::ObjectElement => visitor.visit_object_element(node),
        Category::ContextualElement => visitor.visit_contextual_element(node),
        Category::Value => visitor.visit_value(node),
        Category::Name => visitor.visit_name(node),
    }
}
