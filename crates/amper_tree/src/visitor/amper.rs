//! Domain visitor with one method per node kind.

use crate::elements::{
    AstElement, ContextBlock, ContextName, ContextualStatement, File, Identifier, Invocation,
    Literal, Object, Property, Reference,
};

use super::{ElementVisitor, VisitResult};

/// Visitor with one method per concrete [`NodeKind`].
///
/// Each method receives the typed view of its kind and defaults to the
/// generic method of the kind's category, so overriding only a few kinds
/// still gives a complete visitor.
///
/// [`NodeKind`]: crate::NodeKind
pub trait AmperVisitor: ElementVisitor {
    fn visit_file(&mut self, node: &File) -> VisitResult {
        self.visit_document(node.syntax())
    }

    fn visit_object(&mut self, node: &Object) -> VisitResult {
        self.visit_value(node.syntax())
    }

    fn visit_property(&mut self, node: &Property) -> VisitResult {
        self.visit_object_element(node.syntax())
    }

    fn visit_context_block(&mut self, node: &ContextBlock) -> VisitResult {
        self.visit_contextual_element(node.syntax())
    }

    fn visit_contextual_statement(&mut self, node: &ContextualStatement) -> VisitResult {
        self.visit_contextual_element(node.syntax())
    }

    fn visit_context_name(&mut self, node: &ContextName) -> VisitResult {
        self.visit_name(node.syntax())
    }

    fn visit_identifier(&mut self, node: &Identifier) -> VisitResult {
        self.visit_name(node.syntax())
    }

    fn visit_literal(&mut self, node: &Literal) -> VisitResult {
        self.visit_value(node.syntax())
    }

    fn visit_reference(&mut self, node: &Reference) -> VisitResult {
        self.visit_value(node.syntax())
    }

    fn visit_invocation(&mut self, node: &Invocation) -> VisitResult {
        self.visit_value(node.syntax())
    }
}
