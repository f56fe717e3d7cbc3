//! Generic visitor over capability-set categories.
//!
//! An [`ElementVisitor`] sees nodes only through their [`Category`], so it
//! keeps working unchanged when the grammar gains new kinds.
//!
//! [`Category`]: crate::Category

use crate::error::TreeError;
use crate::node::TreeNode;

use super::AmperVisitor;

/// Result of every visitor method.
///
/// Early exit is expressed by not descending into children; errors abort the
/// current `accept` call and propagate to its caller.
pub type VisitResult = Result<(), TreeError>;

/// Visitor with one method per category.
///
/// Category methods default up a fallback chain ending in
/// [`visit_element`](Self::visit_element): contextual elements fall back to
/// object elements, everything else falls back directly.
///
/// # Combined visitors
///
/// A type that also implements [`AmperVisitor`] should say so through
/// [`as_amper_visitor`](Self::as_amper_visitor). Nodes then route generic
/// `accept` calls to the kind-specific methods instead of the category ones:
///
/// ```rust
/// use amper_tree::visitor::{AmperVisitor, ElementVisitor, VisitResult};
/// use amper_tree::Property;
///
/// #[derive(Default)]
/// struct PropertyCounter(usize);
///
/// impl ElementVisitor for PropertyCounter {
///     fn as_amper_visitor(&mut self) -> Option<&mut dyn AmperVisitor> {
///         Some(self)
///     }
/// }
///
/// impl AmperVisitor for PropertyCounter {
///     fn visit_property(&mut self, _node: &Property) -> VisitResult {
///         self.0 += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait ElementVisitor {
    /// Exposes the kind-specific interface of this visitor, if it has one.
    fn as_amper_visitor(&mut self) -> Option<&mut dyn AmperVisitor> {
        None
    }

    /// Catch-all for every category.
    fn visit_element(&mut self, _node: &TreeNode) -> VisitResult {
        Ok(())
    }

    fn visit_document(&mut self, node: &TreeNode) -> VisitResult {
        self.visit_element(node)
    }

    fn visit_object_element(&mut self, node: &TreeNode) -> VisitResult {
        self.visit_element(node)
    }

    fn visit_contextual_element(&mut self, node: &TreeNode) -> VisitResult {
        self.visit_object_element(node)
    }

    fn visit_value(&mut self, node: &TreeNode) -> VisitResult {
        self.visit_element(node)
    }

    fn visit_name(&mut self, node: &TreeNode) -> VisitResult {
        self.visit_element(node)
    }
}
