//! One-level traversal helpers.
//!
//! `accept` never recurses on its own. A visitor that wants to see the
//! subtree calls one of these from its own methods, which keeps early exit a
//! matter of not calling them.

use crate::node::TreeNode;

use super::{AmperVisitor, ElementVisitor, VisitResult};

/// Visits every immediate child of `node` through the generic entry.
///
/// Stops at the first error.
#[inline]
pub fn walk_children<V>(visitor: &mut V, node: &TreeNode) -> VisitResult
where
    V: ElementVisitor + ?Sized,
{
    node.accept_children(visitor)
}

/// Visits every immediate child of `node` through the domain entry.
pub fn walk_amper_children<V>(visitor: &mut V, node: &TreeNode) -> VisitResult
where
    V: AmperVisitor + ?Sized,
{
    for child in node.children()? {
        child.accept_amper(visitor)?;
    }
    Ok(())
}
