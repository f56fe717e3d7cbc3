//! Error types for the typed tree layer.

use thiserror::Error;

use crate::kind::{Category, NodeKind};
use crate::raw::RawNodeId;

/// A typed view was used after its backing raw tree was replaced or dropped.
///
/// The only recovery is to re-acquire a node from the current tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("stale {kind} node {id}: view is from generation {generation}, tree is at generation {current}")]
pub struct StaleNodeError {
    pub kind: NodeKind,
    pub id: RawNodeId,
    /// Generation the view was created in.
    pub generation: u64,
    /// Generation of the tree at the time of access.
    pub current: u64,
}

/// A visitor offered no handler for a node it was asked to visit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("visitor `{visitor}` handles neither {kind} nor the {category} category")]
pub struct TypeMismatchError {
    pub kind: NodeKind,
    pub category: Category,
    /// Name of the visitor, for diagnostics.
    pub visitor: String,
}

/// Errors surfaced by navigation and dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error(transparent)]
    Stale(#[from] StaleNodeError),

    #[error(transparent)]
    TypeMismatch(#[from] TypeMismatchError),
}

impl TreeError {
    pub fn is_stale(&self) -> bool {
        matches!(self, TreeError::Stale(_))
    }

    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, TreeError::TypeMismatch(_))
    }
}

/// A child sequence does not fit the shape declared for its parent kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeMismatch {
    #[error("{kind} is missing required `{slot}` at child {index}")]
    MissingSlot {
        kind: NodeKind,
        slot: &'static str,
        index: usize,
    },

    #[error("{kind} does not accept {found} at child {index}")]
    UnexpectedChild {
        kind: NodeKind,
        found: NodeKind,
        index: usize,
    },
}

/// Errors raised while assembling a raw tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("{0} is a token kind and cannot be started as a composite node")]
    LeafAsComposite(NodeKind),

    #[error("{0} is a composite kind and cannot be added as a token")]
    CompositeAsLeaf(NodeKind),

    #[error("finish_node called with no open node")]
    NothingToFinish,

    #[error("{0} open node(s) were never finished")]
    Unfinished(usize),

    #[error("token {kind} added outside of any node")]
    TokenOutsideNode { kind: NodeKind },

    #[error("a second root {kind} was started after the tree was complete")]
    MultipleRoots { kind: NodeKind },

    #[error("tree is empty")]
    Empty,

    #[error(transparent)]
    Shape(#[from] ShapeMismatch),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_message_names_both_generations() {
        let err = StaleNodeError {
            kind: NodeKind::Property,
            id: RawNodeId::new(4),
            generation: 1,
            current: 3,
        };
        assert_eq!(
            err.to_string(),
            "stale Property node #4: view is from generation 1, tree is at generation 3"
        );
    }

    #[test]
    fn tree_error_is_transparent() {
        let err: TreeError = TypeMismatchError {
            kind: NodeKind::Literal,
            category: Category::Value,
            visitor: "collector".to_string(),
        }
        .into();
        assert!(err.is_type_mismatch());
        assert!(!err.is_stale());
        assert_eq!(
            err.to_string(),
            "visitor `collector` handles neither Literal nor the Value category"
        );
    }

    #[test]
    fn shape_errors_convert_into_build_errors() {
        let err: BuildError = ShapeMismatch::MissingSlot {
            kind: NodeKind::Property,
            slot: "name",
            index: 0,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Property is missing required `name` at child 0"
        );
    }
}
