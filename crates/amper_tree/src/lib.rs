//! # amper_tree
//!
//! Typed syntax tree layer for the Amper configuration language.
//!
//! This crate wraps the untyped parse tree of an Amper file in typed views and
//! dispatches traversal through a two-level visitor protocol, so that
//! structural search, analysis and rewriting tools share one model of the
//! tree.
//!
//! ## Architecture
//!
//! - [`RawTree`] is an immutable arena built by [`TreeBuilder`], checked
//!   against a static shape table per [`NodeKind`]
//! - [`SyntaxTree`] is the shared handle to the current arena of a file;
//!   replacing the arena bumps its generation
//! - [`TreeNode`] and the typed views ([`Property`], [`ContextBlock`], ...)
//!   are cheap, non-owning views that fail with [`StaleNodeError`] once their
//!   generation is gone
//! - [`visitor`] holds the generic and domain visitor traits and the dispatch
//!   entry points on [`TreeNode`]
//!
//! ## Example
//!
//! ```rust
//! use amper_tree::{AstElement, NodeKind, Property, Span, SyntaxTree, TreeBuilder};
//!
//! let mut builder = TreeBuilder::new();
//! builder.start_node(NodeKind::File, 0).unwrap();
//! builder.start_node(NodeKind::Property, 0).unwrap();
//! builder.token(NodeKind::Identifier, Span::new(0, 7), "product").unwrap();
//! builder.token(NodeKind::Literal, Span::new(9, 14), "\"lib\"").unwrap();
//! builder.finish_node(14).unwrap();
//! builder.finish_node(14).unwrap();
//! let tree = SyntaxTree::new(builder.finish().unwrap());
//!
//! let root = tree.root().unwrap();
//! let property = root.children().unwrap().next().and_then(Property::cast).unwrap();
//! assert_eq!(property.name().unwrap().as_deref(), Some("product"));
//! ```

mod elements;
mod error;
mod kind;
mod node;
mod raw;
mod shape;
mod span;
mod tree;
pub mod visitor;

pub use elements::{
    AmperElement, AstElement, ContextBlock, ContextName, ContextualElement, ContextualStatement,
    File, Identifier, Invocation, Literal, Object, ObjectMember, Property, Reference, Value,
};
pub use error::{BuildError, ShapeMismatch, StaleNodeError, TreeError, TypeMismatchError};
pub use kind::{Category, NodeKind};
pub use node::{Children, TreeNode};
pub use raw::{RawNode, RawNodeId, RawTree, TreeBuilder};
pub use shape::{Accepts, Arity, KindShape, Slot, SlotLayout, assign_slots};
pub use span::{Location, Position, Span};
pub use tree::SyntaxTree;

// Re-export commonly used visitor items for convenience
pub use visitor::{AmperVisitor, ElementVisitor, VisitResult, VisitorTable};
