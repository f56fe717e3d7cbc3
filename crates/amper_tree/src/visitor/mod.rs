//! Two-level visitor protocol over typed tree views.
//!
//! # Overview
//!
//! - [`ElementVisitor`] - generic visitor with one method per [`Category`]
//! - [`AmperVisitor`] - domain visitor with one method per [`NodeKind`]
//! - [`VisitorTable`] - visitor built from closures at runtime
//! - [`walk_children`] / [`walk_amper_children`] - visit one level down
//!
//! Nodes do the dispatch: [`TreeNode::accept`] picks the kind method when the
//! visitor offers its domain interface and the category method otherwise,
//! [`TreeNode::accept_amper`] always picks the kind method.
//!
//! # Example
//!
//! ```rust
//! use amper_tree::{NodeKind, Span, SyntaxTree, TreeBuilder, TreeNode};
//! use amper_tree::visitor::{ElementVisitor, VisitResult, walk_children};
//!
//! struct NameCollector(Vec<String>);
//!
//! impl ElementVisitor for NameCollector {
//!     fn visit_element(&mut self, node: &TreeNode) -> VisitResult {
//!         walk_children(self, node)
//!     }
//!
//!     fn visit_name(&mut self, node: &TreeNode) -> VisitResult {
//!         if let Some(text) = node.text()? {
//!             self.0.push(text.to_string());
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let mut builder = TreeBuilder::new();
//! builder.start_node(NodeKind::File, 0).unwrap();
//! builder.start_node(NodeKind::Property, 0).unwrap();
//! builder.token(NodeKind::Identifier, Span::new(0, 4), "name").unwrap();
//! builder.token(NodeKind::Literal, Span::new(6, 11), "\"app\"").unwrap();
//! builder.finish_node(11).unwrap();
//! builder.finish_node(11).unwrap();
//! let tree = SyntaxTree::new(builder.finish().unwrap());
//!
//! let mut names = NameCollector(Vec::new());
//! tree.root().unwrap().accept(&mut names).unwrap();
//! assert_eq!(names.0, vec!["name"]);
//! ```
//!
//! [`Category`]: crate::Category
//! [`NodeKind`]: crate::NodeKind
//! [`TreeNode::accept`]: crate::TreeNode::accept
//! [`TreeNode::accept_amper`]: crate::TreeNode::accept_amper

mod amper;
mod dispatch;
mod element;
mod table;
mod walk;

pub use amper::AmperVisitor;
pub use element::{ElementVisitor, VisitResult};
pub use table::VisitorTable;
pub use walk::{walk_amper_children, walk_children};
