//! # amper_frontend
//!
//! Reads typed Amper syntax trees into value tables.
//!
//! A [`ValueTable`] maps every property of a file to an entry, keyed by the
//! property's [`Pointer`] path and the set of contexts it applies under. It is
//! the form schema readers consume: a value for `settings :: jvm :: target`
//! under `{test}` is one lookup away, no matter how the file nests its
//! context blocks.
//!
//! ## Example
//!
//! ```rust
//! use std::collections::BTreeSet;
//!
//! use amper_frontend::{Pointer, ReaderOptions, read_value_table};
//! use amper_tree::{NodeKind, Span, SyntaxTree, TreeBuilder};
//!
//! // @jvm target: "17"
//! let mut builder = TreeBuilder::new();
//! builder.start_node(NodeKind::File, 0).unwrap();
//! builder.start_node(NodeKind::ContextualStatement, 0).unwrap();
//! builder.token(NodeKind::ContextName, Span::new(0, 4), "@jvm").unwrap();
//! builder.start_node(NodeKind::Property, 5).unwrap();
//! builder.token(NodeKind::Identifier, Span::new(5, 11), "target").unwrap();
//! builder.token(NodeKind::Literal, Span::new(13, 17), "\"17\"").unwrap();
//! builder.finish_node(17).unwrap();
//! builder.finish_node(17).unwrap();
//! builder.finish_node(17).unwrap();
//! let tree = SyntaxTree::new(builder.finish().unwrap());
//!
//! let table = read_value_table(&tree.root().unwrap(), &ReaderOptions::default()).unwrap();
//! let key: Pointer = ["target"].into_iter().collect();
//! let jvm = BTreeSet::from(["jvm".to_string()]);
//! assert_eq!(table.scalar(&key, &jvm).unwrap().as_deref(), Some("17"));
//! ```

mod error;
mod options;
mod pointer;
mod value_table;

pub use error::FrontendError;
pub use options::ReaderOptions;
pub use pointer::Pointer;
pub use value_table::{KeyWithContext, ValueEntry, ValueTable, read_value_table};
