//! Node kinds and capability-set categories for the Amper language.

use serde::{Deserialize, Serialize};

/// Closed set of node kinds, one per grammar production.
///
/// The discriminant indexes the static shape table, see [`NodeKind::shape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum NodeKind {
    /// Root of a module file.
    File = 0,
    /// Braced block of object elements, usable as a property value.
    Object,
    /// `name: value` or `name { ... }`.
    Property,
    /// `@ctx { ... }` block applying contexts to every element inside it.
    ContextBlock,
    /// `@ctx name: value`, a single property under contexts.
    ContextualStatement,
    /// A single context selector such as `@jvm`.
    ContextName,
    /// Bare identifier token.
    Identifier,
    /// String, number or boolean literal token.
    Literal,
    /// `$name` reference to another value.
    Reference,
    /// `name(args...)` invocation.
    Invocation,
}

impl NodeKind {
    /// Every kind in declaration order.
    pub const ALL: [NodeKind; 10] = [
        NodeKind::File,
        NodeKind::Object,
        NodeKind::Property,
        NodeKind::ContextBlock,
        NodeKind::ContextualStatement,
        NodeKind::ContextName,
        NodeKind::Identifier,
        NodeKind::Literal,
        NodeKind::Reference,
        NodeKind::Invocation,
    ];

    /// Capability-set category this kind belongs to.
    #[inline]
    pub const fn category(self) -> Category {
        match self {
            NodeKind::File => Category::Document,
            NodeKind::Property => Category::ObjectElement,
            NodeKind::ContextBlock | NodeKind::ContextualStatement => Category::ContextualElement,
            NodeKind::Object | NodeKind::Literal | NodeKind::Reference | NodeKind::Invocation => {
                Category::Value
            }
            NodeKind::ContextName | NodeKind::Identifier => Category::Name,
        }
    }

    /// Returns true for token kinds that carry text and never have children.
    #[inline]
    pub const fn is_leaf(self) -> bool {
        matches!(
            self,
            NodeKind::ContextName | NodeKind::Identifier | NodeKind::Literal
        )
    }

    /// Returns true if this kind may appear directly inside a file, object or
    /// context block.
    #[inline]
    pub const fn is_object_member(self) -> bool {
        matches!(
            self.category(),
            Category::ObjectElement | Category::ContextualElement
        )
    }

    /// Grammar name of this kind.
    #[inline]
    pub fn name(self) -> &'static str {
        self.shape().name
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Coarse grouping of kinds addressed by the generic visitor.
///
/// Categories stay stable when the grammar grows new kinds; a new kind only
/// has to declare which category it falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Category {
    Document,
    ObjectElement,
    ContextualElement,
    Value,
    Name,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Document,
        Category::ObjectElement,
        Category::ContextualElement,
        Category::Value,
        Category::Name,
    ];

    /// Name used in messages and serialized form.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Category::Document => "Document",
            Category::ObjectElement => "ObjectElement",
            Category::ContextualElement => "ContextualElement",
            Category::Value => "Value",
            Category::Name => "Name",
        }
    }

    /// Kinds that map to this category.
    pub fn kinds(self) -> impl Iterator<Item = NodeKind> {
        NodeKind::ALL
            .into_iter()
            .filter(move |kind| kind.category() == self)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
