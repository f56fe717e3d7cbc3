//! Typed element views, one per node kind.
//!
//! Each view is a newtype over [`TreeNode`] declared by the `ast_element!`
//! macro. Accessors go through the slot names of the shape table, so no
//! per-kind child bookkeeping lives here.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::error::StaleNodeError;
use crate::kind::NodeKind;
use crate::node::TreeNode;

/// A typed view over a [`TreeNode`] of one fixed kind.
pub trait AstElement: Sized {
    const KIND: NodeKind;

    /// Wraps `node` if it has kind [`Self::KIND`].
    fn cast(node: TreeNode) -> Option<Self>;

    fn syntax(&self) -> &TreeNode;

    fn into_syntax(self) -> TreeNode;
}

macro_rules! ast_element {
    ($($(#[$meta:meta])* $name:ident),+ $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, PartialEq, Eq, Hash)]
            pub struct $name(pub(crate) TreeNode);

            impl AstElement for $name {
                const KIND: NodeKind = NodeKind::$name;

                #[inline]
                fn cast(node: TreeNode) -> Option<Self> {
                    (node.kind() == Self::KIND).then(|| Self(node))
                }

                #[inline]
                fn syntax(&self) -> &TreeNode {
                    &self.0
                }

                #[inline]
                fn into_syntax(self) -> TreeNode {
                    self.0
                }
            }
        )+

        /// Closed sum of every typed view.
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum AmperElement {
            $($name($name),)+
        }

        impl AmperElement {
            /// Wraps `node` in the view matching its kind.
            pub fn from_node(node: TreeNode) -> Self {
                match node.kind() {
                    $(NodeKind::$name => AmperElement::$name($name(node)),)+
                }
            }

            pub fn syntax(&self) -> &TreeNode {
                match self {
                    $(AmperElement::$name(element) => element.syntax(),)+
                }
            }
        }
    };
}

ast_element! {
    /// Root of a module file.
    File,
    /// `{ ... }` block used as a value.
    Object,
    /// `name: value`, `name { ... }` or a bare value.
    Property,
    /// `@ctx { ... }`.
    ContextBlock,
    /// `@ctx name: value`.
    ContextualStatement,
    ContextName,
    Identifier,
    Literal,
    /// `$name`.
    Reference,
    /// `name(args...)`.
    Invocation,
}

impl AmperElement {
    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.syntax().kind()
    }
}

/// Members of a file, object or context block.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ObjectMember {
    Property(Property),
    ContextBlock(ContextBlock),
    ContextualStatement(ContextualStatement),
}

impl ObjectMember {
    pub fn cast(node: TreeNode) -> Option<Self> {
        match node.kind() {
            NodeKind::Property => Some(Self::Property(Property(node))),
            NodeKind::ContextBlock => Some(Self::ContextBlock(ContextBlock(node))),
            NodeKind::ContextualStatement => {
                Some(Self::ContextualStatement(ContextualStatement(node)))
            }
            _ => None,
        }
    }

    pub fn syntax(&self) -> &TreeNode {
        match self {
            Self::Property(it) => it.syntax(),
            Self::ContextBlock(it) => it.syntax(),
            Self::ContextualStatement(it) => it.syntax(),
        }
    }
}

/// Anything that can stand on the right of `name:`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Object(Object),
    Literal(Literal),
    Reference(Reference),
    Invocation(Invocation),
}

impl Value {
    pub fn cast(node: TreeNode) -> Option<Self> {
        match node.kind() {
            NodeKind::Object => Some(Self::Object(Object(node))),
            NodeKind::Literal => Some(Self::Literal(Literal(node))),
            NodeKind::Reference => Some(Self::Reference(Reference(node))),
            NodeKind::Invocation => Some(Self::Invocation(Invocation(node))),
            _ => None,
        }
    }

    pub fn syntax(&self) -> &TreeNode {
        match self {
            Self::Object(it) => it.syntax(),
            Self::Literal(it) => it.syntax(),
            Self::Reference(it) => it.syntax(),
            Self::Invocation(it) => it.syntax(),
        }
    }
}

/// Either kind of contextual element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContextualElement {
    Block(ContextBlock),
    Statement(ContextualStatement),
}

impl ContextualElement {
    pub fn cast(node: TreeNode) -> Option<Self> {
        match node.kind() {
            NodeKind::ContextBlock => Some(Self::Block(ContextBlock(node))),
            NodeKind::ContextualStatement => Some(Self::Statement(ContextualStatement(node))),
            _ => None,
        }
    }

    pub fn syntax(&self) -> &TreeNode {
        match self {
            Self::Block(it) => it.syntax(),
            Self::Statement(it) => it.syntax(),
        }
    }

    pub fn context_names(&self) -> Result<Vec<ContextName>, StaleNodeError> {
        typed_slot(self.syntax(), "contexts")
    }

    /// Context names as a set of strings, e.g. `{"jvm", "test"}`.
    pub fn contexts(&self) -> Result<BTreeSet<String>, StaleNodeError> {
        self.context_names()?
            .iter()
            .map(ContextName::name)
            .collect()
    }
}

fn typed_slot<T: AstElement>(node: &TreeNode, slot: &str) -> Result<Vec<T>, StaleNodeError> {
    Ok(node.slot(slot)?.filter_map(T::cast).collect())
}

fn members(node: &TreeNode) -> Result<Vec<ObjectMember>, StaleNodeError> {
    Ok(node
        .slot("elements")?
        .filter_map(ObjectMember::cast)
        .collect())
}

fn token_text(node: &TreeNode) -> Result<Arc<str>, StaleNodeError> {
    Ok(node.text()?.unwrap_or_else(|| Arc::from("")))
}

impl File {
    pub fn elements(&self) -> Result<Vec<ObjectMember>, StaleNodeError> {
        members(&self.0)
    }
}

impl Object {
    pub fn elements(&self) -> Result<Vec<ObjectMember>, StaleNodeError> {
        members(&self.0)
    }

    /// Direct properties, skipping contextual elements.
    pub fn properties(&self) -> Result<Vec<Property>, StaleNodeError> {
        typed_slot(&self.0, "elements")
    }
}

impl Property {
    pub fn name_identifier(&self) -> Result<Option<Identifier>, StaleNodeError> {
        Ok(self.0.slot_first("name")?.and_then(Identifier::cast))
    }

    /// Property name, or `None` for a bare value.
    pub fn name(&self) -> Result<Option<String>, StaleNodeError> {
        self.name_identifier()?
            .map(|identifier| identifier.text().map(|text| text.to_string()))
            .transpose()
    }

    pub fn value(&self) -> Result<Option<Value>, StaleNodeError> {
        Ok(self.0.slot_first("value")?.and_then(Value::cast))
    }
}

impl ContextBlock {
    pub fn context_names(&self) -> Result<Vec<ContextName>, StaleNodeError> {
        typed_slot(&self.0, "contexts")
    }

    pub fn elements(&self) -> Result<Vec<ObjectMember>, StaleNodeError> {
        members(&self.0)
    }
}

impl ContextualStatement {
    pub fn context_names(&self) -> Result<Vec<ContextName>, StaleNodeError> {
        typed_slot(&self.0, "contexts")
    }

    pub fn property(&self) -> Result<Option<Property>, StaleNodeError> {
        Ok(self.0.slot_first("property")?.and_then(Property::cast))
    }
}

impl ContextName {
    /// Context name without the leading `@`.
    pub fn name(&self) -> Result<String, StaleNodeError> {
        let text = token_text(&self.0)?;
        Ok(text.strip_prefix('@').unwrap_or(&*text).to_string())
    }
}

impl Identifier {
    pub fn text(&self) -> Result<Arc<str>, StaleNodeError> {
        token_text(&self.0)
    }
}

impl Literal {
    /// Token text as written, quotes included.
    pub fn text(&self) -> Result<Arc<str>, StaleNodeError> {
        token_text(&self.0)
    }

    /// Literal value with surrounding quotes removed.
    pub fn value(&self) -> Result<String, StaleNodeError> {
        let text = token_text(&self.0)?;
        let unquoted = text
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
            .or_else(|| {
                text.strip_prefix('\'')
                    .and_then(|rest| rest.strip_suffix('\''))
            })
            .unwrap_or(&*text);
        Ok(unquoted.to_string())
    }
}

impl Reference {
    pub fn target(&self) -> Result<Option<Identifier>, StaleNodeError> {
        Ok(self.0.slot_first("target")?.and_then(Identifier::cast))
    }
}

impl Invocation {
    pub fn callee(&self) -> Result<Option<Identifier>, StaleNodeError> {
        Ok(self.0.slot_first("callee")?.and_then(Identifier::cast))
    }

    pub fn arguments(&self) -> Result<Vec<Value>, StaleNodeError> {
        Ok(self
            .0
            .slot("arguments")?
            .filter_map(Value::cast)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::TreeBuilder;
    use crate::span::Span;
    use crate::tree::SyntaxTree;
    use pretty_assertions::assert_eq;

    /// ```text
    /// product: "jvm/app"
    /// @test { deps: $libs }
    /// @jvm+android alias: include(core)
    /// { }
    /// ```
    fn sample() -> SyntaxTree {
        let mut b = TreeBuilder::new();
        b.start_node(NodeKind::File, 0).unwrap();

        b.start_node(NodeKind::Property, 0).unwrap();
        b.token(NodeKind::Identifier, Span::new(0, 7), "product").unwrap();
        b.token(NodeKind::Literal, Span::new(9, 18), "\"jvm/app\"").unwrap();
        b.finish_node(18).unwrap();

        b.start_node(NodeKind::ContextBlock, 19).unwrap();
        b.token(NodeKind::ContextName, Span::new(19, 24), "@test").unwrap();
        b.start_node(NodeKind::Property, 27).unwrap();
        b.token(NodeKind::Identifier, Span::new(27, 31), "deps").unwrap();
        b.start_node(NodeKind::Reference, 33).unwrap();
        b.token(NodeKind::Identifier, Span::new(34, 38), "libs").unwrap();
        b.finish_node(38).unwrap();
        b.finish_node(38).unwrap();
        b.finish_node(40).unwrap();

        b.start_node(NodeKind::ContextualStatement, 41).unwrap();
        b.token(NodeKind::ContextName, Span::new(41, 45), "@jvm").unwrap();
        b.token(NodeKind::ContextName, Span::new(46, 53), "android").unwrap();
        b.start_node(NodeKind::Property, 54).unwrap();
        b.token(NodeKind::Identifier, Span::new(54, 59), "alias").unwrap();
        b.start_node(NodeKind::Invocation, 61).unwrap();
        b.token(NodeKind::Identifier, Span::new(61, 68), "include").unwrap();
        b.token(NodeKind::Literal, Span::new(69, 73), "core").unwrap();
        b.finish_node(74).unwrap();
        b.finish_node(74).unwrap();
        b.finish_node(74).unwrap();

        b.start_node(NodeKind::Property, 75).unwrap();
        b.start_node(NodeKind::Object, 75).unwrap();
        b.finish_node(78).unwrap();
        b.finish_node(78).unwrap();

        b.finish_node(78).unwrap();
        SyntaxTree::new(b.finish().unwrap())
    }

    fn file(tree: &SyntaxTree) -> File {
        tree.root().unwrap().cast::<File>().unwrap()
    }

    #[test]
    fn cast_checks_kind() {
        let tree = sample();
        let root = tree.root().unwrap();
        assert!(root.clone().cast::<Property>().is_none());
        assert_eq!(root.clone().cast::<File>().unwrap().syntax(), &root);
    }

    #[test]
    fn from_node_is_exhaustive() {
        let tree = sample();
        let mut stack = vec![tree.root().unwrap()];
        while let Some(node) = stack.pop() {
            let element = AmperElement::from_node(node.clone());
            assert_eq!(element.kind(), node.kind());
            assert_eq!(element.syntax(), &node);
            stack.extend(node.children().unwrap());
        }
    }

    #[test]
    fn property_name_and_literal_value() {
        let tree = sample();
        let members = file(&tree).elements().unwrap();
        let ObjectMember::Property(product) = &members[0] else {
            panic!("expected property, got {:?}", members[0]);
        };
        assert_eq!(product.name().unwrap().as_deref(), Some("product"));
        let Some(Value::Literal(literal)) = product.value().unwrap() else {
            panic!("expected literal value");
        };
        assert_eq!(&*literal.text().unwrap(), "\"jvm/app\"");
        assert_eq!(literal.value().unwrap(), "jvm/app");
    }

    #[test]
    fn context_block_members() {
        let tree = sample();
        let members = file(&tree).elements().unwrap();
        let ObjectMember::ContextBlock(block) = &members[1] else {
            panic!("expected context block");
        };
        let names: Vec<_> = block
            .context_names()
            .unwrap()
            .iter()
            .map(|n| n.name().unwrap())
            .collect();
        assert_eq!(names, vec!["test"]);

        let inner = block.elements().unwrap();
        let ObjectMember::Property(deps) = &inner[0] else {
            panic!("expected property");
        };
        let Some(Value::Reference(reference)) = deps.value().unwrap() else {
            panic!("expected reference");
        };
        assert_eq!(&*reference.target().unwrap().unwrap().text().unwrap(), "libs");
    }

    #[test]
    fn contextual_statement_contexts_and_invocation() {
        let tree = sample();
        let members = file(&tree).elements().unwrap();
        let contextual = ContextualElement::cast(members[2].syntax().clone()).unwrap();
        assert_eq!(
            contextual.contexts().unwrap(),
            BTreeSet::from(["android".to_string(), "jvm".to_string()])
        );

        let ContextualElement::Statement(statement) = contextual else {
            panic!("expected statement");
        };
        let alias = statement.property().unwrap().unwrap();
        let Some(Value::Invocation(call)) = alias.value().unwrap() else {
            panic!("expected invocation");
        };
        assert_eq!(&*call.callee().unwrap().unwrap().text().unwrap(), "include");
        assert_eq!(call.arguments().unwrap().len(), 1);
    }

    #[test]
    fn bare_value_property_has_no_name() {
        let tree = sample();
        let members = file(&tree).elements().unwrap();
        let ObjectMember::Property(bare) = &members[3] else {
            panic!("expected property");
        };
        assert_eq!(bare.name().unwrap(), None);
        assert!(bare.name_identifier().unwrap().is_none());
        let Some(Value::Object(object)) = bare.value().unwrap() else {
            panic!("expected object");
        };
        assert!(object.elements().unwrap().is_empty());
        assert!(object.properties().unwrap().is_empty());
    }

    #[test]
    fn accessors_fail_on_stale_views() {
        let tree = sample();
        let members = file(&tree).elements().unwrap();
        tree.invalidate();
        let ObjectMember::Property(product) = &members[0] else {
            panic!("expected property");
        };
        assert!(product.name().is_err());
        assert!(product.value().is_err());
    }
}
