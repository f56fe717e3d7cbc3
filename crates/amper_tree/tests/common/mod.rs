#![allow(dead_code)]

use amper_tree::{NodeKind, Span, SyntaxTree, TreeBuilder, TreeNode};

pub const SOURCE: &str = r#"product: "lib"
deps: dependency("x", $ver)
@jvm {
  settings { target: "17" }
}
@test name: "t"
"#;

/// Builds the tree of [`SOURCE`]. Every node kind appears at least once.
pub fn sample_tree() -> SyntaxTree {
    let mut b = TreeBuilder::new();
    b.start_node(NodeKind::File, 0).unwrap();

    b.start_node(NodeKind::Property, 0).unwrap();
    b.token(NodeKind::Identifier, Span::new(0, 7), "product").unwrap();
    b.token(NodeKind::Literal, Span::new(9, 14), "\"lib\"").unwrap();
    b.finish_node(14).unwrap();

    b.start_node(NodeKind::Property, 15).unwrap();
    b.token(NodeKind::Identifier, Span::new(15, 19), "deps").unwrap();
    b.start_node(NodeKind::Invocation, 21).unwrap();
    b.token(NodeKind::Identifier, Span::new(21, 31), "dependency").unwrap();
    b.token(NodeKind::Literal, Span::new(32, 35), "\"x\"").unwrap();
    b.start_node(NodeKind::Reference, 37).unwrap();
    b.token(NodeKind::Identifier, Span::new(38, 41), "ver").unwrap();
    b.finish_node(41).unwrap();
    b.finish_node(42).unwrap();
    b.finish_node(42).unwrap();

    b.start_node(NodeKind::ContextBlock, 43).unwrap();
    b.token(NodeKind::ContextName, Span::new(43, 47), "@jvm").unwrap();
    b.start_node(NodeKind::Property, 52).unwrap();
    b.token(NodeKind::Identifier, Span::new(52, 60), "settings").unwrap();
    b.start_node(NodeKind::Object, 61).unwrap();
    b.start_node(NodeKind::Property, 63).unwrap();
    b.token(NodeKind::Identifier, Span::new(63, 69), "target").unwrap();
    b.token(NodeKind::Literal, Span::new(71, 75), "\"17\"").unwrap();
    b.finish_node(75).unwrap();
    b.finish_node(77).unwrap();
    b.finish_node(77).unwrap();
    b.finish_node(79).unwrap();

    b.start_node(NodeKind::ContextualStatement, 80).unwrap();
    b.token(NodeKind::ContextName, Span::new(80, 85), "@test").unwrap();
    b.start_node(NodeKind::Property, 86).unwrap();
    b.token(NodeKind::Identifier, Span::new(86, 90), "name").unwrap();
    b.token(NodeKind::Literal, Span::new(92, 95), "\"t\"").unwrap();
    b.finish_node(95).unwrap();
    b.finish_node(95).unwrap();

    b.finish_node(96).unwrap();
    SyntaxTree::new(b.finish().unwrap())
}

/// Every node of the tree in pre-order.
pub fn preorder(tree: &SyntaxTree) -> Vec<TreeNode> {
    fn go(node: TreeNode, out: &mut Vec<TreeNode>) {
        let children = node.children().unwrap();
        out.push(node);
        for child in children {
            go(child, out);
        }
    }

    let mut out = Vec::new();
    go(tree.root().unwrap(), &mut out);
    out
}
