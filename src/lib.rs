#![allow(clippy::collapsible_if)]
#![deny(dead_code)]

pub mod edit;
pub mod languages;
pub mod mover;

use tree_sitter::{Node, Point, Tree};

pub fn get_node_text<'a>(node: &Node, source_code: &'a str) -> &'a str {
    &source_code[node.start_byte()..node.end_byte()]
}

pub fn find_node_by_position(tree: &Tree, point: Point) -> Option<Node<'_>> {
    let mut node = tree.root_node().descendant_for_point_range(point, point)?;

    // Walk up the tree to find a more "meaningful" node for moving
    // Skip trivial nodes like punctuation, identifiers, and literals
    while is_trivial_node(&node) && node.parent().is_some() {
        if let Some(parent) = node.parent() {
            node = parent;
        } else {
            break;
        }
    }

    Some(node)
}

/// Determines if a node is "trivial" and should be skipped for semantic selection
fn is_trivial_node(node: &Node) -> bool {
    match node.kind() {
        // Skip punctuation and delimiters
        "(" | ")" | "{" | "}" | "[" | "]" | ";" | "," | "." | ":" | "::" | "!" => true,
        // Skip small tokens that are rarely useful as move targets
        "identifier" | "string_content" | "integer_literal" | "float_literal" => true,
        // Skip keywords unless they're at the start of a meaningful construct
        "fn" | "struct" | "impl" | "trait" | "mod" | "let" | "mut" | "pub" => {
            // Only skip if parent exists and is more meaningful
            node.parent().is_some_and(|parent| {
                matches!(
                    parent.kind(),
                    "function_item"
                        | "struct_item"
                        | "impl_item"
                        | "trait_item"
                        | "mod_item"
                        | "let_declaration"
                )
            })
        }
        _ => false,
    }
}
