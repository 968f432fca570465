use super::LanguageCommon;
use crate::mover::MoverPolicy;

const LEADING_MARKERS: &[&str] = &["attribute_item", "line_comment", "block_comment"];

/// Reordering policies for Rust, from most to least specific.
///
/// Functions are reordered among their siblings but never across a module,
/// trait, impl, or enclosing function boundary; statements are reordered
/// within their own block only.
static MOVERS: &[MoverPolicy] = &[
    MoverPolicy {
        name: "function",
        movable_kinds: &["function_item"],
        container_kinds: &["function_item", "mod_item", "trait_item", "impl_item"],
        leading_kinds: LEADING_MARKERS,
    },
    MoverPolicy {
        name: "statement",
        movable_kinds: &["let_declaration", "expression_statement"],
        container_kinds: &["block"],
        leading_kinds: LEADING_MARKERS,
    },
];

pub fn language() -> LanguageCommon {
    LanguageCommon::new("rust", &["rs"], tree_sitter_rust::LANGUAGE.into(), MOVERS)
}
