use ropey::Rope;
use semantic_mover::{
    edit::diff,
    languages::LanguageRegistry,
    mover::{plan_move, MoveDirection},
};
use tree_sitter::Point;

/// Plan and apply a move at a 0-based cursor position, or `None` when the
/// move is unavailable.
fn move_at(source: &str, line: usize, column: usize, direction: MoveDirection) -> Option<String> {
    let registry = LanguageRegistry::new().unwrap();
    let language = registry.get_language("rust").unwrap();
    let tree = language
        .tree_sitter_parser()
        .unwrap()
        .parse(source, None)
        .unwrap();
    let edit = plan_move(&tree, Point::new(line, column), direction, language.movers())?;
    Some(edit.apply(&Rope::from_str(source)))
}

const ABC: &str = "fn alpha() {}\n\nfn beta() {}\n\nfn gamma() {}\n";

#[test]
fn moving_the_middle_function_down_then_back_up() {
    let moved = move_at(ABC, 2, 0, MoveDirection::Down).unwrap();
    assert_eq!(moved, "fn alpha() {}\n\nfn gamma() {}\n\nfn beta() {}\n");

    // beta is now last, so another move down is unavailable
    assert!(move_at(&moved, 4, 0, MoveDirection::Down).is_none());

    // moving beta back up swaps it with its adjacent sibling gamma,
    // restoring the original order
    assert_eq!(move_at(&moved, 4, 0, MoveDirection::Up).unwrap(), ABC);

    // a move always swaps with the adjacent sibling only: gamma (middle)
    // moved up trades places with alpha, not with beta
    assert_eq!(
        move_at(&moved, 2, 0, MoveDirection::Up).unwrap(),
        "fn gamma() {}\n\nfn alpha() {}\n\nfn beta() {}\n"
    );
}

#[test]
fn round_trip_with_attached_markers_restores_the_source() {
    let source = "/// First helper.\nfn first() -> u32 {\n    1\n}\n\n#[cfg(test)]\nfn second() {}\n";

    let moved = move_at(source, 1, 0, MoveDirection::Down).unwrap();
    assert_eq!(
        moved,
        "#[cfg(test)]\nfn second() {}\n\n/// First helper.\nfn first() -> u32 {\n    1\n}\n"
    );

    // `fn first` now starts on line 4
    assert_eq!(move_at(&moved, 4, 0, MoveDirection::Up).unwrap(), source);
}

#[test]
fn attributes_and_doc_comments_travel_with_their_function() {
    let source = "fn plain() {}\n\n#[inline]\n/// Doubles the input.\nfn doubled(x: u32) -> u32 {\n    x * 2\n}\n";

    let moved = move_at(source, 4, 3, MoveDirection::Up).unwrap();
    assert_eq!(
        moved,
        "#[inline]\n/// Doubles the input.\nfn doubled(x: u32) -> u32 {\n    x * 2\n}\n\nfn plain() {}\n"
    );
}

#[test]
fn trailing_comment_stays_with_the_function_above_it() {
    let source = "fn first() {}\n// stray note\n\nfn second() {}\n";

    let moved = move_at(source, 0, 0, MoveDirection::Down).unwrap();
    assert_eq!(moved, "fn second() {}\n\nfn first() {}\n// stray note\n");
}

#[test]
fn moving_works_without_a_final_newline() {
    let source = "fn a() {}\nfn b() {}";

    let moved = move_at(source, 0, 0, MoveDirection::Down).unwrap();
    assert_eq!(moved, "fn b() {}\nfn a() {}");

    assert_eq!(move_at(&moved, 1, 0, MoveDirection::Up).unwrap(), source);
}

#[test]
fn statements_reorder_inside_their_own_block() {
    let source =
        "fn setup() {\n    let alpha = 1;\n    let beta = alpha + 1;\n    println!(\"{beta}\");\n}\n";

    let moved = move_at(source, 2, 8, MoveDirection::Up).unwrap();
    assert_eq!(
        moved,
        "fn setup() {\n    let beta = alpha + 1;\n    let alpha = 1;\n    println!(\"{beta}\");\n}\n"
    );

    assert_eq!(move_at(&moved, 1, 8, MoveDirection::Down).unwrap(), source);
}

#[test]
fn methods_reorder_inside_their_impl_but_never_leave_it() {
    let source =
        "impl Alpha {\n    fn one(&self) {}\n    fn two(&self) {}\n}\n\nimpl Beta {\n    fn three(&self) {}\n}\n";

    let moved = move_at(source, 2, 7, MoveDirection::Up).unwrap();
    assert_eq!(
        moved,
        "impl Alpha {\n    fn two(&self) {}\n    fn one(&self) {}\n}\n\nimpl Beta {\n    fn three(&self) {}\n}\n"
    );

    // last method of an impl cannot be moved down into the next impl
    assert!(move_at(source, 2, 7, MoveDirection::Down).is_none());
}

#[test]
fn diff_preview_shows_the_swap() {
    let moved = move_at(ABC, 2, 0, MoveDirection::Down).unwrap();
    let preview = diff(ABC, &moved);

    assert!(preview.starts_with("===DIFF==="));
    assert!(preview.lines().any(|line| line.starts_with('-')));
    assert!(preview.lines().any(|line| line.starts_with('+')));
}
