//! Compute "move statement up/down" edits over a tree-sitter syntax tree.
//!
//! The tree is a read-only snapshot; a successful move is returned as a
//! [`MoveEdit`] describing two line ranges to swap, and every "no legal move"
//! condition is `None` rather than an error. Callers re-parse and re-plan
//! after applying an edit.


use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use strum::{EnumString, VariantNames};
use tree_sitter::{Node, Point, Tree};

use crate::edit::{LineRange, MoveEdit};

#[derive(
    Debug,
    Clone,
    Deserialize,
    Serialize,
    Copy,
    Eq,
    PartialEq,
    EnumString,
    VariantNames,
    ValueEnum,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MoveDirection {
    Up,
    Down,
}

impl MoveDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoveDirection::Up => "up",
            MoveDirection::Down => "down",
        }
    }
}

impl Display for MoveDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reordering rules for one construct family (functions, block statements).
///
/// Policies are plain data dispatched by node kind; each language contributes
/// a static list of them.
#[derive(Debug)]
pub struct MoverPolicy {
    pub name: &'static str,

    /// Node kinds that can be picked up and reordered.
    pub movable_kinds: &'static [&'static str],

    /// Node kinds that bound the reordering scope. Walking upward from the
    /// cursor stops at these; a unit is only ever reordered among siblings
    /// inside the same container.
    pub container_kinds: &'static [&'static str],

    /// Node kinds that travel with a unit when they sit directly above it
    /// (attributes, doc comments).
    pub leading_kinds: &'static [&'static str],
}

impl MoverPolicy {
    fn is_movable(&self, kind: &str) -> bool {
        self.movable_kinds.contains(&kind)
    }

    fn is_container(&self, kind: &str) -> bool {
        self.container_kinds.contains(&kind)
    }

    fn is_leading_marker(&self, kind: &str) -> bool {
        self.leading_kinds.contains(&kind)
    }
}

/// A movable construct resolved from a cursor position.
#[derive(Debug)]
pub struct MovableUnit<'tree> {
    pub node: Node<'tree>,
    pub policy: &'static MoverPolicy,

    /// Minimal line span that must move atomically: attached leading markers
    /// plus the node's own span. Always contains the node's own range.
    pub anchor: LineRange,

    /// Candidate boundary lines (anchor start, marker lines, node start, the
    /// introducing keyword's line), deduplicated and in source order.
    pub candidate_lines: Vec<usize>,
}

impl<'tree> MovableUnit<'tree> {
    fn new(node: Node<'tree>, policy: &'static MoverPolicy) -> Self {
        let markers = leading_markers(node, policy);

        let mut candidate_lines: Vec<usize> = markers
            .iter()
            .map(|marker| marker.start_position().row)
            .collect();
        candidate_lines.push(node.start_position().row);
        if let Some(row) = introducing_keyword_row(node) {
            candidate_lines.push(row);
        }
        candidate_lines.sort_unstable();
        candidate_lines.dedup();

        let start = candidate_lines
            .first()
            .copied()
            .unwrap_or_else(|| node.start_position().row);
        let anchor = LineRange::new(start, node.end_position().row);

        Self {
            node,
            policy,
            anchor,
            candidate_lines,
        }
    }
}

/// Find the nearest movable ancestor of the node at `position`.
///
/// Walks strictly upward; a policy stops matching once the walk crosses one
/// of its container kinds, so a unit is never collected from outside its own
/// scope. `None` means the move action is unavailable here.
pub fn collect<'tree>(
    tree: &'tree Tree,
    position: Point,
    movers: &'static [MoverPolicy],
) -> Option<MovableUnit<'tree>> {
    let mut node = crate::find_node_by_position(tree, position);
    let mut blocked = vec![false; movers.len()];

    while let Some(current) = node {
        for (index, policy) in movers.iter().enumerate() {
            if blocked[index] {
                continue;
            }
            if policy.is_movable(current.kind()) {
                let unit = MovableUnit::new(current, policy);
                log::debug!(
                    "collected {} ({}) at lines {}..={}",
                    current.kind(),
                    policy.name,
                    unit.anchor.start,
                    unit.anchor.end
                );
                return Some(unit);
            }
            if policy.is_container(current.kind()) {
                blocked[index] = true;
            }
        }
        if blocked.iter().all(|flag| *flag) {
            break;
        }
        node = current.parent();
    }

    None
}

/// Plan a move of the unit at `position` one step in `direction`.
///
/// Returns the swap of the unit's and its adjacent compatible sibling's
/// anchor ranges, or `None` when no legal move exists (no movable ancestor,
/// unit already first/last in its container, or a non-movable sibling in the
/// way).
pub fn plan_move(
    tree: &Tree,
    position: Point,
    direction: MoveDirection,
    movers: &'static [MoverPolicy],
) -> Option<MoveEdit> {
    let unit = collect(tree, position, movers)?;
    let policy = unit.policy;

    let partner_node = find_partner(unit.node, policy, direction)?;
    let partner = MovableUnit::new(partner_node, policy);
    log::debug!(
        "swapping with {} at lines {}..={}",
        partner_node.kind(),
        partner.anchor.start,
        partner.anchor.end
    );

    let (mut unit_range, mut sibling_range) = (unit.anchor, partner.anchor);

    // Comments between the two units trail the upper one and travel with it.
    match direction {
        MoveDirection::Up => {
            if let Some(end) = trailing_comment_end(partner_node, unit_range.start) {
                sibling_range.end = end;
            }
        }
        MoveDirection::Down => {
            if let Some(end) = trailing_comment_end(unit.node, sibling_range.start) {
                unit_range.end = end;
            }
        }
    }

    // A line-based swap is only defined when the two ranges occupy disjoint
    // lines; units sharing a line cannot be moved.
    let (upper, lower) = if unit_range.start <= sibling_range.start {
        (unit_range, sibling_range)
    } else {
        (sibling_range, unit_range)
    };
    if upper.end >= lower.start {
        log::trace!("units share a line, move unavailable");
        return None;
    }

    Some(MoveEdit {
        direction,
        unit: unit_range,
        sibling: sibling_range,
    })
}

/// The nearest sibling in `direction` that the unit may swap with.
///
/// Leading markers (comments, attributes) are stepped over; the first other
/// sibling must itself be movable under the same policy, otherwise the move
/// is unavailable.
fn find_partner<'tree>(
    node: Node<'tree>,
    policy: &MoverPolicy,
    direction: MoveDirection,
) -> Option<Node<'tree>> {
    let mut current = node;
    loop {
        let sibling = match direction {
            MoveDirection::Up => current.prev_named_sibling(),
            MoveDirection::Down => current.next_named_sibling(),
        }?;

        if policy.is_movable(sibling.kind()) {
            return Some(sibling);
        }
        if policy.is_leading_marker(sibling.kind()) {
            current = sibling;
            continue;
        }
        log::trace!("move blocked by {} sibling", sibling.kind());
        return None;
    }
}

/// Markers sitting directly above `node`, in source order.
///
/// A marker only attaches when it occupies its own lines and the run is
/// contiguous with the node; a comment trailing an earlier sibling on the
/// same line stays where it is.
fn leading_markers<'tree>(node: Node<'tree>, policy: &MoverPolicy) -> Vec<Node<'tree>> {
    let mut markers = Vec::new();
    let mut current = node;

    while let Some(prev) = current.prev_named_sibling() {
        if !policy.is_leading_marker(prev.kind()) {
            break;
        }
        if last_row(prev) + 1 != current.start_position().row {
            break;
        }
        if let Some(before) = prev.prev_sibling() {
            if last_row(before) == prev.start_position().row {
                break;
            }
        }
        markers.push(prev);
        current = prev;
    }

    markers.reverse();
    markers
}

/// Last line a node actually occupies. Doc-comment `line_comment` tokens
/// consume their trailing newline, so their `end_position` sits at column 0
/// of the following row.
fn last_row(node: Node<'_>) -> usize {
    let end = node.end_position();
    if end.column == 0 && end.row > node.start_position().row {
        end.row - 1
    } else {
        end.row
    }
}

/// Line of the keyword token introducing the construct (`fn`, `let`, ...),
/// which may differ from the node's first line for multi-line signatures
/// with leading modifiers.
fn introducing_keyword_row(node: Node<'_>) -> Option<usize> {
    let mut cursor = node.walk();
    let row = node
        .children(&mut cursor)
        .find(|child| !child.is_named())
        .map(|child| child.start_position().row);
    row
}

/// Last line of the comment run trailing `upper`, stopping before
/// `lower_start` so the lower unit's own leading markers are untouched.
fn trailing_comment_end(upper: Node<'_>, lower_start: usize) -> Option<usize> {
    let mut end = None;
    let mut current = upper;

    while let Some(next) = current.next_named_sibling() {
        if next.start_position().row >= lower_start {
            break;
        }
        if matches!(next.kind(), "line_comment" | "block_comment") {
            end = Some(last_row(next));
            current = next;
        } else {
            break;
        }
    }

    end
}
