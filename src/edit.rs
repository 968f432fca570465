use diffy::{DiffOptions, PatchFormatter};
use ropey::Rope;
use serde::{Deserialize, Serialize};

use crate::mover::MoveDirection;

/// Inclusive span of 0-based line indices.
#[derive(Serialize, Deserialize, Clone, Debug, Copy, Eq, PartialEq)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, line: usize) -> bool {
        (self.start..=self.end).contains(&line)
    }

    pub fn line_count(&self) -> usize {
        self.end - self.start + 1
    }
}

/// A computed move: swap two sibling units' line ranges.
///
/// `unit` is the range of the unit under the cursor, `sibling` the range of
/// the adjacent unit it trades places with. Both ranges cover each side's
/// attached leading markers; interstitial blank lines between them stay put.
/// The host applies the swap; [`MoveEdit::apply`] does the same for the CLI
/// and for tests.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
pub struct MoveEdit {
    pub direction: MoveDirection,
    pub unit: LineRange,
    pub sibling: LineRange,
}

impl MoveEdit {
    /// The two swapped ranges in source order.
    pub fn ordered(&self) -> (LineRange, LineRange) {
        if self.unit.start <= self.sibling.start {
            (self.unit, self.sibling)
        } else {
            (self.sibling, self.unit)
        }
    }

    /// Swap the two line ranges in `rope`, leaving everything between them in
    /// place and each side's internal content untouched.
    pub fn apply(&self, rope: &Rope) -> String {
        let (upper, lower) = self.ordered();

        let upper_start = rope.line_to_char(upper.start);
        let upper_end = rope.line_to_char(upper.end + 1);
        let lower_start = rope.line_to_char(lower.start);
        let lower_end = rope.line_to_char(lower.end + 1);

        let upper_text = rope.slice(upper_start..upper_end).to_string();
        let middle = rope.slice(upper_end..lower_start).to_string();
        let mut lower_text = rope.slice(lower_start..lower_end).to_string();

        // A lower range at end-of-file may lack a final newline; it needs one
        // once it moves above other text.
        let had_newline = lower_text.ends_with('\n');
        if !had_newline {
            lower_text.push('\n');
        }

        let mut output = String::with_capacity(rope.len_bytes() + 1);
        output.push_str(&rope.slice(..upper_start).to_string());
        output.push_str(&lower_text);
        output.push_str(&middle);
        output.push_str(&upper_text);
        output.push_str(&rope.slice(lower_end..).to_string());

        if !had_newline && output.ends_with('\n') {
            output.pop();
        }

        output
    }
}

/// Render a unified diff between the original source and the moved output,
/// stripped of file and hunk headers.
pub fn diff(source: &str, output: &str) -> String {
    let patch = DiffOptions::new().create_patch(source, output);
    let formatter = PatchFormatter::new().missing_newline_message(false);

    let diff_output = formatter.fmt_patch(&patch).to_string();
    let mut cleaned_diff = String::from("===DIFF===\n");
    for line in diff_output.lines() {
        // Skip ALL diff headers: file headers, hunk headers, and metadata
        if line.starts_with("---") || line.starts_with("+++") || line.starts_with("@@") {
            continue;
        }
        cleaned_diff.push_str(line);
        cleaned_diff.push('\n');
    }

    // Remove trailing newline to avoid extra spacing
    if cleaned_diff.ends_with('\n') {
        cleaned_diff.pop();
    }
    cleaned_diff
}
