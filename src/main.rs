#![allow(clippy::collapsible_if)]

use std::{fs::OpenOptions, path::PathBuf};

use anyhow::{anyhow, Result};
use clap::Parser;
use env_logger::{Builder, Target};
use ropey::Rope;
use tree_sitter::Point;

use semantic_mover::{
    edit,
    languages::LanguageRegistry,
    mover::{plan_move, MoveDirection},
};

/// Move the function or statement at a cursor position up or down among its
/// siblings, the way an editor's "move statement" action would.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Source file to move within
    file: PathBuf,

    /// Cursor line (1-based)
    #[arg(long)]
    line: usize,

    /// Cursor column (1-based)
    #[arg(long, default_value_t = 1)]
    column: usize,

    /// Direction to move the unit under the cursor
    #[arg(long, value_enum)]
    direction: MoveDirection,

    /// Language name override when the file extension is ambiguous
    #[arg(long)]
    language: Option<String>,

    /// Rewrite the file in place instead of printing the edit
    #[arg(long)]
    apply: bool,

    /// Print a diff of the move instead of the edit
    #[arg(long, conflicts_with = "apply")]
    preview: bool,
}

fn main() -> Result<()> {
    init_logging()?;
    let args = Args::parse();

    let registry = LanguageRegistry::new()?;
    let language =
        registry.get_language_with_hint(&args.file.to_string_lossy(), args.language.as_deref())?;

    let source = std::fs::read_to_string(&args.file)?;
    let mut parser = language.tree_sitter_parser()?;
    let tree = parser.parse(&source, None).ok_or_else(|| {
        anyhow!(
            "Unable to parse {} as {}",
            args.file.display(),
            language.name()
        )
    })?;

    let position = Point::new(args.line.saturating_sub(1), args.column.saturating_sub(1));
    let Some(move_edit) = plan_move(&tree, position, args.direction, language.movers()) else {
        println!("unavailable");
        return Ok(());
    };

    if args.apply || args.preview {
        let rope = Rope::from_str(&source);
        let output = move_edit.apply(&rope);

        if let Some(new_tree) = parser.parse(&output, None) {
            if new_tree.root_node().has_error() {
                log::error!(
                    "move in {} produced a tree with syntax errors",
                    args.file.display()
                );
            }
        }

        if args.preview {
            println!("{}", edit::diff(&source, &output));
        } else {
            std::fs::write(&args.file, output)?;
            println!(
                "Applied {} move of {} {} in {}",
                move_edit.direction,
                move_edit.unit.line_count(),
                if move_edit.unit.line_count() == 1 {
                    "line"
                } else {
                    "lines"
                },
                args.file.display()
            );
        }
    } else {
        println!("{}", serde_json::to_string_pretty(&move_edit)?);
    }

    Ok(())
}

fn init_logging() -> Result<()> {
    if let Ok(log_location) = std::env::var("LOG_LOCATION") {
        let path = PathBuf::from(&*shellexpand::tilde(&log_location));
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Builder::from_default_env()
            .target(Target::Pipe(Box::new(
                OpenOptions::new().create(true).append(true).open(path)?,
            )))
            .init();
    } else {
        env_logger::init();
    }
    Ok(())
}
