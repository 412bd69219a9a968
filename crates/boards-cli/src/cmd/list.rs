//! `brd boards`: list every board with its size and lock state.

use super::Context;
use crate::output::{pretty_rule, render_mode};
use anyhow::Result;
use boards_core::model::Board;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
pub struct BoardRow {
    pub id: String,
    pub title: String,
    pub locked: bool,
    pub groups: usize,
    pub items: usize,
}

impl BoardRow {
    fn of(board: &Board) -> Self {
        Self {
            id: board.id.clone(),
            title: board.title.clone(),
            locked: board.is_protected(),
            groups: board.groups.len(),
            items: board.item_count(),
        }
    }
}

/// Execute `brd boards`.
///
/// Locked boards are listed too; `brd show` needs `--pin` to open them.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be loaded.
pub fn run_boards(ctx: &Context) -> Result<()> {
    let boards = ctx.store()?.load()?;
    let rows: Vec<BoardRow> = boards.iter().map(|board| BoardRow::of(board)).collect();

    render_mode(
        ctx.output,
        &rows,
        |rows, w| {
            writeln!(w, "ID  TITLE  LOCKED  GROUPS  ITEMS")?;
            for row in rows {
                writeln!(
                    w,
                    "{}  {}  {}  {}  {}",
                    row.id, row.title, row.locked, row.groups, row.items
                )?;
            }
            Ok(())
        },
        |rows, w| {
            if rows.is_empty() {
                return writeln!(w, "No boards. Create one with `brd board add <title>`.");
            }
            writeln!(w, "{:<38} {:<28} {:>6} {:>6}", "ID", "TITLE", "GROUPS", "ITEMS")?;
            pretty_rule(w)?;
            for row in rows {
                let title = if row.locked {
                    format!("🔒 {}", row.title)
                } else {
                    row.title.clone()
                };
                writeln!(
                    w,
                    "{:<38} {:<28} {:>6} {:>6}",
                    row.id, title, row.groups, row.items
                )?;
            }
            Ok(())
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use boards_core::store::seed_boards;

    #[test]
    fn row_counts_groups_and_items() {
        let boards = seed_boards();
        let row = BoardRow::of(&boards[0]);
        assert_eq!(row.id, "b1");
        assert_eq!(row.groups, 2);
        assert_eq!(row.items, 3);
        assert!(!row.locked);

        let empty = BoardRow::of(&boards[1]);
        assert_eq!((empty.groups, empty.items), (0, 0));
    }
}
