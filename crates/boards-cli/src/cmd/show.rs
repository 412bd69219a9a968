//! `brd show`: display one board with its groups, items and progress.

use super::Context;
use crate::output::{OutputMode, pretty_kv, pretty_rule, pretty_section, render_mode};
use anyhow::Result;
use boards_core::model::{Board, Item};
use boards_core::progress::GroupProgress;
use clap::Args;
use serde::Serialize;
use std::io::{self, Write};
use std::sync::Arc;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Board id.
    pub board: String,
}

/// A board as printed by the CLI. The PIN itself is never echoed back.
#[derive(Debug, Serialize)]
pub struct BoardView {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub locked: bool,
    pub groups: Vec<GroupView>,
    /// Set by gesture commands: whether the board was rebuilt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changed: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct GroupView {
    pub id: String,
    pub title: String,
    pub color: String,
    pub progress: GroupProgress,
    pub items: Vec<Arc<Item>>,
}

impl BoardView {
    pub fn of(board: &Board) -> Self {
        Self {
            id: board.id.clone(),
            title: board.title.clone(),
            color: board.color.clone(),
            locked: board.is_protected(),
            groups: board
                .groups
                .iter()
                .map(|group| GroupView {
                    id: group.id.clone(),
                    title: group.title.clone(),
                    color: group.color.clone(),
                    progress: GroupProgress::of(group),
                    items: group.items.clone(),
                })
                .collect(),
            changed: None,
        }
    }

    #[must_use]
    pub const fn with_changed(mut self, changed: bool) -> Self {
        self.changed = Some(changed);
        self
    }
}

/// Execute `brd show <board>`.
///
/// # Errors
///
/// Returns an error if the board does not exist, is locked and `--pin` is
/// missing or wrong, or the snapshot cannot be loaded.
pub fn run_show(args: &ShowArgs, ctx: &Context) -> Result<()> {
    let boards = ctx.store()?.load()?;
    let board = ctx.open_board(&boards, &args.board)?;
    render_board(ctx.output, &BoardView::of(board))
}

/// Print a board view in the requested mode.
pub fn render_board(output: OutputMode, view: &BoardView) -> Result<()> {
    render_mode(
        output,
        view,
        |view, w| render_board_text(view, w),
        |view, w| render_board_human(view, w),
    )
}

fn render_board_text(view: &BoardView, w: &mut dyn Write) -> io::Result<()> {
    if let Some(changed) = view.changed {
        writeln!(w, "changed  {changed}")?;
    }
    writeln!(w, "board  {}  {}", view.id, view.title)?;
    for group in &view.groups {
        writeln!(w, "group  {}  {}  {}", group.id, group.title, group.progress)?;
        for item in &group.items {
            writeln!(
                w,
                "item  {}  {}  {}  {}",
                item.id,
                item.status,
                item.date.as_deref().unwrap_or("-"),
                item.name
            )?;
        }
    }
    Ok(())
}

fn render_board_human(view: &BoardView, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, &format!("{} ({})", view.title, view.id))?;
    if view.locked {
        pretty_kv(w, "Lock", "PIN protected")?;
    }
    if let Some(changed) = view.changed {
        pretty_kv(w, "Changed", if changed { "yes" } else { "no (nothing to move)" })?;
    }
    if view.groups.is_empty() {
        writeln!(w, "No groups yet. Add one with `brd group add {}`.", view.id)?;
        return Ok(());
    }

    for group in &view.groups {
        writeln!(w)?;
        writeln!(w, "{}  [{}]  {}", group.title, group.id, group.progress)?;
        pretty_rule(w)?;
        if group.items.is_empty() {
            writeln!(w, "  (empty)")?;
        }
        for item in &group.items {
            let status = if item.status.label().is_empty() {
                "-"
            } else {
                item.status.label()
            };
            writeln!(
                w,
                "  {:<28} {:<14} {:<12} {}",
                item.name,
                status,
                item.date.as_deref().unwrap_or(""),
                item.id
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use boards_core::security::set_pin;
    use boards_core::store::seed_boards;

    #[test]
    fn view_hides_pin_but_flags_lock() {
        let boards = set_pin(&seed_boards(), "b1", Some("1234")).unwrap();
        let view = BoardView::of(&boards[0]);
        assert!(view.locked);
        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("1234"));
        assert!(!json.contains("changed"));
    }

    #[test]
    fn text_render_lists_groups_and_items() {
        let boards = seed_boards();
        let view = BoardView::of(&boards[0]).with_changed(true);
        let mut buf = Vec::new();
        render_board_text(&view, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("changed  true\nboard  b1  Roadmap Produit\n"));
        assert!(text.contains("group  g1  Q4 2026 Objectives  0/2 (0%)"));
        assert!(text.contains("item  i3  gray  -  Dark Mode"));
    }

    #[test]
    fn pretty_render_mentions_empty_board() {
        let boards = seed_boards();
        let mut buf = Vec::new();
        render_board_human(&BoardView::of(&boards[1]), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Marketing (b2)"));
        assert!(text.contains("brd group add b2"));
    }
}
