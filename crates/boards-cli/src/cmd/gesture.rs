//! `brd reorder`, `brd move` and `brd drag`: drag-and-drop from the shell.
//!
//! Stale or unknown ids never fail here. The engine leaves the board as it
//! was and the output reports `changed: false`.

use super::{Context, board_changed};
use crate::cmd::show::{BoardView, render_board};
use anyhow::Result;
use boards_core::drag::{DragKind, DragStart, DropTarget, apply_drag};
use boards_core::model::Board;
use boards_core::reorder::{move_item, reorder_groups};
use clap::Args;
use std::sync::Arc;
use tracing::debug;

#[derive(Args, Debug)]
pub struct ReorderArgs {
    /// Board id.
    pub board: String,
    /// Group being dragged.
    pub active: String,
    /// Group it was dropped on.
    pub over: String,
}

#[derive(Args, Debug)]
pub struct MoveArgs {
    /// Board id.
    pub board: String,
    /// Item being dragged.
    pub item: String,
    /// Item (or group) it was dropped on.
    #[arg(long)]
    pub over: String,
    /// Group that held the item when the drag started.
    #[arg(long)]
    pub from: String,
    /// Group under the pointer, when the drop landed on a group.
    #[arg(long)]
    pub over_group: Option<String>,
}

#[derive(Args, Debug)]
pub struct DragArgs {
    /// Board id.
    pub board: String,
    /// Id of the dragged group or item.
    #[arg(long)]
    pub active: String,
    /// What is being dragged: group or item.
    #[arg(long)]
    pub kind: DragKind,
    /// Owning group of a dragged item.
    #[arg(long)]
    pub from: Option<String>,
    /// Drop target id. Omit for a drop outside any target.
    #[arg(long)]
    pub over: Option<String>,
    /// What the drop target is: group or item. Defaults to item.
    #[arg(long, requires = "over")]
    pub over_kind: Option<DragKind>,
    /// Group of the drop target.
    #[arg(long, requires = "over")]
    pub over_group: Option<String>,
}

impl DragArgs {
    fn start(&self) -> DragStart {
        DragStart {
            id: self.active.clone(),
            kind: self.kind,
            group_id: self.from.clone(),
        }
    }

    fn target(&self) -> Option<DropTarget> {
        self.over.as_ref().map(|over| DropTarget {
            id: over.clone(),
            kind: self.over_kind.unwrap_or(DragKind::Item),
            group_id: self.over_group.clone(),
        })
    }
}

/// Execute `brd reorder <board> <active> <over>`.
///
/// # Errors
///
/// Returns an error if the board does not exist, is locked, or the snapshot
/// cannot be written.
pub fn run_reorder(args: &ReorderArgs, ctx: &Context) -> Result<()> {
    apply_gesture(ctx, &args.board, |boards| {
        reorder_groups(boards, &args.board, &args.active, &args.over)
    })
}

/// Execute `brd move <board> <item> --over <id> --from <group>`.
///
/// # Errors
///
/// Same as [`run_reorder`].
pub fn run_move(args: &MoveArgs, ctx: &Context) -> Result<()> {
    apply_gesture(ctx, &args.board, |boards| {
        move_item(
            boards,
            &args.board,
            &args.item,
            &args.over,
            Some(args.from.as_str()),
            args.over_group.as_deref(),
        )
    })
}

/// Execute `brd drag <board> --active <id> --kind <kind> ...`.
///
/// # Errors
///
/// Same as [`run_reorder`].
pub fn run_drag(args: &DragArgs, ctx: &Context) -> Result<()> {
    let start = args.start();
    let target = args.target();
    apply_gesture(ctx, &args.board, |boards| {
        apply_drag(boards, &args.board, &start, target.as_ref())
    })
}

/// Run `gesture` under the store's write lock and print the resulting board.
fn apply_gesture(
    ctx: &Context,
    board_id: &str,
    gesture: impl FnOnce(&[Arc<Board>]) -> Vec<Arc<Board>>,
) -> Result<()> {
    let store = ctx.store()?;
    let (view, changed) = store.transact(|boards| {
        ctx.open_board(&boards, board_id)?;
        let next = gesture(&boards);
        let changed = board_changed(&boards, &next, board_id);
        if !changed {
            debug!(board_id, "gesture left the board unchanged");
        }
        let board = ctx.open_board(&next, board_id)?;
        let view = BoardView::of(board).with_changed(changed);
        anyhow::Ok((next, (view, changed)))
    })?;

    debug!(board_id, changed, "gesture applied");
    render_board(ctx.output, &view)
}
