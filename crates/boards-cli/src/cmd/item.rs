use super::Context;
use crate::output::{render, render_success};
use anyhow::Result;
use boards_core::model::{ItemPatch, Status};
use boards_core::ops;
use clap::{Args, Subcommand};
use serde::Serialize;
use std::io::Write;

#[derive(Subcommand, Debug)]
pub enum ItemCommand {
    #[command(
        about = "Append an item to a group",
        after_help = "EXAMPLES:\n    # Named item\n    brd item add b1 g2 \"Dark mode\"\n\n    # Default name\n    brd item add b1 g2"
    )]
    Add {
        /// Board id.
        board: String,
        /// Group id.
        group: String,
        /// Item name. Blank uses the configured default.
        name: Option<String>,
    },

    #[command(
        about = "Change an item's name, status or due date",
        after_help = "EXAMPLES:\n    # Mark done\n    brd item update b1 g1 i1 --status done\n\n    # Set a due date\n    brd item update b1 g1 i1 --date 2026-11-15\n\n    # Remove the due date\n    brd item update b1 g1 i1 --clear-date"
    )]
    Update(UpdateArgs),

    #[command(about = "Delete an item", after_help = "EXAMPLES:\n    brd item delete b1 g2 i3")]
    Delete {
        /// Board id.
        board: String,
        /// Group id.
        group: String,
        /// Item id.
        item: String,
    },
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Board id.
    pub board: String,
    /// Group id.
    pub group: String,
    /// Item id.
    pub item: String,

    #[arg(long)]
    pub name: Option<String>,

    /// gray, working, done or stuck.
    #[arg(long)]
    pub status: Option<Status>,

    /// Due date, YYYY-MM-DD.
    #[arg(long)]
    pub date: Option<String>,

    /// Remove the due date.
    #[arg(long, conflicts_with = "date")]
    pub clear_date: bool,
}

impl UpdateArgs {
    fn patch(&self) -> ItemPatch {
        let date = if self.clear_date {
            Some(None)
        } else {
            self.date.clone().map(Some)
        };
        ItemPatch {
            name: self.name.clone(),
            status: self.status,
            date,
        }
    }
}

#[derive(Debug, Serialize)]
struct Created {
    board_id: String,
    group_id: String,
    id: String,
}

/// Execute `brd item <subcommand>`.
///
/// # Errors
///
/// Returns an error if the board, group or item does not exist, the board
/// is locked, the date does not parse, or the snapshot cannot be written.
pub fn run_item(command: &ItemCommand, ctx: &Context) -> Result<()> {
    let store = ctx.store()?;

    match command {
        ItemCommand::Add { board, group, name } => {
            let id = store.transact(|boards| {
                ctx.open_board(&boards, board)?;
                anyhow::Ok(ops::add_item(
                    &boards,
                    board,
                    group,
                    name.as_deref(),
                    &ctx.project.defaults,
                )?)
            })?;
            let created = Created {
                board_id: board.clone(),
                group_id: group.clone(),
                id,
            };
            render(ctx.output, &created, |created, w| {
                writeln!(w, "✓ Added item {} to group {}", created.id, created.group_id)
            })
        }
        ItemCommand::Update(args) => {
            let patch = args.patch();
            store.transact(|boards| {
                ctx.open_board(&boards, &args.board)?;
                let next = ops::update_item(&boards, &args.board, &args.group, &args.item, &patch)?;
                anyhow::Ok((next, ()))
            })?;
            render_success(ctx.output, &format!("Updated item {}", args.item))
        }
        ItemCommand::Delete { board, group, item } => {
            store.transact(|boards| {
                ctx.open_board(&boards, board)?;
                anyhow::Ok((ops::delete_item(&boards, board, group, item)?, ()))
            })?;
            render_success(ctx.output, &format!("Deleted item {item}"))
        }
    }
}
