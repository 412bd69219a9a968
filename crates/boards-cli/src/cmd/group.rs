use super::Context;
use crate::output::{render, render_success};
use anyhow::Result;
use boards_core::model::GroupPatch;
use boards_core::ops;
use clap::Subcommand;
use serde::Serialize;
use std::io::Write;

#[derive(Subcommand, Debug)]
pub enum GroupCommand {
    #[command(
        about = "Append a group to a board",
        after_help = "EXAMPLES:\n    # Group with default title and color\n    brd group add b1\n\n    # Named and colored\n    brd group add b1 --title \"Done\" --color \"#00c875\""
    )]
    Add {
        /// Board id.
        board: String,
        /// Group title. Defaults to the configured group title.
        #[arg(long)]
        title: Option<String>,
        /// Group color, e.g. "#579bfc". Defaults to the configured color.
        #[arg(long)]
        color: Option<String>,
    },

    #[command(
        about = "Change a group's title or color",
        after_help = "EXAMPLES:\n    brd group update b1 g2 --title \"Icebox\" --color \"#c4c4c4\""
    )]
    Update {
        /// Board id.
        board: String,
        /// Group id.
        group: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },

    #[command(
        about = "Delete a group and its items",
        after_help = "EXAMPLES:\n    brd group delete b1 g2"
    )]
    Delete {
        /// Board id.
        board: String,
        /// Group id.
        group: String,
    },
}

#[derive(Debug, Serialize)]
struct Created {
    board_id: String,
    id: String,
}

/// Execute `brd group <subcommand>`.
///
/// # Errors
///
/// Returns an error if the board or group does not exist, the board is
/// locked, or the snapshot cannot be written.
pub fn run_group(command: &GroupCommand, ctx: &Context) -> Result<()> {
    let store = ctx.store()?;

    match command {
        GroupCommand::Add {
            board,
            title,
            color,
        } => {
            let id = store.transact(|boards| {
                ctx.open_board(&boards, board)?;
                anyhow::Ok(ops::add_group(
                    &boards,
                    board,
                    title.as_deref(),
                    color.as_deref(),
                    &ctx.project.defaults,
                )?)
            })?;
            let created = Created {
                board_id: board.clone(),
                id,
            };
            render(ctx.output, &created, |created, w| {
                writeln!(w, "✓ Added group {} to board {}", created.id, created.board_id)
            })
        }
        GroupCommand::Update {
            board,
            group,
            title,
            color,
        } => {
            let patch = GroupPatch {
                title: title.clone(),
                color: color.clone(),
            };
            store.transact(|boards| {
                ctx.open_board(&boards, board)?;
                anyhow::Ok((ops::update_group(&boards, board, group, &patch)?, ()))
            })?;
            render_success(ctx.output, &format!("Updated group {group}"))
        }
        GroupCommand::Delete { board, group } => {
            store.transact(|boards| {
                ctx.open_board(&boards, board)?;
                anyhow::Ok((ops::delete_group(&boards, board, group)?, ()))
            })?;
            render_success(ctx.output, &format!("Deleted group {group}"))
        }
    }
}
