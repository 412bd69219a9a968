use super::Context;
use crate::output::{render, render_success};
use anyhow::Result;
use boards_core::model::BoardPatch;
use boards_core::ops;
use clap::Subcommand;
use serde::Serialize;
use std::io::Write;
use tracing::info;

#[derive(Subcommand, Debug)]
pub enum BoardCommand {
    #[command(
        about = "Create an empty board",
        after_help = "EXAMPLES:\n    # Create a board\n    brd board add \"Roadmap\"\n\n    # Use the configured default title\n    brd board add"
    )]
    Add {
        /// Board title. Blank uses the configured default.
        title: Option<String>,
    },

    #[command(
        about = "Rename a board",
        after_help = "EXAMPLES:\n    brd board rename b1 \"Roadmap 2027\""
    )]
    Rename {
        /// Board id.
        board: String,
        /// New title.
        title: String,
    },

    #[command(
        about = "Delete a board and everything in it",
        after_help = "EXAMPLES:\n    brd board delete b2"
    )]
    Delete {
        /// Board id.
        board: String,
    },
}

#[derive(Debug, Serialize)]
struct Created {
    id: String,
    title: String,
}

/// Execute `brd board <subcommand>`.
///
/// # Errors
///
/// Returns an error if the board does not exist, is locked, or the snapshot
/// cannot be written.
pub fn run_board(command: &BoardCommand, ctx: &Context) -> Result<()> {
    let store = ctx.store()?;
    let defaults = &ctx.project.defaults;

    match command {
        BoardCommand::Add { title } => {
            let created = store.transact(|boards| {
                let (next, id) = ops::add_board(&boards, title.as_deref(), defaults);
                let title = ops::find_board(&next, &id)?.title.clone();
                anyhow::Ok((next, Created { id, title }))
            })?;
            info!(board_id = %created.id, "board created");
            render(ctx.output, &created, |created, w| {
                writeln!(w, "✓ Created board {} ({})", created.title, created.id)
            })
        }
        BoardCommand::Rename { board, title } => {
            store.transact(|boards| {
                ctx.open_board(&boards, board)?;
                let patch = BoardPatch {
                    title: Some(title.clone()),
                };
                anyhow::Ok((ops::update_board(&boards, board, &patch)?, ()))
            })?;
            render_success(ctx.output, &format!("Renamed board {board} to {title}"))
        }
        BoardCommand::Delete { board } => {
            store.transact(|boards| {
                ctx.open_board(&boards, board)?;
                anyhow::Ok((ops::delete_board(&boards, board)?, ()))
            })?;
            info!(board_id = %board, "board deleted");
            render_success(ctx.output, &format!("Deleted board {board}"))
        }
    }
}
