//! `brd lock` and `brd unlock`: per-board PIN management.
//!
//! Locking an already protected board needs the current PIN via `--pin`.
//! `brd unlock` checks `--pin` and removes the code for good.

use super::Context;
use crate::output::render_success;
use anyhow::Result;
use boards_core::security::{self, UnlockSet};
use clap::Args;
use tracing::info;

#[derive(Args, Debug)]
pub struct LockArgs {
    /// Board id.
    pub board: String,
    /// New four-digit PIN.
    pub new_pin: String,
}

#[derive(Args, Debug)]
pub struct UnlockArgs {
    /// Board id.
    pub board: String,
}

/// Execute `brd lock <board> <pin>`.
///
/// # Errors
///
/// Returns an error if the board does not exist, the new PIN is not four
/// digits, or the board is already locked and `--pin` does not open it.
pub fn run_lock(args: &LockArgs, ctx: &Context) -> Result<()> {
    let store = ctx.store()?;
    store.transact(|boards| {
        ctx.open_board(&boards, &args.board)?;
        let next = UnlockSet::new().set_pin(&boards, &args.board, &args.new_pin)?;
        anyhow::Ok((next, ()))
    })?;
    info!(board_id = %args.board, "board locked");
    render_success(ctx.output, &format!("Locked board {}", args.board))
}

/// Execute `brd --pin <pin> unlock <board>`.
///
/// # Errors
///
/// Returns an error if the board does not exist or `--pin` does not match.
pub fn run_unlock(args: &UnlockArgs, ctx: &Context) -> Result<()> {
    let store = ctx.store()?;
    store.transact(|boards| {
        ctx.open_board(&boards, &args.board)?;
        anyhow::Ok((security::set_pin(&boards, &args.board, None)?, ()))
    })?;
    info!(board_id = %args.board, "board unlocked");
    render_success(ctx.output, &format!("Removed PIN from board {}", args.board))
}
