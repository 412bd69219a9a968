pub mod alerts;
pub mod board;
pub mod calendar;
pub mod completions;
pub mod gesture;
pub mod group;
pub mod init;
pub mod item;
pub mod list;
pub mod pin;
pub mod show;

use crate::output::OutputMode;
use boards_core::config::ProjectConfig;
use boards_core::error::BoardsError;
use boards_core::model::Board;
use boards_core::security::UnlockSet;
use boards_core::store::Store;
use std::path::PathBuf;
use std::sync::Arc;

/// Per-invocation state shared by every command handler.
#[derive(Debug)]
pub struct Context {
    pub root: PathBuf,
    pub output: OutputMode,
    pub project: ProjectConfig,
    /// PIN passed with `--pin`, used to open a locked board.
    pub pin: Option<String>,
}

impl Context {
    /// Open the store under the project root with the configured lock timeout.
    pub fn store(&self) -> Result<Store, BoardsError> {
        Ok(Store::open(&self.root)?.with_lock_timeout(self.project.store.lock_timeout()))
    }

    /// Check that `board_id` exists and is either unprotected or opened by
    /// `--pin`. Every command that reads or edits one board goes through here.
    pub fn open_board<'a>(
        &self,
        boards: &'a [Arc<Board>],
        board_id: &str,
    ) -> Result<&'a Arc<Board>, BoardsError> {
        let mut session = UnlockSet::new();
        let board = boards_core::ops::find_board(boards, board_id)?;
        if let Some(pin) = self.pin.as_deref() {
            session.unlock(board, pin)?;
        }
        session.accessible(boards, board_id)
    }
}

/// Whether `board_id` was rebuilt between two snapshots.
pub fn board_changed(before: &[Arc<Board>], after: &[Arc<Board>], board_id: &str) -> bool {
    let find = |boards: &[Arc<Board>]| boards.iter().find(|b| b.id == board_id).cloned();
    match (find(before), find(after)) {
        (Some(old), Some(new)) => !Arc::ptr_eq(&old, &new),
        (old, new) => old.is_some() != new.is_some(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boards_core::reorder::reorder_groups;
    use boards_core::security::set_pin;
    use boards_core::store::seed_boards;

    fn context(pin: Option<&str>) -> Context {
        Context {
            root: PathBuf::from("."),
            output: OutputMode::Text,
            project: ProjectConfig::default(),
            pin: pin.map(str::to_string),
        }
    }

    #[test]
    fn open_board_requires_pin_for_locked_board() {
        let boards = set_pin(&seed_boards(), "b1", Some("1234")).unwrap();

        let err = context(None).open_board(&boards, "b1").unwrap_err();
        assert!(matches!(err, BoardsError::BoardLocked { .. }));

        let err = context(Some("0000")).open_board(&boards, "b1").unwrap_err();
        assert!(matches!(err, BoardsError::BoardLocked { .. }));

        assert!(context(Some("1234")).open_board(&boards, "b1").is_ok());
        assert!(context(None).open_board(&boards, "b2").is_ok());
    }

    #[test]
    fn open_board_reports_unknown_board() {
        let err = context(None).open_board(&seed_boards(), "nope").unwrap_err();
        assert!(matches!(err, BoardsError::BoardNotFound { .. }));
    }

    #[test]
    fn board_changed_tracks_identity() {
        let boards = seed_boards();
        let same = reorder_groups(&boards, "b1", "g1", "missing");
        assert!(!board_changed(&boards, &same, "b1"));

        let moved = reorder_groups(&boards, "b1", "g2", "g1");
        assert!(board_changed(&boards, &moved, "b1"));
        assert!(!board_changed(&boards, &moved, "b2"));
    }
}
