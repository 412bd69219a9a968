//! Per-board PIN protection.
//!
//! A PIN hides a board until it is unlocked for the session. It is a
//! privacy curtain, not encryption: the code is stored in the snapshot as
//! plain text.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::error::BoardsError;
use crate::model::Board;
use crate::ops::{find_board, set_board_pin};

/// Check that `pin` is exactly four ASCII digits.
pub fn validate_pin(pin: &str) -> Result<(), BoardsError> {
    if pin.len() == 4 && pin.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(BoardsError::InvalidPin)
    }
}

/// Store (`Some`) or clear (`None`) a board's PIN.
pub fn set_pin(
    boards: &[Arc<Board>],
    board_id: &str,
    pin: Option<&str>,
) -> Result<Vec<Arc<Board>>, BoardsError> {
    if let Some(pin) = pin {
        validate_pin(pin)?;
    }
    set_board_pin(boards, board_id, pin)
}

/// Board ids unlocked during the current session.
#[derive(Debug, Clone, Default)]
pub struct UnlockSet {
    unlocked: HashSet<String>,
}

impl UnlockSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Unlock `board` when `pin` matches its code.
    ///
    /// Boards without a PIN are never locked, so unlocking them succeeds
    /// trivially.
    pub fn unlock(&mut self, board: &Board, pin: &str) -> Result<(), BoardsError> {
        match board.pin_code.as_deref() {
            None => Ok(()),
            Some(code) if code == pin => {
                self.unlocked.insert(board.id.clone());
                Ok(())
            }
            Some(_) => {
                debug!(board_id = %board.id, "pin mismatch");
                Err(BoardsError::BoardLocked {
                    board_id: board.id.clone(),
                })
            }
        }
    }

    /// Mark a board unlocked without checking, e.g. right after its PIN was set.
    pub fn grant(&mut self, board_id: &str) {
        self.unlocked.insert(board_id.to_string());
    }

    #[must_use]
    pub fn is_locked(&self, board: &Board) -> bool {
        board.is_protected() && !self.unlocked.contains(&board.id)
    }

    /// Set a PIN and keep the board unlocked for whoever set it.
    pub fn set_pin(
        &mut self,
        boards: &[Arc<Board>],
        board_id: &str,
        pin: &str,
    ) -> Result<Vec<Arc<Board>>, BoardsError> {
        let next = set_pin(boards, board_id, Some(pin))?;
        self.grant(board_id);
        Ok(next)
    }

    /// The board, provided it is not locked.
    pub fn accessible<'a>(
        &self,
        boards: &'a [Arc<Board>],
        board_id: &str,
    ) -> Result<&'a Arc<Board>, BoardsError> {
        let board = find_board(boards, board_id)?;
        if self.is_locked(board) {
            return Err(BoardsError::BoardLocked {
                board_id: board.id.clone(),
            });
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{board, group};

    fn snapshot() -> Vec<Arc<Board>> {
        vec![board("b1", vec![group("g1", &["i1"])]), board("b2", vec![])]
    }

    #[test]
    fn pin_must_be_four_digits() {
        assert!(validate_pin("0420").is_ok());
        for bad in ["", "123", "12345", "12a4", " 123", "١٢٣٤"] {
            assert!(
                matches!(validate_pin(bad), Err(BoardsError::InvalidPin)),
                "{bad:?} accepted"
            );
        }
    }

    #[test]
    fn set_and_clear_pin() {
        let boards = snapshot();
        let locked = set_pin(&boards, "b1", Some("1234")).unwrap();
        assert_eq!(locked[0].pin_code.as_deref(), Some("1234"));
        assert!(Arc::ptr_eq(&locked[0].groups[0], &boards[0].groups[0]));
        assert!(Arc::ptr_eq(&locked[1], &boards[1]));

        let cleared = set_pin(&locked, "b1", None).unwrap();
        assert!(cleared[0].pin_code.is_none());
    }

    #[test]
    fn set_pin_rejects_bad_pin_and_unknown_board() {
        assert!(matches!(
            set_pin(&snapshot(), "b1", Some("12")),
            Err(BoardsError::InvalidPin)
        ));
        assert!(matches!(
            set_pin(&snapshot(), "zz", Some("1234")),
            Err(BoardsError::BoardNotFound { .. })
        ));
    }

    #[test]
    fn unlock_requires_matching_pin() {
        let boards = set_pin(&snapshot(), "b1", Some("1234")).unwrap();
        let mut session = UnlockSet::new();
        assert!(session.is_locked(&boards[0]));
        assert!(!session.is_locked(&boards[1]));

        assert!(session.unlock(&boards[0], "9999").is_err());
        assert!(session.is_locked(&boards[0]));

        session.unlock(&boards[0], "1234").unwrap();
        assert!(!session.is_locked(&boards[0]));
        assert!(session.accessible(&boards, "b1").is_ok());
    }

    #[test]
    fn setter_stays_unlocked() {
        let mut session = UnlockSet::new();
        let boards = session.set_pin(&snapshot(), "b2", "4321").unwrap();
        assert!(boards[1].is_protected());
        assert!(!session.is_locked(&boards[1]));
        assert!(UnlockSet::new().accessible(&boards, "b2").is_err());
    }
}
