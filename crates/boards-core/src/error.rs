use std::fmt;
use std::path::PathBuf;

use crate::lock::LockError;

/// Machine-readable error codes for scripts and agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NotInitialized,
    ConfigParseError,
    AlreadyInitialized,
    BoardNotFound,
    GroupNotFound,
    ItemNotFound,
    InvalidPin,
    BoardLocked,
    InvalidEnumValue,
    InvalidDate,
    CorruptSnapshot,
    SnapshotWriteFailed,
    LockContention,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NotInitialized => "E1001",
            Self::ConfigParseError => "E1002",
            Self::AlreadyInitialized => "E1003",
            Self::BoardNotFound => "E2001",
            Self::GroupNotFound => "E2002",
            Self::ItemNotFound => "E2003",
            Self::InvalidEnumValue => "E2004",
            Self::InvalidDate => "E2005",
            Self::InvalidPin => "E4001",
            Self::BoardLocked => "E4002",
            Self::CorruptSnapshot => "E3001",
            Self::SnapshotWriteFailed => "E5001",
            Self::LockContention => "E5002",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NotInitialized => "Boards directory not initialized",
            Self::ConfigParseError => "Config file parse error",
            Self::AlreadyInitialized => "Boards directory already initialized",
            Self::BoardNotFound => "Board not found",
            Self::GroupNotFound => "Group not found",
            Self::ItemNotFound => "Item not found",
            Self::InvalidPin => "Invalid PIN",
            Self::BoardLocked => "Board is locked",
            Self::InvalidEnumValue => "Invalid status or kind value",
            Self::InvalidDate => "Invalid date",
            Self::CorruptSnapshot => "Corrupt board snapshot",
            Self::SnapshotWriteFailed => "Snapshot write failed",
            Self::LockContention => "Lock contention",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to users and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::NotInitialized => Some("Run `brd init` to create .boards/ here."),
            Self::ConfigParseError => Some("Fix syntax in .boards/config.toml and retry."),
            Self::AlreadyInitialized => Some("Pass --force to reset the snapshot to sample data."),
            Self::BoardNotFound => Some("Run `brd boards` to list board ids."),
            Self::GroupNotFound | Self::ItemNotFound => {
                Some("Run `brd show <board>` to list group and item ids.")
            }
            Self::InvalidPin => Some("A PIN is exactly 4 digits, e.g. 1234."),
            Self::BoardLocked => Some("Pass --pin with the board's 4-digit code."),
            Self::InvalidEnumValue => Some("Use one of: gray, working, done, stuck."),
            Self::InvalidDate => Some("Use the YYYY-MM-DD format."),
            Self::CorruptSnapshot => {
                Some("Restore .boards/boards.json from a backup or run `brd init --force`.")
            }
            Self::SnapshotWriteFailed => Some("Check disk space and write permissions."),
            Self::LockContention => Some("Retry after the other `brd` process releases its lock."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors from lifecycle edits, security checks and the snapshot store.
#[derive(Debug, thiserror::Error)]
pub enum BoardsError {
    #[error("board not found: {board_id}")]
    BoardNotFound { board_id: String },

    #[error("group not found: {group_id} (board {board_id})")]
    GroupNotFound { board_id: String, group_id: String },

    #[error("item not found: {item_id} (group {group_id})")]
    ItemNotFound { group_id: String, item_id: String },

    #[error("invalid PIN: expected exactly 4 digits")]
    InvalidPin,

    #[error("board {board_id} is locked")]
    BoardLocked { board_id: String },

    #[error("invalid date '{0}'")]
    InvalidDate(String),

    #[error("boards directory not initialized at {}", .0.display())]
    NotInitialized(PathBuf),

    #[error("snapshot already exists at {}", .0.display())]
    AlreadyInitialized(PathBuf),

    #[error("corrupt snapshot {}: {source}", .path.display())]
    CorruptSnapshot {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read snapshot {}: {source}", .path.display())]
    SnapshotRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write snapshot {}: {source}", .path.display())]
    SnapshotWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Lock(#[from] LockError),
}

impl BoardsError {
    /// Machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::BoardNotFound { .. } => ErrorCode::BoardNotFound,
            Self::GroupNotFound { .. } => ErrorCode::GroupNotFound,
            Self::ItemNotFound { .. } => ErrorCode::ItemNotFound,
            Self::InvalidPin => ErrorCode::InvalidPin,
            Self::BoardLocked { .. } => ErrorCode::BoardLocked,
            Self::InvalidDate(_) => ErrorCode::InvalidDate,
            Self::NotInitialized(_) => ErrorCode::NotInitialized,
            Self::AlreadyInitialized(_) => ErrorCode::AlreadyInitialized,
            Self::CorruptSnapshot { .. } => ErrorCode::CorruptSnapshot,
            Self::SnapshotRead { .. } => ErrorCode::InternalUnexpected,
            Self::SnapshotWrite { .. } => ErrorCode::SnapshotWriteFailed,
            Self::Lock(err) => err.code(),
        }
    }

    /// Stable `E####` code string.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        self.code().code()
    }

    /// Remediation hint, or a generic fallback.
    #[must_use]
    pub fn suggestion(&self) -> String {
        self.code()
            .hint()
            .unwrap_or("Retry the command.")
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{BoardsError, ErrorCode};
    use std::collections::HashSet;

    const ALL: [ErrorCode; 14] = [
        ErrorCode::NotInitialized,
        ErrorCode::ConfigParseError,
        ErrorCode::AlreadyInitialized,
        ErrorCode::BoardNotFound,
        ErrorCode::GroupNotFound,
        ErrorCode::ItemNotFound,
        ErrorCode::InvalidPin,
        ErrorCode::BoardLocked,
        ErrorCode::InvalidEnumValue,
        ErrorCode::InvalidDate,
        ErrorCode::CorruptSnapshot,
        ErrorCode::SnapshotWriteFailed,
        ErrorCode::LockContention,
        ErrorCode::InternalUnexpected,
    ];

    #[test]
    fn all_codes_are_unique() {
        let mut seen = HashSet::new();
        for code in ALL {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        for code in ALL {
            let code = code.code();
            assert_eq!(code.len(), 5);
            assert!(code.starts_with('E'));
            assert!(code.chars().skip(1).all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn boards_error_carries_code_and_hint() {
        let err = BoardsError::BoardNotFound {
            board_id: "b9".into(),
        };
        assert_eq!(err.to_string(), "board not found: b9");
        assert_eq!(err.error_code(), "E2001");
        assert!(err.suggestion().contains("brd boards"));

        assert_eq!(BoardsError::InvalidPin.code(), ErrorCode::InvalidPin);
    }
}
