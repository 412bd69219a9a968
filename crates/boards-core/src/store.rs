//! On-disk snapshot of every board.
//!
//! Layout under the project root:
//!
//! ```text
//! .boards/
//!   boards.json   {"boards": [...]}
//!   config.toml   optional project config
//!   lock          advisory lock file
//! ```
//!
//! Reads take a shared lock and writes an exclusive one. A write goes to a
//! sibling temp file first and is renamed over `boards.json`, so readers
//! never see a half-written snapshot.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::BOARDS_DIR;
use crate::error::BoardsError;
use crate::lock::SnapshotLock;
use crate::model::{Board, Group, Item, Status};

const SNAPSHOT_FILE: &str = "boards.json";
const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    #[serde(default)]
    boards: Vec<Arc<Board>>,
}

/// Handle on a `.boards` directory.
#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
    lock_timeout: Duration,
}

impl Store {
    /// Open the store under `root`. The `.boards` directory must exist.
    ///
    /// # Errors
    ///
    /// Returns [`BoardsError::NotInitialized`] when `.boards` is missing.
    pub fn open(root: &Path) -> Result<Self, BoardsError> {
        let dir = root.join(BOARDS_DIR);
        if !dir.is_dir() {
            return Err(BoardsError::NotInitialized(dir));
        }
        Ok(Self {
            dir,
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
        })
    }

    /// Create `.boards` under `root` and write the sample snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`BoardsError::AlreadyInitialized`] when a snapshot exists and
    /// `force` is false, or a write error.
    pub fn init(root: &Path, force: bool) -> Result<Self, BoardsError> {
        let dir = root.join(BOARDS_DIR);
        let store = Self {
            dir,
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
        };
        let snapshot = store.snapshot_path();
        if snapshot.exists() && !force {
            return Err(BoardsError::AlreadyInitialized(snapshot));
        }
        fs::create_dir_all(&store.dir).map_err(|source| BoardsError::SnapshotWrite {
            path: store.dir.clone(),
            source,
        })?;
        store.save(&seed_boards())?;
        info!(path = %store.dir.display(), force, "initialized boards directory");
        Ok(store)
    }

    #[must_use]
    pub const fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn snapshot_path(&self) -> PathBuf {
        self.dir.join(SNAPSHOT_FILE)
    }

    #[must_use]
    pub fn lock_path(&self) -> PathBuf {
        self.dir.join("lock")
    }

    /// Read the snapshot. A missing file yields the sample boards.
    ///
    /// # Errors
    ///
    /// Returns [`BoardsError::CorruptSnapshot`] for unreadable JSON, or a
    /// lock error when a writer holds the lock past the timeout.
    pub fn load(&self) -> Result<Vec<Arc<Board>>, BoardsError> {
        let lock = SnapshotLock::shared(&self.lock_path(), self.lock_timeout)?;
        let boards = self.read_snapshot();
        lock.release();
        boards
    }

    /// Replace the snapshot with `boards`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardsError::SnapshotWrite`] on I/O failure, or a lock error.
    pub fn save(&self, boards: &[Arc<Board>]) -> Result<(), BoardsError> {
        let lock = SnapshotLock::exclusive(&self.lock_path(), self.lock_timeout)?;
        let result = self.write_snapshot(boards);
        lock.release();
        result
    }

    /// Load, edit and save while holding the write lock throughout, so no
    /// other process can interleave its own edit.
    ///
    /// `edit` returns the next snapshot and a value passed back to the
    /// caller. The snapshot is only rewritten when `edit` succeeds.
    ///
    /// # Errors
    ///
    /// Returns whatever `edit` returns, or a store error converted into `E`.
    pub fn transact<T, E>(
        &self,
        edit: impl FnOnce(Vec<Arc<Board>>) -> Result<(Vec<Arc<Board>>, T), E>,
    ) -> Result<T, E>
    where
        E: From<BoardsError>,
    {
        let lock = SnapshotLock::exclusive(&self.lock_path(), self.lock_timeout)
            .map_err(BoardsError::from)?;
        let current = self.read_snapshot()?;
        let (next, value) = edit(current)?;
        self.write_snapshot(&next)?;
        lock.release();
        Ok(value)
    }

    fn read_snapshot(&self) -> Result<Vec<Arc<Board>>, BoardsError> {
        let path = self.snapshot_path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no snapshot yet, using sample boards");
                return Ok(seed_boards());
            }
            Err(source) => return Err(BoardsError::SnapshotRead { path, source }),
        };

        let snapshot: Snapshot = serde_json::from_str(&content)
            .map_err(|source| BoardsError::CorruptSnapshot { path, source })?;
        Ok(snapshot.boards)
    }

    fn write_snapshot(&self, boards: &[Arc<Board>]) -> Result<(), BoardsError> {
        let path = self.snapshot_path();
        let tmp = self.dir.join(format!("{SNAPSHOT_FILE}.tmp"));
        let write_err = |source| BoardsError::SnapshotWrite {
            path: path.clone(),
            source,
        };

        let snapshot = Snapshot {
            boards: boards.to_vec(),
        };
        let mut bytes = serde_json::to_vec_pretty(&snapshot)
            .map_err(|err| write_err(io::Error::new(io::ErrorKind::InvalidData, err)))?;
        bytes.push(b'\n');

        fs::write(&tmp, &bytes).map_err(write_err)?;
        fs::rename(&tmp, &path).map_err(write_err)?;

        info!(
            path = %path.display(),
            boards = boards.len(),
            bytes = bytes.len(),
            "snapshot written"
        );
        Ok(())
    }
}

/// The sample boards shown on first launch.
#[must_use]
pub fn seed_boards() -> Vec<Arc<Board>> {
    fn item(id: &str, name: &str, status: Status, date: Option<&str>) -> Arc<Item> {
        Arc::new(Item {
            id: id.to_string(),
            name: name.to_string(),
            status,
            date: date.map(str::to_string),
            created_at: None,
        })
    }

    let objectives = Group {
        id: "g1".to_string(),
        title: "Q4 2026 Objectives".to_string(),
        color: "#579bfc".to_string(),
        items: vec![
            item("i1", "Lancement Beta", Status::Working, Some("2026-11-15")),
            item("i2", "Design System V2", Status::Stuck, Some("2026-10-01")),
        ],
    };
    let backlog = Group {
        id: "g2".to_string(),
        title: "Backlog".to_string(),
        color: "#a25ddc".to_string(),
        items: vec![item("i3", "Dark Mode", Status::Gray, None)],
    };

    vec![
        Arc::new(Board {
            id: "b1".to_string(),
            title: "Roadmap Produit".to_string(),
            color: Some("#0073ea".to_string()),
            groups: vec![Arc::new(objectives), Arc::new(backlog)],
            pin_code: None,
        }),
        Arc::new(Board {
            id: "b2".to_string(),
            title: "Marketing".to_string(),
            color: Some("#f65f7c".to_string()),
            groups: Vec::new(),
            pin_code: None,
        }),
    ]
}
