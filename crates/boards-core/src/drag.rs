//! Drag gesture dispatch.
//!
//! The UI layer records a [`DragStart`] when the pointer picks something up
//! (including the group that owned a dragged item at that moment) and a
//! [`DropTarget`] when it is released. [`apply_drag`] routes the pair to the
//! reorder engine.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{Board, ParseEnumError};
use crate::reorder::{move_item, reorder_groups};

/// Type tag attached to a drag source or drop target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DragKind {
    Group,
    Item,
}

impl fmt::Display for DragKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Group => "GROUP",
            Self::Item => "ITEM",
        })
    }
}

impl FromStr for DragKind {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "group" => Ok(Self::Group),
            "item" => Ok(Self::Item),
            _ => Err(ParseEnumError {
                expected: "drag kind",
                got: s.to_string(),
            }),
        }
    }
}

/// What was picked up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragStart {
    pub id: String,
    pub kind: DragKind,
    /// Owning group of a dragged item, captured when the drag begins.
    pub group_id: Option<String>,
}

impl DragStart {
    #[must_use]
    pub fn group(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: DragKind::Group,
            group_id: None,
        }
    }

    #[must_use]
    pub fn item(id: impl Into<String>, group_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: DragKind::Item,
            group_id: Some(group_id.into()),
        }
    }
}

/// What the pointer was released over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropTarget {
    pub id: String,
    pub kind: DragKind,
    /// Owning group when the target is an item.
    pub group_id: Option<String>,
}

impl DropTarget {
    #[must_use]
    pub fn group(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: DragKind::Group,
            group_id: None,
        }
    }

    #[must_use]
    pub fn item(id: impl Into<String>, group_id: Option<String>) -> Self {
        Self {
            id: id.into(),
            kind: DragKind::Item,
            group_id,
        }
    }

    /// Group under the pointer, when the target itself tells us.
    fn resolved_group_id(&self) -> Option<&str> {
        match (&self.group_id, self.kind) {
            (Some(group_id), _) => Some(group_id.as_str()),
            (None, DragKind::Group) => Some(self.id.as_str()),
            (None, DragKind::Item) => None,
        }
    }
}

/// Apply a finished drag gesture to board `board_id`.
///
/// A drop on nothing, or on the dragged element itself, changes nothing.
#[must_use]
pub fn apply_drag(
    boards: &[Arc<Board>],
    board_id: &str,
    start: &DragStart,
    over: Option<&DropTarget>,
) -> Vec<Arc<Board>> {
    let Some(over) = over else {
        debug!(active = %start.id, "drag ended outside any drop target");
        return boards.to_vec();
    };

    if start.id == over.id {
        return boards.to_vec();
    }

    match start.kind {
        DragKind::Group => reorder_groups(boards, board_id, &start.id, &over.id),
        DragKind::Item => move_item(
            boards,
            board_id,
            &start.id,
            &over.id,
            start.group_id.as_deref(),
            over.resolved_group_id(),
        ),
    }
}
