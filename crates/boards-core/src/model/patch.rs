//! Field-level partial updates.
//!
//! A patch names the fields it overwrites; every `None` field keeps the
//! existing value. `apply` always builds a new record and leaves the input
//! untouched.

use super::board::{Board, Group, Item, Status};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardPatch {
    pub title: Option<String>,
}

impl BoardPatch {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
    }

    #[must_use]
    pub fn apply(&self, board: &Board) -> Board {
        Board {
            title: self.title.clone().unwrap_or_else(|| board.title.clone()),
            ..board.clone()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupPatch {
    pub title: Option<String>,
    pub color: Option<String>,
}

impl GroupPatch {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.color.is_none()
    }

    #[must_use]
    pub fn apply(&self, group: &Group) -> Group {
        Group {
            title: self.title.clone().unwrap_or_else(|| group.title.clone()),
            color: self.color.clone().unwrap_or_else(|| group.color.clone()),
            ..group.clone()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub status: Option<Status>,
    /// `Some(None)` clears the due date.
    pub date: Option<Option<String>>,
}

impl ItemPatch {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.status.is_none() && self.date.is_none()
    }

    #[must_use]
    pub fn apply(&self, item: &Item) -> Item {
        let date = match &self.date {
            Some(Some(raw)) if raw.trim().is_empty() => None,
            Some(next) => next.clone(),
            None => item.date.clone(),
        };
        Item {
            name: self.name.clone().unwrap_or_else(|| item.name.clone()),
            status: self.status.unwrap_or(item.status),
            date,
            ..item.clone()
        }
    }
}
