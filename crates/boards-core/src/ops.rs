//! Board, group and item lifecycle edits.
//!
//! Every function takes the current snapshot and returns a new one. Only the
//! path from the root to the edited record is rebuilt; siblings keep their
//! `Arc`. Unlike the reorder engine, unknown ids are reported as errors
//! because they come from explicit user input rather than a drag gesture.

use std::sync::Arc;

use tracing::debug;

use crate::config::DefaultsConfig;
use crate::error::BoardsError;
use crate::model::{Board, BoardPatch, Group, GroupPatch, Item, ItemPatch, new_id};

type Snapshot = Vec<Arc<Board>>;

/// Look up a board by id.
pub fn find_board<'a>(
    boards: &'a [Arc<Board>],
    board_id: &str,
) -> Result<&'a Arc<Board>, BoardsError> {
    boards
        .iter()
        .find(|board| board.id == board_id)
        .ok_or_else(|| BoardsError::BoardNotFound {
            board_id: board_id.to_string(),
        })
}

/// Look up a group inside a board.
pub fn find_group<'a>(
    board: &'a Board,
    group_id: &str,
) -> Result<&'a Arc<Group>, BoardsError> {
    board
        .group(group_id)
        .ok_or_else(|| BoardsError::GroupNotFound {
            board_id: board.id.clone(),
            group_id: group_id.to_string(),
        })
}

/// Look up an item inside a group.
pub fn find_item<'a>(group: &'a Group, item_id: &str) -> Result<&'a Arc<Item>, BoardsError> {
    group.item(item_id).ok_or_else(|| BoardsError::ItemNotFound {
        group_id: group.id.clone(),
        item_id: item_id.to_string(),
    })
}

/// The group of `board` that holds `item_id`.
pub fn find_item_group<'a>(
    board: &'a Board,
    item_id: &str,
) -> Result<&'a Arc<Group>, BoardsError> {
    board
        .group_of_item(item_id)
        .ok_or_else(|| BoardsError::ItemNotFound {
            group_id: String::from("*"),
            item_id: item_id.to_string(),
        })
}

/// Append a new empty board. Returns the snapshot and the new board id.
#[must_use]
pub fn add_board(
    boards: &[Arc<Board>],
    title: Option<&str>,
    defaults: &DefaultsConfig,
) -> (Snapshot, String) {
    let board = Board::new(non_blank(title).unwrap_or(&defaults.board_title));
    let id = board.id.clone();
    let mut next = boards.to_vec();
    next.push(Arc::new(board));
    debug!(board_id = %id, "board added");
    (next, id)
}

pub fn update_board(
    boards: &[Arc<Board>],
    board_id: &str,
    patch: &BoardPatch,
) -> Result<Snapshot, BoardsError> {
    replace_board(boards, board_id, |board| {
        if patch.is_empty() {
            return Ok(None);
        }
        Ok(Some(patch.apply(board)))
    })
}

/// Set or clear a board's PIN code. The PIN must already be validated.
pub(crate) fn set_board_pin(
    boards: &[Arc<Board>],
    board_id: &str,
    pin: Option<&str>,
) -> Result<Snapshot, BoardsError> {
    replace_board(boards, board_id, |board| {
        if board.pin_code.as_deref() == pin {
            return Ok(None);
        }
        Ok(Some(Board {
            pin_code: pin.map(str::to_string),
            ..board.clone()
        }))
    })
}

pub fn delete_board(boards: &[Arc<Board>], board_id: &str) -> Result<Snapshot, BoardsError> {
    find_board(boards, board_id)?;
    Ok(boards
        .iter()
        .filter(|board| board.id != board_id)
        .cloned()
        .collect())
}

/// Append a new empty group to a board. Returns the snapshot and the group id.
pub fn add_group(
    boards: &[Arc<Board>],
    board_id: &str,
    title: Option<&str>,
    color: Option<&str>,
    defaults: &DefaultsConfig,
) -> Result<(Snapshot, String), BoardsError> {
    let group = Group {
        id: new_id(),
        title: non_blank(title).unwrap_or(&defaults.group_title).to_string(),
        color: non_blank(color).unwrap_or(&defaults.group_color).to_string(),
        items: Vec::new(),
    };
    let id = group.id.clone();
    let next = replace_board(boards, board_id, |board| {
        let mut groups = board.groups.clone();
        groups.push(Arc::new(group));
        Ok(Some(Board {
            groups,
            ..board.clone()
        }))
    })?;
    Ok((next, id))
}

pub fn update_group(
    boards: &[Arc<Board>],
    board_id: &str,
    group_id: &str,
    patch: &GroupPatch,
) -> Result<Snapshot, BoardsError> {
    replace_group(boards, board_id, group_id, |group| {
        if patch.is_empty() {
            return Ok(None);
        }
        Ok(Some(patch.apply(group)))
    })
}

pub fn delete_group(
    boards: &[Arc<Board>],
    board_id: &str,
    group_id: &str,
) -> Result<Snapshot, BoardsError> {
    replace_board(boards, board_id, |board| {
        find_group(board, group_id)?;
        Ok(Some(Board {
            groups: board
                .groups
                .iter()
                .filter(|group| group.id != group_id)
                .cloned()
                .collect(),
            ..board.clone()
        }))
    })
}

/// Append a new item to a group. A blank name falls back to the default.
/// Returns the snapshot and the item id.
pub fn add_item(
    boards: &[Arc<Board>],
    board_id: &str,
    group_id: &str,
    name: Option<&str>,
    defaults: &DefaultsConfig,
) -> Result<(Snapshot, String), BoardsError> {
    let item = Item::new(non_blank(name).unwrap_or(&defaults.item_name));
    let id = item.id.clone();
    let next = replace_group(boards, board_id, group_id, |group| {
        let mut items = group.items.clone();
        items.push(Arc::new(item));
        Ok(Some(Group {
            items,
            ..group.clone()
        }))
    })?;
    Ok((next, id))
}

pub fn update_item(
    boards: &[Arc<Board>],
    board_id: &str,
    group_id: &str,
    item_id: &str,
    patch: &ItemPatch,
) -> Result<Snapshot, BoardsError> {
    if let Some(Some(raw)) = &patch.date {
        if !raw.trim().is_empty() && crate::model::parse_calendar_date(raw).is_none() {
            return Err(BoardsError::InvalidDate(raw.clone()));
        }
    }

    replace_group(boards, board_id, group_id, |group| {
        let slot = group
            .item_position(item_id)
            .ok_or_else(|| BoardsError::ItemNotFound {
                group_id: group.id.clone(),
                item_id: item_id.to_string(),
            })?;
        if patch.is_empty() {
            return Ok(None);
        }
        let mut items = group.items.clone();
        items[slot] = Arc::new(patch.apply(&group.items[slot]));
        Ok(Some(Group {
            items,
            ..group.clone()
        }))
    })
}

pub fn delete_item(
    boards: &[Arc<Board>],
    board_id: &str,
    group_id: &str,
    item_id: &str,
) -> Result<Snapshot, BoardsError> {
    replace_group(boards, board_id, group_id, |group| {
        find_item(group, item_id)?;
        Ok(Some(Group {
            items: group
                .items
                .iter()
                .filter(|item| item.id != item_id)
                .cloned()
                .collect(),
            ..group.clone()
        }))
    })
}

/// Rebuild one board. `edit` returns `None` to keep the board as is.
fn replace_board(
    boards: &[Arc<Board>],
    board_id: &str,
    edit: impl FnOnce(&Board) -> Result<Option<Board>, BoardsError>,
) -> Result<Snapshot, BoardsError> {
    let target = find_board(boards, board_id)?;
    let Some(edited) = edit(target)? else {
        return Ok(boards.to_vec());
    };
    let edited = Arc::new(edited);
    Ok(boards
        .iter()
        .map(|board| {
            if Arc::ptr_eq(board, target) {
                Arc::clone(&edited)
            } else {
                Arc::clone(board)
            }
        })
        .collect())
}

/// Rebuild one group and its board. `edit` returns `None` to keep the group.
fn replace_group(
    boards: &[Arc<Board>],
    board_id: &str,
    group_id: &str,
    edit: impl FnOnce(&Group) -> Result<Option<Group>, BoardsError>,
) -> Result<Snapshot, BoardsError> {
    let mut unchanged = false;
    let next = replace_board(boards, board_id, |board| {
        let target = find_group(board, group_id)?;
        let Some(edited) = edit(target)? else {
            unchanged = true;
            return Ok(None);
        };
        let edited = Arc::new(edited);
        let groups = board
            .groups
            .iter()
            .map(|group| {
                if Arc::ptr_eq(group, target) {
                    Arc::clone(&edited)
                } else {
                    Arc::clone(group)
                }
            })
            .collect();
        Ok(Some(Board {
            groups,
            ..board.clone()
        }))
    })?;
    if unchanged {
        debug!(board_id, group_id, "empty edit left group unchanged");
    }
    Ok(next)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
