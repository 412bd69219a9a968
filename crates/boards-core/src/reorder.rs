//! Drag-and-drop reorder engine.
//!
//! Two operations reconcile the board → group → item hierarchy after a drop:
//!
//! - [`reorder_groups`] moves a group to the slot of another group in the
//!   same board.
//! - [`move_item`] reorders an item inside its group, or moves it into
//!   another group (before the hovered item, or at the end when dropped on
//!   the group container).
//!
//! # Failure semantics
//!
//! Neither operation fails. Any id that cannot be resolved turns the call
//! into a no-op on the narrowest affected scope, and the returned list is
//! always a complete, well-formed snapshot.
//!
//! # Sharing
//!
//! Inputs are never mutated. Boards, groups and items that are not touched
//! by an operation are returned as the same `Arc`, so a caller can find
//! what changed with [`Arc::ptr_eq`].

use std::sync::Arc;

use tracing::debug;

use crate::model::{Board, Group, Item};

/// Remove the element at `from` and reinsert it at `to`, shifting the
/// elements in between by one.
///
/// Both indices must be in bounds.
#[must_use]
pub fn array_move<T: Clone>(items: &[T], from: usize, to: usize) -> Vec<T> {
    let mut next = items.to_vec();
    let moved = next.remove(from);
    next.insert(to, moved);
    next
}

/// Move the group `active_id` to the position of the group `over_id` in
/// board `board_id`.
///
/// Unknown board, or either group id missing from that board, leaves the
/// snapshot unchanged.
#[must_use]
pub fn reorder_groups(
    boards: &[Arc<Board>],
    board_id: &str,
    active_id: &str,
    over_id: &str,
) -> Vec<Arc<Board>> {
    boards
        .iter()
        .map(|board| {
            if board.id != board_id {
                return Arc::clone(board);
            }

            let (Some(from), Some(to)) = (
                board.group_position(active_id),
                board.group_position(over_id),
            ) else {
                debug!(board_id, active_id, over_id, "group reorder ignored: unknown group");
                return Arc::clone(board);
            };

            if from == to {
                return Arc::clone(board);
            }

            with_groups(board, array_move(&board.groups, from, to))
        })
        .collect()
}

/// Move the item `active_id` within board `board_id`.
///
/// `active_group_id` is the group that owned the item when the drag
/// started. `over_group_id` is the group under the pointer when the caller
/// knows it (a drop on a group container); otherwise the destination is the
/// group that contains `over_id`.
///
/// Same group: the item takes the slot of `over_id`. Different group: the
/// item is removed from the source and inserted before `over_id` in the
/// destination, or appended when `over_id` is not an item there.
#[must_use]
pub fn move_item(
    boards: &[Arc<Board>],
    board_id: &str,
    active_id: &str,
    over_id: &str,
    active_group_id: Option<&str>,
    over_group_id: Option<&str>,
) -> Vec<Arc<Board>> {
    let Some(source_id) = active_group_id else {
        debug!(board_id, active_id, "item move ignored: source group unknown");
        return boards.to_vec();
    };

    let Some(board) = boards.iter().find(|board| board.id == board_id) else {
        debug!(board_id, "item move ignored: unknown board");
        return boards.to_vec();
    };

    let dest_id = match over_group_id {
        Some(id) => id,
        None => match board.group_of_item(over_id) {
            Some(group) => group.id.as_str(),
            None => {
                debug!(board_id, over_id, "item move ignored: drop target not in any group");
                return boards.to_vec();
            }
        },
    };

    let moved = if source_id == dest_id {
        reorder_within_group(board, source_id, active_id, over_id)
    } else {
        move_between_groups(board, source_id, dest_id, active_id, over_id)
    };

    let Some(next) = moved else {
        return boards.to_vec();
    };

    boards
        .iter()
        .map(|candidate| {
            if Arc::ptr_eq(candidate, board) {
                Arc::clone(&next)
            } else {
                Arc::clone(candidate)
            }
        })
        .collect()
}

fn reorder_within_group(
    board: &Board,
    group_id: &str,
    active_id: &str,
    over_id: &str,
) -> Option<Arc<Board>> {
    let Some(slot) = board.group_position(group_id) else {
        debug!(board_id = %board.id, group_id, "item reorder ignored: unknown group");
        return None;
    };
    let group = &board.groups[slot];

    let (Some(from), Some(to)) = (group.item_position(active_id), group.item_position(over_id))
    else {
        debug!(group_id, active_id, over_id, "item reorder ignored: item not in group");
        return None;
    };

    if from == to {
        return None;
    }

    let mut groups = board.groups.clone();
    groups[slot] = with_items(group, array_move(&group.items, from, to));
    Some(with_groups(board, groups))
}

fn move_between_groups(
    board: &Board,
    source_id: &str,
    dest_id: &str,
    active_id: &str,
    over_id: &str,
) -> Option<Arc<Board>> {
    let (Some(source_slot), Some(dest_slot)) =
        (board.group_position(source_id), board.group_position(dest_id))
    else {
        debug!(board_id = %board.id, source_id, dest_id, "item move ignored: unknown group");
        return None;
    };

    let source = &board.groups[source_slot];
    let dest = &board.groups[dest_slot];

    let Some(active) = source.item(active_id) else {
        debug!(source_id, active_id, "item move ignored: item not in source group");
        return None;
    };

    let source_items = source
        .items
        .iter()
        .filter(|item| item.id != active_id)
        .cloned()
        .collect();

    let mut dest_items = dest.items.clone();
    match dest.item_position(over_id) {
        Some(at) => dest_items.insert(at, Arc::clone(active)),
        None => dest_items.push(Arc::clone(active)),
    }

    let mut groups = board.groups.clone();
    groups[source_slot] = with_items(source, source_items);
    groups[dest_slot] = with_items(dest, dest_items);
    Some(with_groups(board, groups))
}

fn with_groups(board: &Board, groups: Vec<Arc<Group>>) -> Arc<Board> {
    Arc::new(Board {
        id: board.id.clone(),
        title: board.title.clone(),
        color: board.color.clone(),
        groups,
        pin_code: board.pin_code.clone(),
    })
}

fn with_items(group: &Group, items: Vec<Arc<Item>>) -> Arc<Group> {
    Arc::new(Group {
        id: group.id.clone(),
        title: group.title.clone(),
        color: group.color.clone(),
        items,
    })
}
