//! Snapshot builders shared by unit tests.

use crate::model::{Board, Group, Item, Status};
use std::sync::Arc;

pub fn item(id: &str) -> Arc<Item> {
    Arc::new(Item {
        id: id.to_string(),
        name: format!("Item {id}"),
        status: Status::Working,
        date: None,
        created_at: None,
    })
}

pub fn dated(id: &str, status: Status, date: &str) -> Arc<Item> {
    Arc::new(Item {
        id: id.to_string(),
        name: format!("Item {id}"),
        status,
        date: Some(date.to_string()),
        created_at: None,
    })
}

pub fn group(id: &str, items: &[&str]) -> Arc<Group> {
    group_of(id, items.iter().map(|id| item(id)).collect())
}

pub fn group_of(id: &str, items: Vec<Arc<Item>>) -> Arc<Group> {
    Arc::new(Group {
        id: id.to_string(),
        title: format!("Group {id}"),
        color: "#579bfc".to_string(),
        items,
    })
}

pub fn board(id: &str, groups: Vec<Arc<Group>>) -> Arc<Board> {
    Arc::new(Board {
        id: id.to_string(),
        title: format!("Board {id}"),
        color: None,
        groups,
        pin_code: None,
    })
}

pub fn group_ids(board: &Board) -> Vec<&str> {
    board.groups.iter().map(|group| group.id.as_str()).collect()
}

pub fn item_ids(group: &Group) -> Vec<&str> {
    group.items.iter().map(|item| item.id.as_str()).collect()
}
