use boards_core::drag::{DragStart, DropTarget};
use boards_core::model::{Board, Group, Item, Status};
use proptest::prelude::*;
use std::sync::Arc;

/// Upper bounds for generated layouts. Gesture ids are drawn from slightly
/// wider ranges so some of them are stale.
pub const MAX_BOARDS: usize = 3;
pub const MAX_GROUPS: usize = 4;
pub const MAX_ITEMS: usize = 5;

pub fn board_id(b: usize) -> String {
    format!("b{b}")
}

pub fn group_id(b: usize, g: usize) -> String {
    format!("b{b}-g{g}")
}

pub fn item_id(b: usize, n: usize) -> String {
    format!("b{b}-i{n}")
}

pub fn arb_status() -> impl Strategy<Value = Status> + Clone {
    prop_oneof![
        Just(Status::Gray),
        Just(Status::Working),
        Just(Status::Done),
        Just(Status::Stuck),
    ]
}

/// Boards with unique ids. Items are numbered per board across groups.
pub fn arb_boards() -> impl Strategy<Value = Vec<Arc<Board>>> + Clone {
    prop::collection::vec(
        prop::collection::vec(prop::collection::vec(arb_status(), 0..=MAX_ITEMS), 0..=MAX_GROUPS),
        1..=MAX_BOARDS,
    )
    .prop_map(|layout| {
        layout
            .into_iter()
            .enumerate()
            .map(|(b, groups)| {
                let mut next_item = 0;
                let groups = groups
                    .into_iter()
                    .enumerate()
                    .map(|(g, statuses)| {
                        let items = statuses
                            .into_iter()
                            .map(|status| {
                                let id = item_id(b, next_item);
                                next_item += 1;
                                Arc::new(Item {
                                    name: format!("Task {id}"),
                                    id,
                                    status,
                                    date: None,
                                    created_at: None,
                                })
                            })
                            .collect();
                        Arc::new(Group {
                            id: group_id(b, g),
                            title: format!("Group {g}"),
                            color: "#579bfc".to_string(),
                            items,
                        })
                    })
                    .collect();
                Arc::new(Board {
                    id: board_id(b),
                    title: format!("Board {b}"),
                    color: None,
                    groups,
                    pin_code: None,
                })
            })
            .collect()
    })
}

/// A gesture against generated boards, possibly naming ids that do not exist.
#[derive(Debug, Clone)]
pub enum Gesture {
    ReorderGroups {
        board: String,
        active: String,
        over: String,
    },
    MoveItem {
        board: String,
        active: String,
        over: String,
        from: Option<String>,
        over_group: Option<String>,
    },
    Drag {
        board: String,
        start: DragStart,
        over: Option<DropTarget>,
    },
}

fn arb_board_ref() -> impl Strategy<Value = usize> + Clone {
    0..=MAX_BOARDS
}

fn arb_group_ref() -> impl Strategy<Value = usize> + Clone {
    0..=MAX_GROUPS
}

fn arb_item_ref() -> impl Strategy<Value = usize> + Clone {
    0..=(MAX_GROUPS * MAX_ITEMS)
}

pub fn arb_gesture() -> impl Strategy<Value = Gesture> {
    let reorder = (arb_board_ref(), arb_group_ref(), arb_group_ref()).prop_map(|(b, a, o)| {
        Gesture::ReorderGroups {
            board: board_id(b),
            active: group_id(b, a),
            over: group_id(b, o),
        }
    });

    let move_item = (
        arb_board_ref(),
        arb_item_ref(),
        prop_oneof![
            arb_item_ref().prop_map(|n| (true, n)),
            arb_group_ref().prop_map(|g| (false, g)),
        ],
        prop::option::of(arb_group_ref()),
        prop::option::of(arb_group_ref()),
    )
        .prop_map(|(b, active, (over_is_item, over), from, over_group)| {
            Gesture::MoveItem {
                board: board_id(b),
                active: item_id(b, active),
                over: if over_is_item {
                    item_id(b, over)
                } else {
                    group_id(b, over)
                },
                from: from.map(|g| group_id(b, g)),
                over_group: over_group.map(|g| group_id(b, g)),
            }
        });

    let drag = (
        arb_board_ref(),
        any::<bool>(),
        arb_item_ref(),
        arb_group_ref(),
        prop::option::of((any::<bool>(), arb_item_ref(), arb_group_ref())),
    )
        .prop_map(|(b, start_is_group, n, g, over)| {
            let start = if start_is_group {
                DragStart::group(group_id(b, g))
            } else {
                DragStart::item(item_id(b, n), group_id(b, g))
            };
            let over = over.map(|(over_is_group, on, og)| {
                if over_is_group {
                    DropTarget::group(group_id(b, og))
                } else {
                    DropTarget::item(item_id(b, on), Some(group_id(b, og)))
                }
            });
            Gesture::Drag {
                board: board_id(b),
                start,
                over,
            }
        });

    prop_oneof![reorder, move_item, drag]
}
