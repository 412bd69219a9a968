use boards_core::drag::apply_drag;
use boards_core::model::Board;
use boards_core::reorder::{move_item, reorder_groups};
use proptest::prelude::*;
use std::collections::BTreeMap;
use std::sync::Arc;

#[path = "generators.rs"]
mod generators;
use generators::*;

fn apply(boards: &[Arc<Board>], gesture: &Gesture) -> Vec<Arc<Board>> {
    match gesture {
        Gesture::ReorderGroups {
            board,
            active,
            over,
        } => reorder_groups(boards, board, active, over),
        Gesture::MoveItem {
            board,
            active,
            over,
            from,
            over_group,
        } => move_item(
            boards,
            board,
            active,
            over,
            from.as_deref(),
            over_group.as_deref(),
        ),
        Gesture::Drag { board, start, over } => apply_drag(boards, board, start, over.as_ref()),
    }
}

/// Per board: sorted group ids and sorted item ids.
fn census(boards: &[Arc<Board>]) -> BTreeMap<String, (Vec<String>, Vec<String>)> {
    boards
        .iter()
        .map(|board| {
            let mut groups: Vec<_> = board.groups.iter().map(|g| g.id.clone()).collect();
            let mut items: Vec<_> = board
                .groups
                .iter()
                .flat_map(|g| g.items.iter().map(|i| i.id.clone()))
                .collect();
            groups.sort();
            items.sort();
            (board.id.clone(), (groups, items))
        })
        .collect()
}

fn board_order(boards: &[Arc<Board>]) -> Vec<&str> {
    boards.iter().map(|b| b.id.as_str()).collect()
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(2000))]

    #[test]
    fn gestures_never_create_or_lose_records(
        boards in arb_boards(),
        gestures in prop::collection::vec(arb_gesture(), 0..24),
    ) {
        let before = census(&boards);
        let mut current = boards.clone();
        for gesture in &gestures {
            current = apply(&current, gesture);
            prop_assert_eq!(census(&current), before.clone());
            prop_assert_eq!(board_order(&current), board_order(&boards));
        }
    }

    #[test]
    fn gestures_leave_input_untouched(
        boards in arb_boards(),
        gesture in arb_gesture(),
    ) {
        let snapshot: Vec<Board> = boards.iter().map(|b| (**b).clone()).collect();
        let _ = apply(&boards, &gesture);
        let after: Vec<Board> = boards.iter().map(|b| (**b).clone()).collect();
        prop_assert_eq!(after, snapshot);
    }

    #[test]
    fn moved_items_keep_their_fields(
        boards in arb_boards(),
        gesture in arb_gesture(),
    ) {
        let next = apply(&boards, &gesture);
        for (old, new) in boards.iter().zip(&next) {
            for group in &new.groups {
                for item in &group.items {
                    let original = old
                        .groups
                        .iter()
                        .flat_map(|g| g.items.iter())
                        .find(|i| i.id == item.id);
                    prop_assert_eq!(original.map(|i| &**i), Some(&**item));
                }
            }
        }
    }

    #[test]
    fn untouched_boards_keep_identity(
        boards in arb_boards(),
        gesture in arb_gesture(),
    ) {
        let target = match &gesture {
            Gesture::ReorderGroups { board, .. }
            | Gesture::MoveItem { board, .. }
            | Gesture::Drag { board, .. } => board.clone(),
        };
        let next = apply(&boards, &gesture);
        for (old, new) in boards.iter().zip(&next) {
            if old.id != target {
                prop_assert!(Arc::ptr_eq(old, new));
            }
        }
    }

    #[test]
    fn stale_group_reorder_is_identity(boards in arb_boards()) {
        let next = reorder_groups(&boards, "b0", "missing", "also-missing");
        prop_assert_eq!(next, boards);
    }
}
