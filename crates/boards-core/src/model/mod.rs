pub mod board;
pub mod patch;

pub use board::{Board, Group, Item, ParseEnumError, Status, new_id, parse_calendar_date};
pub use patch::{BoardPatch, GroupPatch, ItemPatch};
