//! boards-core library.
//!
//! Pure operations over an immutable board snapshot: drag-and-drop
//! reordering, due-date alerts, lifecycle edits, PIN locking and the
//! calendar projection, plus the on-disk snapshot store.

pub mod alert;
pub mod calendar;
pub mod config;
pub mod drag;
pub mod error;
pub mod lock;
pub mod model;
pub mod ops;
pub mod progress;
pub mod reorder;
pub mod security;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;

/// # Conventions
///
/// - **Errors**: `BoardsError` for library operations, `anyhow::Result` at the edges.
/// - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).
/// - **Sharing**: untouched boards, groups and items keep their `Arc`.
pub fn init() {
    tracing::info!("boards-core initialized");
}
