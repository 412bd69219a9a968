//! Due-date alerts.
//!
//! [`get_alerts`] scans every item of every board and flags the ones that
//! need attention on a given calendar day: anything overdue, due today, or
//! due tomorrow. Items marked `done` and items without a usable date are
//! ignored. The scan is read-only and cheap enough to rerun on every change.

use std::fmt;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::model::{Board, Group, Item, Status};

pub const MESSAGE_OVERDUE: &str = "En retard";
pub const MESSAGE_TODAY: &str = "Aujourd'hui";
pub const MESSAGE_TOMORROW: &str = "Demain";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Overdue,
    Soon,
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Overdue => "overdue",
            Self::Soon => "soon",
        })
    }
}

/// An item that needs attention, with the group and board that own it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: &'static str,
    pub item: Arc<Item>,
    pub group: Arc<Group>,
    pub board: Arc<Board>,
    /// The item's date string as stored.
    pub date: String,
    /// The parsed calendar day, used for ordering.
    pub due: NaiveDate,
}

/// Classify a due date against `today`.
///
/// Returns `None` for anything later than tomorrow.
#[must_use]
pub fn classify(due: NaiveDate, today: NaiveDate) -> Option<(AlertKind, &'static str)> {
    if due < today {
        Some((AlertKind::Overdue, MESSAGE_OVERDUE))
    } else if due == today {
        Some((AlertKind::Soon, MESSAGE_TODAY))
    } else if today.succ_opt() == Some(due) {
        Some((AlertKind::Soon, MESSAGE_TOMORROW))
    } else {
        None
    }
}

/// Alerts for every open, dated item, relative to `today`.
///
/// Sorted by due day; alerts on the same day keep board → group → item
/// discovery order.
#[must_use]
pub fn get_alerts(boards: &[Arc<Board>], today: NaiveDate) -> Vec<Alert> {
    let mut alerts = Vec::new();

    for board in boards {
        for group in &board.groups {
            for item in &group.items {
                if item.status == Status::Done {
                    continue;
                }
                let (Some(raw), Some(due)) = (item.date.as_deref(), item.due_date()) else {
                    continue;
                };
                let Some((kind, message)) = classify(due, today) else {
                    continue;
                };

                alerts.push(Alert {
                    kind,
                    message,
                    item: Arc::clone(item),
                    group: Arc::clone(group),
                    board: Arc::clone(board),
                    date: raw.to_string(),
                    due,
                });
            }
        }
    }

    alerts.sort_by_key(|alert| alert.due);
    alerts
}

/// The local calendar day alerts are measured against by default.
#[must_use]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// [`get_alerts`] against [`today`].
#[must_use]
pub fn get_alerts_now(boards: &[Arc<Board>]) -> Vec<Alert> {
    get_alerts(boards, today())
}

/// Badge counters for an alert list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AlertCounts {
    pub overdue: usize,
    pub soon: usize,
}

impl AlertCounts {
    #[must_use]
    pub fn of(alerts: &[Alert]) -> Self {
        alerts.iter().fold(Self::default(), |mut counts, alert| {
            match alert.kind {
                AlertKind::Overdue => counts.overdue += 1,
                AlertKind::Soon => counts.soon += 1,
            }
            counts
        })
    }

    #[must_use]
    pub const fn total(self) -> usize {
        self.overdue + self.soon
    }
}
