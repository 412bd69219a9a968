//! Month, week and day projections of a board's dated items.
//!
//! Weeks start on Monday. A month grid is padded out to whole weeks, so it
//! may begin in the previous month and end in the next one; those padding
//! days have `in_period == false`.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::model::{Board, Item, ParseEnumError};

/// Color used for entries whose group has none.
pub const FALLBACK_COLOR: &str = "#0073ea";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarView {
    #[default]
    Month,
    Week,
    Day,
}

impl fmt::Display for CalendarView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Month => "month",
            Self::Week => "week",
            Self::Day => "day",
        })
    }
}

impl FromStr for CalendarView {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "month" => Ok(Self::Month),
            "week" => Ok(Self::Week),
            "day" => Ok(Self::Day),
            _ => Err(ParseEnumError {
                expected: "calendar view",
                got: s.to_string(),
            }),
        }
    }
}

/// An item placed on a calendar day, tagged with its group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEntry {
    pub item: Arc<Item>,
    pub group_id: String,
    pub group_title: String,
    pub group_color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub in_period: bool,
    pub is_today: bool,
    pub entries: Vec<CalendarEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Calendar {
    pub view: CalendarView,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: Vec<CalendarDay>,
}

impl Calendar {
    /// Number of entries across every day of the grid.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.days.iter().map(|day| day.entries.len()).sum()
    }
}

/// First and last day shown for `anchor` in `view`, both inclusive.
#[must_use]
pub fn period(anchor: NaiveDate, view: CalendarView) -> (NaiveDate, NaiveDate) {
    match view {
        CalendarView::Day => (anchor, anchor),
        CalendarView::Week => (week_start(anchor), week_end(anchor)),
        CalendarView::Month => {
            let first = anchor.with_day(1).unwrap_or(anchor);
            let last = first
                .checked_add_months(Months::new(1))
                .and_then(|next| next.pred_opt())
                .unwrap_or(anchor);
            (week_start(first), week_end(last))
        }
    }
}

/// Project `board` onto the grid around `anchor`.
#[must_use]
pub fn calendar(
    board: &Board,
    anchor: NaiveDate,
    view: CalendarView,
    today: NaiveDate,
) -> Calendar {
    let (start, end) = period(anchor, view);

    let mut dated: Vec<(NaiveDate, CalendarEntry)> = Vec::new();
    for group in &board.groups {
        let color = if group.color.trim().is_empty() {
            FALLBACK_COLOR.to_string()
        } else {
            group.color.clone()
        };
        for item in &group.items {
            let Some(due) = item.due_date() else {
                continue;
            };
            if due < start || due > end {
                continue;
            }
            dated.push((
                due,
                CalendarEntry {
                    item: Arc::clone(item),
                    group_id: group.id.clone(),
                    group_title: group.title.clone(),
                    group_color: color.clone(),
                },
            ));
        }
    }

    let days = start
        .iter_days()
        .take_while(|day| *day <= end)
        .map(|date| CalendarDay {
            date,
            in_period: view != CalendarView::Month || date.month() == anchor.month(),
            is_today: date == today,
            entries: dated
                .iter()
                .filter(|(due, _)| *due == date)
                .map(|(_, entry)| entry.clone())
                .collect(),
        })
        .collect();

    Calendar {
        view,
        start,
        end,
        days,
    }
}

/// Move `anchor` by `steps` months, weeks or days. Negative steps go back.
/// Out-of-range results leave the anchor unchanged.
#[must_use]
pub fn shift(anchor: NaiveDate, view: CalendarView, steps: i32) -> NaiveDate {
    let magnitude = steps.unsigned_abs();
    let moved = match view {
        CalendarView::Month => {
            let months = Months::new(magnitude);
            if steps >= 0 {
                anchor.checked_add_months(months)
            } else {
                anchor.checked_sub_months(months)
            }
        }
        CalendarView::Week | CalendarView::Day => {
            let per_step = if view == CalendarView::Week { 7 } else { 1 };
            let days = Days::new(u64::from(magnitude) * per_step);
            if steps >= 0 {
                anchor.checked_add_days(days)
            } else {
                anchor.checked_sub_days(days)
            }
        }
    };
    moved.unwrap_or(anchor)
}

fn week_start(day: NaiveDate) -> NaiveDate {
    let back = u64::from(day.weekday().num_days_from_monday());
    day.checked_sub_days(Days::new(back)).unwrap_or(day)
}

fn week_end(day: NaiveDate) -> NaiveDate {
    let ahead = 6 - u64::from(day.weekday().num_days_from_monday());
    day.checked_add_days(Days::new(ahead)).unwrap_or(day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Group, Status};
    use crate::test_support::{board, dated, group_of};

    fn day(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
    }

    fn sample() -> Arc<Board> {
        board(
            "b1",
            vec![
                group_of(
                    "g1",
                    vec![
                        dated("beta", Status::Working, "2026-11-15"),
                        dated("design", Status::Stuck, "2026-10-01"),
                        dated("bad", Status::Stuck, "2026-13-01"),
                    ],
                ),
                Arc::new(Group {
                    id: "g2".into(),
                    title: "Backlog".into(),
                    color: String::new(),
                    items: vec![dated("late", Status::Gray, "2026-10-31T09:00:00")],
                }),
            ],
        )
    }

    #[test]
    fn month_period_pads_to_whole_weeks() {
        // October 2026 starts on a Thursday and ends on a Saturday.
        let (start, end) = period(day("2026-10-19"), CalendarView::Month);
        assert_eq!(start, day("2026-09-28"));
        assert_eq!(end, day("2026-11-01"));
    }

    #[test]
    fn week_period_runs_monday_to_sunday() {
        let (start, end) = period(day("2026-10-18"), CalendarView::Week);
        assert_eq!(start, day("2026-10-12"));
        assert_eq!(end, day("2026-10-18"));
    }

    #[test]
    fn month_grid_marks_period_and_today() {
        let cal = calendar(
            &sample(),
            day("2026-10-19"),
            CalendarView::Month,
            day("2026-10-19"),
        );
        assert_eq!(cal.days.len(), 35);
        assert!(!cal.days[0].in_period);
        assert!(cal.days[3].in_period);
        let today: Vec<_> = cal.days.iter().filter(|d| d.is_today).collect();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].date, day("2026-10-19"));
    }

    #[test]
    fn entries_land_on_their_day() {
        let cal = calendar(
            &sample(),
            day("2026-10-05"),
            CalendarView::Month,
            day("2026-10-05"),
        );
        assert_eq!(cal.entry_count(), 2);

        let first = cal.days.iter().find(|d| d.date == day("2026-10-01")).unwrap();
        assert_eq!(first.entries[0].item.id, "design");
        assert_eq!(first.entries[0].group_id, "g1");

        let last = cal.days.iter().find(|d| d.date == day("2026-10-31")).unwrap();
        assert_eq!(last.entries[0].group_color, FALLBACK_COLOR);
        assert_eq!(last.entries[0].group_title, "Backlog");
    }

    #[test]
    fn day_view_is_single_day() {
        let cal = calendar(
            &sample(),
            day("2026-11-15"),
            CalendarView::Day,
            day("2026-10-05"),
        );
        assert_eq!(cal.days.len(), 1);
        assert!(cal.days[0].in_period);
        assert!(!cal.days[0].is_today);
        assert_eq!(cal.days[0].entries.len(), 1);
    }

    #[test]
    fn shift_moves_by_view_unit() {
        let anchor = day("2026-01-31");
        assert_eq!(shift(anchor, CalendarView::Month, 1), day("2026-02-28"));
        assert_eq!(shift(anchor, CalendarView::Month, -2), day("2025-11-30"));
        assert_eq!(shift(anchor, CalendarView::Week, 1), day("2026-02-07"));
        assert_eq!(shift(anchor, CalendarView::Day, -31), day("2025-12-31"));
        assert_eq!(shift(anchor, CalendarView::Day, 0), anchor);
    }

    #[test]
    fn view_parses_case_insensitively() {
        assert_eq!("WEEK".parse::<CalendarView>().unwrap(), CalendarView::Week);
        assert!("year".parse::<CalendarView>().is_err());
    }
}
