use std::fmt;

use serde::Serialize;

use crate::model::{Group, Status};

/// Status distribution of one group, as drawn in its footer bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GroupProgress {
    pub gray: usize,
    pub working: usize,
    pub done: usize,
    pub stuck: usize,
    pub total: usize,
}

impl GroupProgress {
    #[must_use]
    pub fn of(group: &Group) -> Self {
        group.items.iter().fold(Self::default(), |mut acc, item| {
            match item.status {
                Status::Gray => acc.gray += 1,
                Status::Working => acc.working += 1,
                Status::Done => acc.done += 1,
                Status::Stuck => acc.stuck += 1,
            }
            acc.total += 1;
            acc
        })
    }

    #[must_use]
    pub const fn count(&self, status: Status) -> usize {
        match status {
            Status::Gray => self.gray,
            Status::Working => self.working,
            Status::Done => self.done,
            Status::Stuck => self.stuck,
        }
    }

    /// Share of items with `status`, 0.0 to 100.0. An empty group is 0.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percent(&self, status: Status) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(status) as f64 * 100.0 / self.total as f64
    }
}

impl fmt::Display for GroupProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} ({:.0}%)",
            self.done,
            self.total,
            self.percent(Status::Done)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{dated, group_of};

    #[test]
    fn counts_each_status() {
        let group = group_of(
            "g1",
            vec![
                dated("a", Status::Done, "2026-10-01"),
                dated("b", Status::Done, "2026-10-02"),
                dated("c", Status::Stuck, "2026-10-03"),
                dated("d", Status::Working, "2026-10-04"),
            ],
        );
        let progress = GroupProgress::of(&group);
        assert_eq!(progress.total, 4);
        assert_eq!(progress.count(Status::Done), 2);
        assert_eq!(progress.count(Status::Gray), 0);
        assert!((progress.percent(Status::Stuck) - 25.0).abs() < f64::EPSILON);
        assert_eq!(progress.to_string(), "2/4 (50%)");
    }

    #[test]
    fn empty_group_reports_zero() {
        let progress = GroupProgress::of(&group_of("g0", Vec::new()));
        assert_eq!(progress, GroupProgress::default());
        assert!(progress.percent(Status::Done).abs() < f64::EPSILON);
        assert_eq!(progress.to_string(), "0/0 (0%)");
    }
}
