use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;
use std::{fmt, str::FromStr};

/// Progress status of an item.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Gray,
    Working,
    Done,
    Stuck,
}

impl Status {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Gray => "gray",
            Self::Working => "working",
            Self::Done => "done",
            Self::Stuck => "stuck",
        }
    }

    /// Label shown in the status cell. `gray` renders blank.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Gray => "",
            Self::Working => "Working on it",
            Self::Done => "Done",
            Self::Stuck => "Stuck",
        }
    }
}

/// Error returned when parsing an enum value from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    pub expected: &'static str,
    pub got: String,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: '{}'", self.expected, self.got)
    }
}

impl std::error::Error for ParseEnumError {}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gray" | "grey" => Ok(Self::Gray),
            "working" => Ok(Self::Working),
            "done" => Ok(Self::Done),
            "stuck" => Ok(Self::Stuck),
            _ => Err(ParseEnumError {
                expected: "status",
                got: s.to_string(),
            }),
        }
    }
}

/// A single task row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: Status,
    /// Due date as entered (`YYYY-MM-DD`). Kept raw; parsing happens at read time.
    #[serde(
        default,
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Item {
    /// New item with a fresh id, `gray` status and no due date.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            status: Status::Gray,
            date: None,
            created_at: Some(Utc::now()),
        }
    }

    /// Due date as a calendar day, or `None` when unset or unparsable.
    #[must_use]
    pub fn due_date(&self) -> Option<NaiveDate> {
        self.date.as_deref().and_then(parse_calendar_date)
    }
}

/// Parse an ISO-8601 date or date-time into a local calendar day.
///
/// Accepted dates are `YYYY-MM-DD`, the reduced `YYYY-MM` (first of the
/// month) and the basic `YYYYMMDD`. A time may follow after `T` or a
/// space, as `HH`, `HH:MM`, `HH:MM:SS[.fff]` or their basic forms, with an
/// optional `Z` or `±HH[:MM]` offset. Date-times with an offset are shifted
/// into the local zone first; the others keep their date part.
#[must_use]
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if !raw.is_ascii() {
        return None;
    }
    let (date_part, time_part) = match raw.find(['T', ' ']) {
        Some(at) => (&raw[..at], Some(&raw[at + 1..])),
        None => (raw, None),
    };
    let date = parse_iso_date(date_part)?;
    let Some(time_part) = time_part else {
        return Some(date);
    };

    let (clock, offset) = split_offset(time_part)?;
    let time = parse_iso_time(clock)?;
    match offset {
        None => Some(date),
        Some(offset) => offset
            .from_local_datetime(&date.and_time(time))
            .single()
            .map(|stamp| stamp.with_timezone(&Local).date_naive()),
    }
}

fn all_digits(raw: &str, len: usize) -> bool {
    raw.len() == len && raw.bytes().all(|b| b.is_ascii_digit())
}

fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let bytes = raw.as_bytes();
    let (year, month, day) = match raw.len() {
        10 if bytes[4] == b'-' && bytes[7] == b'-' => (&raw[..4], &raw[5..7], &raw[8..]),
        8 => (&raw[..4], &raw[4..6], &raw[6..]),
        7 if bytes[4] == b'-' => (&raw[..4], &raw[5..], "01"),
        _ => return None,
    };
    if !(all_digits(year, 4) && all_digits(month, 2) && all_digits(day, 2)) {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

/// Split a trailing `Z` or `±HH[:MM]` zone designator off a time.
fn split_offset(raw: &str) -> Option<(&str, Option<FixedOffset>)> {
    if let Some(clock) = raw.strip_suffix(['Z', 'z']) {
        return Some((clock, FixedOffset::east_opt(0)));
    }
    let Some(at) = raw.rfind(['+', '-']) else {
        return Some((raw, None));
    };
    let (clock, zone) = raw.split_at(at);
    let sign = if zone.starts_with('-') { -1 } else { 1 };
    let zone = &zone[1..];
    let (hours, minutes) = match zone.len() {
        2 => (zone, "00"),
        4 => (&zone[..2], &zone[2..]),
        5 if zone.as_bytes()[2] == b':' => (&zone[..2], &zone[3..]),
        _ => return None,
    };
    if !(all_digits(hours, 2) && all_digits(minutes, 2)) {
        return None;
    }
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).map(|offset| (clock, Some(offset)))
}

fn parse_iso_time(raw: &str) -> Option<NaiveTime> {
    let (clock, fraction) = match raw.find(['.', ',']) {
        Some(at) => (&raw[..at], Some(&raw[at + 1..])),
        None => (raw, None),
    };
    let fraction_ok =
        fraction.is_none_or(|f| !f.is_empty() && f.bytes().all(|b| b.is_ascii_digit()));
    if !fraction_ok {
        return None;
    }

    let fields: Vec<&str> = if clock.contains(':') {
        clock.split(':').collect()
    } else if clock.len() % 2 == 0 {
        (0..clock.len()).step_by(2).map(|at| &clock[at..at + 2]).collect()
    } else {
        return None;
    };
    if fields.is_empty() || fields.len() > 3 || !fields.iter().all(|f| all_digits(f, 2)) {
        return None;
    }

    let mut parts = fields.iter().map(|f| f.parse::<u32>().ok());
    let hour = parts.next().flatten()?;
    let minute = parts.next().flatten().unwrap_or(0);
    let second = parts.next().flatten().unwrap_or(0);
    NaiveTime::from_hms_opt(hour, minute, second)
}

/// An ordered, colored collection of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub title: String,
    pub color: String,
    #[serde(default)]
    pub items: Vec<Arc<Item>>,
}

impl Group {
    /// Position of the item with `item_id`, if present.
    #[must_use]
    pub fn item_position(&self, item_id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == item_id)
    }

    #[must_use]
    pub fn item(&self, item_id: &str) -> Option<&Arc<Item>> {
        self.items.iter().find(|item| item.id == item_id)
    }

    #[must_use]
    pub fn contains_item(&self, item_id: &str) -> bool {
        self.items.iter().any(|item| item.id == item_id)
    }
}

/// Top-level container of groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub groups: Vec<Arc<Group>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin_code: Option<String>,
}

impl Board {
    /// New empty board with a fresh id.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            title: title.into(),
            color: None,
            groups: Vec::new(),
            pin_code: None,
        }
    }

    #[must_use]
    pub fn group_position(&self, group_id: &str) -> Option<usize> {
        self.groups.iter().position(|group| group.id == group_id)
    }

    #[must_use]
    pub fn group(&self, group_id: &str) -> Option<&Arc<Group>> {
        self.groups.iter().find(|group| group.id == group_id)
    }

    /// The group whose item sequence contains `item_id`.
    #[must_use]
    pub fn group_of_item(&self, item_id: &str) -> Option<&Arc<Group>> {
        self.groups.iter().find(|group| group.contains_item(item_id))
    }

    #[must_use]
    pub fn is_protected(&self) -> bool {
        self.pin_code.is_some()
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        self.groups.iter().map(|group| group.items.len()).sum()
    }
}

/// Fresh unique identifier for a board, group or item.
#[must_use]
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|value| !value.trim().is_empty()))
}
