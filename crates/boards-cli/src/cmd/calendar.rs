//! `brd calendar`: month, week or day grid of a board's dated items.

use super::Context;
use crate::output::{pretty_kv, pretty_section, render_mode};
use anyhow::Result;
use boards_core::alert;
use boards_core::calendar::{Calendar, CalendarView, calendar, shift};
use chrono::{Datelike, NaiveDate};
use clap::Args;
use serde::Serialize;
use std::io::Write;

#[derive(Args, Debug)]
pub struct CalendarArgs {
    /// Board id.
    pub board: String,

    /// month, week or day.
    #[arg(long, default_value_t = CalendarView::Month)]
    pub view: CalendarView,

    /// Day the grid is anchored on (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Shift the anchor by this many periods (negative goes back).
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub offset: i32,

    /// Reference day used to flag "today" (YYYY-MM-DD).
    #[arg(long)]
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
struct CalendarReport {
    board_id: String,
    board_title: String,
    #[serde(flatten)]
    calendar: Calendar,
}

/// Execute `brd calendar <board>`.
///
/// # Errors
///
/// Returns an error if the board does not exist or is locked.
pub fn run_calendar(args: &CalendarArgs, ctx: &Context) -> Result<()> {
    let boards = ctx.store()?.load()?;
    let board = ctx.open_board(&boards, &args.board)?;

    let today = args.today.unwrap_or_else(alert::today);
    let anchor = shift(args.date.unwrap_or(today), args.view, args.offset);

    let report = CalendarReport {
        board_id: board.id.clone(),
        board_title: board.title.clone(),
        calendar: calendar(board, anchor, args.view, today),
    };

    render_mode(
        ctx.output,
        &report,
        |report, w| {
            for day in &report.calendar.days {
                for entry in &day.entries {
                    writeln!(
                        w,
                        "{}  {}  {}  {}  {}",
                        day.date, entry.group_id, entry.item.id, entry.item.status, entry.item.name
                    )?;
                }
            }
            Ok(())
        },
        |report, w| {
            let cal = &report.calendar;
            pretty_section(w, &format!("{} ({} view)", report.board_title, cal.view))?;
            pretty_kv(w, "Period", format!("{} .. {}", cal.start, cal.end))?;
            pretty_kv(w, "Items", cal.entry_count().to_string())?;
            writeln!(w)?;

            let mut shown = 0;
            for day in &cal.days {
                if day.entries.is_empty() && !day.is_today {
                    continue;
                }
                let today_mark = if day.is_today { " (today)" } else { "" };
                writeln!(w, "{} {}{today_mark}", day.date.weekday(), day.date)?;
                for entry in &day.entries {
                    writeln!(
                        w,
                        "  {:<8} {:<28} {}",
                        entry.item.status, entry.item.name, entry.group_title
                    )?;
                }
                shown += day.entries.len();
            }
            if shown == 0 {
                writeln!(w, "No dated items in this period.")?;
            }
            Ok(())
        },
    )
}
