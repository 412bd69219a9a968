//! `brd alerts`: overdue and imminent items across every board.

use super::Context;
use crate::output::{pretty_kv, pretty_rule, render_mode};
use anyhow::Result;
use boards_core::alert::{self, Alert, AlertCounts, AlertKind, get_alerts, get_alerts_now};
use boards_core::model::Status;
use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;
use std::io::Write;

#[derive(Args, Debug)]
pub struct AlertsArgs {
    /// Reference day (YYYY-MM-DD). Defaults to the local date.
    #[arg(long)]
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct AlertRow {
    pub kind: AlertKind,
    pub message: &'static str,
    pub date: String,
    pub item_id: String,
    pub item_name: String,
    pub status: Status,
    pub group_id: String,
    pub group_title: String,
    pub board_id: String,
    pub board_title: String,
}

impl From<&Alert> for AlertRow {
    fn from(alert: &Alert) -> Self {
        Self {
            kind: alert.kind,
            message: alert.message,
            date: alert.date.clone(),
            item_id: alert.item.id.clone(),
            item_name: alert.item.name.clone(),
            status: alert.item.status,
            group_id: alert.group.id.clone(),
            group_title: alert.group.title.clone(),
            board_id: alert.board.id.clone(),
            board_title: alert.board.title.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AlertsReport {
    pub today: NaiveDate,
    pub counts: AlertCounts,
    pub alerts: Vec<AlertRow>,
}

/// Execute `brd alerts`.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be loaded.
pub fn run_alerts(args: &AlertsArgs, ctx: &Context) -> Result<()> {
    let boards = ctx.store()?.load()?;
    let (today, alerts) = match args.today {
        Some(day) => (day, get_alerts(&boards, day)),
        None => (alert::today(), get_alerts_now(&boards)),
    };

    let report = AlertsReport {
        today,
        counts: AlertCounts::of(&alerts),
        alerts: alerts.iter().map(AlertRow::from).collect(),
    };

    render_mode(
        ctx.output,
        &report,
        |report, w| {
            for row in &report.alerts {
                writeln!(
                    w,
                    "{}  {}  {}  {}  {}  {}",
                    row.kind, row.date, row.board_id, row.group_id, row.item_id, row.item_name
                )?;
            }
            Ok(())
        },
        |report, w| {
            pretty_kv(w, "Today", report.today.to_string())?;
            pretty_kv(
                w,
                "Alerts",
                format!(
                    "{} overdue, {} soon",
                    report.counts.overdue, report.counts.soon
                ),
            )?;
            if report.alerts.is_empty() {
                return writeln!(w, "Nothing due. ✓");
            }
            pretty_rule(w)?;
            for row in &report.alerts {
                let marker = match row.kind {
                    AlertKind::Overdue => "!",
                    AlertKind::Soon => "•",
                };
                writeln!(
                    w,
                    "{marker} {:<12} {:<12} {:<28} {} / {}",
                    row.message, row.date, row.item_name, row.board_title, row.group_title
                )?;
            }
            Ok(())
        },
    )
}
