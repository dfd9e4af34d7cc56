//! Text, CSV and JSON renderings of donors and registry summaries.
//!
//! Everything here returns a `String`; writing it out is the
//! [`OutputManager`](crate::output::OutputManager)'s job.

use std::fmt::Write as _;
use std::io;

use chrono::{DateTime, Utc};
use console::{Alignment, measure_text_width, pad_str};
use serde::Serialize;
use uuid::Uuid;

use donatelife_core::application::{DonorInfo, RegistrySummary};

use crate::error::{CliResult, IntoCli};

const HEADERS: [&str; 9] = [
    "ID",
    "Name",
    "Blood Type",
    "Email",
    "Phone",
    "City",
    "Last Donation",
    "Active",
    "Eligible",
];

/// Characters of the id shown in tables. Enough to type back as a prefix.
pub const SHORT_ID_LEN: usize = 8;

pub fn short_id(id: Uuid) -> String {
    id.to_string()[..SHORT_ID_LEN].to_string()
}

/// Format a donation date with a `strftime` pattern; empty when absent.
pub fn day(date: Option<DateTime<Utc>>, date_format: &str) -> String {
    let mut out = String::new();
    if let Some(date) = date {
        // an invalid pattern leaves the cell empty instead of panicking
        if write!(out, "{}", date.format(date_format)).is_err() {
            out.clear();
        }
    }
    out
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

fn row(info: &DonorInfo, date_format: &str) -> [String; 9] {
    let d = &info.donor;
    [
        short_id(d.id()),
        d.full_name(),
        d.blood_type().to_string(),
        d.email().unwrap_or_default().to_string(),
        d.phone().to_string(),
        d.city().to_string(),
        day(d.last_donation_date(), date_format),
        yes_no(d.is_active()).to_string(),
        yes_no(info.eligible).to_string(),
    ]
}

/// Column-aligned table, one donor per line, in the order given.
pub fn table(donors: &[DonorInfo], date_format: &str) -> String {
    let rows: Vec<[String; 9]> = donors.iter().map(|i| row(i, date_format)).collect();

    let mut widths = HEADERS.map(measure_text_width);
    for r in &rows {
        for (width, cell) in widths.iter_mut().zip(r) {
            *width = (*width).max(measure_text_width(cell));
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(render_line(HEADERS.iter().copied(), &widths));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for r in &rows {
        lines.push(render_line(r.iter().map(String::as_str), &widths));
    }
    lines.join("\n")
}

fn render_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, width)| pad_str(cell, *width, Alignment::Left, None).into_owned())
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// RFC 4180 CSV with a header row. Dates are always `YYYY-MM-DD`.
pub fn csv(donors: &[DonorInfo]) -> CliResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    let write_err = || "Failed to write CSV";

    writer
        .write_record([
            "id",
            "first_name",
            "last_name",
            "blood_type",
            "email",
            "phone",
            "city",
            "last_donation_date",
            "active",
            "eligible",
        ])
        .map_err(io::Error::from)
        .with_cli_context(write_err)?;

    for info in donors {
        let d = &info.donor;
        writer
            .write_record([
                d.id().to_string(),
                d.first_name().to_string(),
                d.last_name().to_string(),
                d.blood_type().to_string(),
                d.email().unwrap_or_default().to_string(),
                d.phone().to_string(),
                d.city().to_string(),
                day(d.last_donation_date(), "%Y-%m-%d"),
                d.is_active().to_string(),
                info.eligible.to_string(),
            ])
            .map_err(io::Error::from)
            .with_cli_context(write_err)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| e.into_error())
        .with_cli_context(write_err)?;
    String::from_utf8(bytes)
        .map_err(io::Error::other)
        .with_cli_context(write_err)
}

/// Pretty-printed JSON.
pub fn json<T: Serialize + ?Sized>(value: &T) -> CliResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(io::Error::from)
        .with_cli_context(|| "Failed to serialise JSON")
}

/// Every field of one donor, one per line.
pub fn detail(info: &DonorInfo, date_format: &str) -> String {
    let d = &info.donor;
    let last = match d.last_donation_date() {
        Some(date) => day(Some(date), date_format),
        None => "Never".to_string(),
    };
    let since = info
        .days_since_last_donation
        .map_or_else(|| "-".to_string(), |n| n.to_string());

    let fields = [
        ("ID", d.id().to_string()),
        ("Name", d.full_name()),
        ("Blood Type", d.blood_type().to_string()),
        ("Email", d.email().unwrap_or("N/A").to_string()),
        ("Phone", d.phone().to_string()),
        ("City", d.city().to_string()),
        ("Last Donation", last),
        ("Days Since", since),
        ("Active", yes_no(d.is_active()).to_string()),
        ("Eligible", yes_no(info.eligible).to_string()),
    ];
    fields
        .iter()
        .map(|(label, value)| format!("{:<16}{value}", format!("{label}:")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Registry counts followed by a per-blood-type breakdown.
pub fn summary(summary: &RegistrySummary) -> String {
    let mut out = format!(
        "Total donors: {}\nActive:       {}\nEligible:     {}",
        summary.total, summary.active, summary.eligible
    );
    if !summary.by_blood_type.is_empty() {
        out.push_str("\nBy blood type:");
        for (blood_type, count) in &summary.by_blood_type {
            out.push_str(&format!("\n  {blood_type:<8}{count}"));
        }
    }
    out
}
