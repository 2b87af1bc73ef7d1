// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use chrono::NaiveDateTime;
use clap::{Arg, ArgMatches, arg, value_parser};
use raplamobile_core::{Appointment, RepeatingEnd, RepeatingKind};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// The output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ArgOutputFormat {
    Json,
    Table,
}

impl ArgOutputFormat {
    pub fn arg() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(ArgOutputFormat))
            .default_value("table")
    }

    pub fn from(matches: &ArgMatches) -> Self {
        matches
            .get_one("output-format")
            .copied()
            .unwrap_or(ArgOutputFormat::Table)
    }
}

pub fn format_datetime(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%d %H:%M").to_string()
}

/// Renders the time span of an appointment, e.g. `2026-10-20 09:00~11:00`.
pub fn format_time_range(appointment: &Appointment) -> String {
    let (start, end) = (appointment.start, appointment.end);
    if start.date() == end.date() {
        format!(
            "{} {}~{}",
            start.date().format("%Y-%m-%d"),
            start.format("%H:%M"),
            end.format("%H:%M")
        )
    } else {
        format!("{} ~ {}", format_datetime(start), format_datetime(end))
    }
}

/// Renders the repetition of an appointment, empty for a single appointment.
pub fn format_repeating(appointment: &Appointment) -> String {
    let Some(repeating) = appointment.repeating else {
        return String::new();
    };

    let unit = match repeating.kind {
        RepeatingKind::Daily => "day",
        RepeatingKind::Weekly => "week",
        RepeatingKind::Monthly => "month",
        RepeatingKind::Yearly => "year",
    };
    let every = match repeating.interval {
        0 | 1 => format!("every {unit}"),
        n => format!("every {n} {unit}s"),
    };
    match repeating.end {
        RepeatingEnd::Forever => every,
        RepeatingEnd::Count(n) => format!("{every}, {n} times"),
        RepeatingEnd::Until(d) => format!("{every}, until {}", d.format("%Y-%m-%d")),
    }
}

/// Display width of the first `first_n` grapheme clusters of `s`.
pub fn unicode_width_of_graphemes(s: &str, first_n: usize) -> usize {
    s.graphemes(true).take(first_n).map(|g| g.width()).sum()
}

pub fn grapheme_count(s: &str) -> usize {
    s.graphemes(true).count()
}

/// Byte offset where the grapheme cluster `g_idx` starts, `s.len()` past the end.
pub fn byte_index_of_grapheme(s: &str, g_idx: usize) -> usize {
    s.grapheme_indices(true)
        .nth(g_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// Return the byte range of the grapheme cluster at index `g_idx` in `s`.
/// If out of bounds, returns None.
pub fn byte_range_of_grapheme_at(s: &str, g_idx: usize) -> Option<std::ops::Range<usize>> {
    s.grapheme_indices(true)
        .nth(g_idx)
        .map(|(byte_start, g)| byte_start..byte_start + g.len())
}
