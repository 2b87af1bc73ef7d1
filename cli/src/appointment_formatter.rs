// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use colored::Color;
use raplamobile_core::Appointment;

use crate::table::{PaddingDirection, Table, TableColumn, TableStyleBasic, TableStyleJson};
use crate::util::{ArgOutputFormat, format_repeating, format_time_range};

/// An appointment, and whether the resource at hand is assigned to it.
#[derive(Debug, Clone, Copy)]
pub struct AppointmentRow<'a> {
    pub appointment: &'a Appointment,
    pub assigned: bool,
}

#[derive(Debug)]
pub struct AppointmentFormatter {
    columns: Vec<AppointmentColumn>,
    format: ArgOutputFormat,
}

impl AppointmentFormatter {
    pub fn new() -> Self {
        Self {
            columns: vec![
                AppointmentColumn::Id,
                AppointmentColumn::TimeRange,
                AppointmentColumn::Repeating,
            ],
            format: ArgOutputFormat::Table,
        }
    }

    pub fn with_assignment(mut self) -> Self {
        self.columns.insert(0, AppointmentColumn::Assigned);
        self
    }

    pub fn with_output_format(mut self, format: ArgOutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a>(&'a self, rows: &'a [AppointmentRow<'a>]) -> Display<'a> {
        Display {
            rows,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    rows: &'a [AppointmentRow<'a>],
    formatter: &'a AppointmentFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = &self.formatter.columns;
        match self.formatter.format {
            ArgOutputFormat::Json => {
                write!(f, "{}", Table::new(TableStyleJson::new(), columns, self.rows))
            }
            ArgOutputFormat::Table => {
                write!(f, "{}", Table::new(TableStyleBasic::new(), columns, self.rows))
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum AppointmentColumn {
    Assigned,
    Id,
    TimeRange,
    Repeating,
}

impl<'r> TableColumn<AppointmentRow<'r>> for AppointmentColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            AppointmentColumn::Assigned => "Assigned",
            AppointmentColumn::Id => "ID",
            AppointmentColumn::TimeRange => "Time Range",
            AppointmentColumn::Repeating => "Repeating",
        }
        .into()
    }

    fn format<'a>(&self, row: &'a AppointmentRow<'r>) -> Cow<'a, str> {
        match self {
            AppointmentColumn::Assigned if row.assigned => "[x]".into(),
            AppointmentColumn::Assigned => "[ ]".into(),
            AppointmentColumn::Id => row.appointment.id.as_str().into(),
            AppointmentColumn::TimeRange => format_time_range(row.appointment).into(),
            AppointmentColumn::Repeating => format_repeating(row.appointment).into(),
        }
    }

    fn get_color(&self, row: &AppointmentRow<'r>) -> Option<Color> {
        match self {
            AppointmentColumn::Assigned if row.assigned => Some(Color::Green),
            AppointmentColumn::Id => Some(Color::BrightBlack),
            _ => None,
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        PaddingDirection::Left
    }
}
