// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use colored::Color;
use raplamobile_core::Allocatable;

use crate::table::{PaddingDirection, Table, TableColumn, TableStyleBasic, TableStyleJson};
use crate::util::ArgOutputFormat;

/// An allocatable, together with whether the reservation at hand has booked it.
#[derive(Debug, Clone, Copy)]
pub struct AllocatableRow<'a> {
    pub allocatable: &'a Allocatable,
    pub booked: bool,
}

#[derive(Debug)]
pub struct AllocatableFormatter {
    columns: Vec<AllocatableColumn>,
    format: ArgOutputFormat,
}

impl AllocatableFormatter {
    pub fn new() -> Self {
        Self {
            columns: vec![
                AllocatableColumn::Id,
                AllocatableColumn::Name,
                AllocatableColumn::Type,
            ],
            format: ArgOutputFormat::Table,
        }
    }

    /// Prepends a check box telling whether the resource is booked.
    pub fn with_booking(mut self) -> Self {
        self.columns.insert(0, AllocatableColumn::Booked);
        self
    }

    pub fn with_output_format(mut self, format: ArgOutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a>(&'a self, rows: &'a [AllocatableRow<'a>]) -> Display<'a> {
        Display {
            rows,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    rows: &'a [AllocatableRow<'a>],
    formatter: &'a AllocatableFormatter,
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
enum AllocatableColumn {
    Booked,
    Id,
    Name,
    Type,
}

impl<'r> TableColumn<AllocatableRow<'r>> for AllocatableColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            AllocatableColumn::Booked => "Booked",
            AllocatableColumn::Id => "ID",
            AllocatableColumn::Name => "Name",
            AllocatableColumn::Type => "Type",
        }
        .into()
    }

    fn format<'a>(&self, row: &'a AllocatableRow<'r>) -> Cow<'a, str> {
        match self {
            AllocatableColumn::Booked if row.booked => "[x]".into(),
            AllocatableColumn::Booked => "[ ]".into(),
            AllocatableColumn::Id => row.allocatable.id.as_str().into(),
            AllocatableColumn::Name => row.allocatable.name().into(),
            AllocatableColumn::Type => row.allocatable.classification.type_key.as_str().into(),
        }
    }

    fn get_color(&self, row: &AllocatableRow<'r>) -> Option<Color> {
        match self {
            AllocatableColumn::Booked if row.booked => Some(Color::Green),
            AllocatableColumn::Id => Some(Color::BrightBlack),
            _ => None,
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        PaddingDirection::Left
    }
}

#[cfg(test)]
mod tests {
    use raplamobile_core::{AttributeValue, Classification, NAME_ATTRIBUTE};

    use super::*;

    fn room(id: &str, name: &str) -> Allocatable {
        Allocatable::new(
            id,
            Classification::new("room").with(NAME_ATTRIBUTE, AttributeValue::String(name.into())),
        )
    }

    #[test]
    fn test_json_output() {
        let lab = room("lab", "Lab");
        let rows = [AllocatableRow {
            allocatable: &lab,
            booked: true,
        }];
        let formatter = AllocatableFormatter::new()
            .with_booking()
            .with_output_format(ArgOutputFormat::Json);
        let out = formatter.format(&rows).to_string();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["Booked"], "[x]");
        assert_eq!(value[0]["ID"], "lab");
        assert_eq!(value[0]["Name"], "Lab");
        assert_eq!(value[0]["Type"], "room");
    }
}
