// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use colored::Color;
use raplamobile_core::Reservation;

use crate::table::{PaddingDirection, Table, TableColumn, TableStyleBasic, TableStyleJson};
use crate::util::{ArgOutputFormat, format_datetime};

#[derive(Debug)]
pub struct ReservationFormatter {
    columns: Vec<ReservationColumn>,
    format: ArgOutputFormat,
}

impl ReservationFormatter {
    pub fn new() -> Self {
        Self {
            columns: vec![
                ReservationColumn::Id,
                ReservationColumn::Begin,
                ReservationColumn::Appointments,
                ReservationColumn::Allocatables,
                ReservationColumn::Name,
            ],
            format: ArgOutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: ArgOutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a>(&'a self, reservations: &'a [Reservation]) -> Display<'a> {
        Display {
            reservations,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    reservations: &'a [Reservation],
    formatter: &'a ReservationFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (columns, data) = (&self.formatter.columns, self.reservations);
        match self.formatter.format {
            ArgOutputFormat::Json => write!(f, "{}", Table::new(TableStyleJson::new(), columns, data)),
            ArgOutputFormat::Table => {
                write!(f, "{}", Table::new(TableStyleBasic::new(), columns, data))
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum ReservationColumn {
    Id,
    Begin,
    Appointments,
    Allocatables,
    Name,
}

impl TableColumn<Reservation> for ReservationColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            ReservationColumn::Id => "ID",
            ReservationColumn::Begin => "Begin",
            ReservationColumn::Appointments => "Appointments",
            ReservationColumn::Allocatables => "Resources",
            ReservationColumn::Name => "Name",
        }
        .into()
    }

    fn format<'a>(&self, reservation: &'a Reservation) -> Cow<'a, str> {
        match self {
            ReservationColumn::Id => reservation.id.as_str().into(),
            ReservationColumn::Begin => reservation
                .appointments()
                .iter()
                .map(|a| a.start)
                .min()
                .map(format_datetime)
                .unwrap_or_default()
                .into(),
            ReservationColumn::Appointments => reservation.appointments().len().to_string().into(),
            ReservationColumn::Allocatables => reservation.allocatables().len().to_string().into(),
            ReservationColumn::Name => reservation.name().into(),
        }
    }

    fn get_color(&self, _reservation: &Reservation) -> Option<Color> {
        match self {
            ReservationColumn::Id => Some(Color::BrightBlack),
            _ => None,
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            ReservationColumn::Appointments | ReservationColumn::Allocatables => {
                PaddingDirection::Right
            }
            _ => PaddingDirection::Left,
        }
    }
}
