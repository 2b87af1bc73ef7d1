// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg};
use colored::Colorize;
use raplamobile_core::{
    AllocatableId, AppointmentId, RaplaContext, ReservationId, Selection, assign_with_facade,
};

use crate::appointment_formatter::{AppointmentFormatter, AppointmentRow};
use crate::cmd_reservation::print_reservation;
use crate::config::Config;
use crate::tui;
use crate::util::ArgOutputFormat;

/// Opens the interactive screen to book resources of one category.
#[derive(Debug, Clone)]
pub struct CmdBook {
    pub reservation: ReservationId,
    pub category: Option<String>,
}

impl CmdBook {
    pub const NAME: &str = "book";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Book resources for a reservation interactively")
            .arg(arg!(<RESERVATION> "The reservation to book resources for"))
            .arg(arg!(--category <CATEGORY> "Dynamic type of the resources to offer"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            reservation: get_reservation(matches),
            category: matches.get_one::<String>("category").cloned(),
        }
    }

    pub async fn run(self, ctx: &RaplaContext, config: &Config) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "booking allocatables...");
        let category = self
            .category
            .or_else(|| config.default_category.clone())
            .ok_or("No category given, pass --category or set cli.default_category")?;

        let reservation = ctx.facade().reservation(&self.reservation).await?;
        let changed = tui::book_allocatables(ctx, reservation, &category)?;
        if let Some(reservation) = changed {
            ctx.facade().store_reservation(reservation.clone()).await?;
            print_reservation(ctx, &reservation).await?;
        }
        Ok(())
    }
}

/// Books a resource and restricts it to the given appointments.
#[derive(Debug, Clone)]
pub struct CmdAssign {
    pub reservation: ReservationId,
    pub allocatable: AllocatableId,
    pub appointments: Vec<AppointmentId>,
    pub output_format: ArgOutputFormat,
}

impl CmdAssign {
    pub const NAME: &str = "assign";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Book a resource for some appointments of a reservation")
            .long_about(
                "\
Book a resource for some appointments of a reservation. Appointments the resource \
may not be booked for are skipped. If no appointment is given, the resource is \
assigned to all appointments.",
            )
            .arg(arg!(<RESERVATION> "The reservation to book the resource for"))
            .arg(arg!(<ALLOCATABLE> "The resource to book"))
            .arg(arg!([APPOINTMENT]... "Appointments to assign the resource to"))
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            reservation: get_reservation(matches),
            allocatable: get_allocatable(matches),
            appointments: matches
                .get_many::<String>("APPOINTMENT")
                .map(|ids| ids.map(|a| AppointmentId::new(a.as_str())).collect())
                .unwrap_or_default(),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, ctx: &RaplaContext) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "assigning appointments...");
        let facade = ctx.facade();
        let mut reservation = facade.reservation(&self.reservation).await?;
        let allocatable = facade.allocatable(&self.allocatable).await?;

        if let Some(id) = self
            .appointments
            .iter()
            .find(|id| reservation.appointment(id).is_none())
        {
            return Err(format!("Unknown appointment: {id}").into());
        }
        let mut selection: Selection = self.appointments.into_iter().collect();

        reservation.add_allocatable(allocatable.id.clone());
        let assignment = assign_with_facade(&mut reservation, &allocatable, &mut selection, facade)?;
        if let Some(notice) = assignment.notice() {
            println!("{} {}", "Notice:".yellow(), notice);
        }
        facade.store_reservation(reservation.clone()).await?;

        let assigned: Vec<_> = reservation.appointments_for(&allocatable.id);
        let rows: Vec<_> = reservation
            .appointments()
            .iter()
            .map(|appointment| AppointmentRow {
                appointment,
                assigned: assigned.iter().any(|a| a.id == appointment.id),
            })
            .collect();
        let formatter = AppointmentFormatter::new()
            .with_assignment()
            .with_output_format(self.output_format);
        print!("{}", formatter.format(&rows));
        Ok(())
    }
}

/// Removes a resource, and its restriction, from a reservation.
#[derive(Debug, Clone)]
pub struct CmdUnbook {
    pub reservation: ReservationId,
    pub allocatable: AllocatableId,
}

impl CmdUnbook {
    pub const NAME: &str = "unbook";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Undo the booking of a resource")
            .arg(arg!(<RESERVATION> "The reservation to remove the resource from"))
            .arg(arg!(<ALLOCATABLE> "The resource to remove"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            reservation: get_reservation(matches),
            allocatable: get_allocatable(matches),
        }
    }

    pub async fn run(self, ctx: &RaplaContext) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "undoing booking...");
        let facade = ctx.facade();
        let mut reservation = facade.reservation(&self.reservation).await?;
        if !reservation.has_allocated(&self.allocatable) {
            return Err(format!(
                "{} is not booked by reservation {}",
                self.allocatable, self.reservation
            )
            .into());
        }

        reservation.remove_allocatable(&self.allocatable);
        facade.store_reservation(reservation).await?;
        println!("Removed {} from {}", self.allocatable, self.reservation);
        Ok(())
    }
}

fn get_reservation(matches: &ArgMatches) -> ReservationId {
    let id = matches
        .get_one::<String>("RESERVATION")
        .expect("RESERVATION is required");
    ReservationId::new(id.as_str())
}

fn get_allocatable(matches: &ArgMatches) -> AllocatableId {
    let id = matches
        .get_one::<String>("ALLOCATABLE")
        .expect("ALLOCATABLE is required");
    AllocatableId::new(id.as_str())
}
