// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg};
use colored::Colorize;
use raplamobile_core::{RaplaContext, Reservation, ReservationId};

use crate::appointment_formatter::{AppointmentFormatter, AppointmentRow};
use crate::reservation_formatter::ReservationFormatter;
use crate::tui;
use crate::util::ArgOutputFormat;

#[derive(Debug, Clone)]
pub struct CmdReservationList {
    pub output_format: ArgOutputFormat,
}

impl CmdReservationList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List reservations")
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, ctx: &RaplaContext) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing reservations...");
        let reservations = ctx.facade().reservations().await?;
        if reservations.is_empty() && self.output_format == ArgOutputFormat::Table {
            println!("{}", "No reservations found".italic());
            return Ok(());
        }

        let formatter = ReservationFormatter::new().with_output_format(self.output_format);
        print!("{}", formatter.format(&reservations));
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdReservationShow {
    pub id: ReservationId,
    pub output_format: ArgOutputFormat,
}

impl CmdReservationShow {
    pub const NAME: &str = "show";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Show the appointments and resources of a reservation")
            .arg(arg!(<ID> "The reservation to show"))
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: get_id(matches),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, ctx: &RaplaContext) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "showing reservation...");
        let reservation = ctx.facade().reservation(&self.id).await?;
        match self.output_format {
            ArgOutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reservation)?),
            ArgOutputFormat::Table => print_reservation(ctx, &reservation).await?,
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdReservationEdit {
    pub id: ReservationId,
}

impl CmdReservationEdit {
    pub const NAME: &str = "edit";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Edit the attributes of a reservation interactively")
            .arg(arg!(<ID> "The reservation to edit"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: get_id(matches),
        }
    }

    pub async fn run(self, ctx: &RaplaContext) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "editing reservation...");
        let facade = ctx.facade();
        let mut reservation = facade.reservation(&self.id).await?;
        let dynamic_type = facade
            .dynamic_type(&reservation.classification.type_key)
            .await?;

        let title = format!("Edit {}", reservation.id);
        let edited = tui::edit_classification(title, &dynamic_type, &reservation.classification)?;
        match edited {
            Some(classification) => {
                reservation.classification = classification;
                facade.store_reservation(reservation.clone()).await?;
                print_reservation(ctx, &reservation).await
            }
            None => {
                tracing::info!("User canceled the reservation edit");
                Ok(())
            }
        }
    }
}

fn get_id(matches: &ArgMatches) -> ReservationId {
    let id = matches.get_one::<String>("ID").expect("ID is required");
    ReservationId::new(id.as_str())
}

/// Prints the name, the appointments and the booked resources.
pub async fn print_reservation(
    ctx: &RaplaContext,
    reservation: &Reservation,
) -> Result<(), Box<dyn Error>> {
    println!("{} {}", reservation.name().bold(), reservation.id.to_string().bright_black());

    let rows: Vec<_> = reservation
        .appointments()
        .iter()
        .map(|appointment| AppointmentRow {
            appointment,
            assigned: false,
        })
        .collect();
    print!("{}", AppointmentFormatter::new().format(&rows));

    if reservation.allocatables().is_empty() {
        println!("{}", "No resources booked".italic());
        return Ok(());
    }

    println!("{}", "Resources:".bold());
    for id in reservation.allocatables() {
        let name = match ctx.facade().allocatable(id).await {
            Ok(allocatable) => allocatable.name().to_owned(),
            Err(e) => {
                tracing::warn!(allocatable = %id, error = %e, "failed to look up allocatable");
                id.to_string()
            }
        };
        let appointments = match reservation.restriction(id) {
            None => "all appointments".to_owned(),
            Some(ids) => ids
                .iter()
                .map(|a| a.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        };
        println!("  {name} {}: {appointments}", id.to_string().bright_black());
    }
    Ok(())
}
