// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg};
use colored::Colorize;
use raplamobile_core::{RaplaContext, ReservationId, allocatables_of_type};

use crate::allocatable_formatter::{AllocatableFormatter, AllocatableRow};
use crate::config::Config;
use crate::util::ArgOutputFormat;

#[derive(Debug, Clone)]
pub struct CmdAllocatableList {
    pub category: Option<String>,
    pub reservation: Option<ReservationId>,
    pub output_format: ArgOutputFormat,
}

impl CmdAllocatableList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List bookable resources")
            .arg(arg!(--category <CATEGORY> "Dynamic type of the resources to list"))
            .arg(arg!(-r --reservation <RESERVATION> "Mark the resources booked by this reservation"))
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            category: matches.get_one::<String>("category").cloned(),
            reservation: matches
                .get_one::<String>("reservation")
                .map(|a| ReservationId::new(a.as_str())),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, ctx: &RaplaContext, config: &Config) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing allocatables...");
        let facade = ctx.facade();
        let category = self.category.or_else(|| config.default_category.clone());
        let allocatables = match &category {
            Some(category) => allocatables_of_type(facade, category).await?,
            None => {
                let mut all = facade.allocatables(&[]).await?;
                all.sort_by(|a, b| a.name().cmp(b.name()));
                all
            }
        };

        if allocatables.is_empty() && self.output_format == ArgOutputFormat::Table {
            println!("{}", "No allocatables found".italic());
            return Ok(());
        }

        let reservation = match &self.reservation {
            Some(id) => Some(facade.reservation(id).await?),
            None => None,
        };
        let rows: Vec<_> = allocatables
            .iter()
            .map(|allocatable| AllocatableRow {
                allocatable,
                booked: reservation
                    .as_ref()
                    .is_some_and(|r| r.has_allocated(&allocatable.id)),
            })
            .collect();

        let mut formatter = AllocatableFormatter::new().with_output_format(self.output_format);
        if reservation.is_some() {
            formatter = formatter.with_booking();
        }
        print!("{}", formatter.format(&rows));
        Ok(())
    }
}
