// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, path::PathBuf};

use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;
use futures::{FutureExt, future::BoxFuture};
use raplamobile_core::{APP_NAME, RaplaContext};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cmd_allocatable::CmdAllocatableList;
use crate::cmd_booking::{CmdAssign, CmdBook, CmdUnbook};
use crate::cmd_reservation::{CmdReservationEdit, CmdReservationList, CmdReservationShow};
use crate::config::{Config, parse_config};

/// Run the Rapla command-line interface.
pub async fn run() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match Cli::parse() {
        Ok(cli) => {
            if let Err(e) = cli.run().await {
                println!("{} {}", "Error:".red(), e);
            }
        }
        Err(e) => println!("{} {}", "Error:".red(), e),
    };
    Ok(())
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("Book rooms and resources for your Rapla reservations.")
            .author("Zexin Yuan <aim@yzx9.xyz>")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(true)
            .arg_required_else_help(true)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $XDG_CONFIG_HOME/rapla/config.toml on Linux and MacOS, \
%LOCALAPPDATA%/rapla/config.toml on Windows.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .subcommand(
                Command::new("reservation")
                    .alias("r")
                    .about("Inspect and edit reservations")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdReservationList::command())
                    .subcommand(CmdReservationShow::command())
                    .subcommand(CmdReservationEdit::command()),
            )
            .subcommand(
                Command::new("allocatable")
                    .alias("a")
                    .about("Browse bookable resources")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdAllocatableList::command()),
            )
            .subcommand(CmdBook::command())
            .subcommand(CmdAssign::command())
            .subcommand(CmdUnbook::command())
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: ArgMatches) -> Result<Self, Box<dyn Error>> {
        use Commands::*;
        let command = match matches.subcommand() {
            Some(("reservation", matches)) => match matches.subcommand() {
                Some((CmdReservationList::NAME, matches)) => {
                    ReservationList(CmdReservationList::from(matches))
                }
                Some((CmdReservationShow::NAME, matches)) => {
                    ReservationShow(CmdReservationShow::from(matches))
                }
                Some((CmdReservationEdit::NAME, matches)) => {
                    ReservationEdit(CmdReservationEdit::from(matches))
                }
                _ => unreachable!(),
            },
            Some(("allocatable", matches)) => match matches.subcommand() {
                Some((CmdAllocatableList::NAME, matches)) => {
                    AllocatableList(CmdAllocatableList::from(matches))
                }
                _ => unreachable!(),
            },
            Some((CmdBook::NAME, matches)) => Book(CmdBook::from(matches)),
            Some((CmdAssign::NAME, matches)) => Assign(CmdAssign::from(matches)),
            Some((CmdUnbook::NAME, matches)) => Unbook(CmdUnbook::from(matches)),
            _ => unreachable!(),
        };

        let config = matches.get_one("config").cloned();
        Ok(Cli { config, command })
    }

    /// Run the command
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        self.command.run(self.config).await
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// List reservations
    ReservationList(CmdReservationList),

    /// Show a reservation
    ReservationShow(CmdReservationShow),

    /// Edit the attributes of a reservation
    ReservationEdit(CmdReservationEdit),

    /// List allocatables
    AllocatableList(CmdAllocatableList),

    /// Book allocatables on the interactive screen
    Book(CmdBook),

    /// Assign an allocatable to appointments
    Assign(CmdAssign),

    /// Undo the booking of an allocatable
    Unbook(CmdUnbook),
}

impl Commands {
    /// Run the command with the given configuration
    #[rustfmt::skip]
    pub async fn run(self, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        use Commands::*;
        match self {
            ReservationList(a) => Self::run_with(config, |x, _| a.run(x).boxed()).await,
            ReservationShow(a) => Self::run_with(config, |x, _| a.run(x).boxed()).await,
            ReservationEdit(a) => Self::run_with(config, |x, _| a.run(x).boxed()).await,
            AllocatableList(a) => Self::run_with(config, |x, c| a.run(x, c).boxed()).await,
            Book(a)            => Self::run_with(config, |x, c| a.run(x, c).boxed()).await,
            Assign(a)          => Self::run_with(config, |x, _| a.run(x).boxed()).await,
            Unbook(a)          => Self::run_with(config, |x, _| a.run(x).boxed()).await,
        }
    }

    async fn run_with<F>(config: Option<PathBuf>, f: F) -> Result<(), Box<dyn Error>>
    where
        F: for<'a> FnOnce(&'a RaplaContext, &'a Config) -> BoxFuture<'a, Result<(), Box<dyn Error>>>,
    {
        tracing::debug!("Parsing configuration...");
        let (core_config, config) = parse_config(config).await?;
        let ctx = RaplaContext::open(core_config).await?;
        f(&ctx, &config).await
    }
}

#[cfg(test)]
mod tests {
    use raplamobile_core::{AllocatableId, AppointmentId, ReservationId};

    use super::*;
    use crate::util::ArgOutputFormat;

    #[test]
    fn test_parse_config() {
        let args = vec!["test", "-c", "/tmp/config.toml", "reservation", "list"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/config.toml")));
        assert!(matches!(cli.command, Commands::ReservationList(_)));
    }

    #[test]
    fn test_parse_requires_command() {
        assert!(Cli::try_parse_from(vec!["test"]).is_err());
    }

    #[test]
    fn test_parse_reservation_list() {
        let args = vec!["test", "reservation", "list", "--output-format", "json"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::ReservationList(cmd) => {
                assert_eq!(cmd.output_format, ArgOutputFormat::Json);
            }
            _ => panic!("Expected ReservationList command"),
        }
    }

    #[test]
    fn test_parse_reservation_alias() {
        let cli = Cli::try_parse_from(vec!["test", "r", "ls"]).unwrap();
        assert!(matches!(cli.command, Commands::ReservationList(_)));
    }

    #[test]
    fn test_parse_reservation_show() {
        let cli = Cli::try_parse_from(vec!["test", "reservation", "show", "res"]).unwrap();
        match cli.command {
            Commands::ReservationShow(cmd) => assert_eq!(cmd.id, ReservationId::from("res")),
            _ => panic!("Expected ReservationShow command"),
        }
    }

    #[test]
    fn test_parse_reservation_edit() {
        let cli = Cli::try_parse_from(vec!["test", "reservation", "edit", "res"]).unwrap();
        assert!(matches!(cli.command, Commands::ReservationEdit(_)));
    }

    #[test]
    fn test_parse_allocatable_list() {
        let args = vec!["test", "allocatable", "list", "--category", "room"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::AllocatableList(cmd) => {
                assert_eq!(cmd.category.as_deref(), Some("room"));
                assert_eq!(cmd.reservation, None);
            }
            _ => panic!("Expected AllocatableList command"),
        }
    }

    #[test]
    fn test_parse_book() {
        let cli = Cli::try_parse_from(vec!["test", "book", "res"]).unwrap();
        match cli.command {
            Commands::Book(cmd) => {
                assert_eq!(cmd.reservation, ReservationId::from("res"));
                assert_eq!(cmd.category, None);
            }
            _ => panic!("Expected Book command"),
        }
    }

    #[test]
    fn test_parse_assign_without_appointments() {
        let cli = Cli::try_parse_from(vec!["test", "assign", "res", "lab"]).unwrap();
        match cli.command {
            Commands::Assign(cmd) => {
                assert_eq!(cmd.allocatable, AllocatableId::from("lab"));
                assert!(cmd.appointments.is_empty());
            }
            _ => panic!("Expected Assign command"),
        }
    }

    #[test]
    fn test_parse_assign_with_appointments() {
        let cli = Cli::try_parse_from(vec!["test", "assign", "res", "lab", "A"]).unwrap();
        match cli.command {
            Commands::Assign(cmd) => {
                assert_eq!(cmd.appointments, vec![AppointmentId::from("A")]);
            }
            _ => panic!("Expected Assign command"),
        }
    }

    #[test]
    fn test_parse_unbook() {
        let cli = Cli::try_parse_from(vec!["test", "unbook", "res", "lab"]).unwrap();
        match cli.command {
            Commands::Unbook(cmd) => {
                assert_eq!(cmd.reservation, ReservationId::from("res"));
                assert_eq!(cmd.allocatable, AllocatableId::from("lab"));
            }
            _ => panic!("Expected Unbook command"),
        }
    }

    #[test]
    fn test_parse_unbook_requires_allocatable() {
        assert!(Cli::try_parse_from(vec!["test", "unbook", "res"]).is_err());
    }
}
