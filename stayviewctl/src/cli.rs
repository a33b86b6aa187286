use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

/// Stayview tooling: build outbound links, inspect site configuration and
/// replay interaction traces through the engines.
#[derive(Parser, Debug)]
#[command(name = "stayviewctl", version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Site config file (TOML or JSON). Overrides STAYVIEW_CONFIG_PATH and
    /// the default file search.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory searched for stayview.toml and .env
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Skip loading the .env file
    #[arg(long, global = true, default_value_t = false)]
    pub no_dotenv: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build outbound WhatsApp and Booking.com links
    #[command(subcommand)]
    Links(LinksCommand),

    /// Inspect the resolved site configuration
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Feed a JSON interaction trace through an engine and print the
    /// effects each step emits
    Replay(ReplayArgs),
}

#[derive(Subcommand, Debug)]
pub enum LinksCommand {
    /// wa.me chat link with a prefilled message
    Whatsapp {
        /// Number to chat with; defaults to the configured contact
        #[arg(long)]
        number: Option<String>,
        /// Prefilled text; defaults to the configured message
        #[arg(long)]
        message: Option<String>,
    },

    /// Booking.com availability link for a property
    Booking(BookingArgs),

    /// Display form of a phone number
    Phone {
        /// Raw number, e.g. +9607860882
        number: String,
    },
}

#[derive(Args, Debug)]
pub struct BookingArgs {
    /// Property slug from the site config
    #[arg(long, conflicts_with = "base")]
    pub property: Option<String>,

    /// Base booking URL to merge parameters into
    #[arg(long)]
    pub base: Option<String>,

    /// Check-in date (YYYY-MM-DD)
    #[arg(long)]
    pub checkin: Option<NaiveDate>,

    /// Check-out date (YYYY-MM-DD)
    #[arg(long, requires = "checkin")]
    pub checkout: Option<NaiveDate>,

    #[arg(long)]
    pub adults: Option<u32>,

    #[arg(long)]
    pub children: Option<u32>,

    #[arg(long)]
    pub rooms: Option<u32>,

    /// Child age; repeat once per child
    #[arg(long = "age")]
    pub ages: Vec<u32>,

    /// Fail on invalid input instead of falling back to the base URL
    #[arg(long, default_value_t = false)]
    pub strict: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the configuration after defaults, files and env overrides
    Show {
        #[arg(long, value_enum, default_value_t = Format::Toml)]
        format: Format,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Toml,
    Json,
}

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Trace file; see the README for the format
    pub trace: PathBuf,

    /// Emit compact JSON (one line)
    #[arg(long, default_value_t = false)]
    pub compact: bool,
}
