mod cli;
mod replay;

use std::io::Write;

use anyhow::{Context, anyhow};
use clap::Parser;
use stayview_config::{ConfigLoad, ConfigLoader};
use stayview_core::links::{BookingLink, format_phone};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{BookingArgs, Cli, Command, ConfigCommand, Format, GlobalArgs, LinksCommand, ReplayArgs};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout carries command output; logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,stayviewctl=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let output = match cli.command {
        Command::Links(links) => run_links(&cli.global, links)?,
        Command::Config(ConfigCommand::Show { format }) => show_config(&cli.global, format)?,
        Command::Replay(args) => run_replay(&cli.global, &args)?,
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{output}")?;
    Ok(())
}

fn load_config(global: &GlobalArgs) -> anyhow::Result<ConfigLoad> {
    let mut loader = ConfigLoader::new().with_root(&global.root);
    if global.no_dotenv {
        loader = loader.with_env_file(None);
    }
    if let Some(path) = &global.config {
        loader = loader.with_config_path(path);
    }
    let load = loader.load().context("failed to load site configuration")?;
    info!(source = %load.source, warnings = load.warnings.len(), "configuration ready");
    Ok(load)
}

fn run_links(global: &GlobalArgs, command: LinksCommand) -> anyhow::Result<String> {
    match command {
        LinksCommand::Phone { number } => Ok(format_phone(&number)),
        LinksCommand::Whatsapp { number, message } => {
            let contact = load_config(global)?.config.contact;
            let link = match number {
                Some(number) => stayview_core::links::WhatsAppLink::new(
                    &number,
                    message.unwrap_or(contact.default_message),
                )?,
                None => contact.whatsapp(message.as_deref())?,
            };
            Ok(link.url())
        }
        LinksCommand::Booking(args) => booking_link(global, args),
    }
}

fn booking_link(global: &GlobalArgs, args: BookingArgs) -> anyhow::Result<String> {
    let mut link = match (&args.base, &args.property) {
        (Some(base), _) => BookingLink::new(base.clone()),
        (None, property) => {
            let config = load_config(global)?.config;
            let slug = match property {
                Some(slug) => slug.as_str(),
                None => config
                    .properties
                    .first()
                    .map(|p| p.slug.as_str())
                    .ok_or_else(|| anyhow!("no properties configured; pass --base"))?,
            };
            config
                .property(slug)
                .ok_or_else(|| anyhow!("unknown property '{slug}'"))?
                .booking_link()
        }
    };

    if let Some(checkin) = args.checkin {
        link = link.stay(checkin, args.checkout.unwrap_or(checkin));
    }
    if let Some(adults) = args.adults {
        link = link.adults(adults);
    }
    if let Some(children) = args.children {
        link = link.children(children);
    }
    if let Some(rooms) = args.rooms {
        link = link.rooms(rooms);
    }
    if !args.ages.is_empty() {
        link = link.child_ages(args.ages);
    }

    if args.strict {
        Ok(link.build()?.to_string())
    } else {
        Ok(link.to_url_lossy())
    }
}

fn show_config(global: &GlobalArgs, format: Format) -> anyhow::Result<String> {
    let load = load_config(global)?;
    for warning in load.warnings.iter() {
        eprintln!("warning: {warning}");
    }
    eprintln!("# source: {}", load.source);
    match format {
        Format::Toml => toml::to_string_pretty(&load.config).context("failed to render TOML"),
        Format::Json => serde_json::to_string_pretty(&load.config).context("failed to render JSON"),
    }
}

fn run_replay(global: &GlobalArgs, args: &ReplayArgs) -> anyhow::Result<String> {
    let trace = replay::load(&args.trace)?;
    let config = load_config(global)?.config;
    let result = replay::run(trace, &config.carousel, &config.lightbox)?;
    info!(engine = result.engine, steps = result.steps.len(), "trace replayed");
    let rendered = if args.compact {
        serde_json::to_string(&result)?
    } else {
        serde_json::to_string_pretty(&result)?
    };
    Ok(rendered)
}
