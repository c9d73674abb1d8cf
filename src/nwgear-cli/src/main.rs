mod cli;
mod commands;
mod config;
mod output;
mod sources;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::*;

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "nwgear=debug,nwgear_cli=debug"
    } else {
        "nwgear=info,nwgear_cli=info"
    };

    // Logs go to stderr so JSON/YAML on stdout stays parseable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Analyze {
            input,
            format,
            gear_types,
            data,
        } => {
            commands::analyze::handle(&input, format, &gear_types, &data)?;
        }

        Commands::Batch {
            sources,
            render_url,
            jobs,
            format,
            data,
        } => {
            commands::batch::handle(&sources, render_url, jobs, format, &data)?;
        }

        Commands::Items { input, format } => {
            commands::items::handle(&input, format)?;
        }

        Commands::Recipe { name, data } => {
            commands::recipe::handle(&name, &data)?;
        }

        Commands::CraftMod { perk, data } => {
            commands::craft_mod::handle(&perk, &data)?;
        }

        Commands::Prices { filter, data } => {
            commands::prices::handle(filter.as_deref(), &data)?;
        }

        Commands::Configure {
            server,
            recipes,
            craft_mods,
            prices,
            price_url,
            render_url,
            show,
        } => {
            let updates = commands::configure::Updates {
                server,
                recipes,
                craft_mods,
                prices,
                price_url,
                render_url,
            };
            commands::configure::handle(updates, show)?;
        }
    }

    Ok(())
}
