//! Core CLI definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nwgear")]
#[command(about = "New World gear build cost calculator", long_about = None)]
pub struct Cli {
    /// Log debug output (same as RUST_LOG=nwgear=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

/// Data files and price source shared by most commands.
///
/// Anything left unset falls back to the configuration file, then to the
/// files under `share/`.
#[derive(Args, Debug, Clone, Default)]
pub struct DataArgs {
    /// Recipe file (`Recipe: <name>` blocks)
    #[arg(long, env = "NWGEAR_RECIPES")]
    pub recipes: Option<PathBuf>,

    /// Perk database JSON with craft-mod items
    #[arg(long, env = "NWGEAR_CRAFT_MODS")]
    pub craft_mods: Option<PathBuf>,

    /// Price file (flat or per-server JSON)
    #[arg(long, env = "NWGEAR_PRICES")]
    pub prices: Option<PathBuf>,

    /// Price service base URL; `<url>/<server>` must return a flat price map
    #[arg(long, env = "NWGEAR_PRICE_URL")]
    pub price_url: Option<String>,

    /// Game server whose market prices are used
    #[arg(short, long, env = "NWGEAR_SERVER")]
    pub server: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze one build page (rendered JSON node tree)
    #[command(visible_alias = "a")]
    Analyze {
        /// Path to the rendered build JSON
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Override an item's gear type (e.g. "Gorgonite Hat=Named")
        #[arg(short, long = "gear-type", value_name = "NAME=TYPE")]
        gear_types: Vec<String>,

        #[command(flatten)]
        data: DataArgs,
    },

    /// Analyze many builds (files or build URLs) and combine their totals
    #[command(visible_alias = "b")]
    Batch {
        /// Build JSON files or build page URLs
        #[arg(required = true)]
        sources: Vec<String>,

        /// Render service URL used for build page URLs
        #[arg(long, env = "NWGEAR_RENDER_URL")]
        render_url: Option<String>,

        /// Builds analyzed at once (overrides the configured value)
        #[arg(short = 'j', long)]
        jobs: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,

        #[command(flatten)]
        data: DataArgs,
    },

    /// List the items found in a build page without costing them
    #[command(visible_alias = "i")]
    Items {
        /// Path to the rendered build JSON
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Resolve an item name to its recipe materials
    #[command(visible_alias = "r")]
    Recipe {
        /// Item name as shown in a build
        name: String,

        #[command(flatten)]
        data: DataArgs,
    },

    /// Look up the craft-mod item for a perk
    #[command(visible_alias = "m")]
    CraftMod {
        /// Perk name
        perk: String,

        #[command(flatten)]
        data: DataArgs,
    },

    /// Show the price table for a server
    #[command(visible_alias = "p")]
    Prices {
        /// Only show materials containing this text
        #[arg(long)]
        filter: Option<String>,

        #[command(flatten)]
        data: DataArgs,
    },

    /// Configure default settings
    #[command(visible_alias = "c")]
    Configure {
        /// Set default game server
        #[arg(long)]
        server: Option<String>,

        /// Set default recipe file
        #[arg(long)]
        recipes: Option<PathBuf>,

        /// Set default perk database
        #[arg(long)]
        craft_mods: Option<PathBuf>,

        /// Set default price file
        #[arg(long)]
        prices: Option<PathBuf>,

        /// Set default price service URL
        #[arg(long)]
        price_url: Option<String>,

        /// Set default render service URL
        #[arg(long)]
        render_url: Option<String>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}
