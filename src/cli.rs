use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::DEFAULT_CONFIG_FILE;

/// Daily ration planner: recommends products and fits them into three meals.
#[derive(Parser, Debug)]
#[command(name = "daily_ration")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the TOML planner config.
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

/// Which profile to use and where to find it.
#[derive(Args, Debug, Clone)]
pub struct ProfileArgs {
    /// Path to the profiles JSON file.
    #[arg(short, long, default_value = "profiles.json")]
    pub profiles: PathBuf,

    /// Id of the user to plan for.
    #[arg(short, long)]
    pub user: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a daily ration (breakfast, lunch, dinner) for a user.
    Plan {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Candidate catalog (JSON or CSV).
        #[arg(long, default_value = "catalog.json")]
        catalog: PathBuf,

        /// Print the plan as JSON instead of a table.
        #[arg(long)]
        json: bool,

        /// Save the plan as JSON.
        #[arg(long)]
        out: Option<PathBuf>,

        /// Save cart lines (product id, grams) as CSV.
        #[arg(long)]
        cart: Option<PathBuf>,
    },

    /// List the top recommended products for a user.
    Recommend {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Candidate catalog (JSON or CSV).
        #[arg(long, default_value = "catalog.json")]
        catalog: PathBuf,

        /// Number of products to list (defaults to the configured limit).
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show daily and per-meal nutrition targets for a user.
    Targets {
        #[command(flatten)]
        profile: ProfileArgs,
    },

    /// Create or update a profile interactively.
    Profile {
        /// Path to the profiles JSON file.
        #[arg(short, long, default_value = "profiles.json")]
        profiles: PathBuf,

        /// Catalog whose restriction tags are offered as suggestions.
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Generate a synthetic catalog for trying the planner.
    Synth {
        /// Number of products.
        #[arg(long, default_value = "200")]
        count: usize,

        /// Random seed for reproducibility.
        #[arg(long, default_value = "123")]
        seed: u64,

        /// Output file (JSON or CSV by extension).
        #[arg(long, default_value = "catalog.json")]
        out: PathBuf,
    },
}
