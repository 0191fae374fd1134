//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the mabi CLI.

use clap::{Args, Parser, Subcommand};

/// mabi - search and filter Mabinogi auction listings
#[derive(Parser, Debug)]
#[command(name = "mabi")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Force JSON output
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Override API key (default: from config)
    #[arg(long, global = true, env = "MABI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search a category and filter the listings
    #[command(alias = "s")]
    Search {
        /// Auction category to search (e.g. "한손 검")
        category: String,

        /// Keyword to match against item names
        #[arg(short, long)]
        keyword: Option<String>,

        /// Limit results (default: 50)
        #[arg(long, default_value = "50")]
        limit: usize,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Show the filterable facets of search results
    #[command(alias = "f")]
    Facets {
        /// Auction category to search
        category: String,

        /// Keyword to match against item names
        #[arg(short, long)]
        keyword: Option<String>,

        /// Limit inspected listings (default: 10)
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// View and manage configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration (API key masked)
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (api_key, base_url)
        key: String,
        /// Value to set
        value: String,
    },
    /// Print the config file path
    Path,
}

/// Filter flags shared by search-style commands.
///
/// Each flag compiles to one filter descriptor; repeated flags that share
/// an option-type name replace each other rather than stack.
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Numeric range filter, "이름=MIN..MAX" (either bound optional; repeatable)
    #[arg(long = "range", value_name = "NAME=MIN..MAX", action = clap::ArgAction::Append)]
    pub ranges: Vec<String>,

    /// Exact-value filter, "이름=값" (repeatable)
    #[arg(long = "select", value_name = "NAME=VALUE", action = clap::ArgAction::Append)]
    pub selects: Vec<String>,

    /// Prefix enchant name query (substring match)
    #[arg(long)]
    pub enchant_prefix: Option<String>,

    /// Suffix enchant name query (substring match)
    #[arg(long)]
    pub enchant_suffix: Option<String>,

    /// Required reforge rank (exact)
    #[arg(long)]
    pub reforge_rank: Option<u32>,

    /// Required number of reforge lines (exact)
    #[arg(long)]
    pub reforge_lines: Option<usize>,

    /// Reforge option slot, "이름" or "이름:MIN..MAX" (up to 3)
    #[arg(long = "reforge-option", value_name = "NAME[:MIN..MAX]", action = clap::ArgAction::Append)]
    pub reforge_options: Vec<String>,

    /// Required erg grade (e.g. S)
    #[arg(long)]
    pub erg_grade: Option<String>,

    /// Minimum erg level
    #[arg(long)]
    pub erg_min: Option<u32>,

    /// Maximum erg level
    #[arg(long)]
    pub erg_max: Option<u32>,

    /// Required special modification type (e.g. S, R)
    #[arg(long, conflicts_with = "no_special")]
    pub special_type: Option<String>,

    /// Special modification level range, "MIN..MAX" or "TYPE:MIN..MAX"
    #[arg(long, value_name = "[TYPE:]MIN..MAX", conflicts_with = "no_special")]
    pub special_range: Option<String>,

    /// Only items without any special modification
    #[arg(long)]
    pub no_special: bool,

    /// Set effect slot, "이름" or "이름:MIN..MAX" (up to 3)
    #[arg(long = "set-effect", value_name = "NAME[:MIN..MAX]", action = clap::ArgAction::Append)]
    pub set_effects: Vec<String>,
}
