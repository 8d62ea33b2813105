//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use rankem_domain::Preference;

/// Rankem - Rank things by comparing them two at a time.
#[derive(Debug, Parser)]
#[command(name = "rankem")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Database file path (overrides the configured one)
    #[arg(short, long, global = true, env = "RANKEM_DATABASE")]
    pub database: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage ranks
    Rank(RankArgs),

    /// Manage the items of a rank
    Item(ItemArgs),

    /// Record how one item compares to another
    Prefer(PreferArgs),

    /// Compute scores for a rank and show it sorted
    Calculate(RankRef),

    /// Hide the scores of a rank until the next calculation
    Hide(RankRef),

    /// Enter interactive REPL mode
    Repl,
}

/// A rank reference: full id, unique id prefix or name.
#[derive(Debug, Clone, Parser)]
pub struct RankRef {
    /// Rank id, id prefix or name
    pub rank: String,
}

/// Arguments for rank management.
#[derive(Debug, Parser)]
pub struct RankArgs {
    #[command(subcommand)]
    pub action: RankAction,
}

/// Rank management actions.
#[derive(Debug, Subcommand)]
pub enum RankAction {
    /// Create a new empty rank
    Create {
        /// Rank name
        name: String,
    },

    /// List all ranks
    List,

    /// Show the items of a rank
    Show {
        /// Rank id, id prefix or name
        rank: String,
    },

    /// Delete a rank and its items
    Delete {
        /// Rank id, id prefix or name
        rank: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Arguments for item management.
#[derive(Debug, Parser)]
pub struct ItemArgs {
    #[command(subcommand)]
    pub action: ItemAction,
}

/// Item management actions.
#[derive(Debug, Subcommand)]
pub enum ItemAction {
    /// Add an item to a rank
    Add {
        /// Rank id, id prefix or name
        rank: String,
        /// Item name
        name: String,
    },

    /// Remove an item from a rank
    Remove {
        /// Rank id, id prefix or name
        rank: String,
        /// Item id, id prefix or name
        item: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show an item and how it compares to the rest of its rank
    Show {
        /// Rank id, id prefix or name
        rank: String,
        /// Item id, id prefix or name
        item: String,
    },
}

/// Arguments for the prefer command.
#[derive(Debug, Clone, Parser)]
pub struct PreferArgs {
    /// Rank id, id prefix or name
    pub rank: String,

    /// Item being judged
    pub item: String,

    /// Item it is compared against
    pub other: String,

    /// Judgment of `item` against `other`
    #[arg(value_enum)]
    pub preference: PreferenceArg,
}

/// Preference argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PreferenceArg {
    /// The item beats the other one
    Better,
    /// The item loses to the other one
    Worse,
    /// Clear any recorded judgment
    None,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<PreferenceArg> for Preference {
    fn from(preference: PreferenceArg) -> Self {
        match preference {
            PreferenceArg::Better => Preference::Better,
            PreferenceArg::Worse => Preference::Worse,
            PreferenceArg::None => Preference::None,
        }
    }
}

impl From<Preference> for PreferenceArg {
    fn from(preference: Preference) -> Self {
        match preference {
            Preference::Better => PreferenceArg::Better,
            Preference::Worse => PreferenceArg::Worse,
            Preference::None => PreferenceArg::None,
        }
    }
}
