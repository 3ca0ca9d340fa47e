use crate::ranking::{LawmakerField, PartyField, RankDirection};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "assemblyscore")]
#[command(about = "Performance scoring and ranking for National Assembly lawmakers and parties", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
    /// -v: Show run progress
    /// -vv: Show per-phase details
    /// -vvv: Show everything
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Plain output: no colors, ASCII table borders
    #[arg(long, global = true)]
    pub plain: bool,

    /// Config file (defaults to the nearest .assemblyscore.toml)
    #[arg(long, global = true, env = "ASSEMBLYSCORE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Performance store file (overrides [store] path in the config)
    #[arg(long, global = true, env = "ASSEMBLYSCORE_STORE")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Recompute every lawmaker and party score from a fact snapshot
    Recompute {
        /// JSON fact snapshot exported by the ingestion jobs
        #[arg(long)]
        facts: PathBuf,

        /// Weight overrides for this run (.toml or .json)
        #[arg(long)]
        weights: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },

    /// Rank stored lawmakers or parties by a numeric field
    Rank {
        #[command(subcommand)]
        target: RankTarget,
    },

    /// Rank the serving members of one party by total score
    PartyMembers {
        /// Party name as stored
        party: String,

        /// Ranking direction
        #[arg(long, value_enum, default_value = "desc")]
        order: RankDirection,

        /// Show only the top N rows
        #[arg(long)]
        limit: Option<usize>,

        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },

    /// Compare two lawmakers or two parties field by field
    Compare {
        #[command(subcommand)]
        target: CompareTarget,
    },

    /// Write a default .assemblyscore.toml in the current directory
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum RankTarget {
    Lawmakers {
        #[arg(long, value_enum, default_value = "total-score")]
        field: LawmakerField,

        /// Ranking direction (defaults to best-first for the field)
        #[arg(long, value_enum)]
        order: Option<RankDirection>,

        /// Include lawmakers who are no longer serving
        #[arg(long)]
        all: bool,

        #[arg(long)]
        limit: Option<usize>,

        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },
    Parties {
        #[arg(long, value_enum, default_value = "weighted-score")]
        field: PartyField,

        #[arg(long, value_enum)]
        order: Option<RankDirection>,

        #[arg(long)]
        limit: Option<usize>,

        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },
}

#[derive(Subcommand, Debug)]
pub enum CompareTarget {
    /// Compare two lawmakers by id
    Lawmakers {
        left: String,
        right: String,
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },
    /// Compare two parties by name
    Parties {
        left: String,
        right: String,
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputFormat {
    Json,
    Terminal,
}

/// Best-first direction unless the caller chose one.
pub fn default_direction(requested: Option<RankDirection>, lower_is_better: bool) -> RankDirection {
    requested.unwrap_or(if lower_is_better {
        RankDirection::Asc
    } else {
        RankDirection::Desc
    })
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
