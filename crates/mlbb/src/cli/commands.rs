//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};
use mlbb::Bracket;
use std::path::PathBuf;

/// MLBB - hero data cache and tournament registration for the MLBB bot
#[derive(Parser, Debug)]
#[command(name = "mlbb")]
#[command(about = "Hero data cache and tournament registration for the MLBB bot", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Load configuration from this file instead of the layered defaults
    #[arg(long, global = true, env = "MLBB_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Keep the hero cache refreshed until interrupted
    Serve,

    /// Look up a hero by name (exact, then fuzzy)
    Hero {
        /// Hero name; may contain spaces
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Show the hero ranking table
    Ranks {
        /// Rank bracket: all, epic, legend, mythic, honor, glory
        #[arg(long, default_value = "all")]
        rank: String,

        /// Window in days: 7 or 30
        #[arg(long, default_value_t = 7)]
        days: u32,

        /// Number of rows to display
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Show the heroes that counter a hero, or a whole enemy line-up
    Counter {
        /// Hero name; may contain spaces
        #[arg(num_args = 1.., required_unless_present = "enemy", conflicts_with = "enemy")]
        name: Vec<String>,

        /// Enemy heroes to counter together; quote names with spaces
        #[arg(long, num_args = 1..)]
        enemy: Vec<String>,

        /// Number of counters to display (default 3, or 5 with --enemy)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Rate the synergy of a team composition
    Synergy {
        /// Team members; quote names with spaces
        #[arg(required = true, num_args = 2..)]
        heroes: Vec<String>,
    },

    /// Show curated matchups and counter groups for a hero
    Matchup {
        /// Hero name; may contain spaces
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// List counter groups, or explain one
    Groups {
        /// Group key, e.g. anti-heal
        key: Option<String>,
    },

    /// Pick a random hero
    Pick,

    /// Run one refresh and report cache health
    Status,

    /// Run one refresh and fail if it does not install a snapshot
    Refresh,

    /// Sign up for a tournament bracket
    #[command(subcommand)]
    Register(RegisterCommands),

    /// Remove a tournament registration
    Withdraw {
        /// Bracket to withdraw from
        bracket: BracketArg,

        /// Chat identity of the submitter or, for duos, either member
        user_id: String,
    },

    /// List tournament registrations
    Registrations {
        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },
}

/// Registration subcommands
#[derive(Subcommand, Debug)]
pub enum RegisterCommands {
    /// Register a single player
    Solo {
        /// Chat identity of the player
        user_id: String,

        /// Display name
        #[arg(long)]
        name: String,

        /// In-game id
        #[arg(long)]
        game_id: String,

        /// Current rank
        #[arg(long)]
        rank: String,
    },

    /// Register a pair of players
    Duo {
        /// Chat identity of the submitter
        user_id: String,

        /// Chat identity of the partner
        partner_id: String,

        /// Submitter display name
        #[arg(long)]
        name: String,

        /// Partner display name
        #[arg(long)]
        partner_name: String,

        /// Submitter in-game id
        #[arg(long)]
        game_id: String,

        /// Partner in-game id
        #[arg(long)]
        partner_game_id: String,

        /// Team rank
        #[arg(long)]
        rank: String,
    },
}

/// Tournament bracket
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum BracketArg {
    /// Single-player bracket
    Solo,
    /// Two-player bracket
    Duo,
}

impl From<BracketArg> for Bracket {
    fn from(arg: BracketArg) -> Self {
        match arg {
            BracketArg::Solo => Bracket::Solo,
            BracketArg::Duo => Bracket::Duo,
        }
    }
}

/// Output format options
#[derive(ValueEnum, Clone, Debug)]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}
