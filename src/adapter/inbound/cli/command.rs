//! Command-line interface definitions.
//!
//! Defines the CLI structure for wagerbook using `clap`. Subcommands cover
//! balances, poll lifecycle, betting, payout previews and configuration.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::poll::Choice;
use crate::infrastructure::paths;

/// Points-based pari-mutuel polls: bet on A or B, winners split the pool
#[derive(Parser, Debug)]
#[command(name = "wagerbook")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to the configuration file
    #[arg(short, long, global = true, default_value_os_t = paths::default_config())]
    pub config: PathBuf,

    /// Path to the SQLite database (overrides config and WAGERBOOK_DATABASE)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Poll side as accepted on the command line (`a`/`b`, case-insensitive).
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ChoiceArg {
    A,
    B,
}

impl From<ChoiceArg> for Choice {
    fn from(arg: ChoiceArg) -> Self {
        match arg {
            ChoiceArg::A => Choice::A,
            ChoiceArg::B => Choice::B,
        }
    }
}

/// Top-level subcommands for the wagerbook CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a user's point balance (opens the account on first use)
    Balance(BalanceArgs),

    /// Create and inspect polls
    #[command(subcommand)]
    Poll(PollCommand),

    /// Stake points on one side of an active poll
    Bet(BetArgs),

    /// Resolve a poll and pay out the pool (creator only)
    Resolve(ResolveArgs),

    /// Show what resolving a poll would pay, without changing anything
    Preview(PreviewArgs),

    /// List bets for a poll or a user
    Bets(BetsArgs),

    /// Check stored poll totals against recorded bets
    Audit,

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `wagerbook poll`.
#[derive(Subcommand, Debug)]
pub enum PollCommand {
    /// Create a new active poll.
    Create(PollCreateArgs),
    /// List all polls in creation order.
    List,
    /// Show one poll with its pool breakdown.
    Show(PollShowArgs),
}

/// Subcommands for `wagerbook config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display the effective configuration with defaults applied.
    Show,
    /// Validate the configuration file for correctness.
    Validate,
}

#[derive(Parser, Debug)]
pub struct BalanceArgs {
    /// User identifier.
    pub user: String,
}

#[derive(Parser, Debug)]
pub struct PollCreateArgs {
    /// Creating user (the only one allowed to resolve).
    #[arg(long)]
    pub creator: String,
    /// Question text.
    pub title: String,
    /// Label for side A.
    pub option_a: String,
    /// Label for side B.
    pub option_b: String,
}

#[derive(Parser, Debug)]
pub struct PollShowArgs {
    /// Poll identifier.
    pub poll: String,
}

#[derive(Parser, Debug)]
pub struct BetArgs {
    /// Betting user.
    pub user: String,
    /// Poll identifier.
    pub poll: String,
    /// Points to stake.
    #[arg(allow_negative_numbers = true)]
    pub amount: i64,
    /// Side to back.
    #[arg(value_enum, ignore_case = true)]
    pub choice: ChoiceArg,
}

#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// Resolving user; must be the poll creator.
    pub user: String,
    /// Poll identifier.
    pub poll: String,
    /// Winning side.
    #[arg(value_enum, ignore_case = true)]
    pub winner: ChoiceArg,
}

#[derive(Parser, Debug)]
pub struct PreviewArgs {
    /// Poll identifier.
    pub poll: String,
    /// Hypothetical winning side.
    #[arg(value_enum, ignore_case = true)]
    pub winner: ChoiceArg,
}

#[derive(Parser, Debug)]
pub struct BetsArgs {
    /// List bets placed on this poll.
    #[arg(long, conflicts_with = "user", required_unless_present = "user")]
    pub poll: Option<String>,
    /// List bets placed by this user.
    #[arg(long)]
    pub user: Option<String>,
}
