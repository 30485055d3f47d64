//! Dispatch of parsed command lines to handlers.

use std::io::IsTerminal;

use crate::adapter::inbound::cli::command::{
    Cli, ColorChoice, Commands, ConfigCommand, PollCommand,
};
use crate::adapter::inbound::cli::output::{self, OutputConfig};
use crate::adapter::inbound::cli::{audit, balance, bet, bets, config, poll, resolve};
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// Run one CLI invocation.
///
/// # Errors
/// Returns the first configuration, storage or domain error encountered.
pub async fn execute(cli: Cli) -> Result<()> {
    output::configure(OutputConfig::new(
        cli.json,
        cli.quiet,
        cli.verbose,
        color_enabled(&cli.color),
    ));

    if let Commands::Config(ConfigCommand::Validate) = cli.command {
        return config::execute_validate(&cli.config);
    }

    let config = effective_config(&cli)?;
    config.logging.init_with_level(log_level(&config, cli.verbose, cli.quiet));

    let service = match &cli.command {
        Commands::Config(ConfigCommand::Show) => {
            return config::execute_show(&cli.config, &config);
        }
        _ => bootstrap::build_service(&config)?,
    };

    match &cli.command {
        Commands::Balance(args) => balance::execute(&service, &args.user).await,
        Commands::Poll(PollCommand::Create(args)) => poll::execute_create(&service, args).await,
        Commands::Poll(PollCommand::List) => poll::execute_list(&service).await,
        Commands::Poll(PollCommand::Show(args)) => poll::execute_show(&service, &args.poll).await,
        Commands::Bet(args) => bet::execute(&service, args).await,
        Commands::Resolve(args) => resolve::execute(&service, args).await,
        Commands::Preview(args) => resolve::execute_preview(&service, args).await,
        Commands::Bets(args) => bets::execute(&service, args).await,
        Commands::Audit => audit::execute(&service).await,
        Commands::Config(_) => Ok(()),
    }
}

/// Config file (or defaults), then `WAGERBOOK_DATABASE`, then `--db`.
fn effective_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load_or_default(&cli.config)?;
    if let Some(db) = &cli.db {
        config.database = db.to_string_lossy().into_owned();
    }
    Ok(config)
}

fn log_level(config: &Config, verbose: u8, quiet: bool) -> &str {
    match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => &config.logging.level,
        (false, 1) => "debug",
        (false, _) => "trace",
    }
}

fn color_enabled(choice: &ColorChoice) -> bool {
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => {
            std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
        }
    }
}
