//! Handler for the `bets` command.

use serde_json::json;

use crate::adapter::inbound::cli::command::BetsArgs;
use crate::adapter::inbound::cli::{output, render};
use crate::application::wager::service::WagerService;
use crate::domain::id::{PollId, UserId};
use crate::error::Result;
use crate::port::outbound::store::WagerStore;

/// Execute the bets command.
pub async fn execute<S: WagerStore>(service: &WagerService<S>, args: &BetsArgs) -> Result<()> {
    let bets = match (&args.poll, &args.user) {
        (Some(poll), _) => service.bets_for_poll(&PollId::new(poll.as_str())).await?,
        (None, Some(user)) => service.bets_for_user(&UserId::new(user.as_str())).await?,
        (None, None) => Vec::new(),
    };

    if output::is_json() {
        let bets: Vec<_> = bets.iter().map(render::bet_json).collect();
        output::json_output(json!({
            "command": "bets",
            "bets": bets,
        }));
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }

    if bets.is_empty() {
        output::note("No bets.");
        return Ok(());
    }
    output::lines(&render::bet_table(&bets));
    Ok(())
}
