//! Handler for the `bet` command.

use serde_json::json;

use crate::adapter::inbound::cli::command::BetArgs;
use crate::adapter::inbound::cli::{output, render};
use crate::application::wager::service::WagerService;
use crate::domain::id::{PollId, UserId};
use crate::error::Result;
use crate::port::outbound::store::WagerStore;

/// Execute the bet command.
pub async fn execute<S: WagerStore>(service: &WagerService<S>, args: &BetArgs) -> Result<()> {
    let user = UserId::new(args.user.as_str());
    let poll_id = PollId::new(args.poll.as_str());
    let bet = service
        .place_bet(&user, &poll_id, args.amount, args.choice.into())
        .await?;
    let remaining = service.balance(&user).await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "bet",
            "bet": render::bet_json(&bet),
            "balance": remaining,
        }));
        return Ok(());
    }

    output::success(&format!(
        "{} staked {} on {}",
        user,
        bet.amount(),
        bet.choice()
    ));
    output::field("Bet", output::muted(bet.id()));
    output::field("Balance", remaining);
    Ok(())
}
