//! Handlers for `resolve` and `preview`.

use serde_json::json;

use crate::adapter::inbound::cli::command::{PreviewArgs, ResolveArgs};
use crate::adapter::inbound::cli::{output, render};
use crate::application::wager::service::WagerService;
use crate::domain::id::{PollId, UserId};
use crate::error::Result;
use crate::port::outbound::store::WagerStore;

/// Execute the resolve command.
pub async fn execute<S: WagerStore>(service: &WagerService<S>, args: &ResolveArgs) -> Result<()> {
    let actor = UserId::new(args.user.as_str());
    let poll_id = PollId::new(args.poll.as_str());
    let settlement = service
        .resolve_poll(&actor, &poll_id, args.winner.into())
        .await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "resolve",
            "poll": render::poll_json(&settlement.poll),
            "payout": render::plan_json(&settlement.plan),
        }));
        return Ok(());
    }

    output::success(&format!("Poll resolved: {}", settlement.poll.status()));
    render::print_plan(&settlement.poll, &settlement.plan);
    Ok(())
}

/// Execute the preview command.
pub async fn execute_preview<S: WagerStore>(
    service: &WagerService<S>,
    args: &PreviewArgs,
) -> Result<()> {
    let poll_id = PollId::new(args.poll.as_str());
    let poll = service.poll(&poll_id).await?;
    let plan = service.preview_payout(&poll_id, args.winner.into()).await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "preview",
            "poll": render::poll_json(&poll),
            "payout": render::plan_json(&plan),
        }));
        return Ok(());
    }

    output::note("Preview only; nothing has been paid.");
    render::print_plan(&poll, &plan);
    Ok(())
}
