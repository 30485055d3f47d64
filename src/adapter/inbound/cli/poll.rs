//! Handlers for the `poll` command group.

use serde_json::json;

use crate::adapter::inbound::cli::command::PollCreateArgs;
use crate::adapter::inbound::cli::{output, render};
use crate::application::wager::service::WagerService;
use crate::domain::id::{PollId, UserId};
use crate::error::Result;
use crate::port::outbound::store::WagerStore;

/// Execute `poll create`.
pub async fn execute_create<S: WagerStore>(
    service: &WagerService<S>,
    args: &PollCreateArgs,
) -> Result<()> {
    let creator = UserId::new(args.creator.as_str());
    let poll = service
        .create_poll(&creator, &args.title, &args.option_a, &args.option_b)
        .await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "poll.create",
            "poll": render::poll_json(&poll),
        }));
        return Ok(());
    }

    output::success("Poll created");
    render::print_poll(&poll);
    output::hint(&format!(
        "wagerbook bet <user> {} <amount> <a|b>",
        poll.id()
    ));
    Ok(())
}

/// Execute `poll list`.
pub async fn execute_list<S: WagerStore>(service: &WagerService<S>) -> Result<()> {
    let polls = service.polls().await?;

    if output::is_json() {
        let polls: Vec<_> = polls.iter().map(render::poll_json).collect();
        output::json_output(json!({
            "command": "poll.list",
            "polls": polls,
        }));
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }

    if polls.is_empty() {
        output::note("No polls yet.");
        return Ok(());
    }
    output::lines(&render::poll_table(&polls));
    Ok(())
}

/// Execute `poll show`.
pub async fn execute_show<S: WagerStore>(service: &WagerService<S>, poll: &str) -> Result<()> {
    let poll = service.poll(&PollId::new(poll)).await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "poll.show",
            "poll": render::poll_json(&poll),
        }));
        return Ok(());
    }

    render::print_poll(&poll);
    if let Some(resolved_at) = poll.resolved_at() {
        output::field("Resolved", resolved_at.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    Ok(())
}
