//! Shared renderers for polls, bets and payout plans.

use serde_json::{json, Value};
use tabled::{settings::Style, Table, Tabled};

use crate::adapter::inbound::cli::output;
use crate::domain::{bet::Bet, payout::PayoutPlan, poll::Poll};

#[derive(Tabled)]
struct PollRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "A")]
    option_a: String,
    #[tabled(rename = "B")]
    option_b: String,
    #[tabled(rename = "Pool")]
    pool: i64,
    #[tabled(rename = "Status")]
    status: String,
}

#[derive(Tabled)]
struct BetRow {
    #[tabled(rename = "Bet")]
    id: String,
    #[tabled(rename = "User")]
    user: String,
    #[tabled(rename = "Poll")]
    poll: String,
    #[tabled(rename = "Side")]
    choice: String,
    #[tabled(rename = "Amount")]
    amount: i64,
    #[tabled(rename = "Placed")]
    placed_at: String,
}

pub fn poll_json(poll: &Poll) -> Value {
    json!({
        "id": poll.id(),
        "title": poll.title(),
        "option_a": poll.option_a(),
        "option_b": poll.option_b(),
        "creator_id": poll.creator_id(),
        "status": poll.status(),
        "total_points_a": poll.total_points_a(),
        "total_points_b": poll.total_points_b(),
        "total_pool": poll.total_pool(),
        "created_at": poll.created_at().to_rfc3339(),
        "resolved_at": poll.resolved_at().map(|t| t.to_rfc3339()),
    })
}

pub fn bet_json(bet: &Bet) -> Value {
    json!({
        "id": bet.id(),
        "user_id": bet.user_id(),
        "poll_id": bet.poll_id(),
        "amount": bet.amount(),
        "choice": bet.choice(),
        "placed_at": bet.placed_at().to_rfc3339(),
    })
}

pub fn plan_json(plan: &PayoutPlan) -> Value {
    let credits: serde_json::Map<String, Value> = plan
        .credits()
        .into_iter()
        .map(|(user, points)| (user.to_string(), json!(points)))
        .collect();
    json!({
        "poll_id": plan.poll_id(),
        "winner": plan.winner(),
        "total_pool": plan.total_pool(),
        "winning_total": plan.winning_total(),
        "distributed": plan.distributed(),
        "dust": plan.dust(),
        "payouts": plan.payouts(),
        "credits": credits,
    })
}

/// Render polls as a table.
pub fn poll_table(polls: &[Poll]) -> String {
    let rows = polls.iter().map(|poll| PollRow {
        id: poll.id().to_string(),
        title: poll.title().to_string(),
        option_a: format!("{} ({})", poll.option_a(), poll.total_points_a()),
        option_b: format!("{} ({})", poll.option_b(), poll.total_points_b()),
        pool: poll.total_pool(),
        status: poll.status().to_string(),
    });
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Render bets as a table.
pub fn bet_table(bets: &[Bet]) -> String {
    let rows = bets.iter().map(|bet| BetRow {
        id: bet.id().to_string(),
        user: bet.user_id().to_string(),
        poll: bet.poll_id().to_string(),
        choice: bet.choice().to_string(),
        amount: bet.amount(),
        placed_at: bet.placed_at().format("%Y-%m-%d %H:%M:%S").to_string(),
    });
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Print a poll's fields in human-readable form.
pub fn print_poll(poll: &Poll) {
    output::field("ID", output::highlight(poll.id()));
    output::field("Title", poll.title());
    output::field("Creator", poll.creator_id());
    output::field("Status", poll.status());
    output::field(
        "A",
        format!("{} ({} points)", poll.option_a(), poll.total_points_a()),
    );
    output::field(
        "B",
        format!("{} ({} points)", poll.option_b(), poll.total_points_b()),
    );
    output::field("Pool", poll.total_pool());
}

/// Print a payout plan in human-readable form.
pub fn print_plan(poll: &Poll, plan: &PayoutPlan) {
    output::field(
        "Winner",
        format!("{} ({})", plan.winner(), poll.label(plan.winner())),
    );
    output::field("Pool", plan.total_pool());
    output::field("Winning stake", plan.winning_total());
    output::field("Distributed", plan.distributed());
    if plan.dust() > 0 {
        output::field("Unpaid", output::muted(plan.dust()));
    }

    let credits = plan.credits();
    if credits.is_empty() {
        output::note("No winning bets; nothing is paid out.");
        return;
    }
    output::section("Credits");
    for (user, points) in credits {
        output::field(user.as_str(), output::positive(format!("+{points}")));
    }
}
