//! Handler for the `audit` command.

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::application::wager::service::WagerService;
use crate::error::Result;
use crate::port::outbound::store::WagerStore;

/// Execute the audit command.
///
/// Reports drift but does not fail on it.
pub async fn execute<S: WagerStore>(service: &WagerService<S>) -> Result<()> {
    let polls = service.polls().await?.len();
    let drifts = service.audit().await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "audit",
            "polls_checked": polls,
            "drift": drifts,
        }));
        return Ok(());
    }

    if drifts.is_empty() {
        output::success(&format!("{polls} polls checked, totals match bets"));
        return Ok(());
    }

    for drift in &drifts {
        output::warning(&format!(
            "{}: stored A={} B={}, bets A={} B={}",
            drift.poll_id, drift.stored.a, drift.stored.b, drift.recomputed.a, drift.recomputed.b
        ));
    }
    Ok(())
}
