//! Handler for the `balance` command.

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::application::wager::service::WagerService;
use crate::domain::id::UserId;
use crate::error::Result;
use crate::port::outbound::store::WagerStore;

/// Execute the balance command.
pub async fn execute<S: WagerStore>(service: &WagerService<S>, user: &str) -> Result<()> {
    let user = UserId::new(user);
    let points = service.balance(&user).await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "balance",
            "user_id": user,
            "points": points,
        }));
        return Ok(());
    }

    output::field("User", &user);
    output::field("Balance", format!("{} points", output::highlight(points)));
    Ok(())
}
