use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo};
use crate::evaluator::http::endpoint_url;

pub struct StatusCommand;

#[async_trait]
impl Command for StatusCommand {
    fn name(&self) -> &str {
        "/status"
    }

    fn description(&self) -> &str {
        "show server, endpoint, and config location"
    }

    async fn execute(&self, _args: &str, info: &SessionInfo<'_>) -> CommandResult {
        println!("  server    {}", info.server);
        match endpoint_url(info.server) {
            Ok(url) => println!("  endpoint  {url}"),
            Err(e) => println!("  endpoint  ✗ {e}"),
        }
        println!("  config    {}", info.db_path.display());
        CommandResult::Handled
    }
}
