use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo, StateChange};
use crate::config::{reset_server, save_server};

pub struct ServerCommand;

#[async_trait]
impl Command for ServerCommand {
    fn name(&self) -> &str {
        "/server"
    }

    fn description(&self) -> &str {
        "show the server, switch to and save a new one, or `reset` it"
    }

    async fn execute(&self, args: &str, info: &SessionInfo<'_>) -> CommandResult {
        if args.is_empty() {
            println!("  {}", info.server);
            return CommandResult::Handled;
        }

        if args == "reset" {
            return match reset_server(info.db_path) {
                Ok(server) => {
                    println!("  ✓ saved server cleared, using {server}");
                    CommandResult::StateChanged(StateChange::Server(server))
                }
                Err(e) => {
                    eprintln!("  ✗ {e:#}");
                    CommandResult::Handled
                }
            };
        }

        match save_server(info.db_path, args) {
            Ok(server) => {
                println!("  ✓ server changed to {server}");
                CommandResult::StateChanged(StateChange::Server(server))
            }
            Err(e) => {
                eprintln!("  ✗ {e:#}");
                CommandResult::Handled
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::test_info;
    use crate::config::{Config, SERVER_KEY};

    #[tokio::test]
    async fn no_args_shows_current() {
        assert!(matches!(
            ServerCommand.execute("", &test_info()).await,
            CommandResult::Handled
        ));
    }

    #[tokio::test]
    async fn invalid_url_is_handled_without_change() {
        assert!(matches!(
            ServerCommand.execute("nope", &test_info()).await,
            CommandResult::Handled
        ));
    }

    #[tokio::test]
    async fn valid_url_is_saved_and_reported() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("evalpad.db");
        let info = SessionInfo {
            server: "http://localhost:8000",
            db_path: &db,
        };

        match ServerCommand.execute("http://10.0.0.2:8000", &info).await {
            CommandResult::StateChanged(StateChange::Server(server)) => {
                assert_eq!(server, "http://10.0.0.2:8000");
            }
            _ => panic!("expected StateChanged"),
        }

        let config = Config::open(&db).unwrap();
        assert_eq!(
            config.get(SERVER_KEY).unwrap().unwrap(),
            "http://10.0.0.2:8000"
        );
    }

    #[tokio::test]
    async fn reset_clears_saved_server() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("evalpad.db");
        let info = SessionInfo {
            server: "http://10.0.0.2:8000",
            db_path: &db,
        };
        ServerCommand.execute("http://10.0.0.2:8000", &info).await;

        match ServerCommand.execute("reset", &info).await {
            CommandResult::StateChanged(StateChange::Server(server)) => {
                assert_eq!(server, crate::consts::DEFAULT_SERVER);
            }
            _ => panic!("expected StateChanged"),
        }
        assert!(Config::open(&db).unwrap().get(SERVER_KEY).unwrap().is_none());
    }
}
