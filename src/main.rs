use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tracing_subscriber::EnvFilter;

use evalpad::banner::{BannerInfo, print_banner};
use evalpad::commands::{CommandRegistry, CommandResult, SessionInfo, StateChange};
use evalpad::config::{Config, reset_server, resolve_server, save_server};
use evalpad::consts::{SERVER_ENV, default_db_path};
use evalpad::evaluator::http::{HttpEvaluator, endpoint_url};
use evalpad::output::Terminal;
use evalpad::widget::Widget;

#[derive(Parser)]
#[command(name = "evalpad", version, about = "Type an expression, get an answer.")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Evaluation server base URL (the endpoint path is fixed)
    #[arg(short, long, env = SERVER_ENV)]
    server: Option<String>,

    /// SQLite database path for saved settings
    #[arg(short, long)]
    db: Option<PathBuf>,

    /// HTTP timeout in seconds (default: none)
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Evaluate a single expression and exit (non-interactive)
    #[arg(short, long)]
    run: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Show the default server, save a new one, or `reset` to forget it
    Server {
        /// Server base URL to save, or `reset`
        url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let db_path = match cli.db {
        Some(path) => path,
        None => default_db_path()?,
    };

    if let Some(Command::Server { url }) = &cli.command {
        return handle_server(&db_path, cli.server.as_deref(), url.as_deref());
    }

    let config = Config::open(&db_path)?;
    let mut server = resolve_server(cli.server.as_deref(), &config)?;
    let timeout = cli.timeout.map(Duration::from_secs);
    let mut widget = build_widget(&server, timeout)?;

    // Single expression mode
    if let Some(expr) = cli.run {
        widget.submit(&expr).await;
        return Ok(());
    }

    let endpoint = endpoint_url(&server)?;
    print_banner(&BannerInfo {
        server: &server,
        endpoint: endpoint.as_str(),
        config: &db_path,
    });

    let commands = CommandRegistry::new();
    let mut in_flight: Vec<JoinHandle<()>> = Vec::new();

    // REPL — async stdin so Ctrl+C is caught at the prompt too
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("evalpad> ");
        io::stdout().flush()?;

        let line = tokio::select! {
            result = lines.next_line() => {
                match result {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        // Ctrl+D (EOF)
                        println!();
                        break;
                    }
                    Err(e) => {
                        eprintln!("input error: {}", e);
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        };

        let info = SessionInfo {
            server: &server,
            db_path: &db_path,
        };
        match commands.dispatch(&line, &info).await {
            CommandResult::NotACommand => {}
            CommandResult::Handled => continue,
            CommandResult::StateChanged(StateChange::Server(new_server)) => {
                match build_widget(&new_server, timeout) {
                    Ok(w) => {
                        widget = w;
                        server = new_server;
                    }
                    Err(e) => eprintln!("  ✗ {e:#}"),
                }
                continue;
            }
            CommandResult::Quit => break,
        }

        // Submitting never waits on earlier submissions.
        in_flight.retain(|h| !h.is_finished());
        in_flight.push(widget.trigger(line));
    }

    drain(in_flight).await;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn build_widget(server: &str, timeout: Option<Duration>) -> anyhow::Result<Widget> {
    let evaluator = Arc::new(HttpEvaluator::new(server, timeout)?);
    Ok(Widget::new(evaluator, Arc::new(Terminal)))
}

/// Wait for outstanding submissions. A Ctrl+C abandons them.
async fn drain(in_flight: Vec<JoinHandle<()>>) {
    let pending: Vec<_> = in_flight.into_iter().filter(|h| !h.is_finished()).collect();
    if pending.is_empty() {
        return;
    }
    eprintln!("waiting for {} pending submission(s)...", pending.len());

    let aborts: Vec<_> = pending.iter().map(|h| h.abort_handle()).collect();
    tokio::select! {
        _ = async {
            for handle in pending {
                let _ = handle.await;
            }
        } => {}
        _ = tokio::signal::ctrl_c() => {
            for abort in aborts {
                abort.abort();
            }
            println!("\ninterrupted");
        }
    }
}

fn handle_server(db_path: &Path, explicit: Option<&str>, url: Option<&str>) -> anyhow::Result<()> {
    match url {
        Some("reset") => {
            let server = reset_server(db_path)?;
            println!("✓ saved server cleared, default is {server}");
        }
        Some(url) => {
            let server = save_server(db_path, url)?;
            println!("✓ default server set to {server}");
            println!("  saved to {}", db_path.display());
        }
        None => {
            let config = Config::open(db_path)?;
            println!("{}", resolve_server(explicit, &config)?);
        }
    }
    Ok(())
}
