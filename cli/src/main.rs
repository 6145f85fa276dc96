//! sealindex CLI — fetch and watch SealEncrypt activity from the terminal.
//!
//! Usage:
//! ```bash
//! # One aggregate fetch, print per-collection counts
//! sealindex fetch --endpoint https://indexer.example.com/v1/graphql
//!
//! # Poll every 20 s and print a summary per refresh (Ctrl-C to stop)
//! sealindex watch --endpoint https://indexer.example.com/v1/graphql
//! ```

use std::env;
use std::process;

use sealindex_core::event::EventKind;
use sealindex_query::{AggregateClient, PollerBuilder, PollerState, DEFAULT_POLL_INTERVAL_MS};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "fetch" => cmd_fetch(&args[2..]).await,
        "watch" => cmd_watch(&args[2..]).await,
        "info" => {
            cmd_info();
            Ok(())
        }
        "version" | "--version" | "-V" => {
            println!("sealindex {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn print_usage() {
    println!("sealindex {}", env!("CARGO_PKG_VERSION"));
    println!("Fetch and watch SealEncrypt contract activity\n");
    println!("USAGE:");
    println!("    sealindex <COMMAND>\n");
    println!("COMMANDS:");
    println!("    fetch    One aggregate fetch, print per-collection counts");
    println!("    watch    Poll the endpoint and print a summary per refresh");
    println!("    info     Show collection names and defaults");
    println!("    version  Print version");
    println!("    help     Print this help\n");
    println!("FLAGS:");
    println!("    --endpoint <URL>     Aggregation endpoint  [required for fetch/watch]");
    println!("    --interval-ms <N>    Poll interval for watch  [default: 20000]");
    println!("    --json               Print the full snapshot as JSON (fetch only)");
}

async fn cmd_fetch(args: &[String]) -> anyhow::Result<()> {
    let endpoint = parse_flag(args, "--endpoint").ok_or_else(|| anyhow::anyhow!("--endpoint is required"))?;
    let client = AggregateClient::default_for(endpoint.as_str());

    let snapshot = client.fetch_all().await?;

    if args.iter().any(|a| a == "--json") {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    for (name, count) in snapshot.counts() {
        println!("{name:<36} {count}");
    }
    println!("{:<36} {}", "total", snapshot.total_rows());
    Ok(())
}

async fn cmd_watch(args: &[String]) -> anyhow::Result<()> {
    let endpoint = parse_flag(args, "--endpoint").ok_or_else(|| anyhow::anyhow!("--endpoint is required"))?;
    let interval_ms = match parse_flag(args, "--interval-ms") {
        Some(raw) => raw.parse::<u64>()?,
        None => DEFAULT_POLL_INTERVAL_MS,
    };

    let handle = PollerBuilder::new(endpoint.as_str())
        .poll_interval_ms(interval_ms)
        .spawn();
    let mut rx = handle.subscribe();

    println!("Watching {endpoint} every {interval_ms} ms (Ctrl-C to stop)");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = rx.borrow_and_update().clone();
                print_state(&state);
            }
        }
    }

    handle.shutdown().await;
    println!("stopped");
    Ok(())
}

fn print_state(state: &PollerState) {
    let s = &state.snapshot;
    println!(
        "[poll {}] documents={} shares={} revocations={} admins=+{}/-{} usernames={}/{}",
        state.polls,
        s.document_added.len(),
        s.share_access.len(),
        s.access_revoked.len(),
        s.admin_added.len(),
        s.admin_removed.len(),
        s.username_created.len(),
        s.username_updated.len(),
    );
    if let Some(err) = &state.last_error {
        println!("  ! fetch failed, showing last good snapshot: {err}");
    }
}

fn cmd_info() {
    println!("SealIndex v{}", env!("CARGO_PKG_VERSION"));
    println!("  Default poll interval: {DEFAULT_POLL_INTERVAL_MS} ms");
    println!("  Storage backends: memory, SQLite (feature: sqlite)");
    println!("  Collections:");
    for kind in EventKind::ALL {
        println!("    {}", kind.entity_type());
    }
}

fn parse_flag(args: &[String], flag: &str) -> Option<String> {
    let pos = args.iter().position(|a| a == flag)?;
    args.get(pos + 1).cloned()
}
