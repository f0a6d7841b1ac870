//! Story Replay: deploy a collection from RON and replay a script of actions.
//!
//! Usage: story_replay --deployment <file.ron> --script <file.ron> [--verbose]
//!
//! Every published story is printed to stdout as one JSON line. Rejected
//! actions are reported on stderr and do not stop the replay.

use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use story_ledger::core::collection::StoryCollection;
use story_ledger::core::script::{load_script, replay, Outcome};

#[derive(Parser)]
#[command(name = "story_replay")]
#[command(about = "Replay mint, transfer and story actions against a collection", long_about = None)]
struct Cli {
    /// Deployment config (creator, story_enabled, name, symbol)
    #[arg(short, long)]
    deployment: PathBuf,

    /// Script of actions to replay
    #[arg(short, long)]
    script: PathBuf,

    /// Override the deployment's story_enabled flag
    #[arg(long)]
    story_enabled: Option<bool>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(io::stderr)
        .init();

    let mut builder = StoryCollection::builder().config_file(&cli.deployment);
    if let Some(enabled) = cli.story_enabled {
        builder = builder.story_enabled(enabled);
    }
    let mut collection = match builder.build() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("ERROR: Failed to deploy from {}: {}", cli.deployment.display(), e);
            process::exit(1);
        }
    };

    let actions = match load_script(&cli.script) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("ERROR: Failed to load script {}: {}", cli.script.display(), e);
            process::exit(1);
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut rejected = 0usize;

    for (i, (action, result)) in actions.iter().zip(replay(&mut collection, &actions)).enumerate() {
        match result {
            Ok(Outcome::Published(event)) => {
                if let Err(e) = serde_json::to_writer(&mut out, &event).and_then(|_| {
                    out.write_all(b"\n").map_err(serde_json::Error::io)
                }) {
                    eprintln!("ERROR: Failed to write event: {}", e);
                    process::exit(1);
                }
            }
            Ok(_) => {}
            Err(e) => {
                rejected += 1;
                eprintln!("REJECTED #{}: {:?}: {}", i + 1, action, e);
            }
        }
    }

    eprintln!(
        "\nSummary: {} actions, {} stories published, {} rejected",
        actions.len(),
        collection.events().len(),
        rejected
    );
}
