use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use rps_logic::{RuleSet, StatsStore};
use tracing::info;

use rps_arena::{prompt_player_name, run, ArenaConfig, Args, Console, Session};

fn main() -> Result<()> {
    let args = Args::parse();
    let config = ArenaConfig::from_args(args).context("invalid configuration")?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_writer(io::stderr)
        .init();

    for ruleset in RuleSet::ALL {
        ruleset
            .validate()
            .with_context(|| format!("rule table self-check failed for {}", ruleset))?;
    }

    let stats = StatsStore::load(&config.stats_path);
    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());

    console.say("Welcome to Advanced Rock-Paper-Scissors!")?;
    let player_name = prompt_player_name(&config, &mut console)?;
    info!(player = %player_name, stats = %config.stats_path.display(), "session started");

    let mut session = Session::new(config, stats, player_name);
    run(&mut session, &mut console)?;
    Ok(())
}
