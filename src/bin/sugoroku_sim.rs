//! Headless Sugoroku driver.
//!
//! Plays one seeded game to completion by pressing the primary input whenever
//! the engine is idle, printing the log trail as it goes.
//!
//! ```text
//! sugoroku-sim --seed 7
//! RUST_LOG=sugoroku=debug sugoroku-sim --seed 7 --realtime
//! ```

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use sugoroku::{
    ActionOutcome, BgmTrack, Board, Cue, EngineConfig, GameRng, Importance, Player, Renderer,
    Sink, Snapshot, TurnEngine,
};
use tracing::{debug, info, trace, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "sugoroku-sim", about = "Play a seeded Sugoroku game headlessly")]
struct Args {
    /// RNG seed. Overrides the config file.
    #[arg(long)]
    seed: Option<u64>,

    /// JSON engine configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sleep through animation waits instead of skipping them.
    #[arg(long)]
    realtime: bool,

    /// Give up after this many scheduler steps.
    #[arg(long, default_value_t = 100_000)]
    max_steps: usize,
}

/// Prints the log trail to stdout.
#[derive(Debug, Default)]
struct ConsoleSink;

impl Sink for ConsoleSink {
    fn notify(&mut self, cue: Cue) {
        trace!(%cue, "cue");
    }

    fn log(&mut self, message: &str, importance: Importance) {
        match importance {
            Importance::Important => println!("★ {message}"),
            Importance::Normal => println!("  {message}"),
        }
    }

    fn change_bgm(&mut self, track: BgmTrack) {
        debug!(?track, "bgm");
    }
}

/// Prints a one-line board after every full redraw.
#[derive(Debug, Default)]
struct ConsoleRenderer;

impl Renderer for ConsoleRenderer {
    fn render_piece(&mut self, player: &Player) {
        trace!(player = %player.id, square = player.position, "piece");
    }

    fn render_board(&mut self, snapshot: &Snapshot) {
        if !snapshot.started {
            return;
        }
        let line: Vec<String> = snapshot
            .players
            .iter()
            .map(|p| format!("{}:{:>2}", p.avatar, p.position))
            .collect();
        println!("    [{}] turn {}", line.join(" "), snapshot.turn_number);
    }

    fn spin_roulette(&mut self, rotation: f64) {
        debug!(rotation, "roulette");
    }
}

fn load_config(args: &Args) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => EngineConfig::new(0),
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let rng = GameRng::new(config.seed);
    info!(seed = rng.seed(), realtime = args.realtime, "starting simulation");
    let mut engine = TurnEngine::with_parts(Board::standard(), config, rng, ConsoleSink, ConsoleRenderer);
    engine.start();

    let mut steps = 0;
    while !engine.session().ended {
        if steps >= args.max_steps {
            warn!(steps, "step limit reached before the game ended");
            return Ok(());
        }

        match engine.next_wait() {
            Some(wait) => {
                if args.realtime && wait > Duration::ZERO {
                    std::thread::sleep(wait);
                }
                engine.advance();
            }
            None => {
                if let ActionOutcome::Rejected(reason) = engine.press_primary() {
                    warn!(?reason, "primary input rejected while idle");
                    return Ok(());
                }
            }
        }
        steps += 1;
    }

    if let Some(report) = &engine.session().final_report {
        println!("{}", serde_json::to_string_pretty(report)?);
    }
    info!(steps, "simulation finished");
    Ok(())
}
