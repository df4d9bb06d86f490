//! delve: headless driver for the dungeon crawler
//!
//! Prints generated levels, lets the autopilot play a seeded game, and
//! keeps the hall of fame.

mod autopilot;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use dv_core::dungeon::generate_seeded;
use dv_core::{GameConfig, GameLoop, GameRng, Intent, MAP_HEIGHT, MAP_WIDTH, TurnOutcome};
use dv_save::{HallOfFame, ScoreEntry, save_game};

/// Turn-based dungeon crawler
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(author, version, about = "Delve - a headless dungeon crawl", long_about = None)]
struct Cli {
    /// Log engine diagnostics (overridden by RUST_LOG)
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print one generated level as ASCII
    Generate(LevelArgs),
    /// Let the autopilot play a game
    Play(PlayArgs),
    /// Show the hall of fame
    Scores {
        /// Score file (defaults to the user data directory)
        #[arg(long)]
        scores: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct LevelArgs {
    /// RNG seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Dungeon depth
    #[arg(short, long, default_value_t = 1)]
    depth: i32,

    /// Map width
    #[arg(long, default_value_t = MAP_WIDTH)]
    width: i32,

    /// Map height
    #[arg(long, default_value_t = MAP_HEIGHT)]
    height: i32,
}

#[derive(Args, Debug)]
struct PlayArgs {
    #[command(flatten)]
    level: LevelArgs,

    /// Player name
    #[arg(short = 'u', long = "name", default_value = "Rodney")]
    name: String,

    /// Stop after this many turns
    #[arg(short, long, default_value_t = 500)]
    turns: u64,

    /// Write the final state to this save file
    #[arg(long)]
    save: Option<PathBuf>,

    /// Score file (defaults to the user data directory)
    #[arg(long)]
    scores: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Generate(args) => generate(&args),
        Command::Play(args) => play(&args),
        Command::Scores { scores } => show_scores(scores),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn generate(args: &LevelArgs) -> Result<()> {
    let seed = args.seed.unwrap_or_else(|| GameRng::from_entropy().seed());
    let dungeon = generate_seeded(args.width, args.height, seed, args.depth);

    println!("seed {seed}, depth {}", dungeon.depth);
    print!("{}", dungeon.map.to_ascii());
    Ok(())
}

fn play(args: &PlayArgs) -> Result<()> {
    let config = GameConfig {
        seed: args.level.seed,
        dungeon_level: args.level.depth,
        player_name: args.name.clone(),
        width: Some(args.level.width),
        height: Some(args.level.height),
    };
    let mut game = GameLoop::from_config(&config);
    tracing::info!(seed = game.seed(), name = %args.name, "starting game");

    while !game.is_over() && game.state().turn < args.turns {
        let intent = autopilot::choose(game.state());
        if game.step(intent) == TurnOutcome::Rejected {
            tracing::debug!(?intent, "autopilot intent rejected, waiting");
            game.step(Intent::wait());
        }
        for msg in &game.state().messages {
            println!("[{:>5}] {msg}", game.state().turn);
        }
    }

    let state = game.state();
    println!(
        "\n{} reached level {} with {} gold after {} turns.",
        state.player.name, state.max_depth, state.player.gold, state.turn
    );

    if let Some(path) = &args.save {
        save_game(state, path).with_context(|| format!("saving to {}", path.display()))?;
        println!("Saved to {}.", path.display());
    }

    if state.dead {
        let path = scores_path(args.scores.clone())?;
        let mut hof = HallOfFame::load(&path)
            .with_context(|| format!("reading scores from {}", path.display()))?;
        let entry = ScoreEntry::from_state(state);
        println!("{}", entry.format_line());
        match hof.add(entry) {
            Some(rank) => println!("You made the hall of fame at rank {rank}!"),
            None => println!("You did not make the hall of fame."),
        }
        hof.save(&path)
            .with_context(|| format!("writing scores to {}", path.display()))?;
    }
    Ok(())
}

fn show_scores(scores: Option<PathBuf>) -> Result<()> {
    let path = scores_path(scores)?;
    let hof = HallOfFame::load(&path)
        .with_context(|| format!("reading scores from {}", path.display()))?;

    println!("\n=== Delve Hall of Fame ===\n");
    if hof.is_empty() {
        println!("No games recorded yet.");
        return Ok(());
    }
    println!("{:<4} {}", "Rank", "Score");
    println!("{:-<50}", "");
    for (i, entry) in hof.entries.iter().enumerate() {
        println!("{:<4} {}", i + 1, entry.format_line());
    }
    Ok(())
}

/// Explicit path, or `<data dir>/delve/scores.json`
fn scores_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    let mut path = dirs::data_dir().context("no user data directory")?;
    path.push("delve");
    path.push("scores.json");
    Ok(path)
}
