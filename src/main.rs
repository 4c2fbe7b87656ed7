//! Toguz: play Toguz Kumalak against a minimax engine.
//!
//! ## Usage
//!
//! - `toguz` - Play a game on the terminal
//! - `toguz play --depth 6` - Play against a shallower search
//! - `toguz autoplay --games 10 --seed 1` - Engine against a random opponent
//! - `toguz demo` - Show the engine's view of the opening

use std::io;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use toguz::autoplay::autoplay;
use toguz::board::{Board, Player};
use toguz::constants::{DEFAULT_DEPTH, K};
use toguz::driver::Driver;
use toguz::search::{Searcher, evaluate_moves};
use toguz::session::{HUMAN, MACHINE, Outcome, Session};

/// Toguz: a Toguz Kumalak minimax engine
#[derive(Parser)]
#[command(name = "toguz")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Print search diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the engine on the terminal
    Play {
        /// Search depth in plies
        #[arg(short, long, default_value_t = DEFAULT_DEPTH)]
        depth: usize,
    },
    /// Let the engine play a random opponent
    Autoplay {
        /// Search depth in plies
        #[arg(short, long, default_value_t = 4)]
        depth: usize,
        /// Number of games
        #[arg(short, long, default_value_t = 1)]
        games: usize,
        /// Seed for the random opponent (random if omitted)
        #[arg(short, long)]
        seed: Option<u64>,
        /// Let the random opponent move first
        #[arg(long)]
        opponent_first: bool,
    },
    /// Show the search on the opening position
    Demo {
        /// Search depth in plies
        #[arg(short, long, default_value_t = 4)]
        depth: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play { depth }) => run_play(depth, cli.verbose),
        None => run_play(DEFAULT_DEPTH, cli.verbose),
        Some(Commands::Autoplay {
            depth,
            games,
            seed,
            opponent_first,
        }) => run_autoplay(depth, games, seed, !opponent_first, cli.verbose),
        Some(Commands::Demo { depth }) => {
            run_demo(depth);
            Ok(())
        }
    }
}

fn run_play(depth: usize, verbose: bool) -> Result<()> {
    let stdin = io::stdin();
    let mut driver = Driver::new(Session::new(depth), stdin.lock(), io::stdout()).verbose(verbose);
    driver.run().context("game aborted")?;
    Ok(())
}

fn run_autoplay(
    depth: usize,
    games: usize,
    seed: Option<u64>,
    machine_first: bool,
    verbose: bool,
) -> Result<()> {
    let seed = seed.unwrap_or_else(|| fastrand::u64(..));
    let (mut wins, mut losses, mut draws) = (0, 0, 0);

    for game in 0..games {
        let game_seed = seed.wrapping_add(game as u64);
        let report = autoplay(depth, game_seed, machine_first, verbose)
            .with_context(|| format!("game {game} (seed {game_seed})"))?;
        match report.outcome {
            Outcome::Win(p) if p == MACHINE => wins += 1,
            Outcome::Win(_) => losses += 1,
            Outcome::Draw => draws += 1,
        }
        println!(
            "game {game} seed {game_seed}: {:?} after {} plies, stores {}-{}",
            report.outcome,
            report.plies,
            report.board.store(MACHINE),
            report.board.store(HUMAN)
        );
    }

    println!("engine: {wins} wins, {losses} losses, {draws} draws");
    Ok(())
}

fn run_demo(depth: usize) {
    println!("Toguz: Toguz Kumalak minimax engine\n");

    let board = Board::new();
    println!("{board}");

    println!("=== Root moves at depth {depth} ===");
    for eval in evaluate_moves(&board, depth, Player::One) {
        println!("pit {}: {}", eval.pit % K + 1, eval.without_tuzdek);
    }

    let mut searcher = Searcher::new();
    let result = searcher.best_move(&board, depth, Player::One);
    match result.best {
        Some(pit) => println!("Best move: {} (worst outcome: {})", pit + 1, result.value),
        None => println!("No move"),
    }
    println!("Searched {} nodes", searcher.nodes);
}
