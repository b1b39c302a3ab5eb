use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::thread;
use std::time::Instant;

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ringsnake::board::Board;
use ringsnake::config::Config;
use ringsnake::game::SnakeGame;
use ringsnake::lifecycle::{DeathReason, Lifecycle, Reveal, Status};
use ringsnake::tempo::Clock;
use ringsnake::term::{gather_input, TermManager};
use ringsnake::Result;

/// Snake in the terminal. Steer with WASD or the arrow keys, quit with x.
#[derive(Parser, Debug)]
#[command(name = "ringsnake", version)]
struct Args {
    /// Board width, walls included
    #[arg(long)]
    width: Option<usize>,

    /// Board height, walls included
    #[arg(long)]
    height: Option<usize>,

    /// Starting speed in ticks per second
    #[arg(long)]
    tps: Option<f64>,

    /// Speed added per food eaten
    #[arg(long)]
    speedup: Option<f64>,

    /// Initial snake length
    #[arg(long)]
    length: Option<usize>,

    /// Key presses buffered between ticks
    #[arg(long)]
    queue: Option<usize>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Show the diagnostics panel under the board
    #[arg(long)]
    debug: bool,

    /// Write logs to this file
    #[arg(long)]
    log: Option<PathBuf>,
}

impl Args {
    fn config(&self) -> Config {
        let defaults = Config::default();
        Config {
            width: self.width.unwrap_or(defaults.width),
            height: self.height.unwrap_or(defaults.height),
            base_ticks_per_second: self.tps.unwrap_or(defaults.base_ticks_per_second),
            tempo_increment_per_food: self.speedup.unwrap_or(defaults.tempo_increment_per_food),
            initial_snake_length: self.length.unwrap_or(defaults.initial_snake_length),
            input_queue_capacity: self.queue.unwrap_or(defaults.input_queue_capacity),
        }
    }
}

/// Numbers shown in the diagnostics panel.
#[derive(Clone, Copy)]
struct Stats {
    ticks: u64,
    tps: f64,
    reveal_progress: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.config();
    config.validate()?;

    // The terminal belongs to the board, so logs only go to a file.
    if let Some(path) = &args.log {
        init_tracing(path)?;
    }

    let rng = match args.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let lifecycle = Lifecycle::new(config.input_queue_capacity);
    let mut game = SnakeGame::new(&config, lifecycle, rng)?;

    let mut term = TermManager::new();
    term.setup()?;
    let result = play(&mut term, &mut game, args.debug);
    term.restore()?;
    result
}

fn init_tracing(path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ringsnake=debug"));
    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
    {
        eprintln!("logging disabled, could not install subscriber: {}", err);
    }
    Ok(())
}

fn play(term: &mut TermManager, game: &mut SnakeGame<ChaCha8Rng>, debug: bool) -> Result<()> {
    let input = {
        let lifecycle = game.lifecycle().clone();
        thread::spawn(move || gather_input(lifecycle))
    };

    let mut clock = Clock::new(Instant::now());
    draw(term, game.board(), &stats(game, 0), None, debug)?;

    let status = game.run(&mut clock, |game| {
        draw(term, game.board(), &stats(game, 0), None, debug)
    });

    // The reader sees the game is over within one poll interval.
    let input = match input.join() {
        Ok(res) => res,
        Err(_) => {
            warn!("input thread panicked");
            Ok(())
        }
    };
    let status = status?;
    input?;

    let reason = match status {
        Status::Dead(reason) => reason,
        Status::Running | Status::Stopped => {
            info!(ticks = game.ticks(), "exiting without a death");
            return Ok(());
        }
    };

    let base = stats(game, 0);
    let interval = game.tempo().reveal_interval();
    let mut reveal = Reveal::new(game.board());
    reveal.run(game.board_mut(), &mut clock, interval, |board, progress| {
        let stats = Stats { reveal_progress: progress, ..base };
        draw(term, board, &stats, Some(reason), debug)
    })?;

    term.read_key_blocking()?;
    Ok(())
}

fn stats(game: &SnakeGame<ChaCha8Rng>, reveal_progress: usize) -> Stats {
    Stats { ticks: game.ticks(), tps: game.tempo().ticks_per_second(), reveal_progress }
}

fn draw(
    term: &mut TermManager,
    board: &Board,
    stats: &Stats,
    death: Option<DeathReason>,
    debug: bool,
) -> Result<()> {
    term.draw_board(board)?;
    if let Some(reason) = death {
        term.draw_game_over(board, reason)?;
    }
    if debug {
        let row = board.height() as u16 + 5;
        term.draw_lines(row, &debug_lines(board, stats))?;
    }
    term.flush()
}

fn debug_lines(board: &Board, stats: &Stats) -> Vec<String> {
    let (x, y) = board.head();
    let recent: Vec<String> = (0..board.snake_length().min(8))
        .filter_map(|d| board.history(d))
        .map(|pos| pos.to_string())
        .collect();
    vec![
        format!(" head: ({}, {})", x, y),
        format!(" snake_length: {}", board.snake_length()),
        format!(" ticks: {}", stats.ticks),
        format!(" tps: {:.3}", stats.tps),
        format!(" reveal_progress: {}", stats.reveal_progress),
        format!(" history: {} recorded, newest [{}]", board.history_len(), recent.join(", ")),
    ]
}
