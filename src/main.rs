//! goban: play Go from the terminal.
//!
//! ## Usage
//!
//! - `goban` - Start the text console with default settings
//! - `goban console --size 13 --names Ann,Bo,Cy --mode speed` - Console with options
//! - `goban demo --seed 7` - Play a random game and show the result

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use goban_engine::config::{ClockPolicy, GameConfig, GameMode, default_names};
use goban_engine::console::Console;
use goban_engine::constants::{
    BOARD_SIZES, DEFAULT_BOARD_SIZE, DEFAULT_TURN_TIME, MIN_PLAYERS, max_playout_turns,
};
use goban_engine::playout::random_playout;
use goban_engine::session::GameSession;
use goban_engine::territory::territory_size;

/// goban: a multiplayer Go engine
#[derive(Parser)]
#[command(name = "goban")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    console: ConsoleArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Play through the text console (default)
    Console(ConsoleArgs),
    /// Play a random game and print the result
    Demo(DemoArgs),
}

#[derive(Args)]
struct ConsoleArgs {
    /// Board size
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
    size: usize,

    /// Number of players, ignored when names are given
    #[arg(short = 'n', long, default_value_t = MIN_PLAYERS)]
    players: usize,

    /// Comma-separated player names
    #[arg(long, value_delimiter = ',')]
    names: Vec<String>,

    #[arg(long, value_enum, default_value_t = ModeArg::Normal)]
    mode: ModeArg,

    /// Seconds per turn in speed mode
    #[arg(long, default_value_t = DEFAULT_TURN_TIME)]
    turn_time: u32,

    #[arg(long, value_enum, default_value_t = PolicyArg::PerTurn)]
    clock_policy: PolicyArg,

    /// JSON game configuration; replaces the flags above
    #[arg(long)]
    config: Option<PathBuf>,

    /// Resume a saved game
    #[arg(long)]
    load: Option<PathBuf>,
}

#[derive(Args)]
struct DemoArgs {
    /// Random seed, for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
    size: usize,

    #[arg(short = 'n', long, default_value_t = MIN_PLAYERS)]
    players: usize,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Normal,
    Speed,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    /// The budget refills at the start of every turn
    PerTurn,
    /// One budget for the whole game
    Cumulative,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command.unwrap_or(Commands::Console(cli.console)) {
        Commands::Console(args) => run_console(args),
        Commands::Demo(args) => run_demo(args),
    }
}

fn game_config(args: &ConsoleArgs) -> Result<GameConfig> {
    if let Some(path) = &args.config {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        return serde_json::from_str(&json)
            .with_context(|| format!("invalid configuration in {}", path.display()));
    }

    let names = if args.names.is_empty() {
        default_names(args.players)
    } else {
        args.names.clone()
    };
    let mode = match args.mode {
        ModeArg::Normal => GameMode::Normal,
        ModeArg::Speed => GameMode::Speed,
    };
    let policy = match args.clock_policy {
        PolicyArg::PerTurn => ClockPolicy::PerTurn,
        PolicyArg::Cumulative => ClockPolicy::Cumulative,
    };
    Ok(GameConfig::new(args.size, names.len())
        .with_players(names)
        .with_mode(mode)
        .with_turn_time(args.turn_time)
        .with_clock_policy(policy))
}

fn run_console(args: ConsoleArgs) -> Result<()> {
    let config = game_config(&args)?;
    if !BOARD_SIZES.contains(&config.board_size) {
        warn!(size = config.board_size, "unusual board size");
    }

    let session = match &args.load {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            GameSession::from_json(&json, &config)
                .with_context(|| format!("failed to load {}", path.display()))?
        }
        None => GameSession::new(config).context("invalid game configuration")?,
    };

    Console::new(session).run()
}

fn run_demo(args: DemoArgs) -> Result<()> {
    println!("goban: random self-play\n");

    let config = GameConfig::new(args.size, args.players);
    let mut session = GameSession::new(config).context("invalid game configuration")?;
    let mut rng = match args.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };

    let summary = random_playout(&mut session, &mut rng, max_playout_turns(args.size));
    while !session.is_game_over() {
        session.pass_turn()?;
    }
    println!(
        "{} moves, {} passes, {} captures\n",
        summary.moves, summary.passes, summary.captures
    );
    println!("{}", session.board());

    let territories = session.controlled_territories();
    for (i, name) in session.player_names().iter().enumerate() {
        let player = (i + 1) as u8;
        println!(
            "{name}: score {}, territory {}, captures {}",
            session.score(player).unwrap_or_default(),
            territory_size(&territories, player),
            session.captures(player).unwrap_or_default()
        );
    }
    if let Some(result) = session.final_score() {
        let winners: Vec<String> = result.winners.iter().map(ToString::to_string).collect();
        println!("\nWinner: player {}", winners.join(" & "));
    }
    Ok(())
}
