use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::io::{self, BufRead, Write};

use tictactoe::{Engine, EngineParticipant, Game, HumanParticipant, Outcome, Player, RandomParticipant};

#[derive(Parser, Debug)]
#[command(author, version, about = "Tic-tac-toe against a perfect engine", long_about = None)]
struct Args {
    /// Play first, with x
    #[arg(long, conflicts_with = "second")]
    first: bool,

    /// Play second, with o
    #[arg(long)]
    second: bool,

    /// Start from a 9-character board such as `x...o....`
    #[arg(long, value_name = "TEXT")]
    board: Option<String>,

    /// Answer equally good moves with the lowest cell instead of at random
    #[arg(long)]
    deterministic: bool,

    /// Play N engine-vs-random games instead of an interactive one
    #[arg(long, value_name = "N")]
    selfplay: Option<u32>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .target(env_logger::Target::Stderr)
    .init();

    if args.no_color {
        colored::control::set_override(false);
    }

    let result = match args.selfplay {
        Some(games) => selfplay(games, !args.deterministic),
        None => interactive(&args),
    };
    if let Err(e) = result {
        log::error!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}

fn new_engine(args: &Args) -> Result<Engine> {
    let mut engine = if args.deterministic { Engine::deterministic() } else { Engine::new() };
    if let Some(board) = &args.board {
        engine.set(board).context("cannot start from --board")?;
    }
    Ok(engine)
}

/// `None` on end of input.
fn ask_start() -> Result<Option<Player>> {
    let stdin = io::stdin();
    let mut input = String::new();
    loop {
        print!("Do you want to start? [Y/n] ");
        io::stdout().flush()?;

        input.clear();
        if stdin.lock().read_line(&mut input)? == 0 {
            return Ok(None);
        }
        match input.trim().to_lowercase().as_str() {
            "" | "y" | "yes" => return Ok(Some(Player::One)),
            "n" | "no" => return Ok(Some(Player::Two)),
            _ => continue,
        }
    }
}

fn interactive(args: &Args) -> Result<()> {
    println!("Welcome to TicTacToe");
    let engine = new_engine(args)?;

    let human = if args.first {
        Player::One
    } else if args.second {
        Player::Two
    } else {
        match ask_start()? {
            Some(player) => player,
            None => return Ok(()),
        }
    };
    println!("You play with {}", human);

    let computer = EngineParticipant::new(engine.randomize());
    let mut game = match human {
        Player::One => Game::with_engine(engine, HumanParticipant::stdio(), computer),
        Player::Two => Game::with_engine(engine, computer, HumanParticipant::stdio()),
    }
    .verbose(true);

    match game.play() {
        Outcome::Won(winner) if winner == human => println!("{}", "You win!".green()),
        Outcome::Won(_) => println!("{}", "I win!".red()),
        Outcome::Draw => println!("{}", "Game drawn!".yellow()),
        Outcome::Abandoned => println!("Bye!"),
    }
    Ok(())
}

fn selfplay(games: u32, randomize: bool) -> Result<()> {
    let mut wins = 0;
    let mut losses = 0;
    let mut draws = 0;

    for i in 0..games {
        let engine_side: Player = rand::random();
        let computer = EngineParticipant::new(randomize);
        let mut game = match engine_side {
            Player::One => Game::new(computer, RandomParticipant::new()),
            Player::Two => Game::new(RandomParticipant::new(), computer),
        };
        let outcome = game.play();
        log::debug!("game {}: engine {} -> {:?} {}", i + 1, engine_side, outcome, game.engine().board());
        match outcome {
            Outcome::Won(winner) if winner == engine_side => wins += 1,
            Outcome::Won(_) => losses += 1,
            Outcome::Draw => draws += 1,
            Outcome::Abandoned => anyhow::bail!("game {} was abandoned", i + 1),
        }
    }

    println!(
        "Engine wins: {} | Engine losses: {} | Draws: {}",
        wins.to_string().as_str().green(),
        losses.to_string().as_str().red(),
        draws.to_string().as_str().yellow()
    );
    Ok(())
}
