use anyhow::Context;
use clap::Parser;
use kaboom_core::{Difficulty, Game, RevealOutcome};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use std::io::{self, BufRead, Write};

mod command;
mod render;

use command::{Command, HELP};

#[derive(Parser, Debug)]
#[command(version, about = "Play minesweeper in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board size and mine count of the first game
    #[arg(short, long, default_value_t = Difficulty::Easy)]
    difficulty: Difficulty,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print a JSON snapshot after every command instead of the text board
    #[arg(long)]
    json: bool,
}

fn init_logging(args: &Args) -> anyhow::Result<()> {
    TermLogger::init(
        args.verbose.log_level_filter(),
        ConfigBuilder::new().build(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .context("Error initializing logger")
}

fn print_board(game: &Game, json: bool, out: &mut impl Write) -> anyhow::Result<()> {
    let snapshot = game.snapshot();
    if json {
        serde_json::to_writer(&mut *out, &snapshot)?;
        writeln!(out)?;
    } else {
        write!(out, "{}", render::TextBoard(&snapshot))?;
    }
    Ok(())
}

/// Applies one command, returning `false` once the player wants to quit.
fn apply(game: &mut Game, command: Command, out: &mut impl Write) -> anyhow::Result<bool> {
    let changed = match command {
        Command::Reveal(coords) => match game.reveal(coords)? {
            RevealOutcome::HitMine => {
                writeln!(out, "Boom! You hit a mine at {coords:?}.")?;
                true
            }
            RevealOutcome::Won => {
                writeln!(out, "You win!")?;
                true
            }
            outcome => outcome.has_update(),
        },
        Command::Flag(coords) => game.toggle_flag(coords)?.has_update(),
        Command::NewGame(difficulty) => {
            game.new_game(difficulty)?;
            true
        }
        Command::Help => {
            writeln!(out, "{HELP}")?;
            false
        }
        Command::Quit => return Ok(false),
    };

    let is_move = matches!(command, Command::Reveal(_) | Command::Flag(_));
    if is_move && !changed && game.is_finished() {
        writeln!(out, "Game over, start a new one with n.")?;
    }
    Ok(true)
}

fn run(
    game: &mut Game,
    input: impl BufRead,
    out: &mut impl Write,
    json: bool,
) -> anyhow::Result<()> {
    print_board(game, json, out)?;

    for line in input.lines() {
        let line = line.context("Could not read input")?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "error: {err:#}")?;
                continue;
            }
        };
        log::debug!("command: {:?}", command);

        match apply(game, command, out) {
            Ok(true) => print_board(game, json, out)?,
            Ok(false) => break,
            Err(err) => writeln!(out, "error: {err:#}")?,
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    let mut game = Game::new(args.difficulty, seed)?;
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    run(&mut game, stdin.lock(), &mut stdout, args.json)
}
