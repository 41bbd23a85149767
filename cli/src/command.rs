use anyhow::{Context, bail};
use kaboom_core::{Coord, Coord2, Difficulty};
use std::str::FromStr;

pub(crate) const HELP: &str = "\
commands:
  r ROW COL         reveal a cell
  f ROW COL         toggle a flag
  n [DIFFICULTY]    new game (easy, medium, hard), easy if omitted
  h                 show this help
  q                 quit";

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    NewGame(Difficulty),
    Help,
    Quit,
}

fn parse_coord(word: Option<&str>, axis: &str) -> anyhow::Result<Coord> {
    let word = word.with_context(|| format!("missing {axis}"))?;
    word.parse()
        .with_context(|| format!("invalid {axis} {word:?}"))
}

fn parse_coords<'a>(mut words: impl Iterator<Item = &'a str>) -> anyhow::Result<Coord2> {
    let row = parse_coord(words.next(), "row")?;
    let col = parse_coord(words.next(), "column")?;
    if let Some(extra) = words.next() {
        bail!("unexpected argument {extra:?}");
    }
    Ok((row, col))
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> anyhow::Result<Self> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            bail!("empty command, type h for help");
        };

        Ok(match verb.to_ascii_lowercase().as_str() {
            "r" | "reveal" => Command::Reveal(parse_coords(words)?),
            "f" | "flag" => Command::Flag(parse_coords(words)?),
            "n" | "new" => {
                let difficulty = words.next().map(str::parse::<Difficulty>).transpose()?;
                Command::NewGame(difficulty.unwrap_or_default())
            }
            "h" | "help" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            other => bail!("unknown command {other:?}, type h for help"),
        })
    }
}
