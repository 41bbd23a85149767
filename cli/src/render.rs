use kaboom_core::{GamePhase, GameSnapshot, VisibleCell};
use std::fmt::{self, Write};

fn glyph(cell: VisibleCell) -> char {
    use VisibleCell::*;
    match cell {
        Hidden => '#',
        Flagged => 'F',
        Revealed(0) => '.',
        // counts never exceed 8
        Revealed(count) => char::from(b'0' + count),
        Mine => '*',
        Exploded => 'X',
        Misflagged => 'x',
    }
}

fn phase_label(phase: GamePhase) -> &'static str {
    match phase {
        GamePhase::Running => "running",
        GamePhase::Won => "won",
        GamePhase::Lost => "lost",
    }
}

/// Text board with row and column indices, rendered from a snapshot.
pub(crate) struct TextBoard<'a>(pub &'a GameSnapshot);

impl fmt::Display for TextBoard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.0;
        writeln!(
            f,
            "{} | {} | mines left: {}",
            snapshot.difficulty,
            phase_label(snapshot.phase),
            snapshot.mines_left
        )?;

        f.write_str("   ")?;
        for col in 0..snapshot.cols {
            write!(f, "{col:>3}")?;
        }
        f.write_char('\n')?;

        for (row, cells) in snapshot.cells.iter().enumerate() {
            write!(f, "{row:>3}")?;
            for &cell in cells {
                write!(f, "{:>3}", glyph(cell))?;
            }
            f.write_char('\n')?;
        }

        Ok(())
    }
}
