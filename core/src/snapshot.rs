use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Read-only picture of a game for renderers, safe to hand to a player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub difficulty: Difficulty,
    pub phase: GamePhase,
    pub rows: Coord,
    pub cols: Coord,
    pub mines_left: isize,
    pub explosion_origin: Option<Coord2>,
    pub cells: Vec<Vec<VisibleCell>>,
}

impl GameSnapshot {
    pub fn from_game(game: &Game) -> Self {
        let (rows, cols) = game.size();
        let cells = (0..rows)
            .map(|row| {
                (0..cols)
                    .map(|col| visible_cell(game, (row, col)))
                    .collect()
            })
            .collect();

        Self {
            difficulty: game.difficulty(),
            phase: game.phase(),
            rows,
            cols,
            mines_left: game.mines_left(),
            explosion_origin: game.explosion_origin(),
            cells,
        }
    }

    pub fn cell_at(&self, (row, col): Coord2) -> Option<VisibleCell> {
        self.cells
            .get(usize::from(row))
            .and_then(|cells| cells.get(usize::from(col)))
            .copied()
    }
}

impl Game {
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::from_game(self)
    }
}

fn visible_cell(game: &Game, coords: Coord2) -> VisibleCell {
    let cell = game.grid()[coords];

    match (game.phase(), cell.visibility(), cell.has_mine()) {
        (_, Visibility::Revealed, true) if game.explosion_origin() == Some(coords) => {
            VisibleCell::Exploded
        }
        (_, Visibility::Revealed, true) => VisibleCell::Mine,
        (_, Visibility::Revealed, false) => VisibleCell::Revealed(cell.adjacent_mines()),
        (GamePhase::Lost, Visibility::Hidden, true) => VisibleCell::Mine,
        (GamePhase::Lost, Visibility::Flagged, false) => VisibleCell::Misflagged,
        (GamePhase::Won, Visibility::Hidden, true) => VisibleCell::Flagged,
        (_, Visibility::Flagged, _) => VisibleCell::Flagged,
        (_, Visibility::Hidden, _) => VisibleCell::Hidden,
    }
}
