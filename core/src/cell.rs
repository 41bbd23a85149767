use serde::{Deserialize, Serialize};

/// Player-facing state of a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    Hidden,
    Revealed,
    Flagged,
}

impl Default for Visibility {
    fn default() -> Self {
        Self::Hidden
    }
}

/// One grid position: what the player sees plus what generation decided.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) visibility: Visibility,
    pub(crate) has_mine: bool,
    pub(crate) adjacent_mines: u8,
}

impl Cell {
    pub const fn visibility(self) -> Visibility {
        self.visibility
    }

    pub const fn has_mine(self) -> bool {
        self.has_mine
    }

    /// Mines in the Moore neighborhood. Only meaningful when the cell has no mine.
    pub const fn adjacent_mines(self) -> u8 {
        self.adjacent_mines
    }

    pub const fn is_hidden(self) -> bool {
        matches!(self.visibility, Visibility::Hidden)
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self.visibility, Visibility::Revealed)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self.visibility, Visibility::Flagged)
    }
}

/// Cell as shown to a player, never leaking hidden mines while the game runs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisibleCell {
    Hidden,
    Flagged,
    Revealed(u8),
    // these are only used to show the result after the game finishes:
    Mine,
    Exploded,
    Misflagged,
}

impl VisibleCell {
    /// Whether the cell is visually closed
    pub const fn is_closed(self) -> bool {
        use VisibleCell::*;
        match self {
            Hidden => true,
            Flagged => true,
            Revealed(_) => false,
            Mine => false,
            Exploded => false,
            Misflagged => true,
        }
    }
}
