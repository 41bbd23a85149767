#![no_std]

extern crate alloc;

use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use snapshot::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod generator;
mod grid;
mod snapshot;
mod types;

/// Board dimensions and mine count, validated so at least one cell stays safe.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
}

impl BoardConfig {
    pub const fn new_unchecked(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self { rows, cols, mines }
    }

    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(rows, cols, mines);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 || self.mines >= self.total_cells() {
            Err(GameError::InvalidConfiguration)
        } else {
            Ok(())
        }
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub const fn config(self) -> BoardConfig {
        match self {
            Self::Easy => BoardConfig::new_unchecked(9, 9, 10),
            Self::Medium => BoardConfig::new_unchecked(16, 16, 40),
            Self::Hard => BoardConfig::new_unchecked(24, 24, 99),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(GameError::UnknownDifficulty)
    }
}

/// Outcome of toggling a flag
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Changed,
}

impl FlagOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

/// Outcome of revealing a cell
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_difficulties_are_valid() {
        for difficulty in Difficulty::ALL {
            assert_eq!(difficulty.config().validate(), Ok(()), "{difficulty}");
        }
        assert_eq!(Difficulty::Easy.config().size(), (9, 9));
        assert_eq!(Difficulty::Medium.config().mines, 40);
        assert_eq!(Difficulty::Hard.config().total_cells(), 576);
    }

    #[test]
    fn config_boundary_on_two_by_two() {
        assert!(BoardConfig::new(2, 2, 3).is_ok());
        assert_eq!(BoardConfig::new(2, 2, 4), Err(GameError::InvalidConfiguration));
    }

    #[test]
    fn config_rejects_empty_dimensions() {
        assert_eq!(BoardConfig::new(0, 5, 0), Err(GameError::InvalidConfiguration));
        assert_eq!(BoardConfig::new(5, 0, 0), Err(GameError::InvalidConfiguration));
        assert!(BoardConfig::new(1, 1, 0).is_ok());
    }

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("Medium".parse(), Ok(Difficulty::Medium));
        assert_eq!(" hard ".parse(), Ok(Difficulty::Hard));
        assert_eq!(
            "expert".parse::<Difficulty>(),
            Err(GameError::UnknownDifficulty)
        );
        assert_eq!(Difficulty::default(), Difficulty::Easy);
    }
}
