use alloc::vec::Vec;
use ndarray::Array2;
use rand::prelude::*;

use super::*;

/// Above this share of mined cells rejection sampling degrades, so placement switches to a shuffle.
const SHUFFLE_DENSITY: (CellCount, CellCount) = (1, 2);

/// Placement strategy chosen for a given density.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Draw uniform `(row, col)` pairs and skip already mined ones.
    Rejection,
    /// Partial Fisher-Yates shuffle over all cell indices.
    Shuffle,
}

impl Placement {
    pub fn for_config(config: BoardConfig) -> Self {
        let (num, den) = SHUFFLE_DENSITY;
        let mined = u32::from(config.mines) * u32::from(den);
        if mined <= u32::from(config.total_cells()) * u32::from(num) {
            Self::Rejection
        } else {
            Self::Shuffle
        }
    }
}

/// Purely random generation, reproducible from its seed.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomGridGenerator {
    seed: u64,
}

impl RandomGridGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl GridGenerator for RandomGridGenerator {
    fn generate(self, config: BoardConfig) -> Result<Grid> {
        config.validate()?;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mines: Array2<bool> = Array2::default(config.size().to_nd_index());
        let placement = Placement::for_config(config);

        match placement {
            Placement::Rejection => place_by_rejection(&mut mines, config, &mut rng),
            Placement::Shuffle => place_by_shuffle(&mut mines, config, &mut rng),
        }

        log::debug!(
            "Generated {}x{} grid with {} mines using {:?} placement, seed {}",
            config.rows,
            config.cols,
            config.mines,
            placement,
            self.seed
        );
        Ok(Grid::from_mine_mask(config, &mines))
    }
}

fn place_by_rejection<R: Rng>(mines: &mut Array2<bool>, config: BoardConfig, rng: &mut R) {
    let mut mines_placed = 0;
    let mut attempts: u32 = 0;

    while mines_placed < config.mines {
        attempts += 1;
        let coords: Coord2 = (
            rng.random_range(0..config.rows),
            rng.random_range(0..config.cols),
        );
        let cell = &mut mines[coords.to_nd_index()];
        if !*cell {
            *cell = true;
            mines_placed += 1;
        }
    }

    log::trace!(
        "Rejection sampling placed {} mines in {} attempts",
        mines_placed,
        attempts
    );
}

fn place_by_shuffle<R: Rng>(mines: &mut Array2<bool>, config: BoardConfig, rng: &mut R) {
    let mut indices: Vec<CellCount> = (0..config.total_cells()).collect();
    let cols = CellCount::from(config.cols);

    for placed in 0..config.mines {
        let pick = rng.random_range(placed..config.total_cells());
        indices.swap(placed.into(), pick.into());

        let index = indices[usize::from(placed)];
        mines[[usize::from(index / cols), usize::from(index % cols)]] = true;
    }
}
