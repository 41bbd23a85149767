use crate::*;
pub use random::*;

mod random;

pub trait GridGenerator {
    fn generate(self, config: BoardConfig) -> Result<Grid>;
}

/// Generates a grid of `rows × cols` with exactly `mine_count` uniformly placed mines.
pub fn generate(rows: Coord, cols: Coord, mine_count: CellCount, seed: u64) -> Result<Grid> {
    let config = BoardConfig::new(rows, cols, mine_count)?;
    RandomGridGenerator::new(seed).generate(config)
}
