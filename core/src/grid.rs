use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Fixed-size board of cells. Mine placement and adjacency counts never change after construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    cells: Array2<Cell>,
    config: BoardConfig,
}

/// Unchecked wire form of [`Grid`].
#[derive(Deserialize)]
struct RawGrid {
    cells: Array2<Cell>,
    config: BoardConfig,
}

impl TryFrom<RawGrid> for Grid {
    type Error = GameError;

    /// Rejects boards whose shape or mine count disagree with the config, or that already show a
    /// revealed mine. Adjacency counts are recomputed rather than trusted.
    fn try_from(RawGrid { cells, config }: RawGrid) -> Result<Self> {
        config.validate()?;
        if cells.dim() != (usize::from(config.rows), usize::from(config.cols)) {
            return Err(GameError::InvalidConfiguration);
        }

        let mines = cells.iter().filter(|cell| cell.has_mine).count();
        if mines != usize::from(config.mines) {
            return Err(GameError::InvalidConfiguration);
        }
        if cells.iter().any(|cell| cell.has_mine && cell.is_revealed()) {
            return Err(GameError::InvalidConfiguration);
        }

        let mut grid = Self { cells, config };
        grid.compute_adjacency();
        Ok(grid)
    }
}

impl Grid {
    /// Builds a grid from a mine mask shaped `config.size()`, computing every adjacency count.
    pub(crate) fn from_mine_mask(config: BoardConfig, mine_mask: &Array2<bool>) -> Self {
        let mut cells: Array2<Cell> = Array2::default(config.size().to_nd_index());

        for ((row, col), &has_mine) in mine_mask.indexed_iter() {
            cells[[row, col]].has_mine = has_mine;
        }

        let mut grid = Self { cells, config };
        grid.compute_adjacency();
        grid
    }

    /// Builds a grid with mines at exactly the given coordinates. Duplicate coordinates count once.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::OutOfBounds);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        let mines = mine_mask
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .map_err(|_| GameError::InvalidConfiguration)?;
        let config = BoardConfig::new(size.0, size.1, mines)?;

        Ok(Self::from_mine_mask(config, &mine_mask))
    }

    fn compute_adjacency(&mut self) {
        let (rows, cols) = self.size();
        for row in 0..rows {
            for col in 0..cols {
                let count = self.count_adjacent_mines((row, col));
                self.cells[(row, col).to_nd_index()].adjacent_mines = count;
            }
        }
    }

    fn count_adjacent_mines(&self, coords: Coord2) -> u8 {
        // at most 8 neighbors, the cast cannot truncate
        self.iter_neighbors(coords)
            .filter(|&pos| self[pos].has_mine)
            .count() as u8
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn rows(&self) -> Coord {
        self.config.rows
    }

    pub fn cols(&self) -> Coord {
        self.config.cols
    }

    pub fn total_cells(&self) -> CellCount {
        self.config.total_cells()
    }

    pub fn mine_count(&self) -> CellCount {
        self.config.mines
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count()
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        coords.0 < self.rows() && coords.1 < self.cols()
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn get(&self, coords: Coord2) -> Option<&Cell> {
        self.contains(coords).then(|| &self[coords])
    }

    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> &mut Cell {
        &mut self.cells[coords.to_nd_index()]
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    /// All cells in row-major order together with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        // indices are bounded by the configured `Coord` dimensions
        self.cells
            .indexed_iter()
            .map(|((row, col), &cell)| ((row as Coord, col as Coord), cell))
    }

    pub fn count_with(&self, visibility: Visibility) -> CellCount {
        // bounded by `total_cells`
        self.cells
            .iter()
            .filter(|cell| cell.visibility == visibility)
            .count() as CellCount
    }

    /// True when every cell is either revealed or mined.
    pub fn all_safe_cells_revealed(&self) -> bool {
        self.cells
            .iter()
            .all(|cell| cell.is_revealed() || cell.has_mine)
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, (row, col): Coord2) -> &Self::Output {
        &self.cells[(row as usize, col as usize)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacency_counts_match_mined_neighbors() {
        let grid = Grid::from_mine_coords((3, 3), &[(0, 0), (2, 2)]).unwrap();

        assert_eq!(grid.mine_count(), 2);
        assert_eq!(grid[(1, 1)].adjacent_mines(), 2);
        assert_eq!(grid[(0, 1)].adjacent_mines(), 1);
        assert_eq!(grid[(0, 2)].adjacent_mines(), 0);
        assert_eq!(grid[(2, 0)].adjacent_mines(), 0);
        assert_eq!(grid[(2, 1)].adjacent_mines(), 1);
    }

    #[test]
    fn single_mine_in_center_rings_its_neighbors() {
        let grid = Grid::from_mine_coords((9, 9), &[(4, 4)]).unwrap();

        for (coords, cell) in grid.iter() {
            let expected = u8::from(
                coords != (4, 4) && coords.0.abs_diff(4) <= 1 && coords.1.abs_diff(4) <= 1,
            );
            assert_eq!(cell.adjacent_mines(), expected, "at {coords:?}");
            assert!(cell.is_hidden());
        }
    }

    #[test]
    fn duplicate_mine_coords_count_once() {
        let grid = Grid::from_mine_coords((2, 2), &[(1, 1), (1, 1)]).unwrap();

        assert_eq!(grid.mine_count(), 1);
        assert_eq!(grid.safe_cell_count(), 3);
    }

    #[test]
    fn out_of_bounds_mine_coords_are_rejected() {
        assert_eq!(
            Grid::from_mine_coords((2, 2), &[(2, 0)]),
            Err(GameError::OutOfBounds)
        );
    }

    #[test]
    fn full_board_is_rejected() {
        let all = [(0, 0), (0, 1), (1, 0), (1, 1)];

        assert_eq!(
            Grid::from_mine_coords((2, 2), &all),
            Err(GameError::InvalidConfiguration)
        );
        assert!(Grid::from_mine_coords((2, 2), &all[..3]).is_ok());
    }

    fn tampered(
        grid: &Grid,
        edit: impl FnOnce(&mut serde_json::Value),
    ) -> serde_json::Result<Grid> {
        let mut value = serde_json::to_value(grid).unwrap();
        edit(&mut value);
        serde_json::from_value(value)
    }

    #[test]
    fn deserialized_grid_keeps_state() {
        let mut grid = Grid::from_mine_coords((2, 2), &[(0, 0)]).unwrap();
        grid.cell_mut((1, 1)).visibility = Visibility::Flagged;

        let json = serde_json::to_string(&grid).unwrap();
        assert_eq!(serde_json::from_str::<Grid>(&json).unwrap(), grid);
    }

    #[test]
    fn deserialize_rejects_stale_mine_count() {
        let grid = Grid::from_mine_coords((2, 2), &[(0, 0)]).unwrap();

        let result = tampered(&grid, |value| value["config"]["mines"] = 0.into());

        assert!(result.is_err());
    }

    #[test]
    fn deserialize_rejects_shape_mismatch() {
        let grid = Grid::from_mine_coords((2, 2), &[(0, 0)]).unwrap();

        assert!(tampered(&grid, |value| value["config"]["rows"] = 5.into()).is_err());
        assert!(tampered(&grid, |value| value["config"]["cols"] = 1.into()).is_err());
    }

    #[test]
    fn deserialize_rejects_invalid_config() {
        let grid = Grid::from_mine_coords((1, 2), &[(0, 0)]).unwrap();

        let result = tampered(&grid, |value| {
            value["config"]["rows"] = 0.into();
            value["config"]["cols"] = 0.into();
        });

        assert!(result.is_err());
    }

    #[test]
    fn deserialize_rejects_revealed_mine() {
        let mut grid = Grid::from_mine_coords((2, 2), &[(0, 0)]).unwrap();
        grid.cell_mut((0, 0)).visibility = Visibility::Revealed;

        let json = serde_json::to_string(&grid).unwrap();
        assert!(serde_json::from_str::<Grid>(&json).is_err());
    }

    #[test]
    fn deserialize_recomputes_adjacency() {
        let grid = Grid::from_mine_coords((2, 2), &[(0, 0)]).unwrap();

        let restored = tampered(&grid, |value| {
            let data = value["cells"]["data"].as_array_mut().unwrap();
            for cell in data {
                cell["adjacent_mines"] = 7.into();
            }
        })
        .unwrap();

        assert_eq!(restored, grid);
        assert_eq!(restored[(1, 1)].adjacent_mines(), 1);
    }

    #[test]
    fn get_and_validate_respect_bounds() {
        let grid = Grid::from_mine_coords((2, 3), &[]).unwrap();

        assert!(grid.get((1, 2)).is_some());
        assert!(grid.get((2, 0)).is_none());
        assert!(grid.get((0, 3)).is_none());
        assert_eq!(grid.validate_coords((1, 2)), Ok((1, 2)));
        assert_eq!(grid.validate_coords((0, 3)), Err(GameError::OutOfBounds));
    }
}
