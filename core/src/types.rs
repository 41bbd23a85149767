/// Single coordinate axis used for row/column indices and board dimensions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Squared Euclidean distance between two cells.
pub const fn distance_sq(a: Coord2, b: Coord2) -> u32 {
    let dr = a.0.abs_diff(b.0) as u32;
    let dc = a.1.abs_diff(b.1) as u32;
    dr * dr + dc * dc
}

/// Moore neighborhood offsets in row-major order, center excluded.
const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (dr, dc) = delta;
    let (rows, cols) = bounds;

    let next_row = row.checked_add_signed(dr)?;
    if next_row >= rows {
        return None;
    }

    let next_col = col.checked_add_signed(dc)?;
    if next_col >= cols {
        return None;
    }

    Some((next_row, next_col))
}

/// Iterates the up-to-8 neighbors of a cell, clipped at the board edges.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn neighbors_are_row_major() {
        let neighbors: Vec<_> = NeighborIter::new((1, 1), (3, 3)).collect();

        assert_eq!(
            neighbors,
            [
                (0, 0),
                (0, 1),
                (0, 2),
                (1, 0),
                (1, 2),
                (2, 0),
                (2, 1),
                (2, 2)
            ]
        );
    }

    #[test]
    fn neighbors_are_clipped_at_corners() {
        let top_left: Vec<_> = NeighborIter::new((0, 0), (9, 9)).collect();
        let bottom_right: Vec<_> = NeighborIter::new((8, 8), (9, 9)).collect();

        assert_eq!(top_left, [(0, 1), (1, 0), (1, 1)]);
        assert_eq!(bottom_right, [(7, 7), (7, 8), (8, 7)]);
    }

    #[test]
    fn single_cell_board_has_no_neighbors() {
        assert_eq!(NeighborIter::new((0, 0), (1, 1)).count(), 0);
    }

    #[test]
    fn distance_is_symmetric() {
        assert_eq!(distance_sq((4, 4), (1, 0)), 25);
        assert_eq!(distance_sq((1, 0), (4, 4)), 25);
        assert_eq!(distance_sq((2, 2), (2, 2)), 0);
    }
}
