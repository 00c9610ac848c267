use crate::grid::{Cell, CellPos, Grid};

const NEIGHBOR_OFFSETS: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// Cells removed by one clear pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearReport {
    /// Cleared positions, x outer and y inner
    pub cleared: Vec<CellPos>,
}

impl ClearReport {
    pub fn is_empty(&self) -> bool {
        self.cleared.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cleared.len()
    }
}

/// True if the tile at `pos` has an orthogonal neighbour of the same category.
/// Obstacles, empties and out-of-bounds positions never match.
pub fn has_equal_neighbor(grid: &Grid, pos: CellPos) -> bool {
    let category = match grid.cell(pos) {
        Some(Cell::Tile(category)) => category,
        _ => return false,
    };

    NEIGHBOR_OFFSETS.iter().any(|&(dx, dy)| {
        matches!(grid.cell(pos.offset(dx, dy)), Some(Cell::Tile(other)) if other == category)
    })
}

/// Remove every tile that touches an equal tile.
///
/// Matches are all decided against the board as it was before the call, then
/// removed together, so the result does not depend on scan order.
pub fn clear_matches(grid: &mut Grid) -> ClearReport {
    // Mark: read-only pass
    let before: &Grid = grid;
    let marked: Vec<CellPos> = before
        .cells()
        .filter(|&(pos, _)| has_equal_neighbor(before, pos))
        .map(|(pos, _)| pos)
        .collect();

    // Sweep
    for &pos in &marked {
        grid.clear_cell(pos);
    }

    if !marked.is_empty() {
        log::info!("Cleared {} matching tiles", marked.len());
    }

    ClearReport { cleared: marked }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacent_pair_is_cleared() {
        let mut grid = Grid::new(3, 3);
        grid.block_cell(CellPos::new(0, 0), 2);
        grid.block_cell(CellPos::new(1, 0), 2);

        let report = clear_matches(&mut grid);
        assert_eq!(report.cleared, vec![CellPos::new(0, 0), CellPos::new(1, 0)]);
        assert!(grid.is_valid(CellPos::new(0, 0)));
        assert!(grid.is_valid(CellPos::new(1, 0)));
        assert_eq!(grid.cell(CellPos::new(0, 0)).map(|c| c.value()), Some(-1));
    }

    #[test]
    fn test_diagonal_is_not_adjacent() {
        let mut grid = Grid::new(3, 3);
        grid.block_cell(CellPos::new(0, 0), 2);
        grid.block_cell(CellPos::new(1, 1), 2);
        grid.block_cell(CellPos::new(2, 2), 2);

        let report = clear_matches(&mut grid);
        assert!(report.is_empty());
        assert_eq!(grid.tile_count(), 3);
    }

    #[test]
    fn test_obstacles_never_match() {
        let mut grid = Grid::with_obstacles(2, 1, &[CellPos::new(0, 0), CellPos::new(1, 0)]);
        let revision = grid.revision();
        assert!(clear_matches(&mut grid).is_empty());
        assert_eq!(grid.cell(CellPos::new(0, 0)), Some(Cell::Obstacle));
        assert_eq!(grid.revision(), revision);
    }

    #[test]
    fn test_chain_is_cleared_in_one_pass() {
        // 0 0 0 in a row: the middle one must not hide the ends
        let mut grid = Grid::new(3, 1);
        for x in 0..3 {
            grid.block_cell(CellPos::new(x, 0), 0);
        }
        assert_eq!(clear_matches(&mut grid).len(), 3);
        assert_eq!(grid.tile_count(), 0);
    }
}
