#![allow(dead_code)]

use spiralfill::layout::{self, Layout};
use spiralfill::{Cell, CellPos, Grid};
use std::collections::HashSet;
use std::path::PathBuf;

/// Parse a board layout, panicking on malformed test input
pub fn board(text: &str) -> Layout {
    layout::parse(text).unwrap_or_else(|e| panic!("bad test layout: {}", e))
}

/// Build a grid from explicit cells
pub fn grid_from_cells(width: i32, height: i32, cells: &[(CellPos, Cell)]) -> Grid {
    let obstacles: Vec<CellPos> = cells
        .iter()
        .filter(|(_, c)| *c == Cell::Obstacle)
        .map(|(p, _)| *p)
        .collect();
    let mut grid = Grid::with_obstacles(width, height, &obstacles);
    for (pos, cell) in cells {
        if let Cell::Tile(category) = cell {
            grid.block_cell(*pos, *category);
        }
    }
    grid
}

/// Flip a position horizontally (mirror left-right)
pub fn flip_pos_horizontal(grid: &Grid, pos: CellPos) -> CellPos {
    CellPos::new(grid.width() - 1 - pos.x, pos.y)
}

/// Flip a position vertically (mirror top-bottom)
pub fn flip_pos_vertical(grid: &Grid, pos: CellPos) -> CellPos {
    CellPos::new(pos.x, grid.height() - 1 - pos.y)
}

pub fn flip_pos_both(grid: &Grid, pos: CellPos) -> CellPos {
    flip_pos_vertical(grid, flip_pos_horizontal(grid, pos))
}

/// Position mapping between a grid and one of its mirrored variants
pub type Flip = fn(&Grid, CellPos) -> CellPos;

/// Mirror a whole grid with the given position mapping
pub fn flip_grid(grid: &Grid, flip: Flip) -> Grid {
    let cells: Vec<(CellPos, Cell)> = grid.cells().map(|(p, c)| (flip(grid, p), c)).collect();
    grid_from_cells(grid.width(), grid.height(), &cells)
}

/// Original plus the three mirrored variants, each with its position mapping
pub fn variants(grid: &Grid) -> Vec<(&'static str, Grid, Flip)> {
    fn identity(_: &Grid, pos: CellPos) -> CellPos {
        pos
    }

    let flips: [(&'static str, Flip); 4] = [
        ("original", identity as Flip),
        ("h_flip", flip_pos_horizontal as Flip),
        ("v_flip", flip_pos_vertical as Flip),
        ("hv_flip", flip_pos_both as Flip),
    ];

    flips
        .iter()
        .map(|&(name, flip)| (name, flip_grid(grid, flip), flip))
        .collect()
}

pub fn position_set(cells: &[CellPos]) -> HashSet<CellPos> {
    cells.iter().copied().collect()
}

/// Scratch file path unique to this test process
pub fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("spiralfill_{}_{}", std::process::id(), name))
}

/// Write `contents` to a scratch file and return its path
pub fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = temp_path(name);
    std::fs::write(&path, contents).expect("failed to write scratch file");
    path
}
