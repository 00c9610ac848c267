//! Plain-text board layouts.
//!
//! Format, one line per row with the highest y on top:
//! - `■`: obstacle
//! - `□`: empty cell
//! - `@`: empty cell holding the spawner
//! - `0`-`9`, `a`-`z`: tile of category 0-35
//!
//! Categories 36 and above have no symbol. `render` writes them as `?`,
//! which `parse` rejects, so such boards do not round-trip.

use crate::grid::{Cell, CellPos, Grid};

const OBSTACLE: char = '■';
const EMPTY: char = '□';
const SPAWNER: char = '@';

/// A parsed layout
#[derive(Debug, Clone)]
pub struct Layout {
    pub grid: Grid,
    pub spawner: Option<CellPos>,
}

const NO_SYMBOL: char = '?';

fn category_symbol(category: u32) -> char {
    std::char::from_digit(category, 36).unwrap_or(NO_SYMBOL)
}

fn symbol_category(ch: char) -> Option<u32> {
    if ch.is_ascii_uppercase() {
        return None;
    }
    ch.to_digit(36)
}

/// Render the grid as text, marking the spawner if it sits on an empty cell
pub fn render(grid: &Grid, spawner: Option<CellPos>) -> String {
    let mut result = String::new();

    for y in (0..grid.height()).rev() {
        for x in 0..grid.width() {
            let pos = CellPos::new(x, y);
            let symbol = match grid.cell(pos) {
                Some(Cell::Empty) if spawner == Some(pos) => SPAWNER,
                Some(Cell::Empty) | None => EMPTY,
                Some(Cell::Obstacle) => OBSTACLE,
                Some(Cell::Tile(category)) => category_symbol(category),
            };
            result.push(symbol);
        }
        result.push('\n');
    }

    result
}

/// Parse text produced by `render`. Blank lines are ignored.
pub fn parse(text: &str) -> Result<Layout, String> {
    let rows: Vec<&str> = text
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();

    let height = rows.len() as i32;
    let width = match rows.first() {
        Some(row) => row.chars().count() as i32,
        None => return Ok(Layout { grid: Grid::empty(), spawner: None }),
    };

    let mut obstacles = Vec::new();
    let mut tiles = Vec::new();
    let mut spawner = None;

    for (row_index, row) in rows.iter().enumerate() {
        if row.chars().count() as i32 != width {
            return Err(format!(
                "row {} has {} cells, expected {}",
                row_index + 1,
                row.chars().count(),
                width
            ));
        }

        let y = height - 1 - row_index as i32;
        for (x, ch) in row.chars().enumerate() {
            let pos = CellPos::new(x as i32, y);
            match ch {
                OBSTACLE => obstacles.push(pos),
                EMPTY => {}
                SPAWNER => {
                    if spawner.replace(pos).is_some() {
                        return Err("more than one spawner".to_string());
                    }
                }
                other => match symbol_category(other) {
                    Some(category) => tiles.push((pos, category)),
                    None => return Err(format!("unknown symbol '{}' at ({}, {})", other, x, y)),
                },
            }
        }
    }

    let mut grid = Grid::with_obstacles(width, height, &obstacles);
    for (pos, category) in tiles {
        grid.block_cell(pos, category);
    }

    Ok(Layout { grid, spawner })
}
