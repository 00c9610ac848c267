use crate::grid::{CellPos, Grid};

/// All in-bounds cells within Euclidean distance `radius` of `center`.
///
/// Cells come out x-major then y ascending. Callers take the first match,
/// so this order is the tie-break between equally near cells.
pub fn cells_in_radius(grid: &Grid, center: CellPos, radius: i32) -> Vec<CellPos> {
    let mut cells = Vec::new();
    if radius < 0 {
        return cells;
    }

    // Scan only the part of the bounding square that overlaps the grid
    let r = radius as i64;
    let limit = r * r;
    let (cx, cy) = (center.x as i64, center.y as i64);
    let max_x = (cx + r).min(grid.width() as i64 - 1);
    let max_y = (cy + r).min(grid.height() as i64 - 1);
    for x in (cx - r).max(0)..=max_x {
        for y in (cy - r).max(0)..=max_y {
            let pos = CellPos::new(x as i32, y as i32);
            if center.distance_squared(&pos) <= limit {
                cells.push(pos);
            }
        }
    }
    cells
}

/// Distance from `v` to the span `0..len` along one axis
fn axis_gap(v: i32, len: i32) -> i64 {
    let v = v as i64;
    if v < 0 {
        -v
    } else {
        (v - (len as i64 - 1)).max(0)
    }
}

/// The grid centre if it is free, otherwise the first free cell found by
/// widening the search radius around it. `None` when the board has no free
/// cell within reach (always the case for a zero-sized grid).
pub fn center_or_closest_unblocked_cell(grid: &Grid) -> Option<CellPos> {
    if grid.is_degenerate() {
        return None;
    }
    let center = CellPos::new(grid.width() / 2, grid.height() / 2);
    nearest_valid_cell(grid, center)
}

/// `start` itself if valid, else the first valid cell by widening radius.
/// `start` may be blocked or lie outside the grid.
pub fn nearest_valid_cell(grid: &Grid, start: CellPos) -> Option<CellPos> {
    if grid.is_valid(start) {
        return Some(start);
    }

    let max_radius = grid.width().max(grid.height());
    if axis_gap(start.x, grid.width()) > max_radius as i64
        || axis_gap(start.y, grid.height()) > max_radius as i64
    {
        log::debug!("({}, {}) is out of reach of the grid", start.x, start.y);
        return None;
    }

    for radius in 1..=max_radius {
        if let Some(pos) = cells_in_radius(grid, start, radius)
            .into_iter()
            .find(|&pos| grid.is_valid(pos))
        {
            return Some(pos);
        }
    }

    log::debug!("No valid cell within radius {} of ({}, {})", max_radius, start.x, start.y);
    None
}
