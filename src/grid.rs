use crate::size::{GridSize, SizeProvider};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Default chance that a cell starts out as an obstacle
pub const DEFAULT_OBSTACLE_PROBABILITY: f64 = 0.25;

/// A cell coordinate on the grid. May lie outside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CellPos {
    pub x: i32,
    pub y: i32,
}

impl CellPos {
    pub fn new(x: i32, y: i32) -> Self {
        CellPos { x, y }
    }

    /// Calculate Euclidean distance squared (avoid sqrt for performance)
    pub fn distance_squared(&self, other: &CellPos) -> i64 {
        let dx = self.x as i64 - other.x as i64;
        let dy = self.y as i64 - other.y as i64;
        dx * dx + dy * dy
    }

    /// Saturates at the i32 range, which lies outside any grid
    pub fn offset(&self, dx: i32, dy: i32) -> CellPos {
        CellPos::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

/// State of one grid position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Blocked at generation time, carries no category
    Obstacle,
    /// Free for placement
    Empty,
    /// Occupied by a placed tile of the given category
    Tile(u32),
}

impl Cell {
    pub fn is_blocked(&self) -> bool {
        !matches!(self, Cell::Empty)
    }

    /// Category of a placed tile, if any
    pub fn category(&self) -> Option<u32> {
        match self {
            Cell::Tile(category) => Some(*category),
            _ => None,
        }
    }

    /// Integer encoding used by renderers: -2 obstacle, -1 empty, category otherwise
    pub fn value(&self) -> i64 {
        match self {
            Cell::Obstacle => -2,
            Cell::Empty => -1,
            Cell::Tile(category) => *category as i64,
        }
    }
}

/// Fixed-size board of cells. Every access is bounds checked.
#[derive(Debug, Clone)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
    /// Revision number - incremented whenever grid cells change
    revision: u64,
}

impl Grid {
    /// Create a new grid with all cells empty
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Grid {
            width,
            height,
            cells: vec![Cell::Empty; (width as usize) * (height as usize)],
            revision: 0,
        }
    }

    /// Zero-sized grid. Nothing is ever valid on it.
    pub fn empty() -> Self {
        Self::new(0, 0)
    }

    /// Create a grid with specific obstacle cells
    pub fn with_obstacles(width: i32, height: i32, obstacles: &[CellPos]) -> Self {
        let mut grid = Self::new(width, height);
        for &pos in obstacles {
            if let Some(id) = grid.index(pos) {
                grid.cells[id] = Cell::Obstacle;
            }
        }
        grid
    }

    /// Generate a grid where each cell is independently an obstacle with
    /// probability `obstacle_probability` (clamped to `0.0..=1.0`).
    pub fn generate<R: Rng>(size: GridSize, obstacle_probability: f64, rng: &mut R) -> Self {
        let probability = if obstacle_probability.is_nan() {
            DEFAULT_OBSTACLE_PROBABILITY
        } else {
            obstacle_probability.clamp(0.0, 1.0)
        };

        let mut grid = Self::new(size.width, size.height);
        for cell in grid.cells.iter_mut() {
            if rng.random_bool(probability) {
                *cell = Cell::Obstacle;
            }
        }

        let obstacles = grid.cells.iter().filter(|c| **c == Cell::Obstacle).count();
        log::debug!(
            "Generated {}x{} grid with {} obstacles (p = {})",
            grid.width,
            grid.height,
            obstacles,
            probability
        );
        grid
    }

    /// Load the size from `provider` and generate a grid of that size.
    /// Any provider failure degrades to a zero-sized grid.
    pub fn load<P, R>(provider: &P, obstacle_probability: f64, rng: &mut R) -> Self
    where
        P: SizeProvider + ?Sized,
        R: Rng,
    {
        match provider.grid_size() {
            Ok(size) => {
                log::info!("Loaded grid size {}x{} from {}", size.width, size.height, provider.describe());
                Self::generate(size, obstacle_probability, rng)
            }
            Err(e) => {
                log::error!("Failed to read grid size from {}: {}", provider.describe(), e);
                Self::empty()
            }
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn size(&self) -> GridSize {
        GridSize {
            width: self.width,
            height: self.height,
        }
    }

    /// True when the grid has no cells at all
    pub fn is_degenerate(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn is_inside_bounds(&self, pos: CellPos) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Inside the grid and not blocked
    pub fn is_valid(&self, pos: CellPos) -> bool {
        matches!(self.cell(pos), Some(Cell::Empty))
    }

    pub fn cell(&self, pos: CellPos) -> Option<Cell> {
        self.index(pos).map(|id| self.cells[id])
    }

    /// Place a tile on a valid cell. Returns false (and changes nothing)
    /// when the cell is out of bounds or already blocked.
    pub fn block_cell(&mut self, pos: CellPos, category: u32) -> bool {
        if !self.is_valid(pos) {
            return false;
        }
        self.set(pos, Cell::Tile(category));
        true
    }

    /// Reset a cell back to empty
    pub(crate) fn clear_cell(&mut self, pos: CellPos) {
        self.set(pos, Cell::Empty);
    }

    /// Every cell with its position, x outer and y inner
    pub fn cells(&self) -> impl Iterator<Item = (CellPos, Cell)> + '_ {
        let height = self.height;
        (0..self.width)
            .flat_map(move |x| (0..height).map(move |y| CellPos::new(x, y)))
            .map(move |pos| (pos, self.cells[self.id(pos)]))
    }

    /// Number of cells holding a placed tile
    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|c| c.category().is_some()).count()
    }

    /// Get current grid revision number
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn set(&mut self, pos: CellPos, cell: Cell) {
        if let Some(id) = self.index(pos) {
            if self.cells[id] != cell {
                self.cells[id] = cell;
                self.revision += 1;
            }
        }
    }

    fn index(&self, pos: CellPos) -> Option<usize> {
        if self.is_inside_bounds(pos) {
            Some(self.id(pos))
        } else {
            None
        }
    }

    fn id(&self, pos: CellPos) -> usize {
        pos.x as usize + pos.y as usize * self.width as usize
    }
}
