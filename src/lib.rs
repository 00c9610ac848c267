pub mod clear;
pub mod command_log;
pub mod config;
pub mod grid;
pub mod layout;
pub mod proximity;
pub mod session;
pub mod size;
pub mod spiral;

pub use clear::{clear_matches, ClearReport};
pub use config::Config;
pub use grid::{Cell, CellPos, Grid};
pub use proximity::{cells_in_radius, center_or_closest_unblocked_cell, nearest_valid_cell};
pub use session::{Command, Session, TickOutcome};
pub use size::{GridSize, SizeError, SizeProvider};
pub use spiral::{SpiralWalker, TurnPolicy};
