use crate::clear::{clear_matches, ClearReport};
use crate::command_log::CommandLog;
use crate::config::Config;
use crate::grid::{CellPos, Grid};
use crate::proximity::{center_or_closest_unblocked_cell, nearest_valid_cell};
use crate::size::{SizeFile, SizeProvider};
use crate::spiral::SpiralWalker;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Requests the host can send into a running session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Begin placing tiles, one per spawn interval
    StartSpawning,
    StopSpawning,
    /// Remove matching neighbours and restart the spiral
    ClearBoard,
    /// The spawner was dropped over cell (x, y), possibly off the board
    ReleaseSpawner { x: i32, y: i32 },
}

/// A tile committed to the grid during a tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub cell: CellPos,
    pub category: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Placed(Placement),
    /// Spawning, but the spawn interval has not elapsed yet
    Waiting,
    /// Spawning, but the spiral has left the board
    Exhausted,
    /// Not spawning or no spawner on the board
    Idle,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    Accepted,
    Cleared(ClearReport),
    SpawnerMoved(CellPos),
    /// No free cell near the drop point; spawner kept its position
    SpawnerStayed,
}

/// Owns the board, the spiral walker and the spawner. The host calls
/// `tick` once per frame and `dispatch` for user commands; both need
/// `&mut self`, so nothing can observe a half-finished clear or placement.
pub struct Session {
    grid: Grid,
    walker: SpiralWalker,
    spawner: Option<CellPos>,
    spawning: bool,
    rng: Pcg32,
    seed: u64,
    tile_categories: u32,
    ticks_per_spawn: u32,
    ticks_since_spawn: u32,
    ticks: u64,
    log: Option<CommandLog>,
}

impl Session {
    /// Build a session whose size comes from the configured size file
    pub fn new(config: &Config) -> Self {
        let provider = SizeFile::new(&config.grid.size_file);
        Self::with_provider(config, &provider)
    }

    pub fn with_provider<P: SizeProvider + ?Sized>(config: &Config, provider: &P) -> Self {
        let seed = config.grid.seed.unwrap_or_else(rand::random::<u64>);
        Self::seeded(config, provider, seed)
    }

    fn seeded<P: SizeProvider + ?Sized>(config: &Config, provider: &P, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let grid = Grid::load(provider, config.grid.obstacle_probability, &mut rng);
        let spawner = center_or_closest_unblocked_cell(&grid);
        match spawner {
            Some(pos) => log::info!("Spawner placed at ({}, {})", pos.x, pos.y),
            None => log::warn!("No free cell for the spawner, spawning disabled"),
        }

        Session {
            grid,
            walker: SpiralWalker::new(config.spawner.turn_policy),
            spawner,
            spawning: false,
            rng,
            seed,
            tile_categories: config.spawner.tile_categories.max(1),
            ticks_per_spawn: config.spawner.ticks_per_spawn.max(1),
            ticks_since_spawn: 0,
            ticks: 0,
            log: config.logging.enable_command_log.then(|| CommandLog::new(seed)),
        }
    }

    /// Rebuild a session from a command log, running `ticks` ticks and
    /// dispatching each logged command on the tick it was recorded at.
    pub fn replay<P: SizeProvider + ?Sized>(
        config: &Config,
        provider: &P,
        command_log: &CommandLog,
        ticks: u64,
    ) -> Self {
        let mut session = Self::seeded(config, provider, command_log.seed);
        let mut pending = command_log.commands().iter().peekable();

        for tick in 0..=ticks {
            while let Some(logged) = pending.next_if(|c| c.tick == tick) {
                session.dispatch(logged.command);
            }
            if tick < ticks {
                session.tick();
            }
        }

        if pending.peek().is_some() {
            log::warn!("Replay stopped at tick {} with commands left over", ticks);
        }
        session
    }

    pub fn dispatch(&mut self, command: Command) -> CommandOutcome {
        log::debug!("Tick {}: {:?}", self.ticks, command);
        if let Some(log) = self.log.as_mut() {
            log.record(self.ticks, command);
        }

        match command {
            Command::StartSpawning => {
                self.spawning = true;
                self.ticks_since_spawn = 0;
                CommandOutcome::Accepted
            }
            Command::StopSpawning => {
                self.spawning = false;
                CommandOutcome::Accepted
            }
            Command::ClearBoard => {
                let report = clear_matches(&mut self.grid);
                self.walker.reset();
                CommandOutcome::Cleared(report)
            }
            Command::ReleaseSpawner { x, y } => self.release_spawner(CellPos::new(x, y)),
        }
    }

    fn release_spawner(&mut self, dropped: CellPos) -> CommandOutcome {
        match nearest_valid_cell(&self.grid, dropped) {
            Some(pos) => {
                if self.spawner != Some(pos) {
                    self.spawner = Some(pos);
                    self.walker.reset();
                }
                CommandOutcome::SpawnerMoved(pos)
            }
            None => {
                log::warn!("No free cell near ({}, {}), spawner stays", dropped.x, dropped.y);
                CommandOutcome::SpawnerStayed
            }
        }
    }

    /// Advance one step of the simulation
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.spawn_step();
        self.ticks += 1;
        outcome
    }

    fn spawn_step(&mut self) -> TickOutcome {
        let origin = match self.spawner {
            Some(origin) if self.spawning => origin,
            _ => return TickOutcome::Idle,
        };

        self.ticks_since_spawn += 1;
        if self.ticks_since_spawn < self.ticks_per_spawn {
            return TickOutcome::Waiting;
        }
        self.ticks_since_spawn = 0;

        match self.walker.next_cell(&self.grid, origin) {
            Some(cell) => {
                let category = self.rng.random_range(0..self.tile_categories);
                if self.grid.block_cell(cell, category) {
                    TickOutcome::Placed(Placement { cell, category })
                } else {
                    TickOutcome::Waiting
                }
            }
            None => TickOutcome::Exhausted,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn walker(&self) -> &SpiralWalker {
        &self.walker
    }

    pub fn spawner(&self) -> Option<CellPos> {
        self.spawner
    }

    pub fn is_spawning(&self) -> bool {
        self.spawning
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Completed ticks
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn command_log(&self) -> Option<&CommandLog> {
        self.log.as_ref()
    }
}
