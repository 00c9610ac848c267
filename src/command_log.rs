use crate::session::Command;
use serde::{Deserialize, Serialize};

/// Command with the tick it was dispatched on
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoggedCommand {
    /// Ticks elapsed in the session when the command arrived
    pub tick: u64,
    pub command: Command,
}

/// Record of every command dispatched into a session
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandLog {
    /// Seed the session's RNG was created from
    pub seed: u64,
    commands: Vec<LoggedCommand>,
}

impl CommandLog {
    pub fn new(seed: u64) -> Self {
        CommandLog {
            seed,
            commands: Vec::new(),
        }
    }

    pub fn record(&mut self, tick: u64, command: Command) {
        self.commands.push(LoggedCommand { tick, command });
    }

    /// Get all logged commands
    pub fn commands(&self) -> &[LoggedCommand] {
        &self.commands
    }

    /// Save log to JSON file
    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load log from JSON file
    pub fn load_from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let json = std::fs::read_to_string(path)?;
        let log: CommandLog = serde_json::from_str(&json)?;
        Ok(log)
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        let mut starts = 0;
        let mut stops = 0;
        let mut clears = 0;
        let mut moves = 0;

        for logged in &self.commands {
            match logged.command {
                Command::StartSpawning => starts += 1,
                Command::StopSpawning => stops += 1,
                Command::ClearBoard => clears += 1,
                Command::ReleaseSpawner { .. } => moves += 1,
            }
        }

        let last_tick = self.commands.last().map(|c| c.tick).unwrap_or(0);

        format!(
            "Seed: {}\n\
             Last command at tick {}\n\
             Spawning: {} started, {} stopped\n\
             Board: {} clears, {} spawner moves",
            self.seed, last_tick, starts, stops, clears, moves
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let mut log = CommandLog::new(5);
        log.record(0, Command::StartSpawning);
        log.record(3, Command::ReleaseSpawner { x: -1, y: 2 });

        let json = serde_json::to_string(&log).unwrap();
        let back: CommandLog = serde_json::from_str(&json).unwrap();
        assert_eq!(back, log);
        assert!(json.contains("ReleaseSpawner"));
    }

    #[test]
    fn test_summary_counts() {
        let mut log = CommandLog::new(1);
        log.record(0, Command::StartSpawning);
        log.record(4, Command::ClearBoard);
        log.record(4, Command::ClearBoard);
        log.record(9, Command::StopSpawning);
        let summary = log.summary();
        assert!(summary.contains("Last command at tick 9"));
        assert!(summary.contains("1 started, 1 stopped"));
        assert!(summary.contains("2 clears, 0 spawner moves"));
    }
}
