//! Headless spawner run
//!
//! Plays a session without a window and prints the final board. With a
//! command log it replays the logged commands, otherwise it spawns for the
//! whole run and clears once at the end.

use spiralfill::command_log::CommandLog;
use spiralfill::config::Config;
use spiralfill::layout;
use spiralfill::session::{Command, Session, TickOutcome};
use spiralfill::size::SizeFile;
use std::env;
use std::process;

const DEFAULT_TICKS: u64 = 200;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        eprintln!("Usage: {} [ticks] [command_log.json]", args[0]);
        eprintln!("Runs the spawner for <ticks> ticks (default {}) and prints the board", DEFAULT_TICKS);
        process::exit(1);
    }

    let config = Config::load();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.logging.level.as_str()))
        .init();

    let ticks = match args.get(1) {
        Some(raw) => match raw.parse::<u64>() {
            Ok(ticks) => ticks,
            Err(_) => {
                eprintln!("'{}' is not a tick count", raw);
                process::exit(1);
            }
        },
        None => DEFAULT_TICKS,
    };

    let session = match args.get(2) {
        Some(path) => match CommandLog::load_from_file(path) {
            Ok(command_log) => {
                println!("=== Replaying {} ===", path);
                println!("{}\n", command_log.summary());
                let provider = SizeFile::new(&config.grid.size_file);
                Session::replay(&config, &provider, &command_log, ticks)
            }
            Err(e) => {
                eprintln!("Failed to load command log {}: {}", path, e);
                process::exit(1);
            }
        },
        None => run_fresh(&config, ticks),
    };

    println!("Seed: {}", session.seed());
    println!("Ticks: {}", session.ticks());
    println!("Tiles on board: {}\n", session.grid().tile_count());
    print!("{}", layout::render(session.grid(), session.spawner()));
}

fn run_fresh(config: &Config, ticks: u64) -> Session {
    let mut session = Session::new(config);
    session.dispatch(Command::StartSpawning);

    let mut placed = 0;
    for _ in 0..ticks {
        match session.tick() {
            TickOutcome::Placed(_) => placed += 1,
            TickOutcome::Exhausted => {
                log::info!("Spiral exhausted after {} placements", placed);
                break;
            }
            TickOutcome::Waiting | TickOutcome::Idle => {}
        }
    }

    session.dispatch(Command::StopSpawning);
    session.dispatch(Command::ClearBoard);

    if let Some(command_log) = session.command_log() {
        if let Err(e) = command_log.save_to_file(&config.logging.command_log_path) {
            log::error!("Failed to save command log: {}", e);
        }
    }
    session
}
