use clap::Parser;

use maze_pathfinding::app::{run_headless, App};
use maze_pathfinding::config::Config;
use maze_pathfinding::terminal::TerminalSession;
use std::fs::File;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

fn init_logging(config: &Config) -> std::io::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("maze_pathfinding=info"));

    if let Some(path) = &config.log_file {
        let file = File::create(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if config.headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
    // Interactive mode without a log file: the screen belongs to the UI.
    Ok(())
}

fn main() {
    let config = Config::parse();

    if let Err(e) = init_logging(&config) {
        eprintln!("Could not open log file: {}", e);
        std::process::exit(1);
    }

    if config.headless {
        match run_headless(&config) {
            Ok((grid, stats)) => {
                println!("=== SEARCH COMPLETE ===");
                print!("{}", grid);
                println!();
                println!("{}", stats);
            }
            Err(e) => {
                eprintln!("Search failed: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    let result = match TerminalSession::enter() {
        Ok(mut session) => {
            let result = App::new(&config).and_then(|mut app| app.run());
            session.leave();
            result
        }
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
