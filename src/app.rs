//! The interactive menu loop around the search engine, plus the headless
//! single-run mode.

use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use tracing::{info, warn};

use crate::algorithms::Strategy;
use crate::clock::SystemClock;
use crate::config::Config;
use crate::control::{decode_event, faster, slower, CrosstermInput, Input, RunContext, ScriptedInput, SPEED_PRESETS};
use crate::engine::{AbortReason, Outcome, SearchEngine, SearchReport};
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::maze_loader::{list_mazes, load_maze};
use crate::render::{fits, NullRenderer, TerminalRenderer};
use crate::statistics::Statistics;

const MAIN_MENU: [&str; 5] = ["LETS GO!", "Select Maze", "Select Algorithm", "Adjust Speed", "Quit"];
const MENU_HINT: &str = "Navigation: Up/Down | Select: Enter | Back: Q";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuKey {
    Up,
    Down,
    Enter,
    Back,
    ForceQuit,
    Redraw,
}

fn read_menu_key() -> io::Result<MenuKey> {
    loop {
        match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                let menu_key = match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        MenuKey::ForceQuit
                    }
                    KeyCode::Up | KeyCode::Char('k') => MenuKey::Up,
                    KeyCode::Down | KeyCode::Char('j') => MenuKey::Down,
                    KeyCode::Enter => MenuKey::Enter,
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => MenuKey::Back,
                    _ => continue,
                };
                return Ok(menu_key);
            }
            Event::Resize(..) => return Ok(MenuKey::Redraw),
            _ => {}
        }
    }
}

fn wait_for_key() -> io::Result<()> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Release {
                return Ok(());
            }
        }
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Mazes from `--maze-dir`, with `--maze` added and selected when given.
fn collect_mazes(config: &Config) -> Result<(Vec<PathBuf>, usize)> {
    let mut mazes = match list_mazes(&config.maze_dir) {
        Ok(mazes) => mazes,
        Err(e) => {
            warn!("Could not list {}: {}", config.maze_dir.display(), e);
            Vec::new()
        }
    };

    let selected = match &config.maze {
        Some(path) => match mazes.iter().position(|m| m == path) {
            Some(i) => i,
            None => {
                mazes.push(path.clone());
                mazes.len() - 1
            }
        },
        None => 0,
    };

    if mazes.is_empty() {
        return Err(Error::NoMazes(config.maze_dir.clone()));
    }
    Ok((mazes, selected))
}

/// Solves one maze without a terminal UI.
pub fn run_headless(config: &Config) -> Result<(Grid, Statistics)> {
    let (mazes, selected) = collect_mazes(config)?;
    let path = &mazes[selected];
    let mut grid = load_maze(path)?;

    let mut ctx = RunContext::new(config.algorithm, file_label(path), Duration::ZERO);
    ctx.seed = config.seed;

    let mut engine = SearchEngine::new(ScriptedInput::idle(), SystemClock, NullRenderer::default());
    let report = engine.run(config.algorithm, &mut grid, &mut ctx)?;
    let stats = Statistics::new(&grid, &report);
    Ok((grid, stats))
}

pub struct App {
    mazes: Vec<PathBuf>,
    current_maze: usize,
    strategy: Strategy,
    speed: Duration,
    seed: Option<u64>,
    selected: usize,
    renderer: TerminalRenderer<Stdout>,
    quitting: bool,
}

impl App {
    pub fn new(config: &Config) -> Result<Self> {
        let (mazes, current_maze) = collect_mazes(config)?;
        Ok(App {
            mazes,
            current_maze,
            strategy: config.algorithm,
            speed: config.step_delay(),
            seed: config.seed,
            selected: 0,
            renderer: TerminalRenderer::stdout()?,
            quitting: false,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        while !self.quitting {
            self.main_menu()?;
        }
        Ok(())
    }

    fn main_menu(&mut self) -> Result<()> {
        let items: Vec<String> = MAIN_MENU.iter().map(|s| s.to_string()).collect();
        let Some(choice) = self.choose("MAIN MENU", &items, self.selected)? else {
            self.quitting = true;
            return Ok(());
        };
        self.selected = choice;

        match choice {
            0 => self.run_selected()?,
            1 => {
                let items: Vec<String> = self.mazes.iter().map(|m| file_label(m)).collect();
                if let Some(i) = self.choose("SELECT MAZE FILE", &items, self.current_maze)? {
                    self.current_maze = i;
                }
            }
            2 => {
                let items: Vec<String> = Strategy::ALL.iter().map(|s| s.to_string()).collect();
                let current = Strategy::ALL.iter().position(|s| *s == self.strategy).unwrap_or(0);
                if let Some(i) = self.choose("SELECT ALGORITHM", &items, current)? {
                    self.strategy = Strategy::ALL[i];
                }
            }
            3 => {
                let items: Vec<String> = SPEED_PRESETS
                    .iter()
                    .map(|(name, delay)| format!("{} ({}s)", name, delay.as_secs_f64()))
                    .collect();
                let current = SPEED_PRESETS
                    .iter()
                    .position(|(_, d)| *d == self.speed)
                    .unwrap_or(3);
                if let Some(i) = self.choose("SELECT SPEED", &items, current)? {
                    self.speed = SPEED_PRESETS[i].1;
                }
            }
            _ => self.quitting = true,
        }
        Ok(())
    }

    /// Runs a list menu. `None` means the user backed out.
    fn choose(&mut self, title: &str, items: &[String], initial: usize) -> Result<Option<usize>> {
        let mut selected = initial.min(items.len().saturating_sub(1));
        loop {
            self.renderer.draw_menu(title, items, selected, MENU_HINT)?;
            match read_menu_key()? {
                MenuKey::Up => selected = (selected + items.len() - 1) % items.len(),
                MenuKey::Down => selected = (selected + 1) % items.len(),
                MenuKey::Enter => return Ok(Some(selected)),
                MenuKey::Back => return Ok(None),
                MenuKey::ForceQuit => {
                    self.quitting = true;
                    return Ok(None);
                }
                MenuKey::Redraw => {}
            }
        }
    }

    /// Loads, searches and shows results, looping for as long as the user
    /// asks for restarts. Every restart reloads the maze from disk.
    fn run_selected(&mut self) -> Result<()> {
        loop {
            let path = self.mazes[self.current_maze].clone();
            let mut grid = match load_maze(&path) {
                Ok(grid) => grid,
                Err(e) => {
                    let detail = e.to_string();
                    self.renderer.draw_message(&[
                        "Error loading maze file!",
                        &detail,
                        "Press any key to continue...",
                    ])?;
                    wait_for_key()?;
                    return Ok(());
                }
            };

            if !self.wait_for_fit(&grid)? {
                return Ok(());
            }

            let mut ctx = RunContext::new(self.strategy, file_label(&path), self.speed);
            ctx.seed = self.seed;
            self.renderer.clear()?;
            let report = SearchEngine::new(CrosstermInput, SystemClock, &mut self.renderer)
                .run(self.strategy, &mut grid, &mut ctx)?;
            self.speed = ctx.speed;

            if ctx.exit_requested {
                self.quitting = true;
                return Ok(());
            }
            match report.outcome {
                Outcome::Aborted(AbortReason::Restart) => continue,
                Outcome::Aborted(AbortReason::Quit) => return Ok(()),
                Outcome::Found | Outcome::Exhausted => {}
            }

            let stats = Statistics::new(&grid, &report);
            info!("Run finished:\n{}", stats);

            if !self.show_results(&grid, &mut ctx, &report)? {
                return Ok(());
            }
        }
    }

    /// Blocks until the terminal can hold `grid`. Returns false if the user
    /// backs out instead.
    fn wait_for_fit(&mut self, grid: &Grid) -> Result<bool> {
        loop {
            if fits(grid, terminal::size()?) {
                return Ok(true);
            }
            self.renderer.draw_size_prompt(grid)?;
            match decode_event(event::read()?) {
                Input::Quit => return Ok(false),
                Input::ForceQuit => {
                    self.quitting = true;
                    return Ok(false);
                }
                _ => {}
            }
        }
    }

    /// Results screen. Returns true when the user asks for a restart.
    fn show_results(
        &mut self,
        grid: &Grid,
        ctx: &mut RunContext,
        report: &SearchReport,
    ) -> Result<bool> {
        loop {
            self.renderer.draw_results(grid, ctx, report)?;
            match decode_event(event::read()?) {
                Input::Restart => return Ok(true),
                Input::Quit => return Ok(false),
                Input::ForceQuit => {
                    self.quitting = true;
                    return Ok(false);
                }
                Input::SpeedUp => {
                    ctx.speed = faster(ctx.speed);
                    self.speed = ctx.speed;
                }
                Input::SlowDown => {
                    ctx.speed = slower(ctx.speed);
                    self.speed = ctx.speed;
                }
                Input::TogglePause | Input::Resize { .. } | Input::Other => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("maze_pathfinding_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn headless_solves_the_selected_maze() {
        let dir = temp_dir("headless");
        fs::write(dir.join("1.txt"), "X   X\nX X X\nX   X\nstart 1,0\nend 3,2\n").unwrap();
        let dir_arg = dir.to_string_lossy().into_owned();
        let config = Config::parse_from(["maze_pathfinding", "--maze-dir", &dir_arg, "--algorithm", "a-star", "--headless"]);

        let (grid, stats) = run_headless(&config).unwrap();
        assert_eq!(stats.outcome, Outcome::Found);
        assert_eq!(stats.path_length, 4);
        assert_eq!(stats.optimal_path_length, Some(4));
        assert_eq!(grid.count(crate::grid::Cell::Path), 3);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn explicit_maze_is_added_and_selected() {
        let dir = temp_dir("collect");
        fs::write(dir.join("2.txt"), "  \n  \nstart 0,0\nend 1,1\n").unwrap();
        fs::write(dir.join("10.txt"), "  \n  \nstart 0,0\nend 1,1\n").unwrap();
        let dir_arg = dir.to_string_lossy().into_owned();
        let config = Config::parse_from(["maze_pathfinding", "--maze-dir", &dir_arg, "--maze", "elsewhere.txt"]);

        let (mazes, selected) = collect_mazes(&config).unwrap();
        assert_eq!(mazes.len(), 3);
        assert_eq!(file_label(&mazes[0]), "2.txt");
        assert_eq!(file_label(&mazes[1]), "10.txt");
        assert_eq!(mazes[selected], PathBuf::from("elsewhere.txt"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn empty_directory_is_an_error() {
        let dir = temp_dir("empty");
        let dir_arg = dir.to_string_lossy().into_owned();
        let config = Config::parse_from(["maze_pathfinding", "--maze-dir", &dir_arg]);
        assert!(matches!(collect_mazes(&config), Err(Error::NoMazes(_))));
        let _ = fs::remove_dir_all(&dir);
    }
}
