//! Maze files: grid rows made of `X` (wall) and anything else (free), plus
//! one `start X,Y` and one `end X,Y` line.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::LoadError;
use crate::grid::{Cell, Grid, Position};

pub fn load_maze(path: &Path) -> Result<Grid, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match parse_maze(&text) {
        Ok(grid) => {
            info!(
                "Loaded maze {} ({}x{}, start {}, end {})",
                path.display(),
                grid.width,
                grid.height,
                grid.start,
                grid.end
            );
            Ok(grid)
        }
        Err(e) => {
            warn!("Rejected maze {}: {}", path.display(), e);
            Err(e)
        }
    }
}

pub fn parse_maze(text: &str) -> Result<Grid, LoadError> {
    let lines: Vec<&str> = text.lines().map(|l| l.trim_end_matches('\r')).collect();
    if lines.len() < 3 {
        return Err(LoadError::TooShort(lines.len()));
    }

    let mut rows = Vec::new();
    let mut start_line = None;
    let mut end_line = None;

    for line in lines {
        if let Some(rest) = line.strip_prefix("start") {
            start_line = Some(rest);
        } else if let Some(rest) = line.strip_prefix("end") {
            end_line = Some(rest);
        } else {
            // blank lines are rows of free cells
            rows.push(line);
        }
    }

    let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
    let height = rows.len();
    if width == 0 {
        return Err(LoadError::EmptyGrid);
    }
    let start = parse_coordinates(start_line.ok_or(LoadError::MissingStart)?)?;
    let end = parse_coordinates(end_line.ok_or(LoadError::MissingEnd)?)?;

    let cells: Vec<Vec<Cell>> = rows
        .iter()
        .map(|row| {
            let mut cells: Vec<Cell> = row
                .chars()
                .map(|c| if c == 'X' { Cell::Wall } else { Cell::Free })
                .collect();
            cells.resize(width, Cell::Free);
            cells
        })
        .collect();

    for (which, position) in [("start", start), ("end", end)] {
        if position.x >= width || position.y >= height {
            return Err(LoadError::OutOfBounds {
                which,
                position,
                width,
                height,
            });
        }
    }

    // Bounds and row lengths are checked above.
    Grid::from_cells(cells, start, end).ok_or(LoadError::EmptyGrid)
}

/// Parses `" X,Y"` (column, row) with optional whitespace around the comma.
fn parse_coordinates(raw: &str) -> Result<Position, LoadError> {
    let bad = || LoadError::BadCoordinates(raw.trim().to_string());
    let (x, y) = raw.split_once(',').ok_or_else(bad)?;
    let x = x.trim().parse::<usize>().map_err(|_| bad())?;
    let y = y.trim().parse::<usize>().map_err(|_| bad())?;
    Ok(Position { x, y })
}

/// Lists the `*.txt` maze files in `dir`, numeric names in numeric order.
pub fn list_mazes(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "txt"))
        .collect();

    files.sort_by(|a, b| {
        let key = |p: &PathBuf| {
            p.file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| s.parse::<u64>().ok())
        };
        match (key(a), key(b)) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.cmp(b),
        }
    });
    Ok(files)
}
