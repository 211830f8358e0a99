//! Drawing. The engine only sees the [`Renderer`] trait; the interactive
//! application uses the crossterm-backed [`TerminalRenderer`].

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::control::RunContext;
use crate::engine::{Outcome, SearchReport};
use crate::grid::{Cell, Grid};

pub const TITLE: &str = "Maze Pathfinding Visualizer";
pub const RUN_CONTROLS: &str = "Controls: Q=Quit, P=Pause, R=Restart, Up/Down=Speed";
pub const RESULT_CONTROLS: &str = "Controls: R=Restart, Q=Menu, Up/Down=Speed";

/// Display-only sink for search snapshots. Implementations must not touch
/// search state.
pub trait Renderer {
    /// Draws the grid and status line after a step.
    fn draw(&mut self, grid: &Grid, ctx: &RunContext) -> io::Result<()>;

    /// Clears the screen and draws everything again, e.g. after a resize.
    fn redraw(&mut self, grid: &Grid, ctx: &RunContext) -> io::Result<()>;
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn draw(&mut self, grid: &Grid, ctx: &RunContext) -> io::Result<()> {
        (**self).draw(grid, ctx)
    }

    fn redraw(&mut self, grid: &Grid, ctx: &RunContext) -> io::Result<()> {
        (**self).redraw(grid, ctx)
    }
}

/// Discards frames and only counts them.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer {
    pub draws: usize,
    pub redraws: usize,
}

impl Renderer for NullRenderer {
    fn draw(&mut self, _grid: &Grid, _ctx: &RunContext) -> io::Result<()> {
        self.draws += 1;
        Ok(())
    }

    fn redraw(&mut self, _grid: &Grid, _ctx: &RunContext) -> io::Result<()> {
        self.redraws += 1;
        Ok(())
    }
}

/// Columns and rows needed to show `grid` with the header and status lines.
pub fn required_size(grid: &Grid) -> (u16, u16) {
    let cols = grid.width.saturating_add(4).min(u16::MAX as usize) as u16;
    let rows = grid.height.saturating_add(8).min(u16::MAX as usize) as u16;
    (cols, rows)
}

pub fn fits(grid: &Grid, size: (u16, u16)) -> bool {
    let (need_cols, need_rows) = required_size(grid);
    size.0 >= need_cols && size.1 >= need_rows
}

fn cell_color(cell: Cell) -> Color {
    match cell {
        Cell::Free => Color::Reset,
        Cell::Wall => Color::Cyan,
        Cell::Start | Cell::Path => Color::Green,
        Cell::End => Color::Red,
        Cell::Visited => Color::Yellow,
    }
}

pub fn format_speed(ctx: &RunContext) -> String {
    format!("{:.4}s", ctx.speed.as_secs_f64())
}

pub fn status_line(ctx: &RunContext) -> String {
    format!(
        "Algorithm: {} | File: {} | Explored: {} | Speed: {} | Status: {}",
        ctx.strategy,
        ctx.label,
        ctx.explored,
        format_speed(ctx),
        ctx.status_label()
    )
}

pub fn result_line(report: &SearchReport) -> String {
    match report.outcome {
        Outcome::Found => format!(
            "Completed! Length: {} nodes | Explored: {}",
            report.path.len(),
            report.explored
        ),
        Outcome::Exhausted => format!("No path! Explored: {}", report.explored),
        Outcome::Aborted(reason) => format!("Aborted ({}). Explored: {}", reason, report.explored),
    }
}

/// Writes frames to a terminal (or any writer) with crossterm commands.
pub struct TerminalRenderer<W: Write> {
    out: W,
    size: (u16, u16),
    track_terminal: bool,
}

impl TerminalRenderer<io::Stdout> {
    /// Renders to stdout, following the real terminal size.
    pub fn stdout() -> io::Result<Self> {
        Ok(TerminalRenderer {
            out: io::stdout(),
            size: terminal::size()?,
            track_terminal: true,
        })
    }
}

impl<W: Write> TerminalRenderer<W> {
    /// Renders to `out` as if the screen were `cols` x `rows`.
    pub fn with_size(out: W, cols: u16, rows: u16) -> Self {
        TerminalRenderer {
            out,
            size: (cols, rows),
            track_terminal: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn refresh_size(&mut self) -> io::Result<()> {
        if self.track_terminal {
            self.size = terminal::size()?;
        }
        Ok(())
    }

    pub fn clear(&mut self) -> io::Result<()> {
        self.refresh_size()?;
        queue!(self.out, ResetColor, Clear(ClearType::All))?;
        self.draw_header()
    }

    fn draw_header(&mut self) -> io::Result<()> {
        let cols = self.size.0 as usize;
        let title_x = cols.saturating_sub(TITLE.len()) / 2;
        queue!(
            self.out,
            cursor::MoveTo(0, 0),
            SetAttribute(Attribute::Reverse),
            SetAttribute(Attribute::Bold),
            Print(" ".repeat(cols)),
            cursor::MoveTo(title_x as u16, 0),
            Print(TITLE),
            SetAttribute(Attribute::Reset)
        )
    }

    fn print_at(&mut self, x: u16, y: u16, color: Color, text: &str) -> io::Result<()> {
        let cols = self.size.0 as usize;
        let clipped: String = text.chars().take(cols.saturating_sub(x as usize)).collect();
        queue!(
            self.out,
            cursor::MoveTo(x, y),
            Clear(ClearType::CurrentLine),
            SetForegroundColor(color),
            Print(clipped),
            ResetColor
        )
    }

    fn draw_maze(&mut self, grid: &Grid) -> io::Result<()> {
        let (cols, rows) = self.size;
        let area = (rows as usize).saturating_sub(8);
        let x0 = (cols as usize).saturating_sub(grid.width) / 2;
        let y0 = 2 + area.saturating_sub(grid.height) / 2;

        for (y, row) in grid.cells.iter().enumerate() {
            queue!(self.out, cursor::MoveTo(x0 as u16, (y0 + y) as u16))?;
            let mut current = None;
            for &cell in row {
                let color = cell_color(cell);
                if current != Some(color) {
                    queue!(self.out, SetForegroundColor(color))?;
                    current = Some(color);
                }
                queue!(self.out, Print(cell.symbol()))?;
            }
        }
        queue!(self.out, ResetColor)
    }

    fn draw_status(&mut self, ctx: &RunContext) -> io::Result<()> {
        let rows = self.size.1;
        self.print_at(1, rows.saturating_sub(3), Color::White, &status_line(ctx))?;
        self.print_at(2, rows.saturating_sub(1), Color::Cyan, RUN_CONTROLS)
    }

    /// Overlays the outcome of a finished run on the current frame.
    pub fn draw_results(
        &mut self,
        grid: &Grid,
        ctx: &RunContext,
        report: &SearchReport,
    ) -> io::Result<()> {
        self.clear()?;
        self.draw_maze(grid)?;
        self.draw_status(ctx)?;
        let color = if report.found() { Color::Green } else { Color::Red };
        self.print_at(2, 1, color, &result_line(report))?;
        let rows = self.size.1;
        self.print_at(2, rows.saturating_sub(1), Color::Cyan, RESULT_CONTROLS)?;
        self.out.flush()
    }

    /// A centred list with the selected entry highlighted.
    pub fn draw_menu(
        &mut self,
        title: &str,
        items: &[String],
        selected: usize,
        hint: &str,
    ) -> io::Result<()> {
        self.clear()?;
        let (cols, rows) = self.size;
        let width = items
            .iter()
            .map(|i| i.chars().count() + 4)
            .chain(std::iter::once(title.len()))
            .max()
            .unwrap_or(0);
        let x = ((cols as usize).saturating_sub(width) / 2) as u16;
        let height = items.len() * 2 + 2;
        let mut y = ((rows as usize).saturating_sub(height) / 2).max(2) as u16;

        queue!(
            self.out,
            cursor::MoveTo(x, y),
            SetAttribute(Attribute::Bold),
            Print(title),
            SetAttribute(Attribute::Reset)
        )?;
        y += 2;
        for (i, item) in items.iter().enumerate() {
            let line = if i == selected {
                format!("> {} <", item)
            } else {
                format!("  {}  ", item)
            };
            if i == selected {
                queue!(self.out, SetAttribute(Attribute::Reverse))?;
            }
            queue!(self.out, cursor::MoveTo(x, y), Print(line), SetAttribute(Attribute::Reset))?;
            y += 2;
        }
        self.print_at(0, rows.saturating_sub(1), Color::Cyan, hint)?;
        self.out.flush()
    }

    pub fn draw_message(&mut self, lines: &[&str]) -> io::Result<()> {
        self.clear()?;
        let (cols, rows) = self.size;
        let y0 = (rows as usize / 2).saturating_sub(lines.len() / 2);
        for (i, line) in lines.iter().enumerate() {
            let x = (cols as usize).saturating_sub(line.len()) / 2;
            self.print_at(x as u16, (y0 + i) as u16, Color::Reset, line)?;
        }
        self.out.flush()
    }

    /// Shown while the terminal is too small for the loaded grid.
    pub fn draw_size_prompt(&mut self, grid: &Grid) -> io::Result<()> {
        let (need_cols, need_rows) = required_size(grid);
        let (cols, rows) = self.size;
        let need = format!("Need at least {}x{}, have {}x{}.", need_cols, need_rows, cols, rows);
        self.draw_message(&[
            "Terminal too small for this maze.",
            &need,
            "Resize the window, or press Q to go back.",
        ])
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn draw(&mut self, grid: &Grid, ctx: &RunContext) -> io::Result<()> {
        self.draw_maze(grid)?;
        self.draw_status(ctx)?;
        self.out.flush()
    }

    fn redraw(&mut self, grid: &Grid, ctx: &RunContext) -> io::Result<()> {
        self.clear()?;
        self.draw(grid, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::Strategy;
    use crate::maze_loader::parse_maze;
    use std::time::Duration;

    fn grid() -> Grid {
        parse_maze("XXXX\nX  X\nXXXX\nstart 1,1\nend 2,1\n").unwrap()
    }

    #[test]
    fn size_requirement_leaves_room_for_status() {
        let g = grid();
        assert_eq!(required_size(&g), (8, 11));
        assert!(fits(&g, (8, 11)));
        assert!(!fits(&g, (7, 11)));
        assert!(!fits(&g, (80, 10)));
    }

    #[test]
    fn status_line_reports_run_state() {
        let mut ctx = RunContext::new(Strategy::AStar, "5.txt", Duration::from_millis(100));
        ctx.explored = 12;
        assert_eq!(
            status_line(&ctx),
            "Algorithm: A* | File: 5.txt | Explored: 12 | Speed: 0.1000s | Status: RUNNING"
        );
    }

    #[test]
    fn terminal_renderer_writes_cells_and_status() {
        let ctx = RunContext::new(Strategy::Bfs, "tiny", Duration::from_millis(10));
        let mut r = TerminalRenderer::with_size(Vec::new(), 40, 20);
        r.redraw(&grid(), &ctx).unwrap();
        let out = String::from_utf8(r.into_inner()).unwrap();
        assert!(out.contains(TITLE));
        assert!(out.contains('S'));
        assert!(out.contains('E'));
        assert!(out.contains("Algorithm: BFS | File: tiny"));
    }

    #[test]
    fn null_renderer_counts() {
        let ctx = RunContext::new(Strategy::Bfs, "", Duration::ZERO);
        let mut r = NullRenderer::default();
        r.draw(&grid(), &ctx).unwrap();
        r.redraw(&grid(), &ctx).unwrap();
        r.draw(&grid(), &ctx).unwrap();
        assert_eq!((r.draws, r.redraws), (2, 1));
    }
}
