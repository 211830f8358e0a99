use crate::algorithms::common::ParentMap;
use crate::algorithms::path::reconstruct_path;
use crate::algorithms::Strategy;
use crate::clock::{AnimationClock, Clock, Wait};
use crate::control::{InputSource, InterruptController, RunContext, RunState, Signal};
use crate::error::Result;
use crate::grid::{Grid, Position};
use crate::render::Renderer;
use rustc_hash::FxHashSet;
use std::collections::hash_map::Entry;
use std::fmt;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    Quit,
    Restart,
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbortReason::Quit => f.write_str("quit"),
            AbortReason::Restart => f.write_str("restart"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The end cell was popped; the path is set.
    Found,
    /// The frontier emptied without reaching the end.
    Exhausted,
    /// The user stopped the run before it finished.
    Aborted(AbortReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    pub strategy: Strategy,
    pub outcome: Outcome,
    /// Start to end inclusive; empty unless the outcome is `Found`.
    pub path: Vec<Position>,
    pub explored: usize,
    /// Parent pointers handed out, the start's sentinel excluded. Each cell
    /// is discovered at most once, so this is also the number of discovered
    /// cells.
    pub discovered: usize,
}

impl SearchReport {
    pub fn found(&self) -> bool {
        self.outcome == Outcome::Found
    }

    /// Number of moves along the path.
    pub fn path_length(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Drives one frontier strategy over a grid, interleaving search steps with
/// input polling, rendering and pacing.
pub struct SearchEngine<I, C, R> {
    controller: InterruptController<I>,
    clock: AnimationClock<C>,
    renderer: R,
}

impl<I, C, R> SearchEngine<I, C, R>
where
    I: InputSource,
    C: Clock,
    R: Renderer,
{
    pub fn new(input: I, clock: C, renderer: R) -> Self {
        SearchEngine {
            controller: InterruptController::new(input),
            clock: AnimationClock::new(clock),
            renderer,
        }
    }

    pub fn clock(&self) -> &AnimationClock<C> {
        &self.clock
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Runs `strategy` from `grid.start` to `grid.end`, mutating `grid` with
    /// visited and path markers. `ctx.speed` is read before every delay so
    /// speed changes take effect on the next step.
    ///
    /// Errors only come from the input source or the renderer. A missing
    /// path and a user abort are both ordinary outcomes.
    pub fn run(
        &mut self,
        strategy: Strategy,
        grid: &mut Grid,
        ctx: &mut RunContext,
    ) -> Result<SearchReport> {
        let start = grid.start;
        let end = grid.end;
        info!(
            "Starting {} on {}x{} grid from {} to {}",
            strategy, grid.width, grid.height, start, end
        );

        ctx.strategy = strategy;
        ctx.reset_for_run();

        let mut frontier = strategy.frontier(end, ctx.seed);
        let mut parents = ParentMap::default();
        let mut processed: FxHashSet<Position> = FxHashSet::default();
        let mut discovered = Vec::with_capacity(4);
        let mut assigned = 0;

        frontier.seed(start);
        parents.insert(start, start);
        self.renderer.draw(grid, ctx)?;

        while !frontier.is_empty() {
            match self.controller.poll(ctx)? {
                Signal::ImmediateQuit | Signal::Stop => {
                    return Ok(aborted(strategy, ctx, assigned))
                }
                Signal::Paused => {
                    if self.clock.await_resume(&mut self.controller, &mut self.renderer, grid, ctx)?
                        == Wait::Aborted
                    {
                        return Ok(aborted(strategy, ctx, assigned));
                    }
                    continue;
                }
                Signal::Resize => {
                    self.renderer.redraw(grid, ctx)?;
                    if ctx.is_paused() {
                        continue;
                    }
                }
                Signal::Continue => {}
            }

            let Some(current) = frontier.pop() else {
                break;
            };

            if current == end {
                let path = reconstruct_path(&parents, end);
                grid.mark_path(&path);
                ctx.state = RunState::Finished;
                self.renderer.draw(grid, ctx)?;
                info!(
                    "{} found a path of {} moves after exploring {} cells",
                    strategy,
                    path.len().saturating_sub(1),
                    ctx.explored
                );
                return Ok(SearchReport {
                    strategy,
                    outcome: Outcome::Found,
                    path,
                    explored: ctx.explored,
                    discovered: assigned,
                });
            }

            if grid.is_wall(current) || !processed.insert(current) {
                continue;
            }
            grid.mark_visited(current);
            ctx.explored += 1;

            discovered.clear();
            for neighbor in grid.get_neighbors(&current) {
                if let Entry::Vacant(slot) = parents.entry(neighbor) {
                    slot.insert(current);
                    discovered.push(neighbor);
                }
            }
            assigned += discovered.len();
            frontier.extend(current, &discovered);

            self.renderer.draw(grid, ctx)?;
            let delay = ctx.speed;
            if self
                .clock
                .wait(delay, &mut self.controller, &mut self.renderer, grid, ctx)?
                == Wait::Aborted
            {
                return Ok(aborted(strategy, ctx, assigned));
            }
        }

        ctx.state = RunState::Finished;
        self.renderer.draw(grid, ctx)?;
        info!(
            "{} exhausted the frontier after exploring {} cells",
            strategy, ctx.explored
        );
        Ok(SearchReport {
            strategy,
            outcome: Outcome::Exhausted,
            path: Vec::new(),
            explored: ctx.explored,
            discovered: assigned,
        })
    }
}

fn aborted(strategy: Strategy, ctx: &RunContext, discovered: usize) -> SearchReport {
    let reason = if ctx.state == RunState::RestartRequested {
        AbortReason::Restart
    } else {
        AbortReason::Quit
    };
    debug!("{} aborted ({}) after exploring {} cells", strategy, reason, ctx.explored);
    SearchReport {
        strategy,
        outcome: Outcome::Aborted(reason),
        path: Vec::new(),
        explored: ctx.explored,
        discovered,
    }
}
