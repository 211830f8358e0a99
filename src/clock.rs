//! Animation pacing. A step delay is split into short polling ticks so the
//! controller is consulted at least every [`TICK_CEILING`], however long the
//! configured delay.

use std::io;
use std::thread;
use std::time::Duration;

use crate::control::{InputSource, InterruptController, RunContext, Signal};
use crate::grid::Grid;
use crate::render::Renderer;

/// Longest sleep between two polls.
pub const TICK_CEILING: Duration = Duration::from_millis(10);

/// Sleep between polls while paused.
pub const PAUSE_IDLE: Duration = Duration::from_millis(10);

pub trait Clock {
    fn sleep(&mut self, duration: Duration);
}

impl<T: Clock + ?Sized> Clock for &mut T {
    fn sleep(&mut self, duration: Duration) {
        (**self).sleep(duration)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn sleep(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Records sleeps instead of performing them.
#[derive(Debug, Default, Clone)]
pub struct ManualClock {
    pub elapsed: Duration,
    pub sleeps: Vec<Duration>,
}

impl Clock for ManualClock {
    fn sleep(&mut self, duration: Duration) {
        self.elapsed += duration;
        self.sleeps.push(duration);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wait {
    /// The full delay passed, or the run was resumed.
    Elapsed,
    /// A stop or quit was observed; the run must end.
    Aborted,
}

/// Tick length for `delay`: a quarter of the delay, capped at [`TICK_CEILING`].
pub fn tick_for(delay: Duration) -> Duration {
    (delay / 4).clamp(Duration::from_nanos(1), TICK_CEILING)
}

pub struct AnimationClock<C> {
    clock: C,
}

impl<C: Clock> AnimationClock<C> {
    pub fn new(clock: C) -> Self {
        AnimationClock { clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Waits out one step delay while polling the controller every tick.
    /// Resizes are redrawn in place; pause is left for the next step poll.
    pub fn wait<I, R>(
        &mut self,
        delay: Duration,
        controller: &mut InterruptController<I>,
        renderer: &mut R,
        grid: &Grid,
        ctx: &mut RunContext,
    ) -> io::Result<Wait>
    where
        I: InputSource,
        R: Renderer,
    {
        if delay.is_zero() {
            return Ok(Wait::Elapsed);
        }

        let tick = tick_for(delay);
        let mut waited = Duration::ZERO;
        while waited < delay {
            match controller.poll(ctx)? {
                Signal::Stop | Signal::ImmediateQuit => return Ok(Wait::Aborted),
                Signal::Resize => renderer.redraw(grid, ctx)?,
                Signal::Paused | Signal::Continue => {}
            }
            let step = tick.min(delay - waited);
            self.clock.sleep(step);
            waited += step;
        }
        Ok(Wait::Elapsed)
    }

    /// Idles while the run is paused. Returns once it is resumed or aborted.
    pub fn await_resume<I, R>(
        &mut self,
        controller: &mut InterruptController<I>,
        renderer: &mut R,
        grid: &Grid,
        ctx: &mut RunContext,
    ) -> io::Result<Wait>
    where
        I: InputSource,
        R: Renderer,
    {
        renderer.draw(grid, ctx)?;
        loop {
            self.clock.sleep(PAUSE_IDLE);
            match controller.poll(ctx)? {
                Signal::Stop | Signal::ImmediateQuit => return Ok(Wait::Aborted),
                Signal::Resize => renderer.redraw(grid, ctx)?,
                Signal::Paused => {}
                Signal::Continue => {
                    renderer.draw(grid, ctx)?;
                    return Ok(Wait::Elapsed);
                }
            }
        }
    }
}
