//! Run state and the interrupt controller that turns raw input into the
//! control signals the search engine obeys.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::debug;

use crate::algorithms::Strategy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Paused,
    Finished,
    RestartRequested,
    UserQuit,
}

/// Per-session state shared by the caller, the engine and the controller.
/// The engine treats it as the only channel for external control.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub state: RunState,
    pub speed: Duration,
    pub explored: usize,
    pub strategy: Strategy,
    /// Shown in the status bar, usually the maze file name.
    pub label: String,
    /// Set by a forced quit: leave the whole program, not just the run.
    pub exit_requested: bool,
    pub seed: Option<u64>,
}

impl RunContext {
    pub fn new(strategy: Strategy, label: impl Into<String>, speed: Duration) -> Self {
        RunContext {
            state: RunState::Running,
            speed,
            explored: 0,
            strategy,
            label: label.into(),
            exit_requested: false,
            seed: None,
        }
    }

    /// Fresh per-run state. Speed, strategy and label carry over.
    pub fn reset_for_run(&mut self) {
        self.state = RunState::Running;
        self.explored = 0;
    }

    pub fn is_paused(&self) -> bool {
        self.state == RunState::Paused
    }

    pub fn status_label(&self) -> &'static str {
        match self.state {
            RunState::Running => "RUNNING",
            RunState::Paused => "PAUSED",
            RunState::Finished => "FINISHED",
            RunState::RestartRequested => "RESTARTING",
            RunState::UserQuit => "STOPPED",
        }
    }
}

/// A raw input event, already decoded from whatever the terminal produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Quit,
    /// Quit the run and the program.
    ForceQuit,
    Restart,
    TogglePause,
    SpeedUp,
    SlowDown,
    Resize { cols: u16, rows: u16 },
    Other,
}

/// Non-blocking source of at most one buffered input per poll.
pub trait InputSource {
    fn poll_input(&mut self) -> io::Result<Option<Input>>;
}

impl<T: InputSource + ?Sized> InputSource for &mut T {
    fn poll_input(&mut self) -> io::Result<Option<Input>> {
        (**self).poll_input()
    }
}

/// Reads the terminal through crossterm without blocking.
#[derive(Debug, Default, Clone, Copy)]
pub struct CrosstermInput;

impl InputSource for CrosstermInput {
    fn poll_input(&mut self) -> io::Result<Option<Input>> {
        if !event::poll(Duration::ZERO)? {
            return Ok(None);
        }
        Ok(Some(decode_event(event::read()?)))
    }
}

/// Maps a crossterm event to an [`Input`].
pub fn decode_event(ev: Event) -> Input {
    match ev {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) => {
            if kind == KeyEventKind::Release {
                return Input::Other;
            }
            match code {
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Input::ForceQuit,
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Input::Quit,
                KeyCode::Char('r') | KeyCode::Char('R') => Input::Restart,
                KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Char(' ') => Input::TogglePause,
                KeyCode::Up | KeyCode::Char('+') => Input::SpeedUp,
                KeyCode::Down | KeyCode::Char('-') => Input::SlowDown,
                _ => Input::Other,
            }
        }
        Event::Resize(cols, rows) => Input::Resize { cols, rows },
        _ => Input::Other,
    }
}

/// Replays a fixed list of poll results; `None` entries are empty polls.
/// Once the script runs out every poll is empty.
#[derive(Debug, Default, Clone)]
pub struct ScriptedInput {
    script: VecDeque<Option<Input>>,
    polls: usize,
}

impl ScriptedInput {
    pub fn new(script: impl IntoIterator<Item = Option<Input>>) -> Self {
        ScriptedInput {
            script: script.into_iter().collect(),
            polls: 0,
        }
    }

    /// Never produces input.
    pub fn idle() -> Self {
        ScriptedInput::default()
    }

    pub fn polls(&self) -> usize {
        self.polls
    }
}

impl InputSource for ScriptedInput {
    fn poll_input(&mut self) -> io::Result<Option<Input>> {
        self.polls += 1;
        Ok(self.script.pop_front().flatten())
    }
}

/// What the engine should do after a poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Continue,
    /// Hold the frontier and idle until resumed or aborted.
    Paused,
    /// Abort the run; a restart was requested.
    Stop,
    /// Redraw everything, then continue.
    Resize,
    /// Abort the run; quit wins over a pending restart.
    ImmediateQuit,
}

pub struct InterruptController<I> {
    input: I,
}

impl<I: InputSource> InterruptController<I> {
    pub fn new(input: I) -> Self {
        InterruptController { input }
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    /// Consumes at most one buffered input, applies its side effects to
    /// `ctx` and reports the resulting signal.
    pub fn poll(&mut self, ctx: &mut RunContext) -> io::Result<Signal> {
        let resized = match self.input.poll_input()? {
            Some(input) => apply_input(input, ctx),
            None => false,
        };

        Ok(match ctx.state {
            RunState::UserQuit => Signal::ImmediateQuit,
            RunState::RestartRequested => Signal::Stop,
            _ if resized => Signal::Resize,
            RunState::Paused => Signal::Paused,
            RunState::Running | RunState::Finished => Signal::Continue,
        })
    }
}

/// Returns true when the input was a resize.
fn apply_input(input: Input, ctx: &mut RunContext) -> bool {
    match input {
        Input::Quit => {
            debug!("Quit requested");
            ctx.state = RunState::UserQuit;
        }
        Input::ForceQuit => {
            debug!("Forced quit requested");
            ctx.state = RunState::UserQuit;
            ctx.exit_requested = true;
        }
        Input::Restart => {
            if ctx.state != RunState::UserQuit {
                debug!("Restart requested");
                ctx.state = RunState::RestartRequested;
            }
        }
        Input::TogglePause => match ctx.state {
            RunState::Running => {
                debug!("Paused");
                ctx.state = RunState::Paused;
            }
            RunState::Paused => {
                debug!("Resumed");
                ctx.state = RunState::Running;
            }
            _ => {}
        },
        Input::SpeedUp => {
            ctx.speed = faster(ctx.speed);
            debug!("Speed changed to {:?}", ctx.speed);
        }
        Input::SlowDown => {
            ctx.speed = slower(ctx.speed);
            debug!("Speed changed to {:?}", ctx.speed);
        }
        Input::Resize { cols, rows } => {
            debug!("Terminal resized to {}x{}", cols, rows);
            return true;
        }
        Input::Other => {}
    }
    false
}

/// Step delays reachable with the speed keys, fastest first.
pub const SPEED_STEPS: [Duration; 13] = [
    Duration::from_micros(100),
    Duration::from_micros(500),
    Duration::from_millis(1),
    Duration::from_micros(2_500),
    Duration::from_millis(5),
    Duration::from_millis(10),
    Duration::from_millis(25),
    Duration::from_millis(50),
    Duration::from_millis(100),
    Duration::from_millis(200),
    Duration::from_millis(500),
    Duration::from_secs(1),
    Duration::from_secs(5),
];

/// Named speeds offered by the speed menu.
pub const SPEED_PRESETS: [(&str, Duration); 9] = [
    ("Extremely Slow", Duration::from_secs(5)),
    ("Very Slow", Duration::from_secs(1)),
    ("Slow", Duration::from_millis(500)),
    ("Normal", Duration::from_millis(100)),
    ("Fast", Duration::from_millis(50)),
    ("Very Fast", Duration::from_millis(10)),
    ("Ultra Fast", Duration::from_millis(1)),
    ("Insane", Duration::from_micros(500)),
    ("Ludicrous", Duration::from_micros(100)),
];

pub const MIN_SPEED: Duration = SPEED_STEPS[0];
pub const MAX_SPEED: Duration = SPEED_STEPS[SPEED_STEPS.len() - 1];

/// Next shorter delay on the ladder, or the shortest one.
pub fn faster(current: Duration) -> Duration {
    SPEED_STEPS
        .iter()
        .rev()
        .find(|step| **step < current)
        .copied()
        .unwrap_or(MIN_SPEED)
}

/// Next longer delay on the ladder, or the longest one.
pub fn slower(current: Duration) -> Duration {
    SPEED_STEPS
        .iter()
        .find(|step| **step > current)
        .copied()
        .unwrap_or(MAX_SPEED)
}

/// Converts a delay in seconds into a step delay within the supported range.
pub fn speed_from_secs(secs: f64) -> Duration {
    if !secs.is_finite() {
        return MAX_SPEED;
    }
    Duration::from_secs_f64(secs.clamp(0.0, MAX_SPEED.as_secs_f64())).max(MIN_SPEED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn ctx() -> RunContext {
        RunContext::new(Strategy::Bfs, "test", Duration::from_millis(100))
    }

    fn controller(script: Vec<Option<Input>>) -> InterruptController<ScriptedInput> {
        InterruptController::new(ScriptedInput::new(script))
    }

    #[test]
    fn empty_poll_continues() {
        let mut ctx = ctx();
        let mut c = controller(vec![None]);
        assert_eq!(c.poll(&mut ctx).unwrap(), Signal::Continue);
        assert_eq!(c.input().polls(), 1);
    }

    #[test]
    fn pause_is_sticky_until_toggled() {
        let mut ctx = ctx();
        let mut c = controller(vec![Some(Input::TogglePause), None, Some(Input::TogglePause)]);
        assert_eq!(c.poll(&mut ctx).unwrap(), Signal::Paused);
        assert_eq!(c.poll(&mut ctx).unwrap(), Signal::Paused);
        assert_eq!(c.poll(&mut ctx).unwrap(), Signal::Continue);
        assert_eq!(ctx.state, RunState::Running);
    }

    #[test]
    fn restart_stops_and_records_the_cause() {
        let mut ctx = ctx();
        let mut c = controller(vec![Some(Input::Restart), None]);
        assert_eq!(c.poll(&mut ctx).unwrap(), Signal::Stop);
        assert_eq!(ctx.state, RunState::RestartRequested);
        assert_eq!(c.poll(&mut ctx).unwrap(), Signal::Stop);
    }

    #[test]
    fn quit_wins_over_a_pending_restart() {
        let mut ctx = ctx();
        let mut c = controller(vec![
            Some(Input::Restart),
            Some(Input::Quit),
            Some(Input::Restart),
        ]);
        assert_eq!(c.poll(&mut ctx).unwrap(), Signal::Stop);
        assert_eq!(c.poll(&mut ctx).unwrap(), Signal::ImmediateQuit);
        assert_eq!(c.poll(&mut ctx).unwrap(), Signal::ImmediateQuit);
        assert_eq!(ctx.state, RunState::UserQuit);
        assert!(!ctx.exit_requested);
    }

    #[test]
    fn force_quit_requests_exit() {
        let mut ctx = ctx();
        let mut c = controller(vec![Some(Input::ForceQuit)]);
        assert_eq!(c.poll(&mut ctx).unwrap(), Signal::ImmediateQuit);
        assert!(ctx.exit_requested);
    }

    #[test]
    fn resize_is_reported_even_while_paused() {
        let mut ctx = ctx();
        ctx.state = RunState::Paused;
        let mut c = controller(vec![Some(Input::Resize { cols: 80, rows: 24 }), None]);
        assert_eq!(c.poll(&mut ctx).unwrap(), Signal::Resize);
        assert_eq!(c.poll(&mut ctx).unwrap(), Signal::Paused);
    }

    #[test]
    fn speed_keys_change_speed_without_signalling() {
        let mut ctx = ctx();
        let mut c = controller(vec![Some(Input::SpeedUp), Some(Input::SlowDown), Some(Input::SlowDown)]);
        assert_eq!(c.poll(&mut ctx).unwrap(), Signal::Continue);
        assert_eq!(ctx.speed, Duration::from_millis(50));
        assert_eq!(c.poll(&mut ctx).unwrap(), Signal::Continue);
        assert_eq!(ctx.speed, Duration::from_millis(100));
        c.poll(&mut ctx).unwrap();
        assert_eq!(ctx.speed, Duration::from_millis(200));
    }

    #[test]
    fn speed_ladder_saturates_at_both_ends() {
        assert_eq!(faster(MIN_SPEED), MIN_SPEED);
        assert_eq!(slower(MAX_SPEED), MAX_SPEED);
        assert_eq!(faster(Duration::from_millis(3)), Duration::from_micros(2_500));
        assert_eq!(slower(Duration::from_millis(3)), Duration::from_millis(5));
    }

    #[test]
    fn speed_from_secs_clamps() {
        assert_eq!(speed_from_secs(0.1), Duration::from_millis(100));
        assert_eq!(speed_from_secs(0.0), MIN_SPEED);
        assert_eq!(speed_from_secs(60.0), MAX_SPEED);
        assert_eq!(speed_from_secs(f64::NAN), MAX_SPEED);
    }

    #[test]
    fn decodes_keys() {
        let key = |code, modifiers| {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                state: KeyEventState::NONE,
            })
        };
        assert_eq!(decode_event(key(KeyCode::Char('q'), KeyModifiers::NONE)), Input::Quit);
        assert_eq!(
            decode_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Input::ForceQuit
        );
        assert_eq!(decode_event(key(KeyCode::Char('p'), KeyModifiers::NONE)), Input::TogglePause);
        assert_eq!(decode_event(key(KeyCode::Up, KeyModifiers::NONE)), Input::SpeedUp);
        assert_eq!(decode_event(key(KeyCode::Char('x'), KeyModifiers::NONE)), Input::Other);
        assert_eq!(
            decode_event(Event::Resize(100, 40)),
            Input::Resize { cols: 100, rows: 40 }
        );
    }
}
