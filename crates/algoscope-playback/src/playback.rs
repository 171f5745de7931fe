//! Playback controller for a recorded trace.
//!
//! The controller owns the trace, the cursor and at most one pending tick.
//! The cursor ranges over `0..=len`: 0 means nothing shown yet, `len` means
//! finished, and the current step is `steps[cursor - 1]`.

use algoscope_core::{Trace, TraceStep};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::config::{PlaybackConfig, TickDelay};
use crate::error::{PlaybackError, Result};
use crate::scheduler::{Scheduler, TickToken};
use crate::status::{PlaybackState, PlaybackStats, PlaybackStatus};

/// Regenerates the trace after it was invalidated.
pub type TraceSource = Box<dyn FnMut() -> algoscope_core::Result<Trace> + Send>;

/// Playback controller over a scheduler `S`.
pub struct Playback<S: Scheduler> {
    trace: Option<Trace>,
    cursor: usize,
    state: PlaybackState,
    delay: TickDelay,
    scheduler: S,
    pending: Option<TickToken>,
    generation: u64,
    source: Option<TraceSource>,
    status: watch::Sender<PlaybackStatus>,
}

impl<S: Scheduler> Playback<S> {
    /// Create an idle controller.
    pub fn new(scheduler: S, config: PlaybackConfig) -> Self {
        let (status, _) = watch::channel(PlaybackStatus {
            delay_ms: config.delay.as_millis(),
            ..PlaybackStatus::default()
        });
        Self {
            trace: None,
            cursor: 0,
            state: PlaybackState::Idle,
            delay: config.delay,
            scheduler,
            pending: None,
            generation: 0,
            source: None,
            status,
        }
    }

    /// Register the closure that rebuilds the trace when play or step is
    /// requested with no trace loaded.
    pub fn set_source<F>(&mut self, source: F)
    where
        F: FnMut() -> algoscope_core::Result<Trace> + Send + 'static,
    {
        self.source = Some(Box::new(source));
    }

    /// Load a new trace: any state to `Ready`, cursor 0, pending tick dropped.
    pub fn load_trace(&mut self, trace: Trace) {
        self.cancel_tick();
        info!(
            algorithm = trace.algorithm().info().name,
            steps = trace.len(),
            "trace loaded"
        );
        self.trace = Some(trace);
        self.cursor = 0;
        self.transition(PlaybackState::Ready);
    }

    /// Drop the trace and any pending tick. The next play or step
    /// regenerates the trace through the registered source.
    pub fn invalidate(&mut self) {
        self.cancel_tick();
        self.trace = None;
        self.cursor = 0;
        self.transition(PlaybackState::Idle);
    }

    /// Start advancing the cursor on the tick timer.
    ///
    /// With nothing left to show, goes straight to `Finished` and schedules
    /// nothing.
    pub fn play(&mut self) -> Result<()> {
        if self.state == PlaybackState::Playing {
            return Ok(());
        }
        let len = self.ensure_trace()?.len();
        if self.cursor >= len {
            self.transition(PlaybackState::Finished);
            return Ok(());
        }
        self.transition(PlaybackState::Playing);
        self.schedule_tick();
        Ok(())
    }

    /// Stop advancing. Idempotent outside `Playing`.
    pub fn pause(&mut self) {
        if self.state != PlaybackState::Playing {
            return;
        }
        self.cancel_tick();
        self.transition(PlaybackState::Paused);
    }

    /// Advance the cursor by one step. Ignored while playing.
    pub fn step(&mut self) -> Result<Option<&TraceStep>> {
        if self.state == PlaybackState::Playing {
            return Ok(self.current());
        }
        let len = self.ensure_trace()?.len();
        if self.cursor < len {
            self.cursor += 1;
            self.settle(len);
        }
        Ok(self.current())
    }

    /// Move the cursor back by one step. Ignored while playing.
    pub fn step_back(&mut self) -> Option<&TraceStep> {
        if self.state == PlaybackState::Playing || self.trace.is_none() {
            return self.current();
        }
        if self.cursor > 0 {
            self.cursor -= 1;
            let len = self.len();
            self.settle(len);
        }
        self.current()
    }

    /// Jump to `cursor`, clamped to the trace length. Stops playback.
    pub fn seek(&mut self, cursor: usize) -> Option<&TraceStep> {
        if self.trace.is_none() {
            return None;
        }
        self.cancel_tick();
        let len = self.len();
        self.cursor = cursor.min(len);
        self.settle(len);
        self.current()
    }

    /// Back to the start of the loaded trace.
    pub fn reset(&mut self) {
        self.cancel_tick();
        self.cursor = 0;
        if self.trace.is_some() {
            self.transition(PlaybackState::Ready);
        } else {
            self.publish();
        }
    }

    /// Change the tick delay. A tick that is already pending keeps its
    /// original deadline; the new delay applies from the next one.
    pub fn set_delay(&mut self, delay: TickDelay) {
        debug!(delay_ms = delay.as_millis(), "tick delay changed");
        self.delay = delay;
        self.publish();
    }

    /// Handle a tick from the scheduler.
    ///
    /// Returns `false` for a tick that is no longer expected: one that was
    /// cancelled by pause, reset, seek or a new trace while in flight.
    pub fn tick(&mut self, token: TickToken) -> bool {
        if self.state != PlaybackState::Playing || self.pending != Some(token) {
            debug!(?token, "stale tick ignored");
            return false;
        }
        self.pending = None;
        let len = self.len();
        self.cursor = (self.cursor + 1).min(len);
        if self.cursor >= len {
            self.transition(PlaybackState::Finished);
        } else {
            self.schedule_tick();
            self.publish();
        }
        true
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn delay(&self) -> TickDelay {
        self.delay
    }

    pub fn trace(&self) -> Option<&Trace> {
        self.trace.as_ref()
    }

    /// Number of steps in the loaded trace.
    pub fn len(&self) -> usize {
        self.trace.as_ref().map_or(0, Trace::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The step at the cursor, or `None` at cursor 0.
    pub fn current(&self) -> Option<&TraceStep> {
        let trace = self.trace.as_ref()?;
        self.cursor.checked_sub(1).and_then(|i| trace.get(i))
    }

    pub fn stats(&self) -> PlaybackStats {
        self.trace
            .as_ref()
            .map(|trace| PlaybackStats::consumed(trace, self.cursor))
            .unwrap_or_default()
    }

    pub fn status(&self) -> PlaybackStatus {
        PlaybackStatus {
            state: self.state,
            cursor: self.cursor,
            total: self.len(),
            delay_ms: self.delay.as_millis(),
            current: self.current().cloned(),
            stats: self.stats(),
        }
    }

    /// Receive every status change from now on.
    pub fn subscribe(&self) -> watch::Receiver<PlaybackStatus> {
        self.status.subscribe()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    fn ensure_trace(&mut self) -> Result<&Trace> {
        if self.trace.is_none() {
            let source = self.source.as_mut().ok_or(PlaybackError::NoTrace)?;
            let trace = source()?;
            self.load_trace(trace);
        }
        self.trace.as_ref().ok_or(PlaybackError::NoTrace)
    }

    /// Pick the resting state for the cursor after a manual move.
    fn settle(&mut self, len: usize) {
        let state = if self.cursor == 0 {
            PlaybackState::Ready
        } else if self.cursor >= len {
            PlaybackState::Finished
        } else {
            PlaybackState::Paused
        };
        self.transition(state);
    }

    fn schedule_tick(&mut self) {
        self.generation += 1;
        let token = TickToken(self.generation);
        self.pending = Some(token);
        self.scheduler.schedule(self.delay.duration(), token);
    }

    fn cancel_tick(&mut self) {
        if self.pending.take().is_some() {
            self.scheduler.cancel();
        }
    }

    fn transition(&mut self, state: PlaybackState) {
        if self.state != state {
            debug!(from = ?self.state, to = ?state, cursor = self.cursor, "playback state");
            self.state = state;
        }
        self.publish();
    }

    fn publish(&self) {
        let status = self.status();
        self.status.send_replace(status);
    }
}
