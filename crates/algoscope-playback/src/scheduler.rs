//! Cancellable one-shot tick scheduling.
//!
//! A [`Scheduler`] holds at most one pending tick. Scheduling replaces the
//! pending tick; cancelling drops it. Every tick carries the [`TickToken`]
//! it was scheduled with, and the controller ignores tokens it is no longer
//! waiting for, so a tick that was already in flight when it got
//! cancelled cannot move the cursor.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Identifies one scheduled tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickToken(pub(crate) u64);

/// A cancellable delayed-task primitive.
pub trait Scheduler: Send {
    /// Deliver `token` after `delay`, replacing any pending tick.
    fn schedule(&mut self, delay: Duration, token: TickToken);

    /// Drop the pending tick, if any.
    fn cancel(&mut self);

    /// Whether a tick is waiting to fire.
    fn is_pending(&self) -> bool;
}

/// Virtual clock for deterministic tests and headless stepping.
///
/// Nothing fires on its own: [`ManualScheduler::advance`] moves the clock
/// and hands back the due token.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    pending: Option<(Duration, TickToken)>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Due time of the pending tick.
    pub fn due(&self) -> Option<Duration> {
        self.pending.map(|(due, _)| due)
    }

    /// Move the clock forward by at most `by`, stopping at the pending
    /// tick if it falls due. Returns that tick's token.
    pub fn advance(&mut self, by: Duration) -> Option<TickToken> {
        let target = self.now + by;
        match self.pending {
            Some((due, token)) if due <= target => {
                self.now = due;
                self.pending = None;
                Some(token)
            }
            _ => {
                self.now = target;
                None
            }
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration, token: TickToken) {
        self.pending = Some((self.now + delay, token));
    }

    fn cancel(&mut self) {
        self.pending = None;
    }

    fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Runs each tick as a sleeping tokio task that sends its token on a
/// channel. Cancelling aborts the task.
///
/// Must be used from within a tokio runtime.
#[derive(Debug)]
pub struct TokioScheduler {
    ticks: mpsc::UnboundedSender<TickToken>,
    task: Option<JoinHandle<()>>,
}

impl TokioScheduler {
    /// Create a scheduler and the receiving end its ticks arrive on.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TickToken>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { ticks: tx, task: None }, rx)
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, delay: Duration, token: TickToken) {
        self.cancel();
        let ticks = self.ticks.clone();
        self.task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The driver may be gone already; nothing to do then.
            let _ = ticks.send(token);
        }));
    }

    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    fn is_pending(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
