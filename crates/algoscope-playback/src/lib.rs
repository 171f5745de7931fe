//! Algoscope Playback
//!
//! Replays a recorded [`Trace`](algoscope_core::Trace) one step at a time.
//!
//! # State machine
//!
//! ```text
//!            load_trace            play              tick (cursor == len)
//!   Idle ───────────────► Ready ───────► Playing ──────────────────────► Finished
//!    ▲                      ▲              │  ▲
//!    │ invalidate           │ reset        │  │ play
//!    └──────────────────────┴──────────────▼  │
//!                                         Paused
//! ```
//!
//! While `Playing`, exactly one tick is pending on the [`Scheduler`]. Pause,
//! reset, seek and loading a new trace cancel it, and a tick that was
//! already in flight is rejected by its [`TickToken`].
//!
//! Two schedulers are provided: [`ManualScheduler`], a virtual clock for
//! tests and headless stepping, and [`TokioScheduler`], which sleeps on the
//! tokio timer. [`spawn_playback`] wires the latter to a shared controller.

mod config;
mod driver;
mod error;
mod playback;
mod scheduler;
mod status;

pub use config::{PlaybackConfig, TickDelay};
pub use driver::{spawn_playback, SharedPlayback};
pub use error::{PlaybackError, Result};
pub use playback::{Playback, TraceSource};
pub use scheduler::{ManualScheduler, Scheduler, TickToken, TokioScheduler};
pub use status::{PlaybackState, PlaybackStats, PlaybackStatus};
