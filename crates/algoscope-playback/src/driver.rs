//! Tick pump connecting a [`TokioScheduler`] to its controller.

use std::sync::{Arc, Weak};

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::config::PlaybackConfig;
use crate::playback::Playback;
use crate::scheduler::{TickToken, TokioScheduler};

/// A timer-driven controller shared between request handlers.
pub type SharedPlayback = Arc<Mutex<Playback<TokioScheduler>>>;

/// Create a shared controller and spawn the task that delivers its ticks.
///
/// The pump holds only a weak reference and exits once the controller is
/// dropped.
pub fn spawn_playback(config: PlaybackConfig) -> (SharedPlayback, JoinHandle<()>) {
    let (scheduler, ticks) = TokioScheduler::new();
    let playback = Arc::new(Mutex::new(Playback::new(scheduler, config)));
    let pump = tokio::spawn(pump(Arc::downgrade(&playback), ticks));
    (playback, pump)
}

async fn pump(
    playback: Weak<Mutex<Playback<TokioScheduler>>>,
    mut ticks: mpsc::UnboundedReceiver<TickToken>,
) {
    while let Some(token) = ticks.recv().await {
        let Some(playback) = playback.upgrade() else {
            break;
        };
        playback.lock().await.tick(token);
    }
    debug!("tick pump stopped");
}
