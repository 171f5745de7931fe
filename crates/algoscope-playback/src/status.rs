//! Observable playback state.

use algoscope_core::{StepKind, Trace, TraceStep};
use serde::{Deserialize, Serialize};

/// Playback controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlaybackState {
    /// No trace yet, or the last one was invalidated.
    #[default]
    Idle,
    /// Trace loaded, cursor at 0, not advancing.
    Ready,
    /// Cursor advancing on the tick timer.
    Playing,
    /// Cursor fixed somewhere inside the trace.
    Paused,
    /// Cursor at the end of the trace.
    Finished,
}

/// Counters for the steps consumed so far.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlaybackStats {
    pub comparisons: usize,
    pub swaps: usize,
    /// For search traces, whether the target was found. `None` until the
    /// terminal step has been shown or for other families.
    pub found: Option<bool>,
    /// Fraction of the trace consumed, 0.0 to 1.0.
    pub progress: f64,
}

impl PlaybackStats {
    /// Tally the first `cursor` steps of `trace`.
    pub fn consumed(trace: &Trace, cursor: usize) -> Self {
        let shown = &trace.steps()[..cursor.min(trace.len())];
        let comparisons = shown.iter().filter(|s| s.kind.is_comparison()).count();
        let swaps = shown.iter().filter(|s| s.kind == StepKind::Swap).count();
        let found = shown.last().and_then(|s| match s.kind {
            StepKind::Found => Some(true),
            StepKind::NotFound => Some(false),
            _ => None,
        });
        let progress = if trace.is_empty() {
            0.0
        } else {
            shown.len() as f64 / trace.len() as f64
        };
        Self {
            comparisons,
            swaps,
            found,
            progress,
        }
    }
}

/// Snapshot of a controller, published on every cursor or state change.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackStatus {
    pub state: PlaybackState,
    pub cursor: usize,
    pub total: usize,
    pub delay_ms: u64,
    /// Step at the cursor; `None` before the first step is consumed.
    pub current: Option<TraceStep>,
    pub stats: PlaybackStats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use algoscope_core::{SearchAlgorithm, SortAlgorithm, Tracer};

    #[test]
    fn stats_count_consumed_steps_only() {
        let trace = SortAlgorithm::Bubble.trace(&[3, 2, 1], &());
        assert_eq!(PlaybackStats::consumed(&trace, 0), PlaybackStats::default());

        // Compare 3/2, then swap.
        let stats = PlaybackStats::consumed(&trace, 2);
        assert_eq!(stats.comparisons, 1);
        assert_eq!(stats.swaps, 1);

        let all = PlaybackStats::consumed(&trace, trace.len());
        assert_eq!(all.comparisons, trace.metrics().comparisons);
        assert_eq!(all.swaps, trace.metrics().swaps);
        assert_eq!(all.progress, 1.0);
        assert_eq!(all.found, None);
    }

    #[test]
    fn search_outcome_appears_at_the_end() {
        let trace = SearchAlgorithm::Linear.trace(&[1, 2, 3], &2);
        assert_eq!(PlaybackStats::consumed(&trace, trace.len() - 1).found, None);
        assert_eq!(PlaybackStats::consumed(&trace, trace.len()).found, Some(true));

        let missing = SearchAlgorithm::Linear.trace(&[1, 2, 3], &9);
        assert_eq!(PlaybackStats::consumed(&missing, missing.len()).found, Some(false));
    }
}
