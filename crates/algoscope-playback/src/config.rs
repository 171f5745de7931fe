//! Playback timing configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Delay between two automatic cursor advances.
///
/// User-supplied delays are clamped to [`TickDelay::MIN`]..=[`TickDelay::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u64", from = "u64")]
pub struct TickDelay(Duration);

impl TickDelay {
    pub const MIN: Duration = Duration::from_millis(100);
    pub const MAX: Duration = Duration::from_millis(2000);

    /// Clamp `ms` into the accepted range.
    pub fn from_millis(ms: u64) -> Self {
        Self(Duration::from_millis(ms).clamp(Self::MIN, Self::MAX))
    }

    /// Map a speed slider position (50..=1000, higher is faster) to a
    /// delay of `1100 - position` milliseconds.
    ///
    /// ```
    /// use algoscope_playback::TickDelay;
    ///
    /// assert_eq!(TickDelay::from_slider(300).as_millis(), 800);
    /// assert_eq!(TickDelay::from_slider(5000).as_millis(), 100);
    /// ```
    pub fn from_slider(position: u64) -> Self {
        Self::from_millis(1100 - position.clamp(50, 1000))
    }

    pub fn duration(&self) -> Duration {
        self.0
    }

    pub fn as_millis(&self) -> u64 {
        self.0.as_millis() as u64
    }
}

impl Default for TickDelay {
    fn default() -> Self {
        Self::from_millis(1000)
    }
}

impl From<u64> for TickDelay {
    fn from(ms: u64) -> Self {
        Self::from_millis(ms)
    }
}

impl From<TickDelay> for u64 {
    fn from(delay: TickDelay) -> Self {
        delay.as_millis()
    }
}

/// Configuration for one playback controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Delay between ticks while playing.
    pub delay: TickDelay,
}

impl PlaybackConfig {
    pub fn with_delay(delay: TickDelay) -> Self {
        Self { delay }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delays_are_clamped() {
        assert_eq!(TickDelay::from_millis(10).duration(), TickDelay::MIN);
        assert_eq!(TickDelay::from_millis(60_000).duration(), TickDelay::MAX);
        assert_eq!(TickDelay::from_millis(750).as_millis(), 750);
    }

    #[test]
    fn slider_is_inverted() {
        assert_eq!(TickDelay::from_slider(50).as_millis(), 1050);
        assert_eq!(TickDelay::from_slider(1000).as_millis(), 100);
        assert_eq!(TickDelay::from_slider(0).as_millis(), 1050);
    }

    #[test]
    fn delay_serializes_as_millis() {
        let config = PlaybackConfig::with_delay(TickDelay::from_millis(800));
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"delay":800}"#);
        let back: PlaybackConfig = serde_json::from_str(r#"{"delay":5}"#).unwrap();
        assert_eq!(back.delay.duration(), TickDelay::MIN);
    }
}
