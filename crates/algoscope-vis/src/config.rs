//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use algoscope_playback::{PlaybackConfig, TickDelay};
use tracing::warn;

/// Per-page default tick delays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageDelays {
    pub sorting: TickDelay,
    pub searching: TickDelay,
    pub trees: TickDelay,
    pub graphs: TickDelay,
}

impl Default for PageDelays {
    fn default() -> Self {
        Self {
            // Speed slider starts at 300.
            sorting: TickDelay::from_slider(300),
            searching: TickDelay::from_millis(1000),
            trees: TickDelay::from_millis(1500),
            graphs: TickDelay::from_millis(2000),
        }
    }
}

impl PageDelays {
    pub fn sorting(&self) -> PlaybackConfig {
        PlaybackConfig::with_delay(self.sorting)
    }

    pub fn searching(&self) -> PlaybackConfig {
        PlaybackConfig::with_delay(self.searching)
    }

    pub fn trees(&self) -> PlaybackConfig {
        PlaybackConfig::with_delay(self.trees)
    }

    pub fn graphs(&self) -> PlaybackConfig {
        PlaybackConfig::with_delay(self.graphs)
    }
}

/// Configuration for the visualization server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisConfig {
    /// Address to listen on.
    pub addr: SocketAddr,
    /// Seed for structure randomness. Fresh entropy when unset.
    pub seed: Option<u64>,
    /// Directory of a static frontend to serve at `/`.
    pub static_dir: Option<PathBuf>,
    pub delays: PageDelays,
}

impl Default for VisConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            seed: None,
            static_dir: None,
            delays: PageDelays::default(),
        }
    }
}

impl VisConfig {
    /// Load from environment variables.
    ///
    /// - `ALGOSCOPE_ADDR` (default `0.0.0.0:3000`)
    /// - `ALGOSCOPE_SEED`
    /// - `ALGOSCOPE_STATIC_DIR`
    /// - `ALGOSCOPE_SORT_DELAY_MS`, `ALGOSCOPE_SEARCH_DELAY_MS`,
    ///   `ALGOSCOPE_TREE_DELAY_MS`, `ALGOSCOPE_GRAPH_DELAY_MS`
    ///
    /// Malformed values are logged and replaced by their default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let delay = |key: &str, default: TickDelay| {
            TickDelay::from_millis(parse_or(&lookup, key, default.as_millis()))
        };

        Self {
            addr: parse_or(&lookup, "ALGOSCOPE_ADDR", defaults.addr),
            seed: lookup("ALGOSCOPE_SEED").and_then(|raw| parse_some("ALGOSCOPE_SEED", &raw)),
            static_dir: lookup("ALGOSCOPE_STATIC_DIR")
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from),
            delays: PageDelays {
                sorting: delay("ALGOSCOPE_SORT_DELAY_MS", defaults.delays.sorting),
                searching: delay("ALGOSCOPE_SEARCH_DELAY_MS", defaults.delays.searching),
                trees: delay("ALGOSCOPE_TREE_DELAY_MS", defaults.delays.trees),
                graphs: delay("ALGOSCOPE_GRAPH_DELAY_MS", defaults.delays.graphs),
            },
        }
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    lookup(key)
        .and_then(|raw| parse_some(key, &raw))
        .unwrap_or(default)
}

fn parse_some<T: FromStr>(key: &str, raw: &str) -> Option<T> {
    let parsed = raw.trim().parse().ok();
    if parsed.is_none() {
        warn!(key, value = raw, "ignoring malformed setting");
    }
    parsed
}
