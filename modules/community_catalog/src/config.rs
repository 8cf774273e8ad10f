//! Configuration for the community catalog module

use chrono::Duration;
use serde::Deserialize;

/// Community catalog configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Trailing window, in hours, within which a plan's price-change events
    /// count as "recent"
    #[serde(default = "default_recent_price_window_hours")]
    pub recent_price_window_hours: u32,
}

impl Config {
    /// The recency window as a duration
    pub fn recent_price_window(&self) -> Duration {
        Duration::hours(i64::from(self.recent_price_window_hours))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            recent_price_window_hours: default_recent_price_window_hours(),
        }
    }
}

fn default_recent_price_window_hours() -> u32 {
    24
}
