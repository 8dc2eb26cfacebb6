//! Configuration for chunk reassembly housekeeping.

use std::time::Duration;

/// Default interval between reaper sweeps of the reassembly table.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_millis(1000);

/// Settings bounding how long incomplete chunk assemblies may linger.
#[derive(Clone, Copy, Debug)]
pub struct ReassemblyConfig {
    /// Age beyond which an incomplete assembly is evicted. `None` disables
    /// timeout cleanup entirely; no reaper task is started.
    pub chunk_timeout: Option<Duration>,
    /// How often the reaper wakes to scan the table.
    pub sweep_interval: Duration,
}

impl ReassemblyConfig {
    /// Enable eviction of assemblies older than `chunk_timeout`.
    #[must_use]
    pub const fn new(chunk_timeout: Duration) -> Self {
        Self {
            chunk_timeout: Some(chunk_timeout),
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
        }
    }

    /// Disable timeout cleanup; abandoned assemblies are never evicted.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            chunk_timeout: None,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
        }
    }

    /// Map the wire-level tunable: a non-positive timeout disables cleanup.
    #[must_use]
    pub fn from_millis(chunk_timeout_ms: i64) -> Self {
        let chunk_timeout = u64::try_from(chunk_timeout_ms)
            .ok()
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis);
        Self {
            chunk_timeout,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
        }
    }

    /// Override the sweep cadence. Mainly useful in tests.
    #[must_use]
    pub const fn with_sweep_interval(mut self, sweep_interval: Duration) -> Self {
        self.sweep_interval = sweep_interval;
        self
    }
}

impl Default for ReassemblyConfig {
    fn default() -> Self { Self::disabled() }
}
