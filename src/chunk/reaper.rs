//! Background eviction of abandoned chunk reassemblies.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use log::{debug, warn};
use tokio::{
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;

use super::{config::ReassemblyConfig, table::ReassemblyTable};

/// Handle to the background task that evicts timed-out chunk assemblies.
///
/// Exactly one reaper serves a decoder subsystem, shared across all of its
/// connections. Eviction is advisory cleanup: it bounds the memory held for
/// transfers whose peer crashed or misbehaves, and non-evicted streams are
/// unaffected even if the reaper never runs. An evicted transfer is simply
/// gone; the original caller observes its own request timeout at a higher
/// layer.
#[derive(Debug)]
pub struct ChunkReaper {
    shutdown: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl ChunkReaper {
    /// Start the reaper when `config` enables a chunk timeout.
    ///
    /// Returns `None`, spawning nothing, when the timeout is disabled.
    /// Must be called from within a tokio runtime otherwise.
    #[must_use]
    pub fn spawn(table: Arc<ReassemblyTable>, config: ReassemblyConfig) -> Option<Self> {
        let timeout = config.chunk_timeout?;
        let shutdown = CancellationToken::new();
        let token = shutdown.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = time::interval(config.sweep_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    () = token.cancelled() => break,
                    _ = ticker.tick() => sweep(&table, timeout),
                }
            }
            debug!("chunk reaper stopped");
        });
        Some(Self {
            shutdown,
            handle: Some(handle),
        })
    }

    /// Signal the background task to stop at its next wake-up.
    ///
    /// Idempotent: repeated calls are no-ops.
    pub fn shutdown(&self) { self.shutdown.cancel(); }

    /// Stop the reaper and wait for the background task to exit.
    pub async fn stop(mut self) {
        self.shutdown.cancel();
        if let Some(handle) = self.handle.take()
            && handle.await.is_err()
        {
            warn!("chunk reaper task terminated abnormally");
        }
    }
}

impl Drop for ChunkReaper {
    fn drop(&mut self) { self.shutdown.cancel(); }
}

/// Evict every assembly older than `timeout` and log what was lost.
fn sweep(table: &ReassemblyTable, timeout: Duration) {
    for evicted in table.purge_expired_at(timeout, Instant::now()) {
        warn!(
            "chunk stream {} timed out after {timeout:?}; discarding {} buffered bytes, correlation_id={}",
            evicted.stream_id, evicted.buffered_len, evicted.correlation_id,
        );
    }
}
