//! Lifecycle owner for the decoding state shared across connections.

use std::sync::Arc;

use crate::{
    chunk::{ChunkReaper, ReassemblyConfig, ReassemblyTable},
    frame::FrameCodec,
};

/// Owns the chunk reassembly state shared by every connection's codec.
///
/// Construct one runtime per transport, then hand each accepted connection a
/// codec from [`codec`](Self::codec). The runtime creates the shared
/// [`ReassemblyTable`] and, when the configuration enables a chunk timeout,
/// starts the single [`ChunkReaper`] serving all connections. Shutting the
/// runtime down stops the reaper; in-flight decode calls are never preempted,
/// they simply stop being invoked once their connection is torn down.
///
/// # Examples
///
/// ```no_run
/// use rpcframe::{FramingRuntime, ReassemblyConfig};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let runtime = FramingRuntime::new(ReassemblyConfig::from_millis(30_000));
/// let codec_for_connection = runtime.codec();
/// // ... drive connections ...
/// runtime.shutdown();
/// # }
/// ```
#[derive(Debug)]
pub struct FramingRuntime {
    table: Arc<ReassemblyTable>,
    reaper: Option<ChunkReaper>,
}

impl FramingRuntime {
    /// Create the shared table and start the reaper when enabled.
    ///
    /// Must be called from within a tokio runtime when `config` enables the
    /// chunk timeout.
    #[must_use]
    pub fn new(config: ReassemblyConfig) -> Self {
        let table = Arc::new(ReassemblyTable::new());
        let reaper = ChunkReaper::spawn(Arc::clone(&table), config);
        Self { table, reaper }
    }

    /// Codec for one newly accepted connection.
    #[must_use]
    pub fn codec(&self) -> FrameCodec { FrameCodec::new(Arc::clone(&self.table)) }

    /// The shared reassembly table.
    #[must_use]
    pub fn table(&self) -> &Arc<ReassemblyTable> { &self.table }

    /// Stop the reaper. Idempotent; dropping the runtime has the same effect.
    pub fn shutdown(&self) {
        if let Some(reaper) = &self.reaper {
            reaper.shutdown();
        }
    }
}
