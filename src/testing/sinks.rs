//! In-memory sinks for inspecting rendered output.

use crate::sink::Sink;
use anyhow::{bail, Result};

/// Sink that captures every chunk it receives.
///
/// # Example
///
/// ```
/// use rowmill::Sink;
/// use rowmill::testing::ChunkSink;
///
/// let mut sink = ChunkSink::new();
/// sink.accept("a,b\n")?;
/// sink.accept("1,2\n")?;
/// assert_eq!(sink.call_count(), 2);
/// assert_eq!(sink.concat(), "a,b\n1,2\n");
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct ChunkSink {
    chunks: Vec<String>,
}

impl ChunkSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Chunks in arrival order.
    #[must_use]
    pub fn chunks(&self) -> &[String] {
        &self.chunks
    }

    /// All chunks joined back together.
    #[must_use]
    pub fn concat(&self) -> String {
        self.chunks.concat()
    }

    /// How many times the sink was invoked.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.chunks.len()
    }

    #[must_use]
    pub fn into_chunks(self) -> Vec<String> {
        self.chunks
    }
}

impl Sink for ChunkSink {
    fn accept(&mut self, chunk: &str) -> Result<()> {
        self.chunks.push(chunk.to_string());
        Ok(())
    }
}

/// Sink that accepts a fixed number of chunks, then refuses the rest.
///
/// Useful for driving the renderer's sink-failure path.
#[derive(Debug)]
pub struct FailingSink {
    remaining: usize,
}

impl FailingSink {
    /// Fail on the chunk after `accepted` successful deliveries.
    #[must_use]
    pub fn after(accepted: usize) -> Self {
        Self { remaining: accepted }
    }
}

impl Sink for FailingSink {
    fn accept(&mut self, _chunk: &str) -> Result<()> {
        if self.remaining == 0 {
            bail!("sink refused the chunk");
        }
        self.remaining -= 1;
        Ok(())
    }
}
