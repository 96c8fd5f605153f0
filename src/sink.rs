//! Output sinks: where rendered chunks go.
//!
//! The renderer never owns an output destination; it hands each drained
//! chunk to a [`Sink`]. A sink is anything accepting string chunks, and a
//! plain `FnMut(&str) -> anyhow::Result<()>` closure qualifies, so tests and
//! callers can capture chunks inline:
//!
//! ```
//! use rowmill::Sink;
//!
//! let mut out = String::new();
//! let mut sink = |chunk: &str| -> anyhow::Result<()> {
//!     out.push_str(chunk);
//!     Ok(())
//! };
//! sink.accept("a,b\n")?;
//! assert_eq!(out, "a,b\n");
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! Chunks arrive in drain order; a sink may be called with an empty chunk
//! and must tolerate it. Sink failures surface from the renderer as
//! [`Error::Sink`](crate::Error::Sink).

use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Receives rendered output, one drained chunk at a time.
pub trait Sink {
    /// Deliver one chunk.
    fn accept(&mut self, chunk: &str) -> Result<()>;
}

impl<F> Sink for F
where
    F: FnMut(&str) -> Result<()>,
{
    fn accept(&mut self, chunk: &str) -> Result<()> {
        self(chunk)
    }
}

/// Sink over any `io::Write`.
///
/// Writes are not buffered here; wrap the writer in a `BufWriter` if the
/// chunks are small relative to the medium.
pub struct WriterSink<W> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Access the wrapped writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Unwrap, returning the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Sink for WriterSink<W> {
    fn accept(&mut self, chunk: &str) -> Result<()> {
        self.writer.write_all(chunk.as_bytes())?;
        Ok(())
    }
}

/// File-backed sink used by
/// [`Renderer::render_to_path`](crate::Renderer::render_to_path).
pub struct FileSink {
    file: File,
}

impl FileSink {
    /// Open `path` for appending, creating it if missing.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened.
    pub fn append(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open {} for append", path.display()))?;
        Ok(Self { file })
    }

    /// Create or truncate `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
        Ok(Self { file })
    }
}

impl Sink for FileSink {
    fn accept(&mut self, chunk: &str) -> Result<()> {
        self.file.write_all(chunk.as_bytes())?;
        Ok(())
    }
}
