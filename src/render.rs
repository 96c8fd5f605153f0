//! Rendering: drive extraction over a record collection and stream the
//! delimited text into a [`Sink`].
//!
//! This module provides:
//! - **[`Renderer`]**: ties settings, a schema registry, an execution mode,
//!   and a flush threshold into one entry point
//! - **[`RenderMode`]**: sequential or partitioned parallel execution
//! - **Threshold-based streaming**: rows accumulate in a buffer that drains
//!   to the sink whenever its byte length exceeds the threshold
//!
//! # Design notes
//! - The header line is built before any record is touched and rides with
//!   the first drained chunk, so every sink sees it exactly once, header
//!   included even when the input is empty.
//! - Parallel workers render their partition into a local buffer and merge
//!   it into the shared accumulator under a lock, in completion order. Row
//!   order across partitions is therefore scheduling-dependent; cell content
//!   is not.
//! - The final drain is unconditional, on failure too: rows buffered before
//!   an extraction error still reach the sink, and the error is reported
//!   after the flush.

use crate::error::{Error, Result};
use crate::extract::Extractor;
use crate::header::build_header;
use crate::record::Record;
use crate::registry::SchemaRegistry;
use crate::settings::CsvSettings;
use crate::sink::{FileSink, Sink};
use rayon::prelude::*;
use std::mem;
use std::path::Path;
use std::sync::Mutex;

/// Default flush threshold: 64 MiB of buffered output.
pub const DEFAULT_THRESHOLD: usize = 64 * 1024 * 1024;

#[derive(Clone, Copy, Debug)]
pub enum RenderMode {
    Sequential,
    Parallel { threads: Option<usize>, partitions: Option<usize> },
}

/// Renders record collections into delimited text.
pub struct Renderer {
    pub settings: CsvSettings,
    pub mode: RenderMode,
    /// Buffered bytes above which the accumulator drains to the sink.
    pub threshold: usize,
    /// Partition count used when `Parallel { partitions: None, .. }`.
    pub default_partitions: usize,
    registry: SchemaRegistry,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            settings: CsvSettings::default(),
            mode: RenderMode::Parallel { threads: None, partitions: None },
            threshold: DEFAULT_THRESHOLD,
            default_partitions: 2 * num_cpus::get().max(2),
            registry: SchemaRegistry::new(),
        }
    }
}

impl Renderer {
    /// A renderer over the given settings, with a fresh schema registry.
    pub fn new(settings: CsvSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    /// The schema registry backing this renderer.
    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Render `records` into `sink`, returning the number of rows written.
    ///
    /// The header for `T` is built first, so schema problems surface before
    /// any extraction work runs and before the sink is touched.
    ///
    /// # Errors
    /// Returns an error if the schema walk fails, if any record fails to
    /// extract, or if the sink rejects a chunk. Rows buffered before the
    /// failure are still flushed.
    pub fn render<T, S>(&self, records: &[T], sink: &mut S) -> Result<usize>
    where
        T: Record,
        S: Sink + Send,
    {
        let header = build_header::<T>(&self.registry, &self.settings)?;
        let extractor = Extractor::new(&self.settings, &self.registry);
        match self.mode {
            RenderMode::Sequential => self.render_seq(&extractor, records, header, sink),
            RenderMode::Parallel { threads, partitions } => {
                if let Some(t) = threads {
                    // ok() to ignore "already built" on repeated calls in tests
                    rayon::ThreadPoolBuilder::new().num_threads(t).build_global().ok();
                }
                let parts = partitions.unwrap_or(self.default_partitions);
                self.render_par(&extractor, records, header, parts, sink)
            }
        }
    }

    /// Render `records` to a file, appending if it already exists.
    ///
    /// # Errors
    /// See [`Renderer::render`]; additionally fails if the file cannot be
    /// opened.
    pub fn render_to_path<T: Record>(
        &self,
        records: &[T],
        path: impl AsRef<Path>,
    ) -> Result<usize> {
        let mut sink = FileSink::append(path).map_err(Error::Sink)?;
        self.render(records, &mut sink)
    }

    fn render_seq<T: Record, S: Sink>(
        &self,
        extractor: &Extractor<'_>,
        records: &[T],
        header: String,
        sink: &mut S,
    ) -> Result<usize> {
        let mut acc = Accumulator::new(sink, header, self.threshold);
        let mut worked = Ok(());
        for record in records {
            let step = match extractor.extract_row(record) {
                Ok(row) => {
                    acc.push_line(&row.join(&self.settings.value_separator));
                    acc.drain_if_full()
                }
                Err(e) => Err(e),
            };
            if let Err(e) = step {
                worked = Err(e);
                break;
            }
        }
        let flushed = acc.finish();
        worked.and(flushed)?;
        Ok(records.len())
    }

    fn render_par<T, S>(
        &self,
        extractor: &Extractor<'_>,
        records: &[T],
        header: String,
        partitions: usize,
        sink: &mut S,
    ) -> Result<usize>
    where
        T: Record,
        S: Sink + Send,
    {
        let acc = Mutex::new(Accumulator::new(sink, header, self.threshold));
        let worked = split_ranges(records.len(), partitions)
            .into_par_iter()
            .try_for_each(|(start, end)| {
                let mut lines = String::new();
                for record in &records[start..end] {
                    let row = extractor.extract_row(record)?;
                    lines.push_str(&row.join(&self.settings.value_separator));
                    lines.push('\n');
                }
                let mut shared = acc.lock().unwrap();
                shared.append(lines);
                shared.drain_if_full()
            });
        let flushed = acc.into_inner().unwrap().finish();
        worked.and(flushed)?;
        Ok(records.len())
    }
}

/// Split `[0, len)` into `parts` contiguous ranges.
///
/// Ensures `parts` lands in `[1, len]` (when `len > 0`) and distributes the
/// remainder fairly. Ranges are non-empty and cover the entire domain; an
/// empty input yields no ranges.
fn split_ranges(len: usize, parts: usize) -> Vec<(usize, usize)> {
    let parts = parts.max(1).min(len.max(1));
    let base = len / parts;
    let rem = len % parts;

    let mut out = Vec::with_capacity(parts);
    let mut start = 0usize;
    for idx in 0..parts {
        let extra = if idx < rem { 1 } else { 0 };
        let end = start + base + extra;
        if start < end {
            out.push((start, end));
        }
        start = end;
    }
    out
}

/// Buffered rows on their way to the sink.
struct Accumulator<'a, S: Sink> {
    sink: &'a mut S,
    buf: String,
    pending_header: Option<String>,
    threshold: usize,
}

impl<'a, S: Sink> Accumulator<'a, S> {
    fn new(sink: &'a mut S, header: String, threshold: usize) -> Self {
        Self {
            sink,
            buf: String::new(),
            pending_header: Some(header),
            threshold,
        }
    }

    fn push_line(&mut self, line: &str) {
        self.buf.push_str(line);
        self.buf.push('\n');
    }

    /// Take a worker's batch of newline-terminated lines.
    fn append(&mut self, lines: String) {
        if self.buf.is_empty() {
            self.buf = lines;
        } else {
            self.buf.push_str(&lines);
        }
    }

    fn drain_if_full(&mut self) -> Result<()> {
        if self.buf.len() > self.threshold {
            self.drain()?;
        }
        Ok(())
    }

    /// Send everything buffered; the header rides with the first chunk only.
    fn drain(&mut self) -> Result<()> {
        let body = mem::take(&mut self.buf);
        let chunk = match self.pending_header.take() {
            Some(header) => format!("{header}\n{body}"),
            None => body,
        };
        self.sink.accept(&chunk).map_err(Error::Sink)
    }

    fn finish(mut self) -> Result<()> {
        self.drain()
    }
}
