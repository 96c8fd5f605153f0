//! Testing utilities for record flattening and rendering.
//!
//! This module provides:
//!
//! - **Sinks**: capture rendered chunks in memory ([`ChunkSink`]) or fail on
//!   purpose ([`FailingSink`])
//! - **Assertions**: compare rendered output row by row regardless of
//!   partition scheduling
//! - **Fixtures**: a nested report type family with a known column layout
//!
//! # Quick Start
//!
//! ```
//! use rowmill::{RenderMode, Renderer};
//! use rowmill::testing::*;
//!
//! let renderer = Renderer::default().with_mode(RenderMode::Sequential);
//! let mut sink = ChunkSink::new();
//! renderer.render(&sample_reports(3), &mut sink)?;
//! assert_eq!(rows_of(&sink.concat()).len(), 4); // header + 3 rows
//! # Ok::<(), rowmill::Error>(())
//! ```
//!
//! # Assertion Functions
//!
//! Parallel rendering merges partition buffers in completion order, so two
//! runs over the same records can interleave rows differently. The helpers
//! here compare at the row level:
//!
//! - [`rows_of`]: split output into its non-empty rows
//! - [`assert_same_rows`]: order-independent row multiset comparison
//! - [`assert_header_once`]: the header leads and never repeats

pub mod assertions;
pub mod fixtures;
pub mod sinks;

// Re-export commonly used items
pub use assertions::*;
pub use fixtures::*;
pub use sinks::*;
