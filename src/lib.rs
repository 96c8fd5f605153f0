//! # rowmill
//!
//! **Schema-driven flattening** of nested record collections into delimited
//! text. Records declare their columns in plain code; rowmill walks the
//! declarations, flattens nesting into flat rows, and streams the result to
//! a sink, sequentially or across parallel partitions.
//!
//! ## Key Features
//!
//! - **Static schemas** - each record type declares its fields once, no
//!   runtime reflection anywhere
//! - **Recursive flattening** - a nested record's cells land in its parent's
//!   row; a sequence of records renders as one braced cell
//! - **Cached schema registry** - a type's field list is built exactly once
//!   and shared across threads
//! - **Display-order layout** - cells line up by declared order, and order
//!   collisions are rejected, across nesting levels too
//! - **Sequential and parallel rendering** - partitioned workers with Rayon,
//!   merged into one output stream under a lock
//! - **Threshold streaming** - output drains to a [`Sink`] whenever the
//!   buffer tops a byte threshold, with the header delivered exactly once
//!
//! ## Quick Start
//!
//! ```
//! use rowmill::{ColumnMeta, Field, Record, RenderMode, Renderer};
//! use rowmill::testing::ChunkSink;
//!
//! struct Trade {
//!     id: u32,
//!     symbol: String,
//!     legs: Vec<String>,
//! }
//!
//! impl Record for Trade {
//!     fn fields() -> Vec<Field> {
//!         vec![
//!             Field::scalar(ColumnMeta::new(1, "Id"), |t: &Trade| t.id),
//!             Field::scalar(ColumnMeta::new(2, "Symbol"), |t: &Trade| t.symbol.clone()),
//!             Field::array(ColumnMeta::new(3, "Leg").with_width(2), |t: &Trade| {
//!                 t.legs.as_slice()
//!             }),
//!         ]
//!     }
//! }
//!
//! let trades = vec![
//!     Trade { id: 1, symbol: "ACME".into(), legs: vec!["buy".into(), "sell".into()] },
//!     Trade { id: 2, symbol: "GLOBEX".into(), legs: vec!["buy".into(), "hold".into()] },
//! ];
//!
//! let renderer = Renderer::default().with_mode(RenderMode::Sequential);
//! let mut sink = ChunkSink::new();
//! let rows = renderer.render(&trades, &mut sink)?;
//!
//! assert_eq!(rows, 2);
//! assert_eq!(
//!     sink.concat(),
//!     "Id,Symbol,Leg\n1,ACME,[buy,sell]\n2,GLOBEX,[buy,hold]\n"
//! );
//! # Ok::<(), rowmill::Error>(())
//! ```
//!
//! ## Core Concepts
//!
//! ### Records and fields
//!
//! A type becomes renderable by implementing [`Record`], returning one
//! [`Field`] per property: column metadata ([`ColumnMeta`]) plus an accessor
//! closure. The constructors cover every supported shape:
//!
//! - [`Field::scalar`] - one value, one cell
//! - [`Field::array`] - a sequence of scalar values; joined into one cell,
//!   or spread over `width` indexed columns under flatten mode
//! - [`Field::table`] - a sequence of nested records, rendered as a single
//!   braced cell like `[{..}{..}]`
//! - [`Field::nested`] - one nested record whose cells fold into the parent
//!   row
//! - [`Field::unsupported`] - declared but silently skipped
//!
//! ### Schema registry
//!
//! [`SchemaRegistry`] caches each type's built [`Schema`]. The first request
//! for a type runs its field list and validates it; every later request,
//! from any thread, returns the cached copy. A failed build is not cached,
//! so the next request retries.
//!
//! ### Rendering
//!
//! [`Renderer`] builds the header line before touching any record, then
//! extracts rows either sequentially or in partitioned parallel batches.
//! Output accumulates in a buffer that drains to the sink once its byte
//! length passes [`Renderer::threshold`], and once more, unconditionally,
//! at the end. The header rides with the first drained chunk, so it appears
//! exactly once even when the input is empty.
//!
//! ### Separators and flattening
//!
//! [`CsvSettings`] carries the header separator, the value separator, and
//! the global flatten switch for scalar sequences. A per-field
//! [`ColumnMeta::with_flatten`] beats the global setting.
//!
//! ## Module Overview
//!
//! - [`record`] - the [`Record`] and [`ErasedRecord`] traits
//! - [`field`] - field declarations, column metadata, and accessor values
//! - [`registry`] - the thread-safe schema cache
//! - [`extract`] - record-to-row flattening
//! - [`header`] - header construction from the schema walk
//! - [`row`] - the order-keyed cell map
//! - [`render`] - sequential and parallel rendering with threshold streaming
//! - [`sink`] - output destinations
//! - [`settings`] - separators and flatten mode
//! - [`error`] - the error kinds
//! - [`testing`] - sinks, assertions, and fixtures for tests

pub mod error;
pub mod extract;
pub mod field;
pub mod header;
pub mod record;
pub mod registry;
pub mod render;
pub mod row;
pub mod settings;
pub mod sink;
pub mod tag;
pub mod testing;

// General re-exports
pub use error::{DuplicateColumnError, Error, ExtractionError, Result, SchemaError};
pub use extract::Extractor;
pub use field::{ColumnMeta, Field, FieldKind, FieldValue, NestedSchema};
pub use header::build_header;
pub use record::{ErasedRecord, Record};
pub use registry::{Schema, SchemaRegistry};
pub use render::{RenderMode, Renderer, DEFAULT_THRESHOLD};
pub use row::RowValues;
pub use settings::CsvSettings;
pub use sink::{FileSink, Sink, WriterSink};
pub use tag::TypeTag;
