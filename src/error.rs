//! Error types for schema building, value extraction, and output delivery.
//!
//! Internal failures are typed so callers can tell a declaration bug
//! ([`SchemaError`], [`DuplicateColumnError`]) from a per-record failure
//! ([`ExtractionError`]) or an output failure ([`Error::Sink`]). Sink
//! callbacks speak `anyhow` like every other fallible callback edge in this
//! crate, and their errors are carried through unchanged.

use std::fmt;

/// Result type used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Top-level error returned by registry, extraction, and render operations.
#[derive(Debug)]
pub enum Error {
    /// A type's field declaration is unusable.
    Schema(SchemaError),
    /// A record could not be flattened.
    Extraction(ExtractionError),
    /// Two fields resolved to the same display order.
    DuplicateColumn(DuplicateColumnError),
    /// The output sink rejected a chunk.
    Sink(anyhow::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Schema(e) => write!(f, "schema error: {e}"),
            Error::Extraction(e) => write!(f, "extraction error: {e}"),
            Error::DuplicateColumn(e) => write!(f, "{e}"),
            Error::Sink(e) => write!(f, "sink error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Schema(e) => Some(e),
            Error::Extraction(e) => Some(e),
            Error::DuplicateColumn(e) => Some(e),
            Error::Sink(e) => Some(e.as_ref()),
        }
    }
}

/// A type's field declaration cannot be turned into a usable schema.
#[derive(Debug, Clone)]
pub struct SchemaError {
    /// Name of the type whose declaration failed.
    pub type_name: &'static str,
    /// What was wrong with it.
    pub message: String,
}

impl SchemaError {
    /// Create a schema error for the named type.
    pub fn new<M: Into<String>>(type_name: &'static str, message: M) -> Self {
        Self {
            type_name,
            message: message.into(),
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.type_name, self.message)
    }
}

impl std::error::Error for SchemaError {}

impl From<SchemaError> for Error {
    fn from(e: SchemaError) -> Self {
        Error::Schema(e)
    }
}

/// A record instance could not be flattened into row values.
#[derive(Debug, Clone)]
pub struct ExtractionError {
    /// Name of the record type being flattened.
    pub type_name: &'static str,
    /// What went wrong.
    pub message: String,
}

impl ExtractionError {
    /// Create an extraction error for the named record type.
    pub fn new<M: Into<String>>(type_name: &'static str, message: M) -> Self {
        Self {
            type_name,
            message: message.into(),
        }
    }
}

impl fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.type_name, self.message)
    }
}

impl std::error::Error for ExtractionError {}

impl From<ExtractionError> for Error {
    fn from(e: ExtractionError) -> Self {
        Error::Extraction(e)
    }
}

/// Two cells landed on the same display order within one flattened row
/// (or one header), including collisions introduced across nesting levels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateColumnError {
    /// The colliding display order.
    pub order: u32,
    /// Cell already present at that order.
    pub existing: String,
    /// Cell that tried to claim the same order.
    pub incoming: String,
}

impl fmt::Display for DuplicateColumnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "duplicate display order {}: {:?} collides with {:?}",
            self.order, self.existing, self.incoming
        )
    }
}

impl std::error::Error for DuplicateColumnError {}

impl From<DuplicateColumnError> for Error {
    fn from(e: DuplicateColumnError) -> Self {
        Error::DuplicateColumn(e)
    }
}
