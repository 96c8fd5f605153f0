//! Recursive flattening of records into row values.
//!
//! The extractor walks a record's cached schema and fills a [`RowValues`]
//! keyed by display order:
//!
//! - **Scalar** values land at their order as-is.
//! - **Nested** records recurse into the *same* row; there is no name
//!   prefixing, so display orders must be unique across the whole nesting.
//! - **Scalar sequences** join into one cell with the value separator: bare
//!   under flatten mode (global setting, or the field's override), wrapped
//!   `[..]` otherwise.
//! - **Record sequences** render each element into its own sub-row, format
//!   every sub-row `{..}`, and concatenate the pieces with no separator
//!   inside `[..]`. Elements are extracted in parallel but joined in element
//!   order, so the cell is deterministic.
//! - **Unsupported** values are skipped: no cell, no error.
//!
//! A value whose tag contradicts the field's declared kind, and a
//! column-producing value on a field without metadata, both abort the row
//! with an [`ExtractionError`]. A row either flattens completely or not at
//! all.

use crate::error::{Error, ExtractionError, Result};
use crate::field::{ColumnMeta, Field, FieldKind, FieldValue};
use crate::record::ErasedRecord;
use crate::registry::SchemaRegistry;
use crate::row::RowValues;
use crate::settings::CsvSettings;
use rayon::prelude::*;

/// Flattens records into [`RowValues`] using a shared registry and settings.
pub struct Extractor<'a> {
    settings: &'a CsvSettings,
    registry: &'a SchemaRegistry,
}

impl<'a> Extractor<'a> {
    /// An extractor over the given settings and registry.
    pub fn new(settings: &'a CsvSettings, registry: &'a SchemaRegistry) -> Self {
        Self { settings, registry }
    }

    /// Flatten `record` into `row`.
    ///
    /// Nested record types are registered on first encounter. Cells already
    /// present in `row` participate in duplicate-order detection.
    pub fn extract(&self, record: &dyn ErasedRecord, row: &mut RowValues) -> Result<()> {
        let schema = self.registry.schema_of(record)?;
        for field in schema.fields() {
            self.apply(field, record, row)?;
        }
        Ok(())
    }

    /// Flatten `record` into a fresh row.
    pub fn extract_row(&self, record: &dyn ErasedRecord) -> Result<RowValues> {
        let mut row = RowValues::new();
        self.extract(record, &mut row)?;
        Ok(row)
    }

    fn apply(&self, field: &Field, record: &dyn ErasedRecord, row: &mut RowValues) -> Result<()> {
        let value = field.value(record.as_any())?;
        self.check_kind(field, record, &value)?;
        match value {
            FieldValue::Unsupported => Ok(()),
            FieldValue::Nested(inner) => self.extract(inner, row),
            FieldValue::Scalar(text) => {
                let meta = self.require_meta(field, record)?;
                row.insert(meta.order, text)?;
                Ok(())
            }
            FieldValue::ScalarSeq(items) => {
                let meta = self.require_meta(field, record)?;
                let joined = items.join(&self.settings.value_separator);
                let cell = if meta.flatten.unwrap_or(self.settings.flatten_arrays) {
                    joined
                } else {
                    format!("[{joined}]")
                };
                row.insert(meta.order, cell)?;
                Ok(())
            }
            FieldValue::NestedSeq(elements) => {
                let meta = self.require_meta(field, record)?;
                row.insert(meta.order, self.braced_rows(&elements)?)?;
                Ok(())
            }
        }
    }

    /// Render a record sequence as `[{cells}{cells}..]`.
    ///
    /// Sub-rows are extracted in parallel; the rendered pieces are collected
    /// in element order, so repeated runs produce the same cell.
    fn braced_rows(&self, elements: &[&dyn ErasedRecord]) -> Result<String> {
        let pieces = elements
            .into_par_iter()
            .map(|element| {
                let sub = self.extract_row(*element)?;
                Ok::<_, Error>(format!("{{{}}}", sub.join(&self.settings.value_separator)))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(format!("[{}]", pieces.concat()))
    }

    fn check_kind(
        &self,
        field: &Field,
        record: &dyn ErasedRecord,
        value: &FieldValue<'_>,
    ) -> Result<()> {
        let produced = value.kind();
        // An Unsupported value is dropped by `apply` regardless of the
        // declared kind.
        if produced == FieldKind::Unsupported || produced == field.kind() {
            return Ok(());
        }
        let name = field.meta().map_or("<unnamed>", |m| m.name);
        Err(Error::Extraction(ExtractionError::new(
            record.type_tag().name,
            format!(
                "field {name:?} is declared {:?} but its accessor produced {produced:?}",
                field.kind()
            ),
        )))
    }

    fn require_meta(&self, field: &Field, record: &dyn ErasedRecord) -> Result<ColumnMeta> {
        field.meta().ok_or_else(|| {
            Error::Extraction(ExtractionError::new(
                record.type_tag().name,
                format!(
                    "{:?} field produced a column value but carries no column metadata",
                    field.kind()
                ),
            ))
        })
    }
}
