//! Header construction from a root type's transitive schema.
//!
//! Headers are built from declarations alone, no record instances involved:
//! the walk descends into nested fields through their statically captured
//! schema sources and places cells through the same duplicate-checking map
//! extraction uses, so order collisions across nesting levels fail here too.
//!
//! Cell rules mirror value rendering. A scalar contributes its name. A
//! scalar sequence under flatten mode contributes `width` indexed cells
//! (`Name0` through `Name{width-1}`, joined by the header separator); the
//! declared width is authoritative, actual sequence lengths are never
//! consulted, and width 0 leaves an empty cell. Without flattening the
//! sequence stays a single `Name` cell, and a record sequence is always a
//! single `Name` cell regardless of mode.

use crate::error::{Error, Result, SchemaError};
use crate::field::{ColumnMeta, Field, FieldKind};
use crate::record::Record;
use crate::registry::{Schema, SchemaRegistry};
use crate::row::RowValues;
use crate::settings::CsvSettings;

/// Build the header line for `T`, registering its transitive schemas.
pub fn build_header<T: Record>(
    registry: &SchemaRegistry,
    settings: &CsvSettings,
) -> Result<String> {
    let schema = registry.get::<T>()?;
    let mut cells = RowValues::new();
    collect_cells(&schema, registry, settings, &mut cells)?;
    Ok(cells.join(&settings.header_separator))
}

fn collect_cells(
    schema: &Schema,
    registry: &SchemaRegistry,
    settings: &CsvSettings,
    cells: &mut RowValues,
) -> Result<()> {
    for field in schema.fields() {
        match field.kind() {
            FieldKind::Unsupported => {}
            FieldKind::Nested => {
                let source = field.nested_schema().ok_or_else(|| {
                    Error::Schema(SchemaError::new(
                        schema.tag().name,
                        "nested field has no schema source; declare it with Field::nested",
                    ))
                })?;
                let nested = registry.get_by_tag(source.tag, source.fields)?;
                collect_cells(&nested, registry, settings, cells)?;
            }
            FieldKind::Scalar | FieldKind::NestedSeq => {
                let meta = require_meta(schema, field)?;
                cells.insert(meta.order, meta.name.to_string())?;
            }
            FieldKind::ScalarSeq => {
                let meta = require_meta(schema, field)?;
                let cell = if meta.flatten.unwrap_or(settings.flatten_arrays) {
                    indexed_cells(meta.name, meta.width, &settings.header_separator)
                } else {
                    meta.name.to_string()
                };
                cells.insert(meta.order, cell)?;
            }
        }
    }
    Ok(())
}

/// `Name0<sep>Name1<sep>..Name{width-1}`, empty for width 0.
fn indexed_cells(name: &str, width: usize, separator: &str) -> String {
    let mut out = String::new();
    for i in 0..width {
        if i > 0 {
            out.push_str(separator);
        }
        out.push_str(name);
        out.push_str(&i.to_string());
    }
    out
}

fn require_meta(schema: &Schema, field: &Field) -> Result<ColumnMeta> {
    field.meta().ok_or_else(|| {
        Error::Schema(SchemaError::new(
            schema.tag().name,
            format!(
                "{:?} field produces a column but carries no column metadata",
                field.kind()
            ),
        ))
    })
}
