//! Field declarations: column metadata, kinds, and typed accessors.
//!
//! This module provides:
//! - [`ColumnMeta`]: per-field display order, header name, sequence width,
//!   and the optional per-field flatten override.
//! - [`FieldKind`] / [`FieldValue`]: the declared shape of a field and the
//!   tagged value its accessor produces. The extractor dispatches on the
//!   value tag and cross-checks it against the declared kind.
//! - [`Field`]: one field of one record type, pairing metadata with a
//!   type-erased accessor. The typed constructors ([`Field::scalar`],
//!   [`Field::array`], [`Field::table`], [`Field::nested`]) wrap an ordinary
//!   closure over the concrete record type and erase it behind `dyn Any`,
//!   so a `Vec<Field>` can describe any record uniformly.
//!
//! Accessors are infallible closures over `&T`; the only failure introduced
//! by erasure is a downcast mismatch, which surfaces as an
//! [`ExtractionError`](crate::ExtractionError) naming the expected type.

use crate::error::{Error, ExtractionError, Result};
use crate::record::{ErasedRecord, Record};
use crate::tag::TypeTag;
use std::any::Any;
use std::fmt;

/// Display metadata for one column-producing field.
///
/// `order` positions the cell in the final row (ascending, globally unique
/// across the transitive flattening). `width` only matters for scalar
/// sequences rendered in flatten mode, where the header expands into exactly
/// `width` indexed cells. `flatten` overrides the global
/// [`CsvSettings::flatten_arrays`](crate::CsvSettings) for this field alone.
///
/// ```
/// use rowmill::ColumnMeta;
///
/// let meta = ColumnMeta::new(3, "Leg").with_width(2).with_flatten(true);
/// assert_eq!(meta.width, 2);
/// assert_eq!(meta.flatten, Some(true));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnMeta {
    /// Position of this cell in the rendered row, ascending.
    pub order: u32,
    /// Header name for this cell.
    pub name: &'static str,
    /// Header cell count when a scalar sequence is flattened.
    pub width: usize,
    /// Per-field flatten override; `None` defers to the global setting.
    pub flatten: Option<bool>,
}

impl ColumnMeta {
    /// Metadata with the given order and name, width 0, no flatten override.
    pub fn new(order: u32, name: &'static str) -> Self {
        Self {
            order,
            name,
            width: 0,
            flatten: None,
        }
    }

    /// Set the flattened header width for a sequence field.
    #[must_use]
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Force flattening on (or off) for this field regardless of the global
    /// setting. Applies to both the value cell and the header cells.
    #[must_use]
    pub fn with_flatten(mut self, flatten: bool) -> Self {
        self.flatten = Some(flatten);
        self
    }
}

/// The declared shape of a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// One value, one cell.
    Scalar,
    /// A sequence of scalar values, rendered into one cell (bracketed) or
    /// spread bare, per the flatten mode.
    ScalarSeq,
    /// A sequence of records, rendered `[{..}{..}]` into one cell.
    NestedSeq,
    /// A single nested record whose cells flatten into the parent row.
    Nested,
    /// A field the renderer does not handle; skipped without error.
    Unsupported,
}

/// A value produced by a field accessor, tagged by shape.
///
/// Borrowed variants keep the record's lifetime: nested records and sequence
/// elements are handed out as `&dyn ErasedRecord` views into the original
/// value, never cloned.
pub enum FieldValue<'a> {
    /// Rendered scalar text.
    Scalar(String),
    /// A nested record to recurse into.
    Nested(&'a dyn ErasedRecord),
    /// Rendered elements of a scalar sequence.
    ScalarSeq(Vec<String>),
    /// Elements of a record sequence.
    NestedSeq(Vec<&'a dyn ErasedRecord>),
    /// Nothing; the extractor skips the field silently.
    Unsupported,
}

impl FieldValue<'_> {
    /// The shape tag of this value.
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Scalar(_) => FieldKind::Scalar,
            FieldValue::Nested(_) => FieldKind::Nested,
            FieldValue::ScalarSeq(_) => FieldKind::ScalarSeq,
            FieldValue::NestedSeq(_) => FieldKind::NestedSeq,
            FieldValue::Unsupported => FieldKind::Unsupported,
        }
    }
}

impl fmt::Debug for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Scalar(s) => f.debug_tuple("Scalar").field(s).finish(),
            FieldValue::Nested(r) => f.debug_tuple("Nested").field(&r.type_tag().name).finish(),
            FieldValue::ScalarSeq(v) => f.debug_tuple("ScalarSeq").field(v).finish(),
            FieldValue::NestedSeq(v) => write!(f, "NestedSeq(<{} records>)", v.len()),
            FieldValue::Unsupported => write!(f, "Unsupported"),
        }
    }
}

/// Statically captured schema source of a nested field's record type.
///
/// Header building walks schemas without any record instance in hand, so a
/// [`FieldKind::Nested`] field carries the nested type's tag and field list
/// function at declaration time.
#[derive(Clone, Copy, Debug)]
pub struct NestedSchema {
    /// Tag of the nested record type.
    pub tag: TypeTag,
    /// The nested type's field list function.
    pub fields: fn() -> Vec<Field>,
}

/// Type-erased accessor: record in, tagged value out.
type Access = Box<dyn for<'a> Fn(&'a dyn Any) -> Result<FieldValue<'a>> + Send + Sync>;

/// One field of one record type.
///
/// ```
/// use rowmill::{ColumnMeta, Field, Record};
///
/// struct Trade {
///     id: u32,
///     legs: Vec<String>,
/// }
///
/// impl Record for Trade {
///     fn fields() -> Vec<Field> {
///         vec![
///             Field::scalar(ColumnMeta::new(1, "Id"), |t: &Trade| t.id),
///             Field::array(ColumnMeta::new(2, "Leg").with_width(2), |t: &Trade| {
///                 t.legs.as_slice()
///             }),
///         ]
///     }
/// }
/// ```
pub struct Field {
    meta: Option<ColumnMeta>,
    kind: FieldKind,
    access: Access,
    nested: Option<NestedSchema>,
}

impl Field {
    /// A scalar field rendered with `ToString`.
    ///
    /// The getter returns an owned value; clone cheap handles (`String`,
    /// numbers) rather than borrowing out of the record.
    pub fn scalar<T, V, F>(meta: ColumnMeta, get: F) -> Self
    where
        T: Record,
        V: ToString,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        Self {
            meta: Some(meta),
            kind: FieldKind::Scalar,
            access: erase::<T, _>(move |record| {
                Ok(FieldValue::Scalar(get(record).to_string()))
            }),
            nested: None,
        }
    }

    /// A sequence of scalars, borrowed as a slice from the record.
    pub fn array<T, V, F>(meta: ColumnMeta, get: F) -> Self
    where
        T: Record,
        V: ToString,
        F: Fn(&T) -> &[V] + Send + Sync + 'static,
    {
        Self {
            meta: Some(meta),
            kind: FieldKind::ScalarSeq,
            access: erase::<T, _>(move |record| {
                Ok(FieldValue::ScalarSeq(
                    get(record).iter().map(ToString::to_string).collect(),
                ))
            }),
            nested: None,
        }
    }

    /// A sequence of nested records, rendered `[{..}{..}]` into one cell.
    pub fn table<T, N, F>(meta: ColumnMeta, get: F) -> Self
    where
        T: Record,
        N: Record,
        F: Fn(&T) -> &[N] + Send + Sync + 'static,
    {
        Self {
            meta: Some(meta),
            kind: FieldKind::NestedSeq,
            access: erase::<T, _>(move |record| {
                Ok(FieldValue::NestedSeq(
                    get(record)
                        .iter()
                        .map(|element| element as &dyn ErasedRecord)
                        .collect(),
                ))
            }),
            nested: None,
        }
    }

    /// A nested record whose cells flatten into the parent row.
    ///
    /// Produces no cell of its own, so it takes no [`ColumnMeta`]. The nested
    /// type's schema source is captured statically for header walks.
    pub fn nested<T, N, F>(get: F) -> Self
    where
        T: Record,
        N: Record,
        F: Fn(&T) -> &N + Send + Sync + 'static,
    {
        Self {
            meta: None,
            kind: FieldKind::Nested,
            access: erase::<T, _>(move |record| Ok(FieldValue::Nested(get(record)))),
            nested: Some(NestedSchema {
                tag: TypeTag::of::<N>(),
                fields: N::fields,
            }),
        }
    }

    /// A field the renderer skips entirely.
    ///
    /// Use this to keep a placeholder for data with no delimited-text
    /// rendering; it contributes neither a cell nor a header.
    pub fn unsupported<T: Record>() -> Self {
        Self {
            meta: None,
            kind: FieldKind::Unsupported,
            access: erase::<T, _>(|_record| Ok(FieldValue::Unsupported)),
            nested: None,
        }
    }

    /// General constructor for a custom accessor.
    ///
    /// The closure must produce values matching `kind`; the extractor rejects
    /// a mismatched tag. A [`FieldKind::Nested`] field built this way has no
    /// schema source, so header building for the enclosing type will fail;
    /// use [`Field::nested`] for nested records.
    pub fn new<T, F>(meta: Option<ColumnMeta>, kind: FieldKind, get: F) -> Self
    where
        T: Record,
        F: for<'r> Fn(&'r T) -> FieldValue<'r> + Send + Sync + 'static,
    {
        Self {
            meta,
            kind,
            access: erase::<T, _>(move |record| Ok(get(record))),
            nested: None,
        }
    }

    /// Column metadata, if this field produces a cell.
    pub fn meta(&self) -> Option<ColumnMeta> {
        self.meta
    }

    /// The declared shape of this field.
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Schema source of a nested field's record type.
    pub fn nested_schema(&self) -> Option<NestedSchema> {
        self.nested
    }

    /// Run the accessor against an erased record.
    pub fn value<'a>(&self, record: &'a dyn Any) -> Result<FieldValue<'a>> {
        (self.access)(record)
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("meta", &self.meta)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Wrap a typed accessor into the erased form, pinning the downcast to `T`.
fn erase<T, F>(read: F) -> Access
where
    T: Record,
    F: for<'r> Fn(&'r T) -> Result<FieldValue<'r>> + Send + Sync + 'static,
{
    Box::new(move |any: &dyn Any| match any.downcast_ref::<T>() {
        Some(record) => read(record),
        None => Err(Error::Extraction(ExtractionError::new(
            TypeTag::of::<T>().name,
            "accessor applied to a record of a different type",
        ))),
    })
}
