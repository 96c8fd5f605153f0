//! Record declaration traits.
//!
//! A type joins the flattening machinery by implementing [`Record`]: a single
//! static function listing its fields (order metadata plus typed accessors).
//! The declaration is evaluated once per process and cached by the
//! [`SchemaRegistry`](crate::SchemaRegistry); everything downstream works on
//! the cached [`Schema`](crate::Schema).
//!
//! Values travel through the extractor as `&dyn ErasedRecord`, the
//! object-safe view auto-implemented for every `Record`. It carries just
//! enough to keep the erased side honest: the concrete type's tag, its field
//! list function, and an `Any` view for the accessors to downcast.

use crate::field::Field;
use crate::tag::TypeTag;
use std::any::Any;

/// A composite type that can be flattened into delimited cells.
///
/// Implementations list the type's fields in any order; cells are positioned
/// by each field's display order, not by declaration order. Display orders
/// must be unique across the whole transitive flattening of a root type
/// (nested fields contribute their cells to the same row), otherwise
/// extraction fails with a
/// [`DuplicateColumnError`](crate::DuplicateColumnError).
///
/// `Send + Sync + 'static` are supertraits because records are shared across
/// rayon workers during parallel rendering.
pub trait Record: Send + Sync + 'static {
    /// The type's field declarations.
    ///
    /// Called at most once per type per registry; treat it as a pure
    /// description, not a place for side effects.
    fn fields() -> Vec<Field>
    where
        Self: Sized;
}

/// Object-safe view of a [`Record`], auto-implemented for every implementor.
///
/// Nested values and sequence elements travel as `&dyn ErasedRecord` so the
/// extractor can recurse without knowing concrete types at compile time.
pub trait ErasedRecord: Send + Sync {
    /// Tag of the concrete type behind this reference.
    fn type_tag(&self) -> TypeTag;

    /// The concrete type's field list function, used by the registry to
    /// build the schema on first encounter.
    fn field_fn(&self) -> fn() -> Vec<Field>;

    /// `Any` view for accessor downcasts.
    fn as_any(&self) -> &dyn Any;
}

impl<T: Record> ErasedRecord for T {
    fn type_tag(&self) -> TypeTag {
        TypeTag::of::<T>()
    }

    fn field_fn(&self) -> fn() -> Vec<Field> {
        T::fields
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
