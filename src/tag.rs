//! Runtime type tags.
//!
//! Records cross the extraction boundary as `&dyn ErasedRecord`, so the
//! registry and the error paths need a way to talk about concrete types
//! without carrying a generic parameter. [`TypeTag`] carries the `TypeId`
//! (used as the registry key) together with a readable type name (used in
//! error messages and debug output).

use std::any::{TypeId, type_name};

/// A lightweight runtime type tag for registry keys and assertions.
///
/// ```
/// use rowmill::TypeTag;
///
/// let tag = TypeTag::of::<u32>();
/// assert_eq!(tag, TypeTag::of::<u32>());
/// assert_ne!(tag, TypeTag::of::<i64>());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TypeTag {
    /// Stable Rust type identifier.
    pub id: TypeId,
    /// Human-readable type name (best-effort).
    pub name: &'static str,
}

impl TypeTag {
    /// Construct a tag for `T`.
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }
}
