//! Schema construction and the process-wide schema cache.
//!
//! A [`Schema`] is a record type's field list, built from `Record::fields()`
//! exactly once and shared behind an `Arc`. The [`SchemaRegistry`] is the
//! compute-if-absent cache keyed by `TypeId`: the first request for a type
//! takes the write lock, runs the field list function, validates it, and
//! inserts the result; concurrent requests for the same type block on the
//! lock and then observe the finished entry. Every later request is a read
//! lock and an `Arc` clone.
//!
//! The registry only ever grows. Requesting a second type extends the map
//! without touching existing entries, which is how nested record types get
//! registered lazily as extraction first encounters them.

use crate::error::{Result, SchemaError};
use crate::field::Field;
use crate::record::{ErasedRecord, Record};
use crate::tag::TypeTag;
use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

/// A record type's validated, immutable field list.
#[derive(Debug)]
pub struct Schema {
    tag: TypeTag,
    fields: Vec<Field>,
}

impl Schema {
    fn build(tag: TypeTag, fields: Vec<Field>) -> Result<Self, SchemaError> {
        if fields.is_empty() {
            return Err(SchemaError::new(tag.name, "type declares no fields"));
        }
        Ok(Self { tag, fields })
    }

    /// Tag of the record type this schema describes.
    pub fn tag(&self) -> TypeTag {
        self.tag
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}

/// Thread-safe, grow-only cache of `TypeId -> Arc<Schema>`.
#[derive(Default)]
pub struct SchemaRegistry {
    schemas: RwLock<HashMap<TypeId, Arc<Schema>>>,
}

impl SchemaRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The schema for `T`, building and caching it on first request.
    pub fn get<T: Record>(&self) -> Result<Arc<Schema>> {
        self.get_by_tag(TypeTag::of::<T>(), T::fields)
    }

    /// The schema for an erased record's concrete type.
    pub fn schema_of(&self, record: &dyn ErasedRecord) -> Result<Arc<Schema>> {
        self.get_by_tag(record.type_tag(), record.field_fn())
    }

    pub(crate) fn get_by_tag(
        &self,
        tag: TypeTag,
        fields: fn() -> Vec<Field>,
    ) -> Result<Arc<Schema>> {
        if let Some(schema) = self.schemas.read().unwrap().get(&tag.id) {
            return Ok(Arc::clone(schema));
        }

        let mut map = self.schemas.write().unwrap();
        // Re-check: another thread may have finished the build while we
        // waited for the write lock.
        if let Some(schema) = map.get(&tag.id) {
            return Ok(Arc::clone(schema));
        }

        // A failed build is not cached; the next request retries.
        let schema = Arc::new(Schema::build(tag, fields())?);
        map.insert(tag.id, Arc::clone(&schema));
        Ok(schema)
    }

    /// Whether `T` has a cached schema.
    pub fn contains<T: Record>(&self) -> bool {
        self.schemas.read().unwrap().contains_key(&TypeId::of::<T>())
    }

    /// Number of cached schemas.
    pub fn len(&self) -> usize {
        self.schemas.read().unwrap().len()
    }

    /// Whether no schema has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SchemaRegistry({} schemas)", self.len())
    }
}
