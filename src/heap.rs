//! Object heap
//!
//! An append-only arena of objects. Each allocation takes the next index, so
//! locations are unique and increase in allocation order; nothing is ever
//! freed during a run.

use crate::error::EslError;
use crate::prelude::{IndexMap, index_map_new};
use crate::value::{Location, Value};

/// A heap object: an insertion-ordered map from field name to value
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Object {
    fields: IndexMap<String, Value>,
}

impl Object {
    pub fn new() -> Self {
        Self {
            fields: index_map_new(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn set(&mut self, field: impl Into<String>, value: Value) {
        self.fields.insert(field.into(), value);
    }

    /// Remove a field, keeping the relative order of the remaining ones
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.shift_remove(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }
}

/// The global object table
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Heap {
    objects: Vec<Object>,
}

impl Heap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh, empty object
    pub fn allocate_object(&mut self) -> Location {
        let location = Location::new(self.objects.len());
        self.objects.push(Object::new());
        location
    }

    pub fn object(&self, location: Location) -> Result<&Object, EslError> {
        self.objects
            .get(location.index())
            .ok_or_else(|| EslError::unknown_location(location))
    }

    fn object_mut(&mut self, location: Location) -> Result<&mut Object, EslError> {
        self.objects
            .get_mut(location.index())
            .ok_or_else(|| EslError::unknown_location(location))
    }

    /// Look up a field; an unset field on an existing object yields [`Value::Absent`]
    pub fn get_field(&self, location: Location, field: &str) -> Result<Value, EslError> {
        Ok(self
            .object(location)?
            .get(field)
            .cloned()
            .unwrap_or(Value::Absent))
    }

    pub fn set_field(
        &mut self,
        location: Location,
        field: impl Into<String>,
        value: Value,
    ) -> Result<(), EslError> {
        self.object_mut(location)?.set(field, value);
        Ok(())
    }

    pub fn has_field(&self, location: Location, field: &str) -> Result<bool, EslError> {
        Ok(self.object(location)?.contains(field))
    }

    /// Delete a field; deleting an unset field is a no-op
    pub fn delete_field(&mut self, location: Location, field: &str) -> Result<(), EslError> {
        self.object_mut(location)?.remove(field);
        Ok(())
    }

    /// Fields of an object in insertion order
    pub fn fields(
        &self,
        location: Location,
    ) -> Result<impl Iterator<Item = (&String, &Value)>, EslError> {
        Ok(self.object(location)?.iter())
    }

    /// Number of objects allocated so far
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
