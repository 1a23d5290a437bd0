//! Insertion-ordered storage for field descriptors.

use indexmap::IndexMap;
use tracing::debug;

use crate::types::{FieldDescriptor, FieldValue};

/// Owns every descriptor of a form, keyed by field name.
///
/// Iteration follows insertion order. Re-inserting a name replaces the
/// descriptor in place and keeps its original position.
#[derive(Debug, Clone, Default)]
pub struct FieldStore {
    fields: IndexMap<String, FieldDescriptor>,
}

impl FieldStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `field` under its name, replacing any previous descriptor.
    pub fn insert(&mut self, field: FieldDescriptor) -> &mut FieldDescriptor {
        let (index, previous) = self.fields.insert_full(field.name.clone(), field);
        let stored = &mut self.fields[index];
        if previous.is_some() {
            debug!(name = %stored.name, kind = %stored.kind, "replaced field");
        } else {
            debug!(name = %stored.name, kind = %stored.kind, "added field");
        }
        stored
    }

    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut FieldDescriptor> {
        self.fields.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Remove a field, keeping the order of the others.
    pub fn remove(&mut self, name: &str) -> Option<FieldDescriptor> {
        self.fields.shift_remove(name)
    }

    /// Overwrite the value of every named field that exists. Names with no
    /// matching field are ignored. Returns how many fields were updated.
    pub fn set_values<K, V>(&mut self, values: impl IntoIterator<Item = (K, V)>) -> usize
    where
        K: AsRef<str>,
        V: Into<FieldValue>,
    {
        let mut updated = 0;
        for (name, value) in values {
            if let Some(field) = self.fields.get_mut(name.as_ref()) {
                field.value = value.into();
                updated += 1;
            }
        }
        debug!(updated, "set field values");
        updated
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}
