use crate::field::FieldValue;
use crate::step::Step;
use ahash::AHashMap;

/// The single source of truth for field state within one form session.
///
/// Keys are globally unique field keys (`servar.key`). Mutation is wholesale:
/// arrays are replaced, never spliced, so hosts can detect changes by value
/// identity or by watching [`FieldStore::version`]. The store assumes the
/// single-writer discipline described in the crate docs; it takes no locks.
#[derive(Debug, Clone, Default)]
pub struct FieldStore {
    values: AHashMap<String, FieldValue>,
    version: u64,
}

impl FieldStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Overwrites the value under `key`, bumping the store version.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.values.insert(key.into(), value.into());
        self.version += 1;
    }

    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        let removed = self.values.remove(key);
        if removed.is_some() {
            self.version += 1;
        }
        removed
    }

    /// Monotonic mutation counter. Cheap change detection for hosts that
    /// cache derived state (visibility maps, grid trees).
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn values(&self) -> impl Iterator<Item = &FieldValue> {
        self.values.values()
    }

    /// Seeds type-appropriate defaults for every field on `step` that does
    /// not yet hold a value. Repeated fields seed as an empty list so the
    /// repeat machinery sees an array from the start.
    pub fn seed_step(&mut self, step: &Step) {
        for field in &step.servar_fields {
            if self.values.contains_key(&field.servar.key) {
                continue;
            }
            let value = if field.servar.repeated {
                FieldValue::List(Vec::new())
            } else {
                field.servar.default_value()
            };
            tracing::trace!(key = %field.servar.key, "seeding field default");
            self.values.insert(field.servar.key.clone(), value);
            self.version += 1;
        }
    }

    /// Bulk-applies a session payload. Only JSON objects contribute entries;
    /// anything else is ignored with a warning since session hydration is
    /// backend-authored and must not take the form down.
    pub fn hydrate(&mut self, payload: serde_json::Value) {
        match payload {
            serde_json::Value::Object(entries) => {
                for (key, value) in entries {
                    self.values.insert(key, FieldValue::from(value));
                }
                self.version += 1;
            }
            other => {
                tracing::warn!(?other, "ignoring non-object hydration payload");
            }
        }
    }
}
