//! Query filters

use serde_json::{Map, Value};
use smallvec::SmallVec;

/// Top-level field equality, all of which must hold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    fields: SmallVec<[(&'static str, Value); 3]>,
}

impl Filter {
    /// Match every document.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Additionally require `field == value`.
    #[must_use]
    pub fn eq(mut self, field: &'static str, value: impl Into<Value>) -> Self {
        self.fields.push((field, value.into()));
        self
    }

    /// Require `field == value` when a value is given.
    #[must_use]
    pub fn eq_opt<V: Into<Value>>(self, field: &'static str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.eq(field, value),
            None => self,
        }
    }

    /// Whether `document` satisfies every condition.
    #[must_use]
    pub fn matches(&self, document: &Value) -> bool {
        self.fields
            .iter()
            .all(|(field, value)| document.get(field) == Some(value))
    }

    /// The filter as a JSON object, for containment (`@>`) queries.
    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.fields
                .iter()
                .map(|(field, value)| ((*field).to_string(), value.clone()))
                .collect::<Map<String, Value>>(),
        )
    }
}
