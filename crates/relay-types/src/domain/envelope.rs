use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Uniform `{success, error?, ...}` body returned by every relay operation.
///
/// Built only through [`Envelope::ok`] and [`Envelope::failure`], so a failed
/// envelope always carries an error message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope {
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl Envelope {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
            fields: Map::new(),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            fields: Map::new(),
        }
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}
