//! Allows serialization and deserialization to JSON, with the ``serde`` crate.
//!
//! Every value that crosses a host boundary (configuration, rules, resolved holidays and week
//! descriptors) implements [`JSON`] so the application and the display extension can exchange
//! them through whatever key-value channel they share.

use serde::{Deserialize, Serialize};

use crate::AlmanacError;

/// Handles the `to` and `from` JSON conversion.
pub trait JSON: Serialize + for<'de> Deserialize<'de> {
    /// Return a JSON string representing the object.
    fn to_json(&self) -> Result<String, AlmanacError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Return an indented JSON string, for human edited data files.
    fn to_json_pretty(&self) -> Result<String, AlmanacError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Create an object from a JSON string representation.
    fn from_json(json: &str) -> Result<Self, AlmanacError> {
        Ok(serde_json::from_str(json)?)
    }
}
