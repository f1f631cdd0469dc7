//! Database rows as column maps
//!
//! A [`Row`] is what the database reader hands back for every query: a
//! mapping from column name to a JSON scalar. Typed records are
//! deserialized from rows with serde so the formatter never touches driver
//! types.

use crate::domain::{DcExportError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// One database row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row(Map<String, Value>);

impl Row {
    /// Creates an empty row
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Sets a column value, builder style
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(column, value);
        self
    }

    /// Sets a column value
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(column.into(), value.into());
    }

    /// Raw value of a column
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    /// Deserializes the row into a typed record
    ///
    /// # Errors
    ///
    /// Returns a database error naming the record type if a column has an
    /// incompatible value.
    pub fn to_record<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(Value::Object(self.0.clone())).map_err(|e| {
            DcExportError::Database(format!(
                "Cannot read {} from row: {}",
                std::any::type_name::<T>()
                    .rsplit("::")
                    .next()
                    .unwrap_or("record"),
                e
            ))
        })
    }
}

impl FromIterator<(String, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Deserializes any scalar column as text
///
/// `NULL` becomes an empty string and numbers keep their decimal form, so an
/// integer `year` column reads the same as a varchar one.
pub fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text,
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        Some(other) => other.to_string(),
    })
}
