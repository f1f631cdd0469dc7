//! Publication identifier and output folder naming

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest folder width that can hold any `i64` identifier
pub const MAX_FOLDER_DIGITS: usize = 19;

/// Publication identifier newtype wrapper
///
/// Wraps the integer `pub_id` of the publications table. Rows may carry the
/// identifier as an integer or as a numeric string; both deserialize.
///
/// # Examples
///
/// ```
/// use dcexport::domain::ids::PublicationId;
///
/// let id = PublicationId::new(7);
/// assert_eq!(id.folder_name(4).unwrap(), "0007");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "IdRepr")]
pub struct PublicationId(i64);

#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Int(i64),
    Text(String),
}

impl TryFrom<IdRepr> for PublicationId {
    type Error = String;

    fn try_from(repr: IdRepr) -> Result<Self, Self::Error> {
        match repr {
            IdRepr::Int(id) => Ok(Self(id)),
            IdRepr::Text(text) => text.parse(),
        }
    }
}

impl PublicationId {
    /// Creates a new PublicationId
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier
    pub fn value(&self) -> i64 {
        self.0
    }

    /// Number of decimal digits in the identifier (sign excluded)
    pub fn digit_count(&self) -> usize {
        self.0.unsigned_abs().to_string().len()
    }

    /// Left-zero-padded folder name of exactly `width` digits
    ///
    /// # Errors
    ///
    /// Returns an error for negative identifiers and for identifiers with
    /// more digits than `width`, since either could collide with another
    /// publication's folder.
    pub fn folder_name(&self, width: usize) -> Result<String, String> {
        if self.0 < 0 {
            return Err(format!(
                "pub_id {} is negative and has no folder name",
                self.0
            ));
        }
        if self.digit_count() > width {
            return Err(format!(
                "pub_id {} has {} digits, more than the folder width of {}",
                self.0,
                self.digit_count(),
                width
            ));
        }
        Ok(format!("{:0width$}", self.0, width = width))
    }
}

impl fmt::Display for PublicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PublicationId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|e| format!("Invalid pub_id '{s}': {e}"))
    }
}

impl From<i64> for PublicationId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}
