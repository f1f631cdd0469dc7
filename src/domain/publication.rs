//! Publication records read from the scholarly works database
//!
//! Each struct deserializes from a [`Row`](crate::domain::row::Row) of the
//! matching query. Text columns are read leniently: `NULL` is an empty
//! string and integer columns keep their decimal form.

use crate::domain::ids::PublicationId;
use crate::domain::row::lenient_text;
use serde::{Deserialize, Serialize};

/// One row of the main publications table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    /// Primary key, also names the output folder
    pub pub_id: PublicationId,

    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,

    /// Abstract text (`abstract` is a reserved word in Rust)
    #[serde(rename = "abstract", default, deserialize_with = "lenient_text")]
    pub abstract_text: String,

    /// Publication year, kept as text since the column type varies
    #[serde(default, deserialize_with = "lenient_text")]
    pub year: String,

    /// PDF filename inside the intake directory
    #[serde(default, deserialize_with = "lenient_text")]
    pub pub_file: String,
}

/// Journal citation for a publication
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    #[serde(default, deserialize_with = "lenient_text")]
    pub journal: String,

    #[serde(default, deserialize_with = "lenient_text")]
    pub volume: String,

    /// Start page
    #[serde(default, deserialize_with = "lenient_text")]
    pub spage: String,

    /// End page
    #[serde(default, deserialize_with = "lenient_text")]
    pub epage: String,

    /// Page count or size
    #[serde(default, deserialize_with = "lenient_text")]
    pub extent: String,
}

/// Publication author
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Author {
    #[serde(default, deserialize_with = "lenient_text")]
    pub fname: String,

    #[serde(default, deserialize_with = "lenient_text")]
    pub lname: String,
}

impl Author {
    /// Display name in "Last, First" form, or just "Last" without a first name
    ///
    /// # Examples
    ///
    /// ```
    /// use dcexport::domain::Author;
    ///
    /// let author = Author { fname: "Jane".into(), lname: "Doe".into() };
    /// assert_eq!(author.full_name(), "Doe, Jane");
    /// ```
    pub fn full_name(&self) -> String {
        let first = self.fname.trim();
        let last = self.lname.trim();
        if first.is_empty() {
            last.to_string()
        } else {
            format!("{last}, {first}")
        }
    }
}

/// Controlled-vocabulary category name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
}

/// Free tag name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
}
