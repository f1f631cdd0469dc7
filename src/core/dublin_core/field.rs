//! Dublin Core `(element, qualifier, value)` triples

use super::sanitize::{clean_value, is_suppressed};
use std::fmt;

/// One Dublin Core metadata value
///
/// An empty qualifier means the value is unqualified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DublinCoreField {
    pub element: String,
    pub qualifier: String,
    pub value: String,
}

impl DublinCoreField {
    /// Creates a qualified field
    pub fn new(
        element: impl Into<String>,
        qualifier: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            element: element.into(),
            qualifier: qualifier.into(),
            value: value.into(),
        }
    }

    /// Creates a field without a qualifier
    pub fn unqualified(element: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(element, "", value)
    }

    /// True if the value is empty or `"0"` and the field must not be written
    pub fn is_suppressed(&self) -> bool {
        is_suppressed(&self.value)
    }

    /// Renders the tab-indented `dcvalue` line, or `None` for suppressed fields
    ///
    /// # Examples
    ///
    /// ```
    /// use dcexport::core::dublin_core::DublinCoreField;
    ///
    /// let field = DublinCoreField::new("date", "created", "2020");
    /// assert_eq!(
    ///     field.to_xml_line().unwrap(),
    ///     "\t<dcvalue element=\"date\" qualifier=\"created\">2020</dcvalue>\n"
    /// );
    /// ```
    pub fn to_xml_line(&self) -> Option<String> {
        if self.is_suppressed() {
            return None;
        }

        let mut line = format!("\t<dcvalue element=\"{}\"", self.element.trim());
        let qualifier = self.qualifier.trim();
        if !qualifier.is_empty() {
            line.push_str(&format!(" qualifier=\"{qualifier}\""));
        }
        line.push('>');
        line.push_str(&clean_value(&self.value));
        line.push_str("</dcvalue>\n");
        Some(line)
    }
}

impl fmt::Display for DublinCoreField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.qualifier.is_empty() {
            write!(f, "dc.{}", self.element)
        } else {
            write!(f, "dc.{}.{}", self.element, self.qualifier)
        }
    }
}
