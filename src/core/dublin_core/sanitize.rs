//! XML-safe text for `dcvalue` elements
//!
//! Values are trimmed, stripped of control characters and entity-escaped.
//! Binary columns are repaired to UTF-8 with [`repair_utf8`] when they are
//! read. Suppression of empty and `"0"` values is decided on the raw trimmed
//! value, before any of that.

/// Returns true if a value must not be written at all
///
/// Empty values and the literal `"0"` (the database's placeholder for
/// "unknown") are suppressed.
pub fn is_suppressed(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed == "0"
}

/// Produces XML text content from a string value
///
/// # Examples
///
/// ```
/// use dcexport::core::dublin_core::sanitize::clean_value;
///
/// assert_eq!(clean_value("  Fish & <Chips>\u{7} "), "Fish &amp; &lt;Chips&gt;");
/// ```
pub fn clean_value(value: &str) -> String {
    escape_xml(&strip_control_chars(value.trim()))
}

/// Keeps the valid UTF-8 runs of `raw`, discarding everything else
pub fn repair_utf8(raw: &[u8]) -> String {
    let mut repaired = String::with_capacity(raw.len());
    for chunk in raw.utf8_chunks() {
        repaired.push_str(chunk.valid());
    }
    repaired
}

/// Removes C0, DEL and C1 control characters, including tabs and newlines
pub fn strip_control_chars(value: &str) -> String {
    value.chars().filter(|c| !c.is_control()).collect()
}

/// Escapes the five XML-reserved characters
pub fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
