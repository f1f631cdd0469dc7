//! Item folder names and filename checks

use crate::domain::ids::MAX_FOLDER_DIGITS;
use crate::domain::{DcExportError, PublicationId, Result};

/// Resolves the folder width for a run and checks every identifier fits
///
/// A configured width of 0 means "as wide as the largest identifier".
///
/// # Errors
///
/// Returns a configuration error if any identifier is negative or has more
/// digits than the width, before any folder is created.
pub fn resolve_folder_digits(configured: usize, ids: &[PublicationId]) -> Result<usize> {
    let width = if configured == 0 {
        ids.iter()
            .map(PublicationId::digit_count)
            .max()
            .unwrap_or(1)
    } else {
        configured
    };

    if width > MAX_FOLDER_DIGITS {
        return Err(DcExportError::Configuration(format!(
            "folder width {width} exceeds the maximum of {MAX_FOLDER_DIGITS}"
        )));
    }

    let overflowing: Vec<String> = ids
        .iter()
        .filter_map(|id| id.folder_name(width).err())
        .collect();
    if !overflowing.is_empty() {
        return Err(DcExportError::Configuration(format!(
            "{} publication(s) cannot be named with export.folder_digits = {}: {}",
            overflowing.len(),
            width,
            overflowing.join("; ")
        )));
    }

    Ok(width)
}

/// Backslash-escapes spaces and parentheses for shell-facing output
///
/// # Examples
///
/// ```
/// use dcexport::core::bundle::naming::escape_filename;
///
/// assert_eq!(escape_filename("Smith (2020) final.pdf"), r"Smith\ \(2020\)\ final.pdf");
/// ```
pub fn escape_filename(filename: &str) -> String {
    let mut escaped = String::with_capacity(filename.len());
    for c in filename.chars() {
        if matches!(c, ' ' | '(' | ')') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// True if `filename` names a file directly inside the intake directory
pub fn is_plain_filename(filename: &str) -> bool {
    !filename.is_empty()
        && filename != "."
        && filename != ".."
        && !filename.contains(['/', '\\', '\0'])
}
