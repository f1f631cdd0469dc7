//! Result type alias for dcexport

use super::errors::DcExportError;

/// Result type alias for dcexport operations
///
/// # Examples
///
/// ```
/// use dcexport::domain::result::Result;
/// use dcexport::domain::errors::DcExportError;
///
/// fn failing_function() -> Result<()> {
///     Err(DcExportError::Export("Invalid input".to_string()))
/// }
/// assert!(failing_function().is_err());
/// ```
pub type Result<T> = std::result::Result<T, DcExportError>;
