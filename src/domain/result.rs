//! Result type alias for cycletime

use super::errors::CycleTimeError;

/// Result type alias for cycletime operations
///
/// # Examples
///
/// ```
/// use cycletime::domain::result::Result;
/// use cycletime::domain::errors::CycleTimeError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(CycleTimeError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, CycleTimeError>;
