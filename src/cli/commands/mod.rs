//! CLI command implementations
//!
//! Every command returns the process exit code:
//! 0 on success, 2 for configuration errors, 5 for fatal errors and
//! 130 when interrupted by a shutdown signal.

pub mod export;
pub mod init;
pub mod query;
pub mod validate;

use crate::domain::CycleTimeError;

/// Exit code for an error that ended a command
pub fn exit_code(error: &CycleTimeError) -> i32 {
    match error {
        CycleTimeError::Configuration(_) | CycleTimeError::Validation(_) => 2,
        CycleTimeError::Interrupted => 130,
        _ => 5,
    }
}
