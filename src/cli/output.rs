//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::ApiError;

/// Map domain/service errors to a string for CLI output.
///
/// Verification failures already read as a report and are printed as-is.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::VerificationFailed { .. } | ApiError::DigestLengthMismatch { .. } => e.to_string(),
        _ => format!("Error: {}", e),
    }
}
