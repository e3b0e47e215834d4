//! Controller errors.

use thiserror::Error;

/// Errors raised while setting up a controller.
///
/// Resolving a step never fails; every geometric edge case is a policy branch.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// A configuration value is outside its valid range.
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfiguration {
        /// Name of the offending field
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// A configuration document could not be parsed.
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ControllerError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field,
            reason: reason.into(),
        }
    }
}
