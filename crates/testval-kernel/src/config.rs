//! Per-run validator settings.

use serde::Deserialize;

/// Default success marker.
pub const DEFAULT_SUCCESS_MARKER: &str = "VALIDATED";

/// Configuration for a validation run.
///
/// Deserializes from the `[validator]` table of a testval config file; every
/// field is optional there.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Line written to the sink when a run validates.
    pub success_marker: String,
    /// Reject a run whose grammar never consumed end of file.
    pub require_end_of_file: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            success_marker: DEFAULT_SUCCESS_MARKER.to_string(),
            require_end_of_file: false,
        }
    }
}

impl ValidatorConfig {
    /// Builder: set `require_end_of_file`.
    pub fn with_require_end_of_file(mut self, require: bool) -> Self {
        self.require_end_of_file = require;
        self
    }

    /// Builder: set the success marker.
    pub fn with_success_marker(mut self, marker: impl Into<String>) -> Self {
        self.success_marker = marker.into();
        self
    }
}
