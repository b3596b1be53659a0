//! Options that tune a semantic-analysis run.

use serde::{Deserialize, Serialize};

/// The `[analysis]` table of `decaf.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Upper bound on the number of diagnostics handed back to the caller.
    ///
    /// Analysis always walks the whole program; the cap only trims the
    /// reported list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_diagnostics: Option<usize>,
}

impl AnalysisOptions {
    #[must_use]
    pub fn with_max_diagnostics(max: usize) -> Self {
        Self {
            max_diagnostics: Some(max),
        }
    }
}
