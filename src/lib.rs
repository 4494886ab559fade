// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! cmlint - Conventional commit message linter
//!
//! Lints commit messages against a commitlint-compatible rule document.
//!
//! # Features
//!
//! - **Rule Documents**: TOML or JSON, with `extends` over built-in bases
//! - **Conventional Parsing**: type, scope, subject, body, footer, references
//! - **Rule Engine**: the standard commitlint rule set with severities
//! - **Git Integration**: lint existing commits, ranges, and the edit message
//! - **Git Hooks**: `commit-msg` hook installation
//!
//! # Example
//!
//! ```no_run
//! use cmlint::config::ConfigDocument;
//! use cmlint::rules::RuleEngine;
//!
//! let config = ConfigDocument::load().unwrap();
//! let engine = RuleEngine::new(config);
//!
//! let report = engine.lint("feat(core): add thing").unwrap();
//! println!("{}", report.summary());
//! ```

// Module declarations
pub mod cli;
pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod hooks;
pub mod rules;

// Re-exports for convenience
pub use config::ConfigDocument;
pub use error::{CmlintError, Result};
pub use rules::RuleEngine;

/// Version information embedded at compile time.
pub mod version {
    /// The current version of cmlint.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// The git SHA at compile time (if available).
    pub const GIT_SHA: Option<&str> = option_env!("VERGEN_GIT_SHA");

    /// The git commit date at compile time (if available).
    pub const GIT_COMMIT_DATE: Option<&str> = option_env!("VERGEN_GIT_COMMIT_DATE");

    /// Get a formatted version string.
    pub fn version_string() -> String {
        match (GIT_SHA, GIT_COMMIT_DATE) {
            (Some(sha), Some(date)) => {
                format!("{} ({} {})", VERSION, &sha[..7.min(sha.len())], date)
            }
            (Some(sha), None) => {
                format!("{} ({})", VERSION, &sha[..7.min(sha.len())])
            }
            _ => VERSION.to_string(),
        }
    }

}
