// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule engine module for commit validation.
//!
//! Rules are looked up by name from the rule document and applied to a
//! parsed [`CommitMessage`](crate::commit::CommitMessage).

mod builtin;
pub mod case;
mod engine;
mod report;

pub use builtin::{builtin_rules, find_rule, Rule, RuleDef, RuleKind, RuleOutcome};
pub use case::Case;
pub use engine::{is_ignored, RuleEngine};
pub use report::{LintIssue, LintReport};
