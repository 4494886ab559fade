// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Hook script templates.

use std::str::FromStr;

/// Marker line identifying scripts written by cmlint.
pub const HOOK_MARKER: &str = "# cmlint git hook";

/// Git hooks cmlint knows how to install.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookTemplate {
    /// Lints the message file git passes as `$1`.
    CommitMsg,
}

impl HookTemplate {
    /// File name under `.git/hooks`.
    pub fn filename(&self) -> &'static str {
        match self {
            HookTemplate::CommitMsg => "commit-msg",
        }
    }

    /// All installable hooks.
    pub fn all() -> &'static [HookTemplate] {
        &[HookTemplate::CommitMsg]
    }

    /// Generate the hook script.
    pub fn generate(&self) -> String {
        let command = match self {
            HookTemplate::CommitMsg => "cmlint lint --edit \"$1\"",
        };

        format!(
            "#!/bin/sh\n{}\n# Generated by cmlint v{}\n\nexec {}\n",
            HOOK_MARKER,
            crate::version::VERSION,
            command
        )
    }
}

impl FromStr for HookTemplate {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "commit-msg" | "commit_msg" => Ok(HookTemplate::CommitMsg),
            _ => Err(()),
        }
    }
}
