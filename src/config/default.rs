// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Example configuration file content.

use super::preset::project_template;

/// Generate the example configuration file written by `cmlint init`.
pub fn example_config() -> &'static str {
    r##"# cmlint configuration
#
# Copy this file to your project root, then install the hook:
#   cmlint hooks install
#
# Rule tuples are [severity, applicability, parameter]
#   severity:      0 = disabled, 1 = warning, 2 = error
#   applicability: "always" or "never"

extends = ["@commitlint/config-conventional"]
helpUrl = "https://www.conventionalcommits.org/"

[rules]
# Type
type-enum = [2, "always", [
    "feat",     # new feature
    "fix",      # bug fix
    "docs",     # documentation
    "style",    # formatting, no behaviour change
    "refactor", # restructuring
    "test",     # tests
    "build",    # build system and dependencies
    "ci",       # CI configuration
    "perf",     # performance
    "chore",    # everything else
    "revert",   # reverting a commit
]]
type-case = [2, "always", "lower-case"]
type-empty = [2, "never"]

# Scope
scope-case = [2, "always", "lower-case"]
# Restrict scopes to a fixed list:
# scope-enum = [2, "always", ["auth", "api", "ui", "db", "config", "deps", "core"]]

# Subject
subject-case = [2, "never", ["sentence-case", "start-case", "pascal-case", "upper-case"]]
subject-empty = [2, "never"]
subject-full-stop = [2, "never", "."]
subject-max-length = [2, "always", 50]

# Header
header-max-length = [2, "always", 72]

# Body
body-leading-blank = [2, "always"]
body-max-line-length = [2, "always", 72]

# Footer
footer-leading-blank = [2, "always"]
footer-max-line-length = [2, "always", 72]

# Issue references such as #123 or PROJ-123
[parserPreset.parserOpts]
issuePrefixes = ["#", "PROJ-"]
"##
}

/// The project template as pretty-printed JSON, for `.commitlintrc.json`.
pub fn example_config_json() -> crate::error::Result<String> {
    use crate::error::ResultExt;

    serde_json::to_string_pretty(&project_template()).context("Failed to serialize configuration")
}
