// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Git integration module.
//!
//! Read-only access to commit messages and repository paths.

mod repo;

pub use repo::{commit_editmsg_path, get_commit, get_commit_range, open_repo, Repository};
