// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Repository operations.

use crate::error::{CmlintError, GitError, Result};
use git2::{Oid, Repository as Git2Repo};
use std::path::{Path, PathBuf};

/// Wrapper around git2::Repository.
pub struct Repository {
    inner: Git2Repo,
}

impl Repository {
    /// Open a repository from the current directory.
    pub fn open_current() -> Result<Self> {
        let current_dir = std::env::current_dir().map_err(|e| {
            CmlintError::Git(GitError::OpenFailed {
                message: format!("Failed to get current directory: {}", e),
            })
        })?;
        Self::open(&current_dir)
    }

    /// Open a repository from a path.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Git2Repo::discover(path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                CmlintError::Git(GitError::NotARepository)
            } else {
                CmlintError::Git(GitError::OpenFailed {
                    message: e.message().to_string(),
                })
            }
        })?;

        Ok(Self { inner: repo })
    }

    /// Get the git directory path (.git).
    pub fn git_dir(&self) -> &Path {
        self.inner.path()
    }

    /// Get a commit by reference (SHA, branch name, etc.).
    pub fn get_commit(&self, reference: &str) -> Result<git2::Commit<'_>> {
        let obj = self.inner.revparse_single(reference).map_err(|e| {
            CmlintError::Git(GitError::InvalidReference {
                reference: format!("{}: {}", reference, e.message()),
            })
        })?;

        let commit = obj.peel_to_commit().map_err(|e| {
            CmlintError::Git(GitError::InvalidReference {
                reference: format!("{}: {}", reference, e.message()),
            })
        })?;

        Ok(commit)
    }

    /// Get the SHA and message of a commit.
    pub fn get_commit_message(&self, reference: &str) -> Result<(Oid, String)> {
        let commit = self.get_commit(reference)?;
        let message = commit.message().ok_or_else(|| {
            CmlintError::Git(GitError::InvalidReference {
                reference: format!("{}: Invalid message encoding", reference),
            })
        })?;
        Ok((commit.id(), message.to_string()))
    }

    /// Get commits reachable from `to` but not from `from`, oldest first.
    pub fn get_commits_in_range(&self, from: &str, to: &str) -> Result<Vec<(Oid, String)>> {
        let revwalk_error = |command: &str, e: git2::Error| {
            CmlintError::Git(GitError::CommandFailed {
                command: command.to_string(),
                message: e.message().to_string(),
            })
        };

        let mut revwalk = self
            .inner
            .revwalk()
            .map_err(|e| revwalk_error("revwalk", e))?;
        revwalk
            .set_sorting(git2::Sort::TOPOLOGICAL | git2::Sort::REVERSE)
            .map_err(|e| revwalk_error("revwalk.sort", e))?;

        let to = self.get_commit(to)?.id();
        let from = self.get_commit(from)?.id();
        revwalk
            .push(to)
            .map_err(|e| revwalk_error("revwalk.push", e))?;
        revwalk
            .hide(from)
            .map_err(|e| revwalk_error("revwalk.hide", e))?;

        let mut commits = Vec::new();
        for oid_result in revwalk {
            let oid = oid_result.map_err(|e| revwalk_error("revwalk", e))?;
            let commit = self.inner.find_commit(oid).map_err(|e| {
                CmlintError::Git(GitError::InvalidReference {
                    reference: format!("{}: {}", oid, e.message()),
                })
            })?;
            let message = commit.message().unwrap_or("").to_string();
            commits.push((oid, message));
        }

        Ok(commits)
    }
}

/// Open the repository from the current directory.
pub fn open_repo() -> Result<Repository> {
    Repository::open_current()
}

/// Get the SHA and message of a commit in the current repository.
pub fn get_commit(reference: &str) -> Result<(String, String)> {
    let repo = Repository::open_current()?;
    let (oid, message) = repo.get_commit_message(reference)?;
    Ok((oid.to_string(), message))
}

/// Get commits in `from..to` in the current repository.
pub fn get_commit_range(from: &str, to: &str) -> Result<Vec<(String, String)>> {
    let repo = Repository::open_current()?;
    let commits = repo.get_commits_in_range(from, to)?;
    Ok(commits
        .into_iter()
        .map(|(oid, msg)| (oid.to_string(), msg))
        .collect())
}

/// Path of the message file git hands to the `commit-msg` hook.
///
/// Falls back to `.git/COMMIT_EDITMSG` outside a repository.
pub fn commit_editmsg_path() -> PathBuf {
    match Repository::open_current() {
        Ok(repo) => repo.git_dir().join("COMMIT_EDITMSG"),
        Err(_) => PathBuf::from(".git").join("COMMIT_EDITMSG"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn commit(repo: &Git2Repo, message: &str) -> Oid {
        let sig = git2::Signature::now("Test", "test@example.com").unwrap();
        let tree_id = {
            let mut index = repo.index().unwrap();
            index.write_tree().unwrap()
        };
        let tree = repo.find_tree(tree_id).unwrap();
        let parents = match repo.head() {
            Ok(head) => vec![head.peel_to_commit().unwrap()],
            Err(_) => vec![],
        };
        let parent_refs: Vec<&git2::Commit<'_>> = parents.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
            .unwrap()
    }

    fn create_test_repo() -> (TempDir, Repository) {
        let dir = TempDir::new().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();
        commit(&repo, "chore: initial commit");
        commit(&repo, "feat: add thing");
        commit(&repo, "Fix: Broken Thing.");

        let wrapper = Repository::open(dir.path()).unwrap();
        (dir, wrapper)
    }

    #[test]
    fn test_open_repo() {
        let (dir, repo) = create_test_repo();
        assert!(Repository::open(dir.path()).is_ok());
        assert!(repo.git_dir().ends_with(".git") || repo.git_dir().ends_with(".git/"));
    }

    #[test]
    fn test_not_a_repo() {
        let dir = TempDir::new().unwrap();
        let result = Repository::open(dir.path());
        assert!(matches!(
            result,
            Err(CmlintError::Git(GitError::NotARepository))
        ));
    }

    #[test]
    fn test_commit_message() {
        let (_dir, repo) = create_test_repo();
        let (_, message) = repo.get_commit_message("HEAD").unwrap();
        assert_eq!(message, "Fix: Broken Thing.");
    }

    #[test]
    fn test_commit_range_oldest_first() {
        let (_dir, repo) = create_test_repo();
        let commits = repo.get_commits_in_range("HEAD~2", "HEAD").unwrap();
        let messages: Vec<_> = commits.iter().map(|(_, m)| m.as_str()).collect();
        assert_eq!(messages, vec!["feat: add thing", "Fix: Broken Thing."]);
    }

    #[test]
    fn test_invalid_reference() {
        let (_dir, repo) = create_test_repo();
        assert!(matches!(
            repo.get_commit("does-not-exist"),
            Err(CmlintError::Git(GitError::InvalidReference { .. }))
        ));
    }
}
