use crate::error::{DocPublishError, Result};
use crate::git::Repository;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Mutex;

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    remote_branches: HashSet<String>,
    untracked: Vec<PathBuf>,
    checkouts: Mutex<Vec<(String, String)>>,
    cleans: Mutex<usize>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            remote_branches: HashSet::new(),
            untracked: Vec::new(),
            checkouts: Mutex::new(Vec::new()),
            cleans: Mutex::new(0),
        }
    }

    /// Add a remote-tracking branch, e.g. `upstream/v1.14-branch`
    pub fn add_remote_branch(&mut self, name: impl Into<String>) {
        self.remote_branches.insert(name.into());
    }

    /// Add a path reported as removed by `clean_untracked`
    pub fn add_untracked(&mut self, path: impl Into<PathBuf>) {
        self.untracked.push(path.into());
    }

    /// `(remote_branch, local_branch)` pairs checked out so far
    pub fn checkouts(&self) -> Vec<(String, String)> {
        self.checkouts.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Number of times the working tree was cleaned
    pub fn clean_count(&self) -> usize {
        self.cleans.lock().map(|c| *c).unwrap_or_default()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn checkout_remote_branch(&self, remote_branch: &str, local_branch: &str) -> Result<()> {
        if !self.remote_branches.contains(remote_branch) {
            return Err(DocPublishError::checkout(format!(
                "Cannot find remote branch '{}'",
                remote_branch
            )));
        }

        if let Ok(mut checkouts) = self.checkouts.lock() {
            checkouts.push((remote_branch.to_string(), local_branch.to_string()));
        }
        Ok(())
    }

    fn clean_untracked(&self) -> Result<Vec<PathBuf>> {
        if let Ok(mut cleans) = self.cleans.lock() {
            *cleans += 1;
        }
        Ok(self.untracked.clone())
    }
}
