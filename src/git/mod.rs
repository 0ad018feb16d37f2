//! Git operations abstraction layer
//!
//! Release docs are built from a release branch of the upstream remote. The
//! [Repository] trait covers the two working-tree operations that requires,
//! so the publish workflow can run against a real repository or a mock.
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A mock implementation for testing
//!
//! ```rust
//! # use publish_docs::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! repo.checkout_remote_branch("upstream/v1.14-branch", "docs-1a2b3c4d")?;
//! let removed = repo.clean_untracked()?;
//! println!("removed {} paths", removed.len());
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use std::path::PathBuf;

/// Working-tree operations needed to prepare a release build
///
/// Implementors must be `Send`; a repository is never shared between threads.
/// Implementations map underlying errors to [crate::error::DocPublishError];
/// a missing remote branch is a [crate::error::DocPublishError::Checkout].
pub trait Repository: Send {
    /// Create `local_branch` at the commit of the remote-tracking branch
    /// `remote_branch` (e.g. `upstream/v1.14-branch`) and check it out.
    ///
    /// # Returns
    /// * `Ok(())` - HEAD now points at `refs/heads/<local_branch>`
    /// * `Err` - If the remote branch does not exist, the local branch name is
    ///   taken, or the checkout conflicts with local changes
    fn checkout_remote_branch(&self, remote_branch: &str, local_branch: &str) -> Result<()>;

    /// Remove untracked and ignored files and directories from the working tree
    ///
    /// # Returns
    /// * `Ok(Vec<PathBuf>)` - Removed paths, relative to the working tree root
    /// * `Err` - If the repository is bare or a path cannot be removed
    fn clean_untracked(&self) -> Result<Vec<PathBuf>>;
}
