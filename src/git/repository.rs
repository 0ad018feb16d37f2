use crate::error::{DocPublishError, Result};
use git2::{build::CheckoutBuilder, BranchType, Repository as Git2Repo, StatusOptions};
use std::fs;
use std::path::{Path, PathBuf};

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Git2Repo::discover(path).map_err(|e| {
            DocPublishError::checkout(format!(
                "Not in a git repository ({}): {}",
                path.display(),
                e
            ))
        })?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }
}

impl super::Repository for Git2Repository {
    fn checkout_remote_branch(&self, remote_branch: &str, local_branch: &str) -> Result<()> {
        let remote = self
            .repo
            .find_branch(remote_branch, BranchType::Remote)
            .map_err(|e| {
                DocPublishError::checkout(format!(
                    "Cannot find remote branch '{}': {}",
                    remote_branch, e
                ))
            })?;

        let commit = remote.get().peel_to_commit()?;

        let branch = self.repo.branch(local_branch, &commit, false).map_err(|e| {
            DocPublishError::checkout(format!(
                "Cannot create branch '{}': {}",
                local_branch, e
            ))
        })?;

        let mut checkout = CheckoutBuilder::new();
        checkout.safe();
        self.repo
            .checkout_tree(commit.as_object(), Some(&mut checkout))
            .map_err(|e| {
                DocPublishError::checkout(format!(
                    "Cannot check out '{}': {}",
                    remote_branch, e
                ))
            })?;

        let refname = branch.get().name().ok_or_else(|| {
            DocPublishError::checkout(format!("Branch '{}' has a non-UTF-8 name", local_branch))
        })?;
        self.repo.set_head(refname)?;

        tracing::debug!(
            "Checked out {} at {} as {}",
            remote_branch,
            commit.id(),
            local_branch
        );
        Ok(())
    }

    fn clean_untracked(&self) -> Result<Vec<PathBuf>> {
        let workdir = self
            .repo
            .workdir()
            .ok_or_else(|| DocPublishError::checkout("Bare repository has no working tree"))?
            .to_path_buf();

        let mut options = StatusOptions::new();
        options
            .include_untracked(true)
            .include_ignored(true)
            .recurse_untracked_dirs(false)
            .recurse_ignored_dirs(false);

        let paths: Vec<String> = {
            let statuses = self.repo.statuses(Some(&mut options))?;
            statuses
                .iter()
                .filter(|entry| entry.status().is_wt_new() || entry.status().is_ignored())
                .filter_map(|entry| entry.path().map(str::to_string))
                .collect()
        };

        let mut removed = Vec::with_capacity(paths.len());
        for relative in paths {
            let path = workdir.join(&relative);
            let Ok(metadata) = path.symlink_metadata() else {
                continue;
            };

            if metadata.is_dir() {
                if !remove_untracked_dir(&path)? {
                    continue;
                }
            } else {
                fs::remove_file(&path)?;
            }
            tracing::trace!("Removed {}", relative);
            removed.push(PathBuf::from(relative.trim_end_matches('/')));
        }

        Ok(removed)
    }
}

/// Remove an untracked directory, leaving nested repositories in place like
/// `git clean -dxf` does. Returns whether the directory itself was removed.
fn remove_untracked_dir(dir: &Path) -> Result<bool> {
    if dir.join(".git").exists() {
        tracing::info!("Skipping repository {}", dir.display());
        return Ok(false);
    }

    let mut emptied = true;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            emptied &= remove_untracked_dir(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
    }

    if emptied {
        fs::remove_dir(dir)?;
    }
    Ok(emptied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::Repository;
    use git2::Signature;
    use tempfile::TempDir;

    fn init_repo_with_commit() -> (TempDir, Git2Repo) {
        let dir = TempDir::new().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();
        fs::write(dir.path().join("README.rst"), "Zephyr\n").unwrap();
        fs::write(dir.path().join(".gitignore"), "_build/\n").unwrap();

        {
            let mut index = repo.index().unwrap();
            index.add_path(Path::new("README.rst")).unwrap();
            index.add_path(Path::new(".gitignore")).unwrap();
            index.write().unwrap();
            let tree_id = index.write_tree().unwrap();
            let tree = repo.find_tree(tree_id).unwrap();
            let sig = Signature::now("Doc Bot", "docs@example.org").unwrap();
            repo.commit(Some("HEAD"), &sig, &sig, "initial", &tree, &[])
                .unwrap();
        }

        (dir, repo)
    }

    #[test]
    fn test_git2_repository_is_a_repository() {
        fn takes_repository<R: Repository>(_: &R) {}

        let (_dir, repo) = init_repo_with_commit();
        let wrapper = Git2Repository::from_git2(repo);
        takes_repository(&wrapper);
        let _as_object: &dyn Repository = &wrapper;
    }

    #[test]
    fn test_clean_removes_untracked_and_ignored() {
        let (dir, repo) = init_repo_with_commit();
        fs::write(dir.path().join("scratch.txt"), "tmp").unwrap();
        fs::create_dir_all(dir.path().join("_build/html")).unwrap();
        fs::write(dir.path().join("_build/html/index.html"), "<html/>").unwrap();

        let wrapper = Git2Repository::from_git2(repo);
        let removed = wrapper.clean_untracked().unwrap();

        assert!(removed.contains(&PathBuf::from("scratch.txt")));
        assert!(removed.contains(&PathBuf::from("_build")));
        assert!(!dir.path().join("scratch.txt").exists());
        assert!(!dir.path().join("_build").exists());
        assert!(dir.path().join("README.rst").exists());
    }

    #[test]
    fn test_clean_keeps_nested_repositories() {
        let (dir, repo) = init_repo_with_commit();
        let nested = dir.path().join("modules/hal");
        fs::create_dir_all(&nested).unwrap();
        Git2Repo::init(&nested).unwrap();
        fs::write(nested.join("keep.c"), "int keep;\n").unwrap();
        fs::write(dir.path().join("modules/stale.o"), "obj").unwrap();

        let wrapper = Git2Repository::from_git2(repo);
        let removed = wrapper.clean_untracked().unwrap();

        assert!(nested.join("keep.c").exists());
        assert!(nested.join(".git").exists());
        assert!(!dir.path().join("modules/stale.o").exists());
        assert!(!removed.contains(&PathBuf::from("modules")));
        assert!(!removed.contains(&PathBuf::from("modules/hal")));
    }

    #[test]
    fn test_clean_on_clean_tree_removes_nothing() {
        let (_dir, repo) = init_repo_with_commit();
        let wrapper = Git2Repository::from_git2(repo);
        assert!(wrapper.clean_untracked().unwrap().is_empty());
    }

    #[test]
    fn test_checkout_missing_remote_branch_fails() {
        let (_dir, repo) = init_repo_with_commit();
        let wrapper = Git2Repository::from_git2(repo);

        let err = wrapper
            .checkout_remote_branch("upstream/v9-branch", "docs-abc")
            .unwrap_err();
        assert!(matches!(err, DocPublishError::Checkout(_)));
        assert!(err.to_string().contains("upstream/v9-branch"));
    }

    #[test]
    fn test_checkout_remote_branch_moves_head() {
        let (_dir, repo) = init_repo_with_commit();
        let head = repo.head().unwrap().target().unwrap();
        repo.reference("refs/remotes/upstream/v7-branch", head, true, "test")
            .unwrap();

        let wrapper = Git2Repository::from_git2(repo);
        wrapper
            .checkout_remote_branch("upstream/v7-branch", "docs-1234abcd")
            .unwrap();

        let repo = &wrapper.repo;
        let head_ref = repo.head().unwrap();
        assert_eq!(head_ref.name(), Some("refs/heads/docs-1234abcd"));
        assert_eq!(head_ref.target(), Some(head));
    }
}
