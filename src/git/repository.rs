//! Local git repository wrapper.

use anyhow::{Context, Result};
use git2::Repository;

use crate::git::commit::{load_history, RawCommit};

/// A local repository opened for history mining.
pub struct GitRepository {
    repo: Repository,
}

impl GitRepository {
    /// Opens the repository at the current directory.
    pub fn open() -> Result<Self> {
        let repo = Repository::open(".").context("Not in a git repository")?;

        Ok(Self { repo })
    }

    /// Opens the repository at the specified path.
    pub fn open_at<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Repository::open(path)
            .with_context(|| format!("Failed to open git repository: {}", path.display()))?;

        Ok(Self { repo })
    }

    /// Loads the full commit history reachable from HEAD, newest first.
    pub fn load_history(&self) -> Result<Vec<RawCommit>> {
        load_history(&self.repo)
    }

    /// Returns the working tree path, if the repository is not bare.
    pub fn workdir(&self) -> Option<&std::path::Path> {
        self.repo.workdir()
    }

    /// Gives access to the underlying git2 repository.
    pub fn repository(&self) -> &Repository {
        &self.repo
    }
}
