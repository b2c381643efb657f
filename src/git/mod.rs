//! Git integration for hookshim
//!
//! When a hook is run without file arguments the shim falls back to the files
//! being added in the current commit. This module finds them with git2.

use crate::shim::{ShimError, ShimResult};
use anyhow::{Context, Result};
use git2::{ErrorCode, Repository, Status, StatusOptions};
use std::path::{Path, PathBuf};

/// Files with this extension are never handed to a tool
const SKIPPED_EXTENSION: &str = "cfg";

/// Git operations handler
pub struct GitOperations {
    repo: Repository,
}

impl GitOperations {
    /// Discover the repository containing `path`, or `None` outside of one
    pub fn try_discover<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        match Repository::discover(path) {
            Ok(repo) => Ok(Some(Self { repo })),
            Err(err) if err.code() == ErrorCode::NotFound => Ok(None),
            Err(err) => Err(err).context("Failed to open Git repository"),
        }
    }

    /// Files newly added to the index that still exist on disk
    ///
    /// Paths are absolute, rooted at the working directory.
    pub fn get_added_files(&self) -> Result<Vec<PathBuf>> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(false).include_ignored(false);

        let statuses = self
            .repo
            .statuses(Some(&mut opts))
            .context("Failed to get repository status")?;
        let workdir = self
            .repo
            .workdir()
            .context("Repository has no working directory")?;

        let mut added = Vec::new();
        for entry in statuses.iter() {
            if !entry.status().contains(Status::INDEX_NEW) {
                continue;
            }
            let Some(path) = entry.path() else {
                continue;
            };
            let path = workdir.join(path);
            if path.extension().is_some_and(|ext| ext == SKIPPED_EXTENSION) {
                tracing::trace!("Skipping config file {}", path.display());
                continue;
            }
            if !path.is_file() {
                tracing::trace!("Skipping {} (no longer on disk)", path.display());
                continue;
            }
            added.push(path);
        }

        Ok(added)
    }
}

/// Paths added in the commit being made from `base`, relative to it where possible
///
/// Outside a repository this is empty. Any other git failure is fatal for the
/// hook run of `command`.
pub fn staged_paths(command: &str, base: &Path) -> ShimResult<Vec<String>> {
    discover_added(base).map_err(|err| {
        tracing::debug!("Git discovery failed: {err:#}");
        ShimError::GitDiscovery {
            command: command.to_string(),
            details: format!("{err:#}"),
        }
    })
}

fn discover_added(base: &Path) -> Result<Vec<String>> {
    let Some(git) = GitOperations::try_discover(base)? else {
        tracing::info!("{} is not inside a Git repository", base.display());
        return Ok(Vec::new());
    };

    let base = base
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", base.display()))?;
    let files = git.get_added_files()?;
    tracing::debug!("Found {} added file(s)", files.len());

    Ok(files
        .into_iter()
        .map(|path| {
            let path = path.canonicalize().unwrap_or(path);
            path.strip_prefix(&base)
                .map(Path::to_path_buf)
                .unwrap_or(path)
                .to_string_lossy()
                .into_owned()
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn stage(repo: &Repository, files: &[&str]) {
        let mut index = repo.index().unwrap();
        for file in files {
            index.add_path(Path::new(file)).unwrap();
        }
        index.write().unwrap();
    }

    #[test]
    fn test_added_files_skip_cfg_and_missing() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        for name in ["main.c", "setup.cfg", "gone.c", "untracked.c"] {
            std::fs::write(dir.path().join(name), "int x;\n").unwrap();
        }
        std::fs::create_dir(dir.path().join("src")).unwrap();
        std::fs::write(dir.path().join("src/lib.c"), "int y;\n").unwrap();
        stage(&repo, &["main.c", "setup.cfg", "gone.c", "src/lib.c"]);
        std::fs::remove_file(dir.path().join("gone.c")).unwrap();

        let mut paths = staged_paths("tool", dir.path()).unwrap();
        paths.sort();

        let nested = format!("src{}lib.c", std::path::MAIN_SEPARATOR);
        assert_eq!(paths, vec!["main.c".to_string(), nested]);
    }

    #[test]
    fn test_paths_relative_to_subdirectory() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        std::fs::create_dir(dir.path().join("src")).unwrap();
        std::fs::write(dir.path().join("src/lib.c"), "int y;\n").unwrap();
        stage(&repo, &["src/lib.c"]);

        let paths = staged_paths("tool", &dir.path().join("src")).unwrap();

        assert_eq!(paths, vec!["lib.c"]);
    }
}
