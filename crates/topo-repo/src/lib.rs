//! Repository discovery and local branch enumeration.
//!
//! [`Repository`] answers the two questions the topological report needs
//! from the filesystem: where the object store lives, and which commits the
//! local branches point at.

mod discover;
mod env;
mod error;
mod refs;

pub use discover::{is_git_dir, parse_gitdir_file};
pub use env::EnvOverrides;
pub use error::RepoError;
pub use refs::Branch;

use std::path::{Path, PathBuf};

use topo_hash::HashAlgorithm;
use topo_loose::LooseObjectStore;

/// How the git directory relates to a working tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryKind {
    /// `.git/` inside a working tree.
    Normal,
    /// No working tree.
    Bare,
    /// Git dir that shares objects and refs through `commondir`.
    LinkedWorktree,
}

/// An opened repository.
#[derive(Debug)]
pub struct Repository {
    git_dir: PathBuf,
    work_tree: Option<PathBuf>,
    common_dir: PathBuf,
    kind: RepositoryKind,
    hash_algo: HashAlgorithm,
}

impl Repository {
    pub(crate) fn new(
        git_dir: PathBuf,
        work_tree: Option<PathBuf>,
        common_dir: PathBuf,
        kind: RepositoryKind,
    ) -> Self {
        let hash_algo = read_object_format(&common_dir);
        Self {
            git_dir,
            work_tree,
            common_dir,
            kind,
            hash_algo,
        }
    }

    /// Discover the repository enclosing `start`, honouring `GIT_DIR` and
    /// `GIT_CEILING_DIRECTORIES` from the process environment.
    pub fn discover(start: impl AsRef<Path>) -> Result<Self, RepoError> {
        discover::discover_with_env(start.as_ref(), &EnvOverrides::from_env())
    }

    /// Discover with explicit overrides.
    pub fn discover_with_env(start: impl AsRef<Path>, env: &EnvOverrides) -> Result<Self, RepoError> {
        discover::discover_with_env(start.as_ref(), env)
    }

    /// Open a git directory without searching.
    pub fn open(git_dir: impl AsRef<Path>) -> Result<Self, RepoError> {
        let git_dir = std::fs::canonicalize(git_dir.as_ref())
            .map_err(|_| RepoError::NotFound(git_dir.as_ref().to_path_buf()))?;
        let work_tree = git_dir
            .file_name()
            .filter(|n| *n == ".git")
            .and_then(|_| git_dir.parent())
            .map(Path::to_path_buf);
        discover::open_git_dir(&git_dir, work_tree)
    }

    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    pub fn work_tree(&self) -> Option<&Path> {
        self.work_tree.as_deref()
    }

    pub fn common_dir(&self) -> &Path {
        &self.common_dir
    }

    pub fn kind(&self) -> RepositoryKind {
        self.kind
    }

    pub fn hash_algo(&self) -> HashAlgorithm {
        self.hash_algo
    }

    /// The loose object directory.
    pub fn objects_dir(&self) -> PathBuf {
        self.common_dir.join("objects")
    }

    /// The directory holding one file per local branch.
    pub fn heads_dir(&self) -> PathBuf {
        self.common_dir.join("refs").join("heads")
    }

    /// Local branches, sorted by name.
    pub fn branches(&self) -> Result<Vec<Branch>, RepoError> {
        refs::read_branches(&self.heads_dir())
    }

    /// Open the loose object store with this repository's hash algorithm.
    pub fn loose_store(&self) -> LooseObjectStore {
        LooseObjectStore::open(self.objects_dir(), self.hash_algo)
    }
}

/// `extensions.objectformat` from the repository config, SHA-1 when absent.
fn read_object_format(common_dir: &Path) -> HashAlgorithm {
    let Ok(config) = std::fs::read_to_string(common_dir.join("config")) else {
        return HashAlgorithm::Sha1;
    };
    config
        .lines()
        .filter_map(|line| line.split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("objectformat"))
        .and_then(|(_, value)| {
            let algo = HashAlgorithm::from_name(value);
            if algo.is_none() {
                log::warn!("unknown objectformat '{}', assuming sha1", value.trim());
            }
            algo
        })
        .unwrap_or_default()
}
