use std::path::PathBuf;

/// Errors from locating a repository or reading its branches.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("not a git repository (or any of the parent directories): {}", .0.display())]
    NotFound(PathBuf),

    #[error("invalid git directory: {}: {reason}", path.display())]
    InvalidGitDir { path: PathBuf, reason: String },

    #[error("invalid branch '{name}': {reason}")]
    InvalidBranch { name: String, reason: String },

    #[error("I/O error on {}: {source}", path.display())]
    IoPath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
