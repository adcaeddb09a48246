use std::path::{Path, PathBuf};

use bstr::ByteSlice;

use crate::{EnvOverrides, RepoError, Repository, RepositoryKind};

/// Find the repository enclosing `start`.
///
/// 1. `GIT_DIR` set → open it directly.
/// 2. Otherwise walk up from `start`:
///    a. `.git/` directory → normal repository;
///    b. `.git` file → follow its `gitdir:` redirect;
///    c. the directory itself has `HEAD`, `objects/`, `refs/` → bare;
///    d. stop at a ceiling directory or the filesystem root.
pub fn discover_with_env(start: &Path, env: &EnvOverrides) -> Result<Repository, RepoError> {
    if let Some(git_dir) = &env.git_dir {
        let git_dir = if git_dir.is_absolute() {
            git_dir.clone()
        } else {
            start.join(git_dir)
        };
        return Repository::open(&git_dir);
    }

    let start =
        std::fs::canonicalize(start).map_err(|_| RepoError::NotFound(start.to_path_buf()))?;

    let ceilings: Vec<PathBuf> = env
        .ceiling_directories
        .iter()
        .filter_map(|p| std::fs::canonicalize(p).ok())
        .collect();

    let mut current = start.clone();
    loop {
        if ceilings.contains(&current) {
            return Err(RepoError::NotFound(start));
        }

        let dot_git = current.join(".git");
        if dot_git.is_dir() {
            log::info!("found .git in {}", current.display());
            return open_git_dir(&dot_git, Some(current));
        }
        if dot_git.is_file() {
            let target = parse_gitdir_file(&dot_git)?;
            let target = if target.is_absolute() {
                target
            } else {
                current.join(target)
            };
            log::info!("following {} to {}", dot_git.display(), target.display());
            return open_git_dir(&target, Some(current));
        }
        if is_git_dir(&current) {
            log::info!("found bare repository at {}", current.display());
            return open_git_dir(&current, None);
        }

        match current.parent() {
            Some(parent) if parent != current => current = parent.to_path_buf(),
            _ => return Err(RepoError::NotFound(start)),
        }
    }
}

/// Open a known git directory; `work_tree` is `None` for bare repositories.
pub fn open_git_dir(git_dir: &Path, work_tree: Option<PathBuf>) -> Result<Repository, RepoError> {
    let git_dir =
        std::fs::canonicalize(git_dir).map_err(|_| RepoError::NotFound(git_dir.to_path_buf()))?;
    let common_dir = resolve_common_dir(&git_dir)?;

    if !common_dir.join("objects").is_dir() || !common_dir.join("refs").is_dir() {
        return Err(RepoError::InvalidGitDir {
            path: git_dir,
            reason: "missing objects/ or refs/".to_string(),
        });
    }

    let kind = if common_dir != git_dir {
        RepositoryKind::LinkedWorktree
    } else if work_tree.is_some() {
        RepositoryKind::Normal
    } else {
        RepositoryKind::Bare
    };

    Ok(Repository::new(git_dir, work_tree, common_dir, kind))
}

/// A directory that looks like a git dir on its own.
pub fn is_git_dir(path: &Path) -> bool {
    path.join("HEAD").is_file() && path.join("objects").is_dir() && path.join("refs").is_dir()
}

/// Read a `.git` file of the form `gitdir: <path>`.
pub fn parse_gitdir_file(path: &Path) -> Result<PathBuf, RepoError> {
    let content = std::fs::read(path).map_err(|e| RepoError::IoPath {
        path: path.to_path_buf(),
        source: e,
    })?;
    let target = content
        .trim()
        .strip_prefix(b"gitdir:")
        .map(|rest| rest.trim())
        .ok_or_else(|| RepoError::InvalidGitDir {
            path: path.to_path_buf(),
            reason: "expected 'gitdir: <path>'".to_string(),
        })?;
    let target = target.to_path().map_err(|_| RepoError::InvalidGitDir {
        path: path.to_path_buf(),
        reason: "gitdir target is not a valid path".to_string(),
    })?;
    Ok(target.to_path_buf())
}

/// Objects and refs of a linked worktree live in the directory its
/// `commondir` file points at; otherwise the git dir is its own common dir.
fn resolve_common_dir(git_dir: &Path) -> Result<PathBuf, RepoError> {
    let file = git_dir.join("commondir");
    if !file.is_file() {
        return Ok(git_dir.to_path_buf());
    }
    let content = std::fs::read(&file).map_err(|e| RepoError::IoPath {
        path: file.clone(),
        source: e,
    })?;
    let relative = content
        .trim()
        .to_path()
        .map_err(|_| RepoError::InvalidGitDir {
            path: file.clone(),
            reason: "commondir is not a valid path".to_string(),
        })?
        .to_path_buf();
    let resolved = git_dir.join(relative);
    Ok(std::fs::canonicalize(&resolved).unwrap_or(resolved))
}
