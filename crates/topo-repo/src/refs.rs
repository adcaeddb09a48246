use std::fs;
use std::path::Path;

use bstr::ByteSlice;
use topo_hash::ObjectId;

use crate::RepoError;

/// A local branch: its name under `refs/heads/` and the commit it points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub name: String,
    pub target: ObjectId,
}

/// Read every loose branch under `heads_dir`, sorted by name.
///
/// Nested directories produce slash-separated names (`feature/x`).
/// `*.lock` files are in-flight updates and are skipped.
pub(crate) fn read_branches(heads_dir: &Path) -> Result<Vec<Branch>, RepoError> {
    let mut branches = Vec::new();
    collect(heads_dir, "", &mut branches)?;
    branches.sort_by(|a, b| a.name.cmp(&b.name));
    log::debug!("{} local branches under {}", branches.len(), heads_dir.display());
    Ok(branches)
}

fn collect(dir: &Path, prefix: &str, out: &mut Vec<Branch>) -> Result<(), RepoError> {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => {
            return Err(RepoError::IoPath {
                path: dir.to_path_buf(),
                source: e,
            })
        }
    };

    for entry in entries {
        let entry = entry.map_err(|e| RepoError::IoPath {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        let Some(file_name) = entry.file_name().to_str().map(str::to_owned) else {
            log::warn!("skipping non-UTF-8 ref {}", path.display());
            continue;
        };
        let name = format!("{prefix}{file_name}");

        if path.is_dir() {
            collect(&path, &format!("{name}/"), out)?;
        } else if path.is_file() {
            if file_name.ends_with(".lock") {
                continue;
            }
            let target = read_branch_file(&path, &name)?;
            log::debug!("branch {name} -> {target}");
            out.push(Branch { name, target });
        }
    }
    Ok(())
}

fn read_branch_file(path: &Path, name: &str) -> Result<ObjectId, RepoError> {
    let contents = fs::read(path).map_err(|e| RepoError::IoPath {
        path: path.to_path_buf(),
        source: e,
    })?;
    let trimmed = contents.trim();

    if trimmed.starts_with(b"ref: ") {
        return Err(RepoError::InvalidBranch {
            name: name.to_string(),
            reason: "symbolic branch refs are not supported".to_string(),
        });
    }

    let hex = std::str::from_utf8(trimmed).map_err(|_| RepoError::InvalidBranch {
        name: name.to_string(),
        reason: "contents are not UTF-8".to_string(),
    })?;
    ObjectId::from_hex(hex).map_err(|e| RepoError::InvalidBranch {
        name: name.to_string(),
        reason: e.to_string(),
    })
}
