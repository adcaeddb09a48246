//! Shared harness for topo-order-commits integration tests.
//!
//! Repositories are laid out by hand: loose objects are written through
//! `LooseObjectStore::write_raw` and branches are plain files under
//! `refs/heads/`, so no external git binary is needed.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use topo_hash::{HashAlgorithm, ObjectId};
use topo_loose::LooseObjectStore;
use topo_object::ObjectType;

/// Captured output from running the binary.
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

/// A scratch repository with a work tree.
pub struct TestRepo {
    _dir: tempfile::TempDir,
    pub work_tree: PathBuf,
    pub git_dir: PathBuf,
    store: LooseObjectStore,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let work_tree = fs::canonicalize(dir.path()).unwrap().join("repo");
        let git_dir = work_tree.join(".git");
        fs::create_dir_all(git_dir.join("objects")).unwrap();
        fs::create_dir_all(git_dir.join("refs").join("heads")).unwrap();
        fs::write(git_dir.join("HEAD"), "ref: refs/heads/main\n").unwrap();
        let store = LooseObjectStore::open(git_dir.join("objects"), HashAlgorithm::Sha1);
        Self {
            _dir: dir,
            work_tree,
            git_dir,
            store,
        }
    }

    /// Directory above the work tree; nothing there is a repository.
    pub fn outside(&self) -> &Path {
        self.work_tree.parent().unwrap()
    }

    pub fn commit(&self, parents: &[ObjectId], message: &str) -> ObjectId {
        let mut text = String::from("tree 4b825dc642cb6eb9a060e54bf8d69288fbee4904\n");
        for p in parents {
            text.push_str(&format!("parent {p}\n"));
        }
        text.push_str("author Test Author <test@example.com> 1234567890 +0000\n");
        text.push_str("committer Test Committer <test@example.com> 1234567890 +0000\n\n");
        text.push_str(message);
        text.push('\n');
        self.store
            .write_raw(ObjectType::Commit, text.as_bytes())
            .unwrap()
    }

    pub fn branch(&self, name: &str, target: ObjectId) {
        let path = self.git_dir.join("refs").join("heads").join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, format!("{target}\n")).unwrap();
    }

    pub fn object_path(&self, oid: &ObjectId) -> PathBuf {
        self.store.object_path(oid)
    }
}

/// Run the binary in `dir`, with discovery fenced in at `ceiling`.
pub fn topo(dir: &Path, ceiling: &Path, args: &[&str]) -> CommandResult {
    let output = Command::new(env!("CARGO_BIN_EXE_topo-order-commits"))
        .args(args)
        .current_dir(dir)
        .env_remove("GIT_DIR")
        .env_remove("RUST_LOG")
        .env("GIT_CEILING_DIRECTORIES", ceiling)
        .output()
        .expect("failed to run topo-order-commits");
    CommandResult {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        exit_code: output.status.code().unwrap_or(128),
    }
}
