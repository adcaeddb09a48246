//! Discovery and branch listing against scratch repositories on disk.

use std::fs;
use std::path::{Path, PathBuf};

use topo_repo::{EnvOverrides, RepoError, Repository, RepositoryKind};

const MAIN: &str = "1111111111111111111111111111111111111111";
const TOPIC: &str = "2222222222222222222222222222222222222222";

/// Lay out the minimum a git dir needs: HEAD, objects/, refs/heads/.
fn make_git_dir(git_dir: &Path) {
    fs::create_dir_all(git_dir.join("objects")).unwrap();
    fs::create_dir_all(git_dir.join("refs").join("heads")).unwrap();
    fs::write(git_dir.join("HEAD"), "ref: refs/heads/main\n").unwrap();
}

/// Create a work tree with `.git/` and return (tempdir, work_tree, git_dir).
fn setup_repo() -> (tempfile::TempDir, PathBuf, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let work_tree = fs::canonicalize(dir.path()).unwrap();
    let git_dir = work_tree.join(".git");
    make_git_dir(&git_dir);
    (dir, work_tree, git_dir)
}

fn no_env() -> EnvOverrides {
    EnvOverrides::default()
}

#[test]
fn discover_from_work_tree_root() {
    let (_dir, work_tree, git_dir) = setup_repo();
    let repo = Repository::discover_with_env(&work_tree, &no_env()).unwrap();
    assert_eq!(repo.git_dir(), git_dir);
    assert_eq!(repo.work_tree(), Some(work_tree.as_path()));
    assert_eq!(repo.kind(), RepositoryKind::Normal);
    assert_eq!(repo.objects_dir(), git_dir.join("objects"));
}

#[test]
fn discover_from_deep_subdirectory() {
    let (_dir, work_tree, git_dir) = setup_repo();
    let sub = work_tree.join("a").join("b").join("c");
    fs::create_dir_all(&sub).unwrap();
    let repo = Repository::discover_with_env(&sub, &no_env()).unwrap();
    assert_eq!(repo.git_dir(), git_dir);
}

#[test]
fn discover_bare_repository() {
    let dir = tempfile::tempdir().unwrap();
    let bare = fs::canonicalize(dir.path()).unwrap();
    make_git_dir(&bare);
    let repo = Repository::discover_with_env(&bare, &no_env()).unwrap();
    assert_eq!(repo.kind(), RepositoryKind::Bare);
    assert!(repo.work_tree().is_none());
}

#[test]
fn ceiling_directory_stops_the_walk() {
    let (_dir, work_tree, _git_dir) = setup_repo();
    let sub = work_tree.join("inner");
    fs::create_dir_all(&sub).unwrap();
    let env = EnvOverrides {
        git_dir: None,
        ceiling_directories: vec![work_tree.clone()],
    };
    let err = Repository::discover_with_env(&sub, &env).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}

#[test]
fn no_repository_anywhere() {
    let dir = tempfile::tempdir().unwrap();
    let root = fs::canonicalize(dir.path()).unwrap();
    let env = EnvOverrides {
        git_dir: None,
        ceiling_directories: vec![root.parent().unwrap().to_path_buf()],
    };
    let err = Repository::discover_with_env(&root, &env).unwrap_err();
    assert!(err.to_string().starts_with("not a git repository"));
}

#[test]
fn git_dir_override_skips_the_walk() {
    let (_dir, _work_tree, git_dir) = setup_repo();
    let elsewhere = tempfile::tempdir().unwrap();
    let env = EnvOverrides {
        git_dir: Some(git_dir.clone()),
        ceiling_directories: Vec::new(),
    };
    let repo = Repository::discover_with_env(elsewhere.path(), &env).unwrap();
    assert_eq!(repo.git_dir(), git_dir);
}

#[test]
fn gitdir_file_redirect() {
    let (_dir, _work_tree, git_dir) = setup_repo();
    let other = tempfile::tempdir().unwrap();
    let other_root = fs::canonicalize(other.path()).unwrap();
    fs::write(
        other_root.join(".git"),
        format!("gitdir: {}\n", git_dir.display()),
    )
    .unwrap();
    let repo = Repository::discover_with_env(&other_root, &no_env()).unwrap();
    assert_eq!(repo.git_dir(), git_dir);
    assert_eq!(repo.work_tree(), Some(other_root.as_path()));
}

#[test]
fn linked_worktree_uses_common_dir() {
    let (_dir, _work_tree, git_dir) = setup_repo();
    let wt_git = git_dir.join("worktrees").join("wt");
    fs::create_dir_all(&wt_git).unwrap();
    fs::write(wt_git.join("HEAD"), format!("{MAIN}\n")).unwrap();
    fs::write(wt_git.join("commondir"), "../..\n").unwrap();
    fs::write(git_dir.join("refs/heads/main"), format!("{MAIN}\n")).unwrap();

    let repo = Repository::open(&wt_git).unwrap();
    assert_eq!(repo.kind(), RepositoryKind::LinkedWorktree);
    assert_eq!(repo.common_dir(), git_dir);
    assert_eq!(repo.branches().unwrap().len(), 1);
}

#[test]
fn open_rejects_plain_directory() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        Repository::open(dir.path()),
        Err(RepoError::InvalidGitDir { .. })
    ));
}

#[test]
fn branches_sorted_with_nested_names() {
    let (_dir, work_tree, git_dir) = setup_repo();
    let heads = git_dir.join("refs").join("heads");
    fs::create_dir_all(heads.join("topic")).unwrap();
    fs::write(heads.join("main"), format!("{MAIN}\n")).unwrap();
    fs::write(heads.join("topic").join("one"), format!("{TOPIC}\n")).unwrap();

    let repo = Repository::discover_with_env(&work_tree, &no_env()).unwrap();
    let branches = repo.branches().unwrap();
    let pairs: Vec<(String, String)> = branches
        .iter()
        .map(|b| (b.name.clone(), b.target.to_hex()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("main".to_string(), MAIN.to_string()),
            ("topic/one".to_string(), TOPIC.to_string()),
        ]
    );
}
