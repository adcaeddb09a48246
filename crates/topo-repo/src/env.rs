use std::ffi::OsStr;
use std::path::PathBuf;

/// Environment inputs that steer discovery.
///
/// Captured once and passed explicitly so discovery never consults or
/// changes process-wide state on its own.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    /// `GIT_DIR`: use this git directory and skip the upward walk.
    pub git_dir: Option<PathBuf>,
    /// `GIT_CEILING_DIRECTORIES`: the walk stops before entering any of these.
    pub ceiling_directories: Vec<PathBuf>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            git_dir: std::env::var_os("GIT_DIR")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            ceiling_directories: std::env::var_os("GIT_CEILING_DIRECTORIES")
                .map(|v| split_path_list(&v))
                .unwrap_or_default(),
        }
    }
}

/// Split a `:`-separated (`;` on Windows) list, dropping empty entries.
fn split_path_list(value: &OsStr) -> Vec<PathBuf> {
    let sep = if cfg!(windows) { ';' } else { ':' };
    value
        .to_string_lossy()
        .split(sep)
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .collect()
}
