//! Locates the configuration for a check run.
//!
//! `--config` wins outright. Otherwise the checked directory and then each
//! parent is searched for `comment-checker.toml` (or `.comment-checker.toml`),
//! so a Terraform stack nested below a repository picks up the file at the
//! repository root. The search does not leave the repository: it stops after
//! the first directory containing `.git`. Without a project file, the user
//! file `config.toml` in `$COMMENT_CHECKER_CONFIG_DIR` or
//! `~/.comment-checker/` is used, and failing that the built-in defaults.

use anyhow::{Context, Result};
use comment_checker_core::Config;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const PROJECT_FILE_NAMES: [&str; 2] = ["comment-checker.toml", ".comment-checker.toml"];
const USER_FILE_NAME: &str = "config.toml";
const USER_DIR_ENV: &str = "COMMENT_CHECKER_CONFIG_DIR";
const REPOSITORY_MARKER: &str = ".git";

/// Where a run's configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Passed with `--config`; a missing file is an error at load time.
    Explicit(PathBuf),
    /// Found in the checked directory or one of its parents.
    Project(PathBuf),
    /// The per-user configuration file.
    User(PathBuf),
    /// No file; built-in defaults.
    Default,
}

impl ConfigSource {
    /// Reads and parses the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error naming the file if it cannot be read or parsed.
    pub fn load(&self) -> Result<Config> {
        let (kind, path) = match self {
            Self::Explicit(path) => ("explicit", path),
            Self::Project(path) => ("project", path),
            Self::User(path) => ("user", path),
            Self::Default => {
                debug!("No configuration file, using defaults");
                return Ok(Config::default());
            }
        };
        info!("Using {} configuration {}", kind, path.display());
        Config::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))
    }
}

/// Picks the configuration for checking `check_path`.
#[must_use]
pub fn resolve(check_path: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_with(check_path, explicit, user_config_dir())
}

fn resolve_with(
    check_path: &Path,
    explicit: Option<&Path>,
    user_dir: Option<PathBuf>,
) -> ConfigSource {
    if let Some(path) = explicit {
        return ConfigSource::Explicit(path.to_path_buf());
    }
    if let Some(path) = find_project_config(check_path) {
        return ConfigSource::Project(path);
    }
    user_dir
        .map(|dir| dir.join(USER_FILE_NAME))
        .filter(|path| path.is_file())
        .map_or(ConfigSource::Default, ConfigSource::User)
}

/// Walks from `check_path` towards the filesystem root, stopping at the
/// repository root.
fn find_project_config(check_path: &Path) -> Option<PathBuf> {
    let start = check_path
        .canonicalize()
        .unwrap_or_else(|_| check_path.to_path_buf());

    for dir in start.ancestors() {
        let found = PROJECT_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file());
        if let Some(path) = found {
            debug!("Found project config {}", path.display());
            return Some(path);
        }
        if dir.join(REPOSITORY_MARKER).exists() {
            debug!("No project config up to repository root {}", dir.display());
            return None;
        }
    }
    None
}

fn user_config_dir() -> Option<PathBuf> {
    std::env::var_os(USER_DIR_ENV)
        .map(PathBuf::from)
        .or_else(|| home::home_dir().map(|home| home.join(".comment-checker")))
}
