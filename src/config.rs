//! User configuration.
//!
//! Loaded from `~/.config/arbor/config.toml` (or `ARBOR_CONFIG_PATH`), with
//! `ARBOR_*` environment variables overriding scalar keys. A missing file is
//! not an error; every key has a default.
//!
//! ```toml
//! base-branch = "develop"
//! env-files = [".env", ".env.local"]
//! rebase = false
//! ```

use std::path::{Path, PathBuf};

use config::{Case, Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::git::DEFAULT_BASE_CANDIDATES;

/// Environment variable pointing at an alternate config file.
pub const CONFIG_PATH_ENV: &str = "ARBOR_CONFIG_PATH";

/// Files copied from the invoking directory into every new worktree.
pub const DEFAULT_ENV_FILES: [&str; 3] = [".env", ".env.local", ".env.development"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct UserConfig {
    /// Base branch to use instead of probing `base-candidates`.
    pub base_branch: Option<String>,

    /// Branch names probed in order when no base branch is given.
    pub base_candidates: Vec<String>,

    /// Untracked files copied into new worktrees.
    pub env_files: Vec<String>,

    /// Rebase new worktrees onto the base branch after creation.
    pub rebase: bool,

    /// Copy `env-files` into new worktrees.
    pub copy_env: bool,

    /// Shell command run by `arbor setup`.
    pub setup_command: Option<String>,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            base_branch: None,
            base_candidates: DEFAULT_BASE_CANDIDATES.map(String::from).to_vec(),
            env_files: DEFAULT_ENV_FILES.map(String::from).to_vec(),
            rebase: true,
            copy_env: true,
            setup_command: None,
        }
    }
}

impl UserConfig {
    /// Load configuration from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(config_path().as_deref())
    }

    /// Load configuration from `path` (if given and present) plus environment overrides.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            log::debug!("Loading config from {}", path.display());
            builder = builder.add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        builder = builder.add_source(
            Environment::with_prefix("ARBOR").convert_case(Case::Kebab),
        );

        builder.build()?.try_deserialize()
    }
}

/// Get the user config file path.
///
/// Priority:
/// 1. `ARBOR_CONFIG_PATH` environment variable
/// 2. Platform-specific default location
pub fn config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return Some(PathBuf::from(path));
    }

    // choose_base_strategy uses XDG on Linux and macOS, %APPDATA% on Windows
    use etcetera::base_strategy::{BaseStrategy, choose_base_strategy};
    let strategy = choose_base_strategy().ok()?;
    Some(strategy.config_dir().join("arbor").join("config.toml"))
}
