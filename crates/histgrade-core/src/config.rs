//! Grading configuration.
//!
//! Everything here has a default that matches the classroom deployment, so a
//! config file is only needed to override paths or the roster filter.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GradeError, Result};

/// Top-level histgrade configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeConfig {
    /// Shared directory searched when the requirements argument is a bare name.
    #[serde(default = "default_requirements_dir")]
    pub requirements_dir: PathBuf,
    /// Account database in passwd format.
    #[serde(default = "default_passwd_path")]
    pub passwd_path: PathBuf,
    /// Lowest uid counted as a student account.
    #[serde(default = "default_uid_min")]
    pub uid_min: u32,
    /// Highest uid counted as a student account.
    #[serde(default = "default_uid_max")]
    pub uid_max: u32,
    /// Account names excluded from the roster even when their uid is in range.
    #[serde(default = "default_excluded_users")]
    pub excluded_users: Vec<String>,
    /// Fixed point budget distributed over the requirement set.
    #[serde(default = "default_total_points")]
    pub total_points: u32,
    /// Primary history file name under each home directory. Rotated siblings
    /// carry a numeric suffix (`.1`, `.2`, ...).
    #[serde(default = "default_history_file")]
    pub history_file: String,
    /// Command queried for last-login records.
    #[serde(default = "default_lastlog_command")]
    pub lastlog_command: String,
}

fn default_requirements_dir() -> PathBuf {
    PathBuf::from("/usr/local/share/histgrade")
}
fn default_passwd_path() -> PathBuf {
    PathBuf::from("/etc/passwd")
}
fn default_uid_min() -> u32 {
    1000
}
fn default_uid_max() -> u32 {
    1099
}
fn default_excluded_users() -> Vec<String> {
    vec!["ec2-user".to_string(), "bastion".to_string()]
}
fn default_total_points() -> u32 {
    25
}
fn default_history_file() -> String {
    ".bash_history".to_string()
}
fn default_lastlog_command() -> String {
    "lastlog".to_string()
}

impl Default for GradeConfig {
    fn default() -> Self {
        Self {
            requirements_dir: default_requirements_dir(),
            passwd_path: default_passwd_path(),
            uid_min: default_uid_min(),
            uid_max: default_uid_max(),
            excluded_users: default_excluded_users(),
            total_points: default_total_points(),
            history_file: default_history_file(),
            lastlog_command: default_lastlog_command(),
        }
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `histgrade.toml` in the current directory
/// 2. `~/.config/histgrade/config.toml`
pub fn load_config() -> Result<GradeConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<GradeConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            return Err(GradeError::Config(format!(
                "config file not found: {}",
                p.display()
            )));
        }
    } else {
        let local = PathBuf::from("histgrade.toml");
        if local.exists() {
            Some(local)
        } else if let Some(dir) = config_dir() {
            let global = dir.join("config.toml");
            global.exists().then_some(global)
        } else {
            None
        }
    };

    let config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)?;
            toml::from_str::<GradeConfig>(&content).map_err(|e| {
                GradeError::Config(format!("failed to parse {}: {e}", path.display()))
            })?
        }
        None => GradeConfig::default(),
    };

    if config.uid_min > config.uid_max {
        return Err(GradeError::Config(format!(
            "uid_min ({}) exceeds uid_max ({})",
            config.uid_min, config.uid_max
        )));
    }
    if config.total_points == 0 {
        return Err(GradeError::Config("total_points must be positive".into()));
    }

    Ok(config)
}

fn config_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("histgrade"))
}
