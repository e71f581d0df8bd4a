//! Configuration loading and data folder resolution

use crate::{Error, Result};
use std::path::PathBuf;

/// Name of the SQLite database file inside the data folder
pub const DATABASE_FILE: &str = "trackduel.db";

/// Resolve the data folder, in priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. `root_folder` key in the platform config file
/// 4. OS-dependent default (fallback)
pub fn resolve_root_folder(cli_arg: Option<&str>, env_var_name: &str) -> Result<PathBuf> {
    if let Some(path) = cli_arg {
        return Ok(PathBuf::from(path));
    }

    if let Ok(path) = std::env::var(env_var_name) {
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    if let Ok(config_path) = find_config_file() {
        if let Ok(contents) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<toml::Value>(&contents) {
                if let Some(root_folder) = config.get("root_folder").and_then(|v| v.as_str()) {
                    return Ok(PathBuf::from(root_folder));
                }
            }
        }
    }

    Ok(default_root_folder())
}

/// Locate `trackduel/config.toml` under the platform config directory
///
/// On Linux, `/etc/trackduel/config.toml` is checked as a system-wide
/// fallback when no per-user file exists.
fn find_config_file() -> Result<PathBuf> {
    if let Some(path) = dirs::config_dir().map(|d| d.join("trackduel").join("config.toml")) {
        if path.exists() {
            return Ok(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/trackduel/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
    }

    Err(Error::Config("No config file found".to_string()))
}

/// OS-dependent default data folder (e.g. `~/.local/share/trackduel`)
fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("trackduel"))
        .unwrap_or_else(|| PathBuf::from("./trackduel_data"))
}

/// Full path of the database file inside the resolved data folder
pub fn database_path(root_folder: &std::path::Path) -> PathBuf {
    root_folder.join(DATABASE_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_argument_wins() {
        let resolved = resolve_root_folder(Some("/tmp/duel"), "TRACKDUEL_TEST_UNSET").unwrap();
        assert_eq!(resolved, PathBuf::from("/tmp/duel"));
    }

    #[test]
    fn env_var_beats_default() {
        std::env::set_var("TRACKDUEL_TEST_ROOT", "/tmp/duel-env");
        let resolved = resolve_root_folder(None, "TRACKDUEL_TEST_ROOT").unwrap();
        std::env::remove_var("TRACKDUEL_TEST_ROOT");
        assert_eq!(resolved, PathBuf::from("/tmp/duel-env"));
    }

    #[test]
    fn database_path_appends_file_name() {
        let path = database_path(std::path::Path::new("/data/trackduel"));
        assert_eq!(path, PathBuf::from("/data/trackduel/trackduel.db"));
    }
}
