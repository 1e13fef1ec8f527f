use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::DEFAULT_RENEWAL_WINDOW_DAYS;

/// Data file used when nothing else names one
pub const DEFAULT_BOOK_FILE: &str = "policybook.json";

/// Per-user settings kept in `~/.policybook.config`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPrefs {
    /// Path to the policy book data file
    #[serde(default)]
    pub book_file: Option<PathBuf>,
    /// Look-ahead of `renewals` when no day count is given
    #[serde(default = "default_renewal_window")]
    pub renewal_window_days: u32,
}

fn default_renewal_window() -> u32 {
    DEFAULT_RENEWAL_WINDOW_DAYS
}

impl Default for UserPrefs {
    fn default() -> Self {
        Self {
            book_file: Some(PathBuf::from(DEFAULT_BOOK_FILE)),
            renewal_window_days: DEFAULT_RENEWAL_WINDOW_DAYS,
        }
    }
}

impl UserPrefs {
    /// Loads preferences from the provided path
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read preferences file: {:?}", path.as_ref()))?;

        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse preferences file: {:?}", path.as_ref()))
    }

    /// Save the preferences to the specified path
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(&self)?;

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write preferences to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Loads preferences, writing a default file first if none exists
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        if !path.as_ref().exists() {
            debug!("Creating default preferences at {:?}", path.as_ref());
            Self::default().save(&path)?;
        }
        Self::load(path)
    }
}

/// Gets the path to the preferences file
pub fn get_prefs_path() -> Result<PathBuf> {
    if let Ok(path) = env::var("POLICYBOOK_PREFS") {
        return Ok(PathBuf::from(path));
    }

    let home_dir = dirs::home_dir().context("Failed to determine home directory")?;

    Ok(home_dir.join(".policybook.config"))
}

/// Determines the data file from the command line, `$POLICYBOOK_FILE` and preferences
pub fn determine_book_path(file_option: Option<&Path>, prefs: &UserPrefs) -> PathBuf {
    resolve_book_path(
        file_option,
        env::var_os("POLICYBOOK_FILE").map(PathBuf::from),
        prefs,
    )
}

fn resolve_book_path(
    file_option: Option<&Path>,
    env_file: Option<PathBuf>,
    prefs: &UserPrefs,
) -> PathBuf {
    // Priority 1: explicit command line option
    if let Some(path) = file_option {
        return path.to_path_buf();
    }

    // Priority 2: environment variable
    if let Some(path) = env_file.filter(|p| !p.as_os_str().is_empty()) {
        return path;
    }

    // Priority 3: preferences, then the working directory default
    prefs
        .book_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_BOOK_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_or_create_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs").join(".policybook.config");

        let prefs = UserPrefs::load_or_create(&path).unwrap();
        assert!(path.exists());
        assert_eq!(prefs, UserPrefs::default());
        assert_eq!(prefs.renewal_window_days, 30);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.yaml");
        let prefs = UserPrefs {
            book_file: Some(PathBuf::from("/data/clients.json")),
            renewal_window_days: 14,
        };
        prefs.save(&path).unwrap();
        assert_eq!(UserPrefs::load(&path).unwrap(), prefs);
    }

    #[test]
    fn test_missing_keys_take_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.yaml");
        fs::write(&path, "book_file: other.json\n").unwrap();
        let prefs = UserPrefs::load(&path).unwrap();
        assert_eq!(prefs.book_file, Some(PathBuf::from("other.json")));
        assert_eq!(prefs.renewal_window_days, DEFAULT_RENEWAL_WINDOW_DAYS);
    }

    #[test]
    fn test_bad_yaml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.yaml");
        fs::write(&path, "renewal_window_days: [oops").unwrap();
        assert!(UserPrefs::load(&path).is_err());
    }

    #[test]
    fn test_book_path_priority() {
        let prefs = UserPrefs {
            book_file: Some(PathBuf::from("from-prefs.json")),
            renewal_window_days: 30,
        };
        let cli = PathBuf::from("from-cli.json");
        let env_file = Some(PathBuf::from("from-env.json"));

        assert_eq!(
            resolve_book_path(Some(&cli), env_file.clone(), &prefs),
            PathBuf::from("from-cli.json")
        );
        assert_eq!(
            resolve_book_path(None, env_file, &prefs),
            PathBuf::from("from-env.json")
        );
        assert_eq!(
            resolve_book_path(None, None, &prefs),
            PathBuf::from("from-prefs.json")
        );

        let bare = UserPrefs {
            book_file: None,
            renewal_window_days: 30,
        };
        assert_eq!(
            resolve_book_path(None, Some(PathBuf::new()), &bare),
            PathBuf::from(DEFAULT_BOOK_FILE)
        );
    }
}
