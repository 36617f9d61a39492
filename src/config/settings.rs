//! Application settings loading from `marcomdesk.toml` and the environment.
//!
//! Settings cover the listen address, database URL, the upload directory used
//! by the disk document store, and the letterhead identity printed on
//! generated confirmation letters. Every value has a sensible default so the
//! application boots with no config file at all; environment variables win
//! over file values for the deployment-specific fields.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::config::database::get_database_url;
use crate::errors::{Error, Result};

/// Default config file location, next to the binary's working directory.
const DEFAULT_CONFIG_PATH: &str = "marcomdesk.toml";

/// Identity block printed on generated letters.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Letterhead {
    /// Organization name (e.g. the mall's management company)
    #[serde(default)]
    pub organization: String,
    /// Street address line
    #[serde(default)]
    pub address: String,
    /// City and postal code line
    #[serde(default)]
    pub city: String,
}

/// Top-level application settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// Address the HTTP server binds to
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Database connection URL
    #[serde(default = "crate::config::database::get_database_url")]
    pub database_url: String,
    /// Directory the disk document store files uploads under
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,
    /// Letterhead identity for generated letters
    #[serde(default)]
    pub letterhead: Letterhead,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            database_url: get_database_url(),
            upload_dir: default_upload_dir(),
            letterhead: Letterhead::default(),
        }
    }
}

fn default_bind_address() -> String {
    std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "127.0.0.1:8080".to_string())
}

fn default_upload_dir() -> PathBuf {
    std::env::var("UPLOAD_DIR").map_or_else(|_| PathBuf::from("data/uploads"), PathBuf::from)
}

/// Loads settings from a TOML file.
///
/// # Errors
/// Returns [`Error::Config`] if the file cannot be read or the TOML is
/// invalid; missing fields fall back to their defaults.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read settings file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse settings file: {e}"),
    })
}

/// Loads settings from the default location, falling back to built-in
/// defaults when no config file exists.
///
/// A present-but-broken file is still an error; only a missing file is
/// silently replaced by defaults.
pub fn load_default_settings() -> Result<Settings> {
    let path = std::env::var("MARCOMDESK_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    if Path::new(&path).exists() {
        load_settings(path)
    } else {
        Ok(Settings::default())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn parses_a_full_settings_file() {
        let toml_str = r#"
            bind_address = "0.0.0.0:9090"
            database_url = "sqlite::memory:"
            upload_dir = "/tmp/marcomdesk-uploads"

            [letterhead]
            organization = "Grand Plaza Mall Management"
            address = "Jl. Jend. Sudirman No. 1"
            city = "Jakarta 10220"
        "#;

        let settings: Settings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.bind_address, "0.0.0.0:9090");
        assert_eq!(settings.database_url, "sqlite::memory:");
        assert_eq!(settings.upload_dir, PathBuf::from("/tmp/marcomdesk-uploads"));
        assert_eq!(
            settings.letterhead.organization,
            "Grand Plaza Mall Management"
        );
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings: Settings = toml::from_str("").unwrap();
        assert!(!settings.bind_address.is_empty());
        assert!(!settings.database_url.is_empty());
        assert_eq!(settings.letterhead, Letterhead::default());
    }

    #[test]
    fn broken_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("marcomdesk.toml");
        std::fs::write(&path, "bind_address = [not toml").unwrap();

        let err = load_settings(&path).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
