//! Optional settings file handling.
//!
//! A distribution root may carry a `windlass.toml` alongside the manifest to
//! tune verification. An absent file yields the built-in defaults; a present
//! but malformed file is a hard error so typos never silently relax checks.

use crate::error::{Result, WindlassError};
use crate::verifier::{DEFAULT_WHITELIST, Whitelist};
use camino::Utf8Path;
use serde::Deserialize;
use std::io::ErrorKind;

/// File name of the optional settings file in the distribution root.
pub const SETTINGS_FILE_NAME: &str = "windlass.toml";

/// Settings loaded from `windlass.toml`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Verification settings.
    pub verify: VerifySettings,
}

/// Settings that influence asset verification.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct VerifySettings {
    /// Substrings selecting which catalogued entries are verified.
    #[serde(default = "VerifySettings::default_whitelist")]
    pub whitelist: Vec<String>,
}

impl Default for VerifySettings {
    fn default() -> Self {
        Self {
            whitelist: Self::default_whitelist(),
        }
    }
}

impl VerifySettings {
    fn default_whitelist() -> Vec<String> {
        DEFAULT_WHITELIST.iter().map(|s| (*s).to_owned()).collect()
    }
}

impl Settings {
    /// Load settings from `root`, falling back to defaults when the file is
    /// absent.
    ///
    /// # Errors
    ///
    /// Returns [`WindlassError::InvalidSettings`] if the file exists but
    /// cannot be parsed, or an I/O error if it cannot be read.
    pub fn load_from(root: &Utf8Path) -> Result<Self> {
        let path = root.join(SETTINGS_FILE_NAME);
        let source = match std::fs::read_to_string(&path) {
            Ok(source) => source,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(WindlassError::Io(e)),
        };

        toml::from_str(&source).map_err(|e| WindlassError::InvalidSettings {
            path,
            reason: e.to_string(),
        })
    }

    /// Build the verification whitelist these settings describe.
    #[must_use]
    pub fn whitelist(&self) -> Whitelist {
        Whitelist::new(self.verify.whitelist.clone())
    }
}
