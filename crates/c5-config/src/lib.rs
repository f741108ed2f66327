//! # c5-config
//!
//! Layered build configuration for c5t using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`C5T_*` prefix)
//! 2. Project-level `c5t.toml` (or the file passed with `--config`)
//! 3. User-level `~/.config/c5t/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `C5T_PRIMARY_HANDLE` -> `primary_handle`,
//! `C5T_SKIP_PRIMARY_PAGE` -> `skip_primary_page`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use std::path::Path;
//! use c5_config::BuildConfig;
//!
//! let config = BuildConfig::load_with_dotenv(Path::new("."), None).expect("config");
//! println!("theme handle: {}", config.primary_handle);
//! ```

mod error;

pub use error::ConfigError;

use std::path::{Path, PathBuf};

use c5_codegen::ThemeOptions;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

/// Project-level config file name.
pub const PROJECT_CONFIG_FILE: &str = "c5t.toml";

fn default_primary_handle() -> String {
    "c5_theme".to_string()
}

fn default_display_name() -> String {
    "Concrete5 Theme".to_string()
}

fn default_page_name() -> String {
    "index.html".to_string()
}

/// Settings for one build, fixed before the first document is processed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BuildConfig {
    /// Theme handle; also names the theme class namespace.
    #[serde(default = "default_primary_handle")]
    pub primary_handle: String,

    /// Human-readable theme name.
    #[serde(default = "default_display_name")]
    pub display_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Handle of the package that ships the theme.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_handle: Option<String>,

    /// Page that also gets emitted as `default.php`.
    #[serde(default = "default_page_name")]
    pub default_page_name: String,

    /// Produce no output for the default page.
    #[serde(default)]
    pub skip_primary_page: bool,

    /// Drop the HTML artifacts once their PHP companions exist.
    #[serde(default)]
    pub delete_source_html: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            primary_handle: default_primary_handle(),
            display_name: default_display_name(),
            description: None,
            parent_handle: None,
            default_page_name: default_page_name(),
            skip_primary_page: false,
            delete_source_html: false,
        }
    }
}

impl BuildConfig {
    /// Defaults for a theme known only by its display name. The handle is
    /// the name with whitespace replaced by underscores.
    #[must_use]
    pub fn from_display_name(name: &str) -> Self {
        let handle = name
            .chars()
            .map(|c| if c.is_whitespace() { '_' } else { c })
            .collect();
        Self {
            primary_handle: handle,
            display_name: name.to_string(),
            ..Self::default()
        }
    }

    /// Load configuration for the project at `project_root`.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when a source fails to parse or a value is
    /// invalid.
    pub fn load(project_root: &Path, config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(project_root, config_file).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration after reading `<project_root>/.env`.
    ///
    /// # Errors
    /// See [`Self::load`].
    pub fn load_with_dotenv(
        project_root: &Path,
        config_file: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let env_path = project_root.join(".env");
        if env_path.exists() {
            let _ = dotenvy::from_path(&env_path);
        }
        Self::load(project_root, config_file)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment(project_root: &Path, config_file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config, or the explicit file
        let local_path = config_file.map_or_else(
            || project_root.join(PROJECT_CONFIG_FILE),
            Path::to_path_buf,
        );
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("C5T_").split("__"))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("c5t").join("config.toml"))
    }

    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] for an empty default page name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_page_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "default_page_name".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Options for the theme class renderer.
    #[must_use]
    pub fn theme_options(&self) -> ThemeOptions {
        ThemeOptions {
            name: self.display_name.clone(),
            handle: self.primary_handle.clone(),
            description: self.description.clone(),
            parent_handle: self.parent_handle.clone(),
        }
    }

    /// Whether `document` is the configured default page (case-insensitive).
    #[must_use]
    pub fn is_default_page(&self, document: &str) -> bool {
        document.eq_ignore_ascii_case(&self.default_page_name)
    }

    /// Whether `document` should produce no output at all.
    #[must_use]
    pub fn is_skipped(&self, document: &str) -> bool {
        self.skip_primary_page && self.is_default_page(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_are_correct() {
        let config = BuildConfig::default();
        assert_eq!(config.primary_handle, "c5_theme");
        assert_eq!(config.display_name, "Concrete5 Theme");
        assert_eq!(config.default_page_name, "index.html");
        assert!(!config.skip_primary_page);
        assert!(!config.delete_source_html);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn display_name_derives_handle() {
        let config = BuildConfig::from_display_name("Cool C5 Theme");
        assert_eq!(config.primary_handle, "Cool_C5_Theme");
        assert_eq!(config.display_name, "Cool C5 Theme");
        assert_eq!(config.theme_options().handle, "Cool_C5_Theme");
    }

    #[test]
    fn default_page_matches_case_insensitively() {
        let config = BuildConfig {
            skip_primary_page: true,
            ..BuildConfig::default()
        };
        assert!(config.is_default_page("INDEX.html"));
        assert!(config.is_skipped("Index.HTML"));
        assert!(!config.is_skipped("about.html"));
    }

    #[test]
    fn empty_default_page_is_rejected() {
        let config = BuildConfig {
            default_page_name: "  ".to_string(),
            ..BuildConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
