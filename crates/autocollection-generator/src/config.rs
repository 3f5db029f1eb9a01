//! Generator configuration
//!
//! Layered the usual way: built-in defaults, then an optional TOML file, then
//! `AUTOCOLLECTION_*` environment variables.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use config::{Config, Environment, File, FileFormat};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::identity::TokenPolicy;
use crate::models::ANNOTATION_NAMESPACE;
use crate::templates::resolver::DEFAULT_BACKING_FIELD;

/// Configuration result type
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized
    #[error("Parse error: {0}")]
    Parse(String),

    /// A value is out of range
    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// Settings for a [`crate::SourceGenerator`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Backing field name used when the annotation names none
    pub default_backing_field: String,
    /// Appended to every candidate identity
    pub identity_suffix: String,
    /// Namespace the annotations are declared in
    pub annotation_namespace: String,
    /// How global-scope placeholder tokens are produced
    pub namespace_tokens: TokenPolicy,
    /// Synthesize candidates on the rayon pool
    pub parallel: bool,
    /// Directory whose templates override the built-in ones
    pub template_dir: Option<PathBuf>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            default_backing_field: DEFAULT_BACKING_FIELD.to_string(),
            identity_suffix: ".g.cs".to_string(),
            annotation_namespace: ANNOTATION_NAMESPACE.to_string(),
            namespace_tokens: TokenPolicy::Random,
            parallel: true,
            template_dir: None,
        }
    }
}

fn identifier_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^@?[A-Za-z_][A-Za-z0-9_]*$").expect("Invalid regex"))
}

impl GeneratorConfig {
    /// Check values that would make every pass produce broken output
    pub fn validate(&self) -> Result<()> {
        if !identifier_regex().is_match(&self.default_backing_field) {
            return Err(ConfigError::Validation(format!(
                "default_backing_field '{}' is not a valid identifier",
                self.default_backing_field
            )));
        }

        if self.identity_suffix.contains(['/', '\\']) {
            return Err(ConfigError::Validation(format!(
                "identity_suffix '{}' must not contain path separators",
                self.identity_suffix
            )));
        }

        if self.annotation_namespace.is_empty()
            || !self
                .annotation_namespace
                .split('.')
                .all(|part| identifier_regex().is_match(part))
        {
            return Err(ConfigError::Validation(format!(
                "annotation_namespace '{}' is not a dotted identifier",
                self.annotation_namespace
            )));
        }

        Ok(())
    }
}

/// Loads [`GeneratorConfig`] from file and environment
pub struct ConfigLoader {
    /// Optional TOML file
    config_path: Option<PathBuf>,
    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Loader reading only the environment
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: "AUTOCOLLECTION".to_string(),
        }
    }

    /// Loader reading a TOML file, then the environment
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: Some(path.into()),
            env_prefix: "AUTOCOLLECTION".to_string(),
        }
    }

    /// Override the environment prefix
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Configured file path, if any
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Load and validate
    pub fn load(&self) -> Result<GeneratorConfig> {
        let mut builder = Config::builder();
        if let Some(path) = &self.config_path {
            builder = builder.add_source(
                File::from(path.as_path())
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }
        builder = builder.add_source(Environment::with_prefix(&self.env_prefix).try_parsing(true));

        let config: GeneratorConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_are_valid() {
        let config = GeneratorConfig::default();
        assert_eq!(config.default_backing_field, "_items");
        assert_eq!(config.identity_suffix, ".g.cs");
        assert_eq!(config.annotation_namespace, "AutoCollection");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_backing_field() {
        let config = GeneratorConfig {
            default_backing_field: "1items".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_suffix_with_separator() {
        let config = GeneratorConfig {
            identity_suffix: "/g.cs".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_namespace() {
        let config = GeneratorConfig {
            annotation_namespace: "Auto..Collection".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("autocollection.toml");
        fs::write(
            &path,
            "default_backing_field = \"_store\"\nnamespace_tokens = \"sequential\"\nparallel = false\n",
        )
        .unwrap();

        let config = ConfigLoader::with_path(&path)
            .with_env_prefix("AUTOCOLLECTION_TEST_FILE")
            .load()
            .unwrap();
        assert_eq!(config.default_backing_field, "_store");
        assert_eq!(config.namespace_tokens, TokenPolicy::Sequential);
        assert!(!config.parallel);
        assert_eq!(config.identity_suffix, ".g.cs");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = ConfigLoader::with_path("/nonexistent/autocollection.toml")
            .with_env_prefix("AUTOCOLLECTION_TEST_MISSING")
            .load()
            .unwrap();
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn test_invalid_file_value_fails_validation() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("autocollection.toml");
        fs::write(&path, "default_backing_field = \"not valid\"\n").unwrap();

        let err = ConfigLoader::with_path(&path)
            .with_env_prefix("AUTOCOLLECTION_TEST_INVALID")
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }
}
