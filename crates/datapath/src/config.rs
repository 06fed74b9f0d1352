//! Mapping configuration.
//!
//! Mappings can be declared in TOML:
//!
//! ```toml
//! [options]
//! skip_null = true
//!
//! [[mapping]]
//! source = "users.*.email"
//! target = "contacts.*.email"
//! ```

use std::path::Path;

use datapath_core::DotPath;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{MapperError, MapperResult};

/// Maximum allowed mapping file size (1 MiB).
const MAX_CONFIG_FILE_SIZE: u64 = 1_048_576;

/// One `target <- source` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mapping {
    /// Path read from the source tree.
    pub source: String,
    /// Path written in the target tree.
    pub target: String,
}

impl Mapping {
    /// Create a mapping.
    #[must_use]
    pub fn new(target: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Check that the pair can be written.
    ///
    /// # Errors
    ///
    /// Returns [`MapperError::InvalidMapping`] when a wildcard source is
    /// paired with a target that has no wildcard.
    pub fn validate(&self) -> MapperResult<()> {
        let source = DotPath::parse(self.source.as_str());
        if self.source.is_empty() || !source.has_wildcard() {
            return Ok(());
        }
        if self.target.is_empty() || !DotPath::parse(self.target.as_str()).has_wildcard() {
            return Err(MapperError::InvalidMapping {
                target: self.target.clone(),
                reason: format!(
                    "wildcard source '{}' needs a wildcard target",
                    self.source
                ),
            });
        }
        Ok(())
    }
}

/// Behavior switches for a mapper.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapperOptions {
    /// Do not write null source values.
    #[serde(default)]
    pub skip_null: bool,
}

/// A full mapping configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapperConfig {
    /// Options applied to every mapping.
    #[serde(default)]
    pub options: MapperOptions,
    /// Mappings, applied in order.
    #[serde(default, rename = "mapping")]
    pub mappings: Vec<Mapping>,
}

impl MapperConfig {
    /// Parse a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`MapperError::ParseError`] for malformed TOML and
    /// [`MapperError::InvalidMapping`] for unwritable mappings.
    pub fn from_toml_str(content: &str) -> MapperResult<Self> {
        Self::parse(content, "<inline>")
    }

    /// Load a configuration file.
    ///
    /// # Errors
    ///
    /// Returns a [`MapperError`] if the file cannot be read, is too large,
    /// cannot be parsed, or contains an invalid mapping.
    pub fn load_file(path: &Path) -> MapperResult<Self> {
        // Check the size before reading the whole file.
        let metadata = std::fs::metadata(path).map_err(|e| MapperError::ReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(MapperError::FileTooLarge {
                path: path.display().to_string(),
                size: metadata.len(),
                limit: MAX_CONFIG_FILE_SIZE,
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| MapperError::ReadError {
            path: path.display().to_string(),
            source: e,
        })?;

        let config = Self::parse(&content, &path.display().to_string())?;
        info!(path = %path.display(), mappings = config.mappings.len(), "loaded mapping config");
        Ok(config)
    }

    /// Validate every mapping.
    ///
    /// # Errors
    ///
    /// Returns the first invalid mapping.
    pub fn validate(&self) -> MapperResult<()> {
        self.mappings.iter().try_for_each(Mapping::validate)
    }

    fn parse(content: &str, origin: &str) -> MapperResult<Self> {
        let config: Self = toml::from_str(content).map_err(|e| MapperError::ParseError {
            path: origin.to_owned(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_parse_config() {
        let config = MapperConfig::from_toml_str(
            r#"
            [options]
            skip_null = true

            [[mapping]]
            source = "user.profile.name"
            target = "contact.name"

            [[mapping]]
            source = "users.*.email"
            target = "contacts.*.email"
        "#,
        )
        .unwrap();

        assert!(config.options.skip_null);
        assert_eq!(
            config.mappings,
            vec![
                Mapping::new("contact.name", "user.profile.name"),
                Mapping::new("contacts.*.email", "users.*.email"),
            ]
        );
    }

    #[test]
    fn test_defaults_when_sections_missing() {
        let config = MapperConfig::from_toml_str("").unwrap();
        assert_eq!(config, MapperConfig::default());
        assert!(!config.options.skip_null);
    }

    #[test]
    fn test_malformed_toml() {
        let err = MapperConfig::from_toml_str("[[mapping]\nsource = ").unwrap_err();
        assert!(matches!(err, MapperError::ParseError { ref path, .. } if path == "<inline>"));
    }

    #[test]
    fn test_wildcard_source_needs_wildcard_target() {
        let err = MapperConfig::from_toml_str(
            r#"
            [[mapping]]
            source = "users.*.email"
            target = "contact.email"
        "#,
        )
        .unwrap_err();
        assert!(matches!(err, MapperError::InvalidMapping { ref target, .. } if target == "contact.email"));

        assert!(Mapping::new("", "users.*").validate().is_err());
        assert!(Mapping::new("", "users").validate().is_ok());
        assert!(Mapping::new("x.*", "users").validate().is_ok());
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [[mapping]]
            source = "a"
            target = "b"
        "#
        )
        .unwrap();

        let config = MapperConfig::load_file(file.path()).unwrap();
        assert_eq!(config.mappings, vec![Mapping::new("b", "a")]);
    }

    #[test]
    fn test_load_oversized_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let comment = format!("# {}\n", "x".repeat(1023));
        for _ in 0..1025 {
            file.write_all(comment.as_bytes()).unwrap();
        }
        file.flush().unwrap();

        let err = MapperConfig::load_file(file.path()).unwrap_err();
        assert!(matches!(
            err,
            MapperError::FileTooLarge { size, limit, .. }
                if size > MAX_CONFIG_FILE_SIZE && limit == MAX_CONFIG_FILE_SIZE
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = MapperConfig::load_file(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, MapperError::ReadError { .. }));
    }
}
