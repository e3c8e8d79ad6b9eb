//! Configuration management for treedoc.
//!
//! Parses `treedoc.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [input]
//! tree = "tree.json"
//!
//! [output]
//! dir = "site"
//! extension = "html"
//! export_attributes = false
//! ```
//!
//! Relative paths are resolved against the directory containing the config
//! file, or against the current directory when no file was found.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the input tree file.
    pub input: Option<PathBuf>,
    /// Override the output directory.
    pub output_dir: Option<PathBuf>,
    /// Override the page file extension.
    pub extension: Option<String>,
    /// Override attribute export.
    pub export_attributes: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "treedoc.toml";

const DEFAULT_OUTPUT_DIR: &str = "site";
const DEFAULT_EXTENSION: &str = "html";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input configuration (paths are relative strings from TOML).
    input: InputConfigRaw,
    /// Output configuration (paths are relative strings from TOML).
    output: OutputConfigRaw,

    /// Resolved input configuration (set after loading).
    #[serde(skip)]
    pub input_resolved: InputConfig,
    /// Resolved output configuration (set after loading).
    #[serde(skip)]
    pub output_resolved: OutputConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct InputConfigRaw {
    tree: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OutputConfigRaw {
    dir: Option<String>,
    extension: Option<String>,
    export_attributes: Option<bool>,
}

/// Resolved input configuration.
#[derive(Debug, Default)]
pub struct InputConfig {
    /// JSON file holding the element tree.
    pub tree: Option<PathBuf>,
}

/// Resolved output configuration.
#[derive(Debug)]
pub struct OutputConfig {
    /// Documentation root directory.
    pub dir: PathBuf,
    /// Page file extension without the leading dot.
    pub extension: String,
    /// Show attribute annotations in metadata tables.
    pub export_attributes: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            extension: DEFAULT_EXTENSION.to_owned(),
            export_attributes: false,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `treedoc.toml` in current directory and parents.
    ///
    /// CLI settings are applied after path resolution, so CLI arguments take
    /// precedence over config file values. The result is validated last.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the final configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_config(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(input) = &settings.input {
            self.input_resolved.tree = Some(input.clone());
        }
        if let Some(output_dir) = &settings.output_dir {
            self.output_resolved.dir.clone_from(output_dir);
        }
        if let Some(extension) = &settings.extension {
            self.output_resolved.extension.clone_from(extension);
        }
        if let Some(export_attributes) = settings.export_attributes {
            self.output_resolved.export_attributes = export_attributes;
        }
    }

    /// Get the validated input tree path.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if no input tree is configured.
    pub fn require_tree(&self) -> Result<&Path, ConfigError> {
        self.input_resolved.tree.as_deref().ok_or_else(|| {
            ConfigError::Validation(
                "input.tree must be set in config or passed with --input".to_owned(),
            )
        })
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.require_tree()?;
        validate_extension(&self.output_resolved.extension)?;
        Ok(())
    }

    /// Search for a config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            input: InputConfigRaw::default(),
            output: OutputConfigRaw::default(),
            input_resolved: InputConfig::default(),
            output_resolved: OutputConfig {
                dir: base.join(DEFAULT_OUTPUT_DIR),
                ..OutputConfig::default()
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.input_resolved = InputConfig {
            tree: self.input.tree.as_deref().map(|tree| config_dir.join(tree)),
        };
        self.output_resolved = OutputConfig {
            dir: config_dir.join(self.output.dir.as_deref().unwrap_or(DEFAULT_OUTPUT_DIR)),
            extension: self
                .output
                .extension
                .clone()
                .unwrap_or_else(|| DEFAULT_EXTENSION.to_owned()),
            export_attributes: self.output.export_attributes.unwrap_or(false),
        };
    }
}

/// Require a bare file extension: non-empty, no leading dot, no path separator.
fn validate_extension(extension: &str) -> Result<(), ConfigError> {
    if extension.is_empty() {
        return Err(ConfigError::Validation(
            "output.extension cannot be empty".to_owned(),
        ));
    }
    if extension.starts_with('.') {
        return Err(ConfigError::Validation(format!(
            "output.extension must not start with '.': {extension}"
        )));
    }
    if extension.contains(['/', '\\']) {
        return Err(ConfigError::Validation(format!(
            "output.extension must not contain a path separator: {extension}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));

        assert!(config.input_resolved.tree.is_none());
        assert_eq!(config.output_resolved.dir, PathBuf::from("/test/site"));
        assert_eq!(config.output_resolved.extension, "html");
        assert!(!config.output_resolved.export_attributes);
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project"));

        assert!(config.input_resolved.tree.is_none());
        assert_eq!(config.output_resolved.dir, PathBuf::from("/project/site"));
        assert_eq!(config.output_resolved.extension, "html");
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[input]
tree = "build/tree.json"

[output]
dir = "public/docs"
extension = "htm"
export_attributes = true
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.input_resolved.tree,
            Some(PathBuf::from("/project/build/tree.json"))
        );
        assert_eq!(config.output_resolved.dir, PathBuf::from("/project/public/docs"));
        assert_eq!(config.output_resolved.extension, "htm");
        assert!(config.output_resolved.export_attributes);
    }

    #[test]
    fn test_parse_rejects_wrong_types() {
        let toml = r#"
[output]
export_attributes = "yes"
"#;
        let result: Result<Config, _> = toml::from_str(toml);

        assert!(result.is_err());
    }

    #[test]
    fn test_apply_cli_settings_overrides_file_values() {
        let toml = r#"
[input]
tree = "tree.json"

[output]
extension = "htm"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));
        let overrides = CliSettings {
            output_dir: Some(PathBuf::from("/tmp/out")),
            export_attributes: Some(true),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.input_resolved.tree,
            Some(PathBuf::from("/project/tree.json"))
        ); // Unchanged
        assert_eq!(config.output_resolved.dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.output_resolved.extension, "htm"); // Unchanged
        assert!(config.output_resolved.export_attributes);
    }

    #[test]
    fn test_apply_cli_settings_input_and_extension() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            input: Some(PathBuf::from("other.json")),
            extension: Some("xhtml".to_owned()),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.require_tree().unwrap(), Path::new("other.json"));
        assert_eq!(config.output_resolved.extension, "xhtml");
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));

        config.apply_cli_settings(&CliSettings::default());

        assert!(config.input_resolved.tree.is_none());
        assert_eq!(config.output_resolved.dir, PathBuf::from("/test/site"));
        assert_eq!(config.output_resolved.extension, "html");
    }

    #[test]
    fn test_validate_requires_tree() {
        let config = Config::default_with_base(Path::new("/test"));

        let err = config.validate().unwrap_err();

        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        assert!(err.to_string().contains("input.tree"));
    }

    #[test]
    fn test_validate_extension() {
        assert!(validate_extension("html").is_ok());
        assert!(validate_extension("htm").is_ok());

        for bad in ["", ".html", "a/b", "a\\b"] {
            let err = validate_extension(bad).unwrap_err();
            assert!(err.to_string().contains("output.extension"), "{bad:?}: {err}");
        }
    }

    #[test]
    fn test_load_explicit_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("custom.toml");
        fs::write(
            &path,
            "[input]\ntree = \"tree.json\"\n\n[output]\ndir = \"out\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.config_path, Some(path.clone()));
        assert_eq!(config.require_tree().unwrap(), temp_dir.path().join("tree.json"));
        assert_eq!(config.output_resolved.dir, temp_dir.path().join("out"));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("missing.toml");

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(p) if p == path));
    }

    #[test]
    fn test_load_parse_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("treedoc.toml");
        fs::write(&path, "[input\ntree = ").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_validates_after_cli_settings() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("treedoc.toml");
        fs::write(&path, "[output]\nextension = \"htm\"\n").unwrap();

        let missing_tree = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(missing_tree, ConfigError::Validation(_)));

        let settings = CliSettings {
            input: Some(PathBuf::from("tree.json")),
            ..Default::default()
        };
        let config = Config::load(Some(&path), Some(&settings)).unwrap();
        assert_eq!(config.output_resolved.extension, "htm");

        let settings = CliSettings {
            input: Some(PathBuf::from("tree.json")),
            extension: Some(".html".to_owned()),
            ..Default::default()
        };
        let bad_extension = Config::load(Some(&path), Some(&settings)).unwrap_err();
        assert!(bad_extension.to_string().contains("output.extension"));
    }

    #[test]
    fn test_discover_config_in_parent() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested = temp_dir.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILENAME), "").unwrap();

        let found = Config::discover_config(&nested);

        assert_eq!(found, Some(temp_dir.path().join(CONFIG_FILENAME)));
    }

    #[test]
    fn test_discover_config_prefers_nearest() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested = temp_dir.path().join("a");
        fs::create_dir_all(&nested).unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILENAME), "").unwrap();
        fs::write(nested.join(CONFIG_FILENAME), "").unwrap();

        let found = Config::discover_config(&nested);

        assert_eq!(found, Some(nested.join(CONFIG_FILENAME)));
    }
}
