//! Configuration management for the docgen CLI.
//!
//! This module handles loading and merging configuration from multiple sources:
//! - Built-in defaults
//! - Config file (`.docgen/config.yaml`)
//! - Environment variables
//! - Command-line flags
//!
//! Later sources override earlier ones.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Model key used when nothing else is configured.
pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet";

/// Default completion budget passed to providers that accept one.
pub const DEFAULT_MAX_TOKENS: u32 = 16000;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Workspace root; relative paths below resolve against it
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Model registry key (e.g., "claude-3-5-sonnet", "gpt-4o")
    pub model: String,

    /// Maximum tokens requested from the provider
    pub max_tokens: u32,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,

    /// Google Docs/Drive settings
    pub google: GoogleConfig,

    /// Defaults for the generation inputs
    pub defaults: GenerationDefaults,

    /// Provider base URL overrides
    pub endpoints: EndpointConfig,
}

/// Google OAuth file locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleConfig {
    /// OAuth client secret downloaded from the Cloud console
    #[serde(rename = "credentialsPath")]
    pub credentials_path: PathBuf,

    /// Cached OAuth token written after consent
    #[serde(rename = "tokenPath")]
    pub token_path: PathBuf,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            credentials_path: PathBuf::from("credentials.json"),
            token_path: PathBuf::from("token.json"),
        }
    }
}

/// Values applied when an input is left empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationDefaults {
    pub style: String,
    pub audience: String,
    #[serde(rename = "outputType")]
    pub output_type: String,
    pub size: String,
    #[serde(rename = "outputLocation")]
    pub output_location: String,
}

impl Default for GenerationDefaults {
    fn default() -> Self {
        Self {
            style: "Professional, clear, and engaging writing style.".to_string(),
            audience: "general professional audience".to_string(),
            output_type: "blog post".to_string(),
            size: "2-3 pages".to_string(),
            output_location: ".".to_string(),
        }
    }
}

/// Per-provider base URL overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub anthropic: Option<String>,
    pub openai: Option<String>,
    pub gemini: Option<String>,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    model: Option<String>,
    #[serde(rename = "maxTokens")]
    max_tokens: Option<u32>,
    google: Option<GoogleFileConfig>,
    defaults: Option<DefaultsFileConfig>,
    endpoints: Option<EndpointConfig>,
    logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct GoogleFileConfig {
    #[serde(rename = "credentialsPath")]
    credentials_path: Option<PathBuf>,
    #[serde(rename = "tokenPath")]
    token_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct DefaultsFileConfig {
    style: Option<String>,
    audience: Option<String>,
    #[serde(rename = "outputType")]
    output_type: Option<String>,
    size: Option<String>,
    #[serde(rename = "outputLocation")]
    output_location: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            log_level: None,
            verbose: false,
            no_color: false,
            google: GoogleConfig::default(),
            defaults: GenerationDefaults::default(),
            endpoints: EndpointConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, the YAML file and environment variables.
    ///
    /// Environment variables:
    /// - `DOCGEN_WORKSPACE`: Override workspace path
    /// - `DOCGEN_CONFIG`: Path to config file
    /// - `DOCGEN_MODEL`: Model registry key
    /// - `DOCGEN_MAX_TOKENS`: Completion token budget
    /// - `DOCGEN_GOOGLE_CREDENTIALS`: OAuth client secret file
    /// - `DOCGEN_GOOGLE_TOKEN`: OAuth token cache file
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use docgen_core::config::AppConfig;
    ///
    /// let config = AppConfig::load_with(None, None).expect("Failed to load config");
    /// println!("Model: {}", config.model);
    /// ```
    ///
    /// `workspace` and `config_file` come from the command line and take
    /// precedence over their variables.
    pub fn load_with(workspace: Option<PathBuf>, config_file: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(workspace) =
            workspace.or_else(|| std::env::var("DOCGEN_WORKSPACE").ok().map(PathBuf::from))
        {
            config.workspace = workspace;
        }

        if let Some(config_file) =
            config_file.or_else(|| std::env::var("DOCGEN_CONFIG").ok().map(PathBuf::from))
        {
            config.config_file = Some(config_file);
        }

        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        let config_path = config
            .config_file
            .clone()
            .unwrap_or_else(|| config.docgen_dir().join("config.yaml"));

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        } else if config.config_file.is_some() {
            return Err(AppError::Config(format!(
                "Config file not found: {:?}",
                config_path
            )));
        }

        // Environment variables override YAML config
        if let Ok(model) = std::env::var("DOCGEN_MODEL") {
            config.model = model;
        }

        if let Ok(max_tokens) = std::env::var("DOCGEN_MAX_TOKENS") {
            config.max_tokens = max_tokens.parse().map_err(|_| {
                AppError::Config(format!("DOCGEN_MAX_TOKENS is not a number: {}", max_tokens))
            })?;
        }

        if let Ok(path) = std::env::var("DOCGEN_GOOGLE_CREDENTIALS") {
            config.google.credentials_path = PathBuf::from(path);
        }

        if let Ok(path) = std::env::var("DOCGEN_GOOGLE_TOKEN") {
            config.google.token_path = PathBuf::from(path);
        }

        if let Ok(level) = std::env::var("RUST_LOG") {
            config.log_level = Some(level);
        }

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge YAML configuration file into this config.
    fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        Ok(self.clone().merge_file(file))
    }

    fn merge_file(mut self, file: ConfigFile) -> Self {
        if let Some(model) = file.model {
            self.model = model;
        }

        if let Some(max_tokens) = file.max_tokens {
            self.max_tokens = max_tokens;
        }

        if let Some(google) = file.google {
            if let Some(path) = google.credentials_path {
                self.google.credentials_path = path;
            }
            if let Some(path) = google.token_path {
                self.google.token_path = path;
            }
        }

        if let Some(defaults) = file.defaults {
            let d = &mut self.defaults;
            if let Some(v) = defaults.style {
                d.style = v;
            }
            if let Some(v) = defaults.audience {
                d.audience = v;
            }
            if let Some(v) = defaults.output_type {
                d.output_type = v;
            }
            if let Some(v) = defaults.size {
                d.size = v;
            }
            if let Some(v) = defaults.output_location {
                d.output_location = v;
            }
        }

        if let Some(endpoints) = file.endpoints {
            self.endpoints = endpoints;
        }

        if let Some(logging) = file.logging {
            if let Some(level) = logging.level {
                self.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                self.no_color = !color;
            }
        }

        self
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// Command-line flags take precedence over the file and environment.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        workspace: Option<PathBuf>,
        config_file: Option<PathBuf>,
        model: Option<String>,
        max_tokens: Option<u32>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(workspace) = workspace {
            self.workspace = workspace;
        }

        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }

        if let Some(model) = model {
            self.model = model;
        }

        if let Some(max_tokens) = max_tokens {
            self.max_tokens = max_tokens;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Path to the `.docgen` directory.
    pub fn docgen_dir(&self) -> PathBuf {
        self.workspace.join(".docgen")
    }

    /// Resolve a possibly relative path against the workspace.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workspace.join(path)
        }
    }

    /// Absolute location of the OAuth client secret.
    pub fn credentials_path(&self) -> PathBuf {
        self.resolve_path(&self.google.credentials_path)
    }

    /// Absolute location of the OAuth token cache.
    pub fn token_path(&self) -> PathBuf {
        self.resolve_path(&self.google.token_path)
    }

    /// Validate values that cannot be checked by the type system.
    ///
    /// Whether the model key exists is checked by the model registry.
    pub fn validate(&self) -> AppResult<()> {
        if self.model.trim().is_empty() {
            return Err(AppError::Config("Model key cannot be empty".to_string()));
        }

        if self.max_tokens == 0 {
            return Err(AppError::Config(
                "maxTokens must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.model, "claude-3-5-sonnet");
        assert_eq!(config.max_tokens, 16000);
        assert_eq!(config.defaults.output_type, "blog post");
        assert_eq!(config.defaults.size, "2-3 pages");
        assert!(!config.verbose);
        assert!(!config.no_color);
    }

    #[test]
    fn test_with_overrides() {
        let config = AppConfig::default();
        let overridden = config.with_overrides(
            None,
            None,
            Some("gpt-4o".to_string()),
            Some(4000),
            None,
            true,
            false,
        );

        assert_eq!(overridden.model, "gpt-4o");
        assert_eq!(overridden.max_tokens, 4000);
        assert!(overridden.verbose);
        assert_eq!(overridden.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_merge_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        std::fs::write(
            &path,
            r#"
model: gemini-1.5-flash
maxTokens: 2048
google:
  tokenPath: cache/token.json
defaults:
  audience: site reliability engineers
endpoints:
  openai: http://localhost:9999
logging:
  level: info
  color: false
"#,
        )
        .unwrap();

        let mut base = AppConfig::default();
        base.workspace = temp_dir.path().to_path_buf();
        let merged = base.merge_yaml(&path).unwrap();

        assert_eq!(merged.model, "gemini-1.5-flash");
        assert_eq!(merged.max_tokens, 2048);
        assert_eq!(merged.defaults.audience, "site reliability engineers");
        assert_eq!(merged.defaults.size, "2-3 pages");
        assert_eq!(merged.endpoints.openai.as_deref(), Some("http://localhost:9999"));
        assert_eq!(merged.log_level.as_deref(), Some("info"));
        assert!(merged.no_color);
        assert_eq!(
            merged.token_path(),
            temp_dir.path().join("cache/token.json")
        );
        assert_eq!(
            merged.credentials_path(),
            temp_dir.path().join("credentials.json")
        );
    }

    #[test]
    fn test_merge_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        std::fs::write(&path, "maxTokens: [not, a, number]").unwrap();

        let result = AppConfig::default().merge_yaml(&path);
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_validate() {
        let mut config = AppConfig::default();
        assert!(config.validate().is_ok());

        config.max_tokens = 0;
        assert!(config.validate().is_err());

        config.max_tokens = 10;
        config.model = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_with_explicit_workspace() {
        let temp_dir = TempDir::new().unwrap();
        let docgen_dir = temp_dir.path().join(".docgen");
        std::fs::create_dir_all(&docgen_dir).unwrap();
        std::fs::write(
            docgen_dir.join("config.yaml"),
            "defaults:\n  size: 500 words\n",
        )
        .unwrap();

        let config = AppConfig::load_with(Some(temp_dir.path().to_path_buf()), None).unwrap();
        assert_eq!(config.workspace, temp_dir.path());
        assert_eq!(config.defaults.size, "500 words");
    }

    #[test]
    fn test_load_with_missing_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = AppConfig::load_with(
            Some(temp_dir.path().to_path_buf()),
            Some(temp_dir.path().join("absent.yaml")),
        );
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
