use crate::error::{Error, Result};
use crate::model::IntelligenceLayer;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "geointel.toml";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub model: ModelConfig,
    pub dataset: DatasetConfig,
    pub display: DisplayConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

/// Generative model settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub enabled: bool,
    pub model: String,
    pub api_url: String,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Dataset source
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// JSON dataset replacing the built-in table
    pub path: Option<PathBuf>,
}

/// Initial view state
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub layers: Vec<IntelligenceLayer>,
    pub search: String,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub directory: PathBuf,
    /// Directory holding a `briefing.html.tera` that replaces the built-in page
    pub templates: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    #[default]
    Geojson,
    Markdown,
    Html,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "geojson" => Some(OutputFormat::Geojson),
            "markdown" | "md" => Some(OutputFormat::Markdown),
            "html" => Some(OutputFormat::Html),
            _ => None,
        }
    }

    /// File written by an export in this format
    pub fn file_name(&self) -> &'static str {
        match self {
            OutputFormat::Json => "briefing.json",
            OutputFormat::Geojson => "features.geojson",
            OutputFormat::Markdown => "BRIEFING.md",
            OutputFormat::Html => "briefing.html",
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model: "gemini-3-flash-preview".to_string(),
            api_url: "https://generativelanguage.googleapis.com".to_string(),
            api_key: None,
            timeout_secs: None,
        }
    }
}

impl ModelConfig {
    /// API key from config, then `GEMINI_API_KEY`, then `API_KEY`
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .or_else(|| std::env::var("API_KEY").ok())
            .filter(|k| !k.is_empty())
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            layers: vec![
                IntelligenceLayer::Fronts,
                IntelligenceLayer::Routes,
                IntelligenceLayer::Infrastructure,
            ],
            search: String::new(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            directory: PathBuf::from("./geointel-out"),
            templates: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Merge CLI arguments into config (CLI takes precedence)
    pub fn merge_cli(
        &mut self,
        output: Option<PathBuf>,
        format: Option<String>,
        dataset: Option<PathBuf>,
        offline: bool,
    ) {
        if let Some(out) = output {
            self.output.directory = out;
        }

        if let Some(fmt) = format {
            if let Some(parsed) = OutputFormat::parse(&fmt) {
                self.output.format = parsed;
            }
        }

        if let Some(path) = dataset {
            self.dataset.path = Some(path);
        }

        if offline {
            self.model.enabled = false;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.model.model.trim().is_empty() {
            return Err(Error::config_validation("model name must not be empty"));
        }

        if !(self.model.api_url.starts_with("http://") || self.model.api_url.starts_with("https://"))
        {
            return Err(Error::config_validation(format!(
                "api_url must be an http(s) URL, got '{}'",
                self.model.api_url
            )));
        }

        if self.model.timeout_secs == Some(0) {
            return Err(Error::config_validation("timeout_secs must be at least 1"));
        }

        crate::logging::parse_level(&self.logging.level)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.model.enabled);
        assert_eq!(config.model.model, "gemini-3-flash-preview");
        assert_eq!(config.output.format, OutputFormat::Geojson);
        assert_eq!(config.display.layers.len(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_valid_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[model]
enabled = false
model = "gemini-2.5-pro"
timeout_secs = 20

[display]
layers = ["fronts", "sdrga"]
search = "nariño"

[output]
format = "markdown"

[logging]
level = "debug"
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert!(!config.model.enabled);
        assert_eq!(config.model.model, "gemini-2.5-pro");
        assert_eq!(config.model.timeout_secs, Some(20));
        assert_eq!(
            config.display.layers,
            vec![IntelligenceLayer::Fronts, IntelligenceLayer::Sdrga]
        );
        assert_eq!(config.display.search, "nariño");
        assert_eq!(config.output.format, OutputFormat::Markdown);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load(Path::new("/nonexistent/geointel.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_unknown_layer_fails() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[display]\nlayers = [\"borders\"]").unwrap();
        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn test_validation_empty_model() {
        let mut config = Config::default();
        config.model.model = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_bad_url() {
        let mut config = Config::default();
        config.model.api_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let mut config = Config::default();
        config.model.timeout_secs = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_bad_log_level() {
        let mut config = Config::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_merge_cli_output() {
        let mut config = Config::default();
        config.merge_cli(Some(PathBuf::from("/custom/output")), None, None, false);
        assert_eq!(config.output.directory, PathBuf::from("/custom/output"));
    }

    #[test]
    fn test_merge_cli_format() {
        let mut config = Config::default();
        config.merge_cli(None, Some("md".to_string()), None, false);
        assert_eq!(config.output.format, OutputFormat::Markdown);
    }

    #[test]
    fn test_merge_cli_unknown_format_keeps_config() {
        let mut config = Config::default();
        config.merge_cli(None, Some("pdf".to_string()), None, false);
        assert_eq!(config.output.format, OutputFormat::Geojson);
    }

    #[test]
    fn test_merge_cli_offline() {
        let mut config = Config::default();
        config.merge_cli(None, None, Some(PathBuf::from("intel.json")), true);
        assert!(!config.model.enabled);
        assert_eq!(config.dataset.path, Some(PathBuf::from("intel.json")));
    }

    #[test]
    fn test_configured_api_key_wins() {
        let mut config = ModelConfig::default();
        config.api_key = Some("from-config".to_string());
        assert_eq!(config.resolve_api_key(), Some("from-config".to_string()));
    }

    #[test]
    fn test_output_format_parsing() {
        let toml_str = r#"format = "html""#;
        let output: OutputConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(output.format, OutputFormat::Html);
        assert_eq!(output.format.file_name(), "briefing.html");
        assert!(output.templates.is_none());
    }

    #[test]
    fn test_output_templates_dir() {
        let toml_str = "format = \"html\"\ntemplates = \"./theme\"";
        let output: OutputConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(output.templates, Some(PathBuf::from("./theme")));
    }
}
