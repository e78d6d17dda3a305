#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::core::report::ReportFormat;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};

pub const DEFAULT_DOCS_ROOT: &str = "docs";
pub const DEFAULT_EXCLUDE_PREFIX: &str = "_";

/// Effective settings after merging the TOML file and command line flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub docs_root: String,
    pub exclude_prefix: String,
    pub format: ReportFormat,
    pub service: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            docs_root: DEFAULT_DOCS_ROOT.to_string(),
            exclude_prefix: DEFAULT_EXCLUDE_PREFIX.to_string(),
            format: ReportFormat::Text,
            service: None,
        }
    }
}

impl Settings {
    pub fn from_toml(file: &TomlConfig) -> Self {
        let defaults = Settings::default();
        Self {
            docs_root: file.docs.root.clone().unwrap_or(defaults.docs_root),
            exclude_prefix: file
                .docs
                .exclude_prefix
                .clone()
                .unwrap_or(defaults.exclude_prefix),
            format: file.report.format.unwrap_or(defaults.format),
            service: None,
        }
    }

    /// 命令列參數覆蓋 TOML 設定
    #[cfg(feature = "cli")]
    pub fn from_cli(cli: &CliConfig) -> Result<Self> {
        let mut settings = match &cli.config {
            Some(path) => {
                tracing::info!("Loading configuration from: {}", path);
                let file = TomlConfig::from_file(path)?;
                file.validate()?;
                Settings::from_toml(&file)
            }
            None => Settings::default(),
        };

        if let Some(docs_dir) = &cli.docs_dir {
            settings.docs_root = docs_dir.clone();
        }
        if let Some(format) = cli.format {
            settings.format = format;
        }
        settings.service = cli.service.clone();
        Ok(settings)
    }
}

impl ConfigProvider for Settings {
    fn docs_root(&self) -> &str {
        &self.docs_root
    }

    fn exclude_prefix(&self) -> &str {
        &self.exclude_prefix
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_path("docs_root", &self.docs_root)?;
        validate_non_empty_string("exclude_prefix", &self.exclude_prefix)?;
        if let Some(service) = &self.service {
            validate_non_empty_string("service", service)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let settings = Settings::default();
        assert_eq!(settings.docs_root, "docs");
        assert_eq!(settings.exclude_prefix, "_");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_from_toml_fills_missing_values() {
        let file = TomlConfig::from_toml_str("[report]\nformat = \"json\"\n").unwrap();
        let settings = Settings::from_toml(&file);
        assert_eq!(settings.docs_root, "docs");
        assert_eq!(settings.format, ReportFormat::Json);
    }

    #[test]
    fn test_empty_service_is_invalid() {
        let settings = Settings {
            service: Some(" ".to_string()),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_overrides_toml() {
        use clap::Parser;
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[docs]\nroot = \"from-file\"\nexclude_prefix = \".\"\n[report]\nformat = \"json\"\n")
            .unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let cli = CliConfig::try_parse_from([
            "validate-docs",
            "--config",
            path.as_str(),
            "--docs-dir",
            "from-cli",
            "-s",
            "billing",
        ])
        .unwrap();
        let settings = Settings::from_cli(&cli).unwrap();

        assert_eq!(settings.docs_root, "from-cli");
        assert_eq!(settings.exclude_prefix, ".");
        assert_eq!(settings.format, ReportFormat::Json);
        assert_eq!(settings.service.as_deref(), Some("billing"));
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_missing_config_file_is_fatal() {
        let cli = CliConfig {
            config: Some("/definitely/not/here.toml".to_string()),
            ..CliConfig::default()
        };
        assert!(Settings::from_cli(&cli).is_err());
    }
}
