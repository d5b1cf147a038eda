pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "code-tagger")]
#[command(about = "A small pattern tagging tool for source code")]
pub struct CliConfig {
    /// 要掃描的檔案或目錄
    #[arg(long, value_delimiter = ',', default_value = ".")]
    pub paths: Vec<String>,

    /// 要掃描的遠端原始檔 URL
    #[arg(long, value_delimiter = ',')]
    pub urls: Vec<String>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, value_delimiter = ',', default_value = "py,js,ts,rs,go,java,rb")]
    pub extensions: Vec<String>,

    /// 檔案標籤數達到此值就列入熱點
    #[arg(long, default_value = "5")]
    pub hotspot_threshold: usize,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Enable system monitoring")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn scan_paths(&self) -> &[String] {
        &self.paths
    }

    fn remote_sources(&self) -> &[String] {
        &self.urls
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn extensions(&self) -> &[String] {
        &self.extensions
    }

    fn hotspot_threshold(&self) -> usize {
        self.hotspot_threshold
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_positive_number("hotspot_threshold", self.hotspot_threshold, 1)?;

        for path in &self.paths {
            validation::validate_path("paths", path)?;
        }

        for source_url in &self.urls {
            validation::validate_url("urls", source_url)?;
        }

        for extension in &self.extensions {
            validation::validate_non_empty_string("extensions", extension)?;
        }

        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    fn base_config() -> CliConfig {
        CliConfig {
            paths: vec![".".to_string()],
            urls: vec![],
            output_path: "./output".to_string(),
            extensions: vec!["py".to_string()],
            hotspot_threshold: 5,
            verbose: false,
            monitor: false,
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_zero_threshold_fails() {
        let mut config = base_config();
        config.hotspot_threshold = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_url_fails() {
        let mut config = base_config();
        config.urls = vec!["ftp://example.com/file.py".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_extension_fails() {
        let mut config = base_config();
        config.extensions = vec!["  ".to_string()];
        assert!(config.validate().is_err());
    }
}
