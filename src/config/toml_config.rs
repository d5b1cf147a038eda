use crate::core::ConfigProvider;
use crate::domain::model::Category;
use crate::utils::error::{Result, TagError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub profile: ProfileConfig,
    pub source: SourceConfig,
    pub rules: Option<RulesConfig>,
    pub load: LoadConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub name: String,
    pub description: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub paths: Option<Vec<String>>,
    pub urls: Option<Vec<String>>,
    pub extensions: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesConfig {
    /// 啟用的分類標籤（例如 "Network Call"），省略表示全部
    pub categories: Option<Vec<String>>,
    pub hotspot_threshold: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    pub output_formats: Vec<String>,
    pub compression: Option<CompressionConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionConfig {
    pub enabled: bool,
    pub filename: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_format: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入掃描設定檔
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(TagError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析設定檔
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| TagError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SCAN_ROOT})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證設定檔的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("load.output_path", &self.load.output_path)?;

        if let Some(urls) = &self.source.urls {
            for source_url in urls {
                validation::validate_url("source.urls", source_url)?;
            }
        }

        if let Some(paths) = &self.source.paths {
            for path in paths {
                validation::validate_path("source.paths", path)?;
            }
        }

        if let Some(extensions) = &self.source.extensions {
            for extension in extensions {
                validation::validate_non_empty_string("source.extensions", extension)?;
            }
        }

        if let Some(rules) = &self.rules {
            if let Some(threshold) = rules.hotspot_threshold {
                validation::validate_positive_number("rules.hotspot_threshold", threshold, 1)?;
            }

            if let Some(categories) = &rules.categories {
                for label in categories {
                    validation::validate_category_label("rules.categories", label)?;
                }
            }
        }

        let valid_formats = ["csv", "tsv", "json"];
        for format in &self.load.output_formats {
            if !valid_formats.contains(&format.as_str()) {
                return Err(TagError::InvalidConfigValueError {
                    field: "load.output_formats".to_string(),
                    value: format.clone(),
                    reason: format!(
                        "Unsupported format. Valid formats: {}",
                        valid_formats.join(", ")
                    ),
                });
            }
        }

        Ok(())
    }

    /// 啟用的分類，None 表示使用全部內建規則
    pub fn enabled_categories(&self) -> Result<Option<Vec<Category>>> {
        let labels = match self.rules.as_ref().and_then(|r| r.categories.as_ref()) {
            Some(labels) => labels,
            None => return Ok(None),
        };

        let mut categories = Vec::with_capacity(labels.len());
        for label in labels {
            categories.push(validation::validate_category_label(
                "rules.categories",
                label,
            )?);
        }

        Ok(Some(categories))
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    /// 是否以 JSON 格式輸出日誌
    pub fn json_logs(&self) -> bool {
        self.monitoring
            .as_ref()
            .and_then(|m| m.log_format.as_deref())
            .map(|f| f == "json")
            .unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn scan_paths(&self) -> &[String] {
        self.source.paths.as_deref().unwrap_or(&[])
    }

    fn remote_sources(&self) -> &[String] {
        self.source.urls.as_deref().unwrap_or(&[])
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn extensions(&self) -> &[String] {
        self.source.extensions.as_deref().unwrap_or(&[])
    }

    fn hotspot_threshold(&self) -> usize {
        self.rules
            .as_ref()
            .and_then(|r| r.hotspot_threshold)
            .unwrap_or(5)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
