use thiserror::Error;

#[derive(Error, Debug)]
pub enum TagError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("Remote source request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV output error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Rule '{name}' failed to compile: {source}")]
    RuleError {
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Scan processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Storage,
    Configuration,
    Processing,
}

impl TagError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            TagError::HttpError(_) => ErrorCategory::Network,
            TagError::IoError(_) | TagError::ZipError(_) => ErrorCategory::Storage,
            TagError::ConfigValidationError { .. }
            | TagError::InvalidConfigValueError { .. }
            | TagError::MissingConfigError { .. } => ErrorCategory::Configuration,
            TagError::CsvError(_)
            | TagError::SerializationError(_)
            | TagError::RuleError { .. }
            | TagError::ProcessingError { .. } => ErrorCategory::Processing,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 遠端來源失敗可以重試，本地掃描不受影響
            TagError::HttpError(_) => ErrorSeverity::Medium,
            TagError::ConfigValidationError { .. }
            | TagError::InvalidConfigValueError { .. }
            | TagError::MissingConfigError { .. } => ErrorSeverity::High,
            TagError::RuleError { .. } => ErrorSeverity::Critical,
            TagError::IoError(_) | TagError::ZipError(_) => ErrorSeverity::High,
            TagError::CsvError(_)
            | TagError::SerializationError(_)
            | TagError::ProcessingError { .. } => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            TagError::HttpError(_) => {
                "Check the remote source URL and your network connection, then retry".to_string()
            }
            TagError::IoError(_) => {
                "Check that the scan paths exist and the output path is writable".to_string()
            }
            TagError::ZipError(_) => {
                "Check free disk space and permissions on the output directory".to_string()
            }
            TagError::RuleError { name, .. } => {
                format!("Rule '{}' is built-in; please report this as a bug", name)
            }
            TagError::ConfigValidationError { field, .. }
            | TagError::InvalidConfigValueError { field, .. }
            | TagError::MissingConfigError { field } => {
                format!("Fix the '{}' setting and run again", field)
            }
            TagError::CsvError(_) | TagError::SerializationError(_) => {
                "Re-run with --verbose and inspect the offending input file".to_string()
            }
            TagError::ProcessingError { .. } => {
                "Re-run with --verbose to locate the failing scan phase".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not reach a remote source: {}", self),
            ErrorCategory::Storage => format!("File access problem: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Processing => format!("Scan failed: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, TagError>;
