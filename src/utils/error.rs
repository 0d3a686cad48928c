use thiserror::Error;

#[derive(Error, Debug)]
pub enum PhonebookError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unknown search criterion: '{criterion}'")]
    UnknownCriterion { criterion: String },

    #[error("Invalid selection: {input}")]
    InvalidSelection { input: String },

    #[error("Index {index} is out of range for a directory of {len} entries")]
    IndexOutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PhonebookError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            PhonebookError::UnknownCriterion { .. } | PhonebookError::InvalidSelection { .. } => {
                ErrorSeverity::Low
            }
            PhonebookError::IndexOutOfRange { .. } => ErrorSeverity::Medium,
            PhonebookError::ConfigError { .. }
            | PhonebookError::InvalidConfigValueError { .. }
            | PhonebookError::TomlError(_) => ErrorSeverity::High,
            PhonebookError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PhonebookError::IoError(e) => format!("Could not read or write the terminal/file: {}", e),
            PhonebookError::TomlError(_) => "The configuration file is not valid TOML".to_string(),
            PhonebookError::ConfigError { message } => format!("Configuration problem: {}", message),
            PhonebookError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            PhonebookError::UnknownCriterion { .. } => {
                "Invalid criteria. Please enter 'name', 'address', or 'phoneNumber'.".to_string()
            }
            PhonebookError::InvalidSelection { .. } => "Invalid selection.".to_string(),
            PhonebookError::IndexOutOfRange { index, .. } => {
                format!("There is no contact at position {}", index)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PhonebookError::IoError(_) => "Check that the file exists and is readable",
            PhonebookError::TomlError(_) => "Fix the TOML syntax in the configuration file",
            PhonebookError::ConfigError { .. } | PhonebookError::InvalidConfigValueError { .. } => {
                "Review the configuration values and try again"
            }
            PhonebookError::UnknownCriterion { .. } => "Use one of: name, address, phoneNumber",
            PhonebookError::InvalidSelection { .. } => "Enter one of the numbers shown in the list",
            PhonebookError::IndexOutOfRange { .. } => "List the contacts to see valid positions",
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, PhonebookError>;
