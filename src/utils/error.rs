use thiserror::Error;

#[derive(Error, Debug)]
pub enum PosError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Invalid Eircode '{input}': {reason}")]
    InvalidEircode { input: String, reason: String },

    #[error("Invalid coordinate '{value}' returned by {provider}")]
    InvalidCoordinate { provider: String, value: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    Validation,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PosError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PosError::HttpError(e) if e.is_decode() => ErrorCategory::Data,
            PosError::HttpError(_) | PosError::UnexpectedStatus { .. } => ErrorCategory::Network,
            PosError::SerializationError(_) | PosError::InvalidCoordinate { .. } => {
                ErrorCategory::Data
            }
            PosError::UrlError(_)
            | PosError::ConfigError { .. }
            | PosError::ConfigValidationError { .. }
            | PosError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            PosError::InvalidEircode { .. } => ErrorCategory::Validation,
            PosError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 連線層級的失敗（連不上、逾時、非 2xx），可以交給下一個來源處理
    pub fn is_transport(&self) -> bool {
        match self {
            PosError::HttpError(e) => !e.is_decode(),
            PosError::UnexpectedStatus { .. } => true,
            _ => false,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            PosError::HttpError(e) if e.is_timeout() => {
                "The remote service timed out; check the network or raise backend.timeout_seconds".to_string()
            }
            PosError::HttpError(e) if e.is_decode() => {
                "The remote service answered with an unexpected payload; check the API version".to_string()
            }
            PosError::HttpError(_) => {
                "Check that the backend is running and API_URL points at it".to_string()
            }
            PosError::UnexpectedStatus { status, .. } if *status == 401 || *status == 403 => {
                "The service rejected the request; check credentials and permissions".to_string()
            }
            PosError::UnexpectedStatus { .. } => {
                "Retry later or inspect the backend logs".to_string()
            }
            PosError::InvalidEircode { .. } => {
                "Enter an Eircode like A92 D65P or type the address manually".to_string()
            }
            PosError::InvalidCoordinate { .. } | PosError::SerializationError(_) => {
                "Enter the address manually".to_string()
            }
            PosError::UrlError(_) => "Use an absolute http:// or https:// URL".to_string(),
            PosError::ConfigError { .. }
            | PosError::ConfigValidationError { .. }
            | PosError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or the command-line overrides".to_string()
            }
            PosError::IoError(_) => "Check file paths and permissions".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PosError::HttpError(_) | PosError::UnexpectedStatus { .. } => {
                format!("Could not reach the service: {}", self)
            }
            PosError::InvalidEircode { reason, .. } => reason.clone(),
            PosError::ConfigError { message } => format!("Configuration problem: {}", message),
            PosError::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            PosError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration problem in '{}': {}", field, reason)
            }
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PosError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_eircode_is_low_severity_validation() {
        let err = PosError::InvalidEircode {
            input: "123".to_string(),
            reason: "Invalid Eircode format '123'. Expected a code like A92 D65P.".to_string(),
        };

        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert!(!err.is_transport());
        assert!(err.user_friendly_message().contains("A92 D65P"));
    }

    #[test]
    fn test_unexpected_status_is_transport() {
        let err = PosError::UnexpectedStatus {
            status: 503,
            url: "http://localhost/search".to_string(),
        };

        assert!(err.is_transport());
        assert_eq!(err.category(), ErrorCategory::Network);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
    }

    #[test]
    fn test_config_errors_are_high_severity() {
        let err = PosError::InvalidConfigValueError {
            field: "backend.api_url".to_string(),
            value: "ftp://x".to_string(),
            reason: "Unsupported URL scheme: ftp".to_string(),
        };

        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.user_friendly_message().contains("backend.api_url"));
    }
}
