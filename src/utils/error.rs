use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Authentication error: {message}")]
    AuthError { message: String },

    #[error("{endpoint} returned HTTP {status}: {body}")]
    HttpStatusError {
        endpoint: String,
        status: u16,
        body: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Authentication,
    Network,
    Storage,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code for a run that failed with this severity.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl EtlError {
    pub fn auth(message: impl Into<String>) -> Self {
        EtlError::AuthError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ApiError(_) | EtlError::HttpStatusError { .. } => ErrorCategory::Network,
            EtlError::IoError(_) => ErrorCategory::Storage,
            EtlError::SerializationError(_) => ErrorCategory::Data,
            EtlError::YamlError(_)
            | EtlError::ConfigError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            EtlError::AuthError { .. } => ErrorCategory::Authentication,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Storage => ErrorSeverity::Critical,
            ErrorCategory::Configuration | ErrorCategory::Authentication | ErrorCategory::Data => {
                ErrorSeverity::High
            }
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.severity().exit_code()
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::MissingConfigError { .. } => {
                "Set STRAVA_CLIENT_ID, STRAVA_CLIENT_SECRET and TRMNL_PLUGIN_UUID (a .env file works too)"
            }
            EtlError::InvalidConfigValueError { .. } | EtlError::ConfigError { .. } => {
                "Check the command-line flags and environment variables"
            }
            EtlError::YamlError(_) => {
                "goals.yml must contain numeric `weekly` and `yearly` keys in kilometres"
            }
            EtlError::AuthError { .. } => {
                "Delete .strava-credentials and run locally once to re-authorize"
            }
            EtlError::HttpStatusError { status: 401, .. }
            | EtlError::HttpStatusError { status: 403, .. } => {
                "The access token was rejected; delete .strava-credentials and re-authorize"
            }
            EtlError::HttpStatusError { .. } | EtlError::ApiError(_) => {
                "Check network connectivity and the service status, then run again"
            }
            EtlError::IoError(_) => "Check file permissions in the working directory",
            EtlError::SerializationError(_) => {
                "The remote response had an unexpected shape; run with --verbose for details"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Authentication => format!("Strava authorization failed: {}", self),
            ErrorCategory::Network => format!("Remote call failed: {}", self),
            ErrorCategory::Storage => format!("Local file access failed: {}", self),
            ErrorCategory::Data => format!("Unexpected data: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
