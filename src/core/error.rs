use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};

/// Application-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Main application error type
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// No price candidate survives filtering for the requested context
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed engine input, rejected before resolution is attempted
    #[error("Invalid context: {0}")]
    InvalidContext(String),

    /// Malformed request payloads at the adapter boundary
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Catalog file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML catalog parse errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl AppError {
    /// Stable machine-readable code for the error body
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "PRICE_NOT_FOUND",
            AppError::InvalidContext(_) => "INVALID_CONTEXT",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Io(_) | AppError::Json(_) | AppError::Yaml(_) => "INTERNAL_ERROR",
        }
    }

    /// Business-data outcomes are distinguished from operational failures
    pub fn is_operational(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();

        if self.is_operational() {
            tracing::error!(code = self.code(), "{}", self);
        }

        HttpResponse::build(status_code).json(serde_json::json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
            }
        }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidContext(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Yaml(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Helper functions for common error scenarios
impl AppError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        AppError::NotFound(resource.into())
    }

    pub fn invalid_context(msg: impl Into<String>) -> Self {
        AppError::InvalidContext(msg.into())
    }

    /// Decimal arithmetic left the representable range
    pub fn amount_overflow(step: &str) -> Self {
        AppError::InvalidContext(format!("Amount overflow while computing {}", step))
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }
}
