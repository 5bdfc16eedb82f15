use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use validator::ValidationErrors;

pub type Result<T> = core::result::Result<T, AppError>;

const TRY_AGAIN: &str = "Something went wrong on our end, please try again.";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("invalid {field}: {message}")]
    Invalid { field: String, message: String },
    #[error("{0} not found")]
    NotFound(String),
    #[error("{code}: vendor call failed: {detail}")]
    Vendor { code: &'static str, detail: String },
    #[error("{code}: unexpected vendor response: {detail}")]
    Malformed { code: &'static str, detail: String },
    #[error(transparent)]
    Db(#[from] sqlx::Error),
    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] config::ConfigError),
}

impl AppError {
    pub fn invalid(field: &str, message: &str) -> Self {
        AppError::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn vendor(code: &'static str, detail: impl ToString) -> Self {
        AppError::Vendor {
            code,
            detail: detail.to_string(),
        }
    }

    pub fn malformed(code: &'static str, detail: impl ToString) -> Self {
        AppError::Malformed {
            code,
            detail: detail.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Invalid { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Invalid { .. } => "ERR-INPUT-400",
            AppError::NotFound(_) => "ERR-NOTFOUND-404",
            AppError::Vendor { code, .. } | AppError::Malformed { code, .. } => code,
            AppError::Db(_) | AppError::Migrate(_) => "ERR-DB-500",
            AppError::Http(_) => "ERR-HTTP-500",
            AppError::Json(_) => "ERR-JSON-500",
            AppError::Io(_) => "ERR-IO-500",
            AppError::Config(_) => "ERR-CONF-500",
        }
    }

    /// Message safe to show to the visitor. Vendor detail never ends up here.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Invalid { field, message } => format!("{}: {}", field, message),
            AppError::NotFound(what) => format!("{} not found", what),
            _ => TRY_AGAIN.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("request failed: {}", &self);
        } else {
            tracing::debug!("request rejected: {}", &self);
        }
        let field = match &self {
            AppError::Invalid { field, .. } => Some(field.clone()),
            _ => None,
        };
        let body = json!({
            "success": false,
            "error": self.public_message(),
            "code": self.code(),
            "field": field,
        });
        (status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<(String, String)> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let message = errs
                    .iter()
                    .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| "is invalid".to_string());
                (field.to_string(), message)
            })
            .collect();
        fields.sort();
        match fields.into_iter().next() {
            Some((field, message)) => AppError::Invalid { field, message },
            None => AppError::invalid("body", "is invalid"),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("json rejected: {}", rejection.body_text());
        AppError::invalid("body", "must be a valid JSON object")
    }
}
