use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use core_config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Invalid input: {0}")]
    Validation(String),

    /// A dependency credential is missing; the query itself may be fine.
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Vector store error: {0}")]
    VectorStore(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type SearchResult<T> = Result<T, SearchError>;

impl SearchError {
    /// Label used for the `search_requests_total` outcome metric.
    pub fn outcome(&self) -> &'static str {
        match self {
            SearchError::Validation(_) => "invalid",
            SearchError::ServiceUnavailable(_) => "unavailable",
            _ => "failed",
        }
    }
}

impl From<ConfigError> for SearchError {
    fn from(err: ConfigError) -> Self {
        SearchError::Config(err.to_string())
    }
}

/// Convert SearchError to AppError for standardized HTTP error responses
impl From<SearchError> for AppError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::Validation(msg) => AppError::UnprocessableEntity(msg),
            SearchError::ServiceUnavailable(msg) => AppError::ServiceUnavailable(msg),
            SearchError::Embedding(message) => AppError::Upstream {
                service: "embedding".to_string(),
                message,
            },
            SearchError::VectorStore(message) => AppError::Upstream {
                service: "vector_store".to_string(),
                message,
            },
            SearchError::Config(msg) => {
                AppError::InternalServerError(format!("Config error: {}", msg))
            }
        }
    }
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (SearchError::Validation("top_k".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (
                SearchError::ServiceUnavailable("COHERE_API_KEY not set".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (SearchError::Embedding("timeout".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (SearchError::VectorStore("502".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (SearchError::Config("bad".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(SearchError::Validation(String::new()).outcome(), "invalid");
        assert_eq!(SearchError::ServiceUnavailable(String::new()).outcome(), "unavailable");
        assert_eq!(SearchError::Embedding(String::new()).outcome(), "failed");
    }
}
