//! Query-string extractor with automatic validation using the validator crate.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Query extractor with automatic validation.
///
/// Deserializes the query string with [`axum::extract::Query`] and then runs
/// the `validator` rules. Both a missing/unparseable parameter and a rule
/// violation are rejected with `422 Unprocessable Entity`.
///
/// # Example
/// ```ignore
/// use axum::{Router, routing::get};
/// use axum_helpers::ValidatedQuery;
/// use serde::Deserialize;
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct Paging {
///     #[validate(range(min = 1, max = 50))]
///     top_k: u32,
/// }
///
/// async fn list(ValidatedQuery(paging): ValidatedQuery<Paging>) -> String {
///     format!("top_k = {}", paging.top_k)
/// }
///
/// let app = Router::new().route("/list", get(list));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        value.validate()?;
        Ok(ValidatedQuery(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::{Request, StatusCode}, routing::get};
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Debug, Deserialize, Validate)]
    struct Paging {
        q: String,
        #[validate(range(min = 1, max = 50))]
        #[serde(default = "default_top_k")]
        top_k: u32,
    }

    fn default_top_k() -> u32 {
        5
    }

    async fn echo(ValidatedQuery(paging): ValidatedQuery<Paging>) -> String {
        format!("{}:{}", paging.q, paging.top_k)
    }

    async fn status_for(uri: &str) -> StatusCode {
        let app = Router::new().route("/", get(echo));
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        response.status()
    }

    #[tokio::test]
    async fn test_valid_query_passes() {
        assert_eq!(status_for("/?q=attention&top_k=7").await, StatusCode::OK);
        assert_eq!(status_for("/?q=attention").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_field_is_422() {
        assert_eq!(status_for("/?top_k=7").await, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_unparseable_field_is_422() {
        assert_eq!(
            status_for("/?q=x&top_k=many").await,
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[tokio::test]
    async fn test_out_of_range_is_422() {
        assert_eq!(status_for("/?q=x&top_k=0").await, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(status_for("/?q=x&top_k=51").await, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
