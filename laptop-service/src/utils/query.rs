use axum::async_trait;
use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use service_core::error::AppError;

pub const INVALID_QUERY_MESSAGE: &str = "invalid query string";

/// `Query` whose rejection goes through `AppError`, so a malformed query
/// string (e.g. a repeated key) gets the usual JSON envelope instead of
/// axum's plain-text body.
#[derive(Debug, Clone, Default)]
pub struct StrictQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for StrictQuery<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Rejected query string");
                AppError::BadRequest(anyhow::anyhow!(INVALID_QUERY_MESSAGE))
            })?;

        Ok(StrictQuery(value))
    }
}
