//! JSON body extractor that reports malformed or invalid bodies as
//! validation errors.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

use notehub_core::error::AppError;

use crate::error::ApiError;

/// A deserialized body that also passed its `validator` rules.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::validation(rejection.body_text()))?;

        value.validate().map_err(|errors| {
            let message = errors
                .field_errors()
                .values()
                .flat_map(|errs| errs.iter())
                .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| "Invalid request body".to_string());
            let err = AppError::validation(message);
            match serde_json::to_value(&errors) {
                Ok(details) => err.with_details(details),
                Err(_) => err,
            }
        })?;

        Ok(ValidatedJson(value))
    }
}
