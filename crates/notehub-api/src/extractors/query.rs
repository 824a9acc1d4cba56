//! Query-string extraction with JSON error bodies, and the `?id=`
//! parameter shared by the file and folder endpoints.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use notehub_core::error::AppError;
use notehub_core::result::AppResult;

use crate::error::ApiError;

/// Deserialized query string; a rejection becomes a validation error.
#[derive(Debug, Clone)]
pub struct ValidatedQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::validation(rejection.body_text()))?;
        Ok(ValidatedQuery(value))
    }
}

/// Parses a UUID from a request parameter.
pub fn parse_uuid(s: &str) -> AppResult<Uuid> {
    Uuid::parse_str(s).map_err(|_| AppError::validation(format!("Invalid id: {s}")))
}

/// `?id=<uuid>`, kept as text so a malformed id becomes a JSON error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdQuery {
    /// Raw id value.
    pub id: Option<String>,
}

impl IdQuery {
    /// The id, when one was given.
    pub fn optional(&self) -> AppResult<Option<Uuid>> {
        self.id
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(parse_uuid)
            .transpose()
    }

    /// The id, failing when absent.
    pub fn required(&self) -> AppResult<Uuid> {
        self.optional()?
            .ok_or_else(|| AppError::validation("Missing id"))
    }
}
