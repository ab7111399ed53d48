//! Request extractors that reject with [`AppError`].

use axum::Json;
use axum::extract::{FromRequest, Request};
use logicpeak_core::schema::Validate;
use serde_json::Value;

use crate::error::AppError;

/// JSON body validated against a record schema before the handler runs.
///
/// Unparsable bodies and schema failures both reject with
/// [`AppError::Validation`], so handlers only ever see valid records.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: Validate + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
        Ok(Self(T::validate(&value)?))
    }
}
