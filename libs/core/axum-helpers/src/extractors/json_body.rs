//! JSON extractor that reports every malformed body as `400 Bad Request`.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request, rejection::JsonRejection};
use serde::de::DeserializeOwned;

/// JSON body extractor with a uniform client-error contract.
///
/// Axum's own `Json` answers 400, 415 or 422 depending on what went wrong.
/// `JsonBody` folds all of those into [`AppError::InvalidJson`], so a syntax
/// error, a missing field, a mistyped field or a missing `Content-Type`
/// header all yield `400` with the standard error body, and the handler is
/// never invoked.
///
/// ```ignore
/// async fn create(JsonBody(cmd): JsonBody<CollectionCommand>) -> StatusCode {
///     StatusCode::CREATED
/// }
/// ```
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(rejection_to_error(rejection)),
        }
    }
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    AppError::InvalidJson(rejection.body_text())
}
