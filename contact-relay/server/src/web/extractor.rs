use std::result::Result;

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    Json,
};

use crate::web::controller::Error;

/// JSON body extractor that turns axum's plain-text rejection into the JSON
/// error body every other failure uses.
///
/// Syntax errors, unknown field values and a missing `application/json`
/// content type answer `400`; a body over the size limit keeps its `413`.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: serde::de::DeserializeOwned,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(req, state).await.map(|Json(value)| Self(value)).map_err(
            |rejection: JsonRejection| Error::InvalidPayload {
                status: payload_status(rejection.status()),
                message: rejection.body_text(),
            },
        )
    }
}

#[inline]
fn payload_status(status: StatusCode) -> StatusCode {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        status
    } else {
        StatusCode::BAD_REQUEST
    }
}
