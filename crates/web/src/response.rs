use axum::{
    body,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// JSON body paired with the status code it is sent with.
#[derive(Clone, Debug)]
pub struct JsonResponse<T> {
    status_code: StatusCode,

    body: T,
}

impl<T> From<(StatusCode, T)> for JsonResponse<T> {
    #[inline]
    fn from((status_code, body): (StatusCode, T)) -> Self { Self { status_code, body } }
}

impl<T> From<(StatusCode, axum::Json<T>)> for JsonResponse<T> {
    #[inline]
    fn from((status_code, axum::Json(body)): (StatusCode, axum::Json<T>)) -> Self {
        Self { status_code, body }
    }
}

impl<T> JsonResponse<T> {
    #[inline]
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn ok(body: T) -> Self { Self { status_code: StatusCode::OK, body } }

    #[inline]
    #[must_use]
    pub const fn status_code(mut self, status_code: StatusCode) -> Self {
        self.status_code = status_code;
        self
    }

    #[inline]
    #[must_use]
    pub const fn status(&self) -> StatusCode { self.status_code }

    #[inline]
    #[must_use]
    pub const fn body(&self) -> &T { &self.body }

    #[inline]
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn into_body(self) -> T { self.body }
}

impl<T> IntoResponse for JsonResponse<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        let body = match serde_json::to_vec(&self.body) {
            Ok(body) => body,
            Err(err) => {
                tracing::error!("Failed to serialize response body: {err}");
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        };

        Response::builder()
            .status(self.status_code)
            .header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
            .body(body::Body::from(body))
            .unwrap_or_else(|err| {
                tracing::error!("Failed to build response: {err}");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            })
    }
}

/// Error body shared by every failing endpoint: `{"error": ..., "type": ...}`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Error {
    pub error: String,

    #[serde(rename = "type")]
    pub type_: ErrorType,

    #[serde(flatten, default, skip_serializing_if = "IndexMap::is_empty")]
    pub additional_fields: IndexMap<String, serde_json::Value>,
}

impl Error {
    #[inline]
    #[must_use]
    pub fn new(type_: ErrorType, error: impl Into<String>) -> Self {
        Self { error: error.into(), type_, additional_fields: IndexMap::default() }
    }

    #[inline]
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        let _unused = self.additional_fields.insert(key.into(), value);
        self
    }
}

#[macro_export]
macro_rules! json_response {
    (status: $status:expr,data: $data:expr) => {
        $crate::response::JsonResponse::ok($data).status_code($status).into_response()
    };

    (status: $status:expr,error: $error:expr) => {
        $crate::response::JsonResponse::<$crate::response::Error>::ok($error)
            .status_code($status)
            .into_response()
    };

    (reason: $reason:expr,status: $status:expr,error: $error:expr) => {{
        if $status.is_server_error() {
            $crate::tracing::error!(status_code = $status.as_u16(), "Internal Server Error: {}", $reason);
        } else {
            $crate::tracing::warn!(status_code = $status.as_u16(), "Response Error: {}", $reason);
        }

        $crate::json_response! { status: $status, error: $error }
    }};
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorType {
    Internal,
    Validation,
    BadRequest,
    NotFound,
    ServiceUnavailable,
}
