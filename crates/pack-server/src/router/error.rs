use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    response::{IntoResponse, Response},
    Json,
};
use http::StatusCode;

/// Everything a handler can answer with instead of a success.
#[derive(Debug, thiserror::Error)]
pub(super) enum ApiError {
    #[error(transparent)]
    PackSizing(#[from] pack_sizing::Error),
    /// The body is not JSON of the expected shape
    #[error("invalid request body: {0}")]
    MalformedBody(String),
    /// A path or query value could not be read
    #[error("invalid request: {0}")]
    MalformedRequest(String),
    #[error("no pack sizes are configured")]
    NoPackSizes,
    /// The registry holds a size above the configured limit, so no table is built
    #[error("pack size {0} exceeds the configured limit, remove it before calculating")]
    PackSizeLimit(pack_sizing::PackSize),
    #[error("request timed out")]
    Timeout,
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        use pack_sizing::Error;

        match self {
            ApiError::PackSizing(
                Error::InvalidPackSize(_) | Error::PackSizeTooLarge { .. } | Error::InvalidQuantity(_),
            ) => StatusCode::BAD_REQUEST,
            ApiError::PackSizing(Error::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::PackSizing(Error::Conflict(_)) => StatusCode::CONFLICT,
            ApiError::MalformedBody(_) | ApiError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NoPackSizes | ApiError::PackSizeLimit(_) => StatusCode::CONFLICT,
            ApiError::Timeout => StatusCode::REQUEST_TIMEOUT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedBody(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::MalformedRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::MalformedRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!("{self}");
        } else {
            tracing::debug!(%status, "rejected request: {self}");
        }

        let body = serde_json::json!({ "error": self.to_string() });

        (status, Json(body)).into_response()
    }
}
