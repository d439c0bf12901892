use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use chess_tactics_core::Error;

/// Request failures, rendered as `{ "error": { "code", "message" } }`.
#[derive(Debug)]
pub enum ApiError {
    InvalidFen(String),
    InvalidSquare(String),
    InvalidPgn(String),
    /// The rules engine refused a move it had listed as legal.
    EngineDesync(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::InvalidFen(msg) => (StatusCode::BAD_REQUEST, "INVALID_FEN", msg),
            ApiError::InvalidSquare(msg) => (StatusCode::BAD_REQUEST, "INVALID_SQUARE", msg),
            ApiError::InvalidPgn(msg) => (StatusCode::BAD_REQUEST, "INVALID_PGN", msg),
            ApiError::EngineDesync(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "ENGINE_DESYNC", msg)
            }
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg),
        };

        let body = ErrorResponse {
            error: ErrorDetail { code, message },
        };
        (status, Json(body)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let message = err.to_string();
        match err {
            Error::InvalidNotation(_) => ApiError::InvalidFen(message),
            Error::InvalidSquare(_) => ApiError::InvalidSquare(message),
            Error::Pgn(_) => ApiError::InvalidPgn(message),
            Error::IllegalMove { .. } => ApiError::EngineDesync(message),
            Error::Io(_) => ApiError::Internal(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn error_to_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn bad_notation_is_a_client_error() {
        let err: ApiError = Error::InvalidNotation("nonsense".into()).into();
        let (status, json) = error_to_json(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "INVALID_FEN");
        assert!(json["error"]["message"].as_str().unwrap().contains("nonsense"));
    }

    #[tokio::test]
    async fn desync_is_a_server_error() {
        let err: ApiError = Error::IllegalMove {
            label: "e2e4".into(),
            position: "8/8/8/8/8/8/8/8 w - - 0 1".into(),
        }
        .into();
        let (status, json) = error_to_json(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"]["code"], "ENGINE_DESYNC");
    }

    #[tokio::test]
    async fn square_and_pgn_errors() {
        let (status, json) = error_to_json(Error::InvalidSquare("z9".into()).into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "INVALID_SQUARE");

        let (status, json) = error_to_json(Error::Pgn("empty".into()).into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "INVALID_PGN");
    }
}
