use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::fmt::Debug;

#[derive(Debug)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        database_error(err)
    }
}

impl From<QueryRejection> for Error {
    fn from(err: QueryRejection) -> Self {
        rejected_input_error(err)
    }
}

impl From<PathRejection> for Error {
    fn from(err: PathRejection) -> Self {
        rejected_input_error(err)
    }
}

impl From<JsonRejection> for Error {
    fn from(err: JsonRejection) -> Self {
        rejected_input_error(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self.code {
            1..=99 => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
            102 => (StatusCode::NOT_FOUND, self.message.as_str()),
            _ => (StatusCode::BAD_REQUEST, self.message.as_str()),
        };

        let body = Json(json!({
            "code": self.code,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub fn invalid_input_error() -> Error {
    Error {
        code: 101,
        message: "invalid input".into(),
    }
}

pub fn rejected_input_error<T: Debug>(err: T) -> Error {
    tracing::debug!("rejected request: {:?}", err);

    invalid_input_error()
}

pub fn not_found_error() -> Error {
    Error {
        code: 102,
        message: "not found".into(),
    }
}

pub fn database_error<T: Debug>(err: T) -> Error {
    tracing::error!("database error: {:?}", err);

    Error {
        code: 2,
        message: "database error".into(),
    }
}

pub fn server_error<T: Debug>(err: T) -> Error {
    tracing::error!("server error: {:?}", err);

    Error {
        code: 3,
        message: "server error".into(),
    }
}

pub fn config_error(variable: &str) -> Error {
    Error {
        code: 6,
        message: format!("invalid configuration: {}", variable),
    }
}

#[test]
fn status_code_mapping_test() {
    assert_eq!(
        not_found_error().into_response().status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        invalid_input_error().into_response().status(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        database_error("connection refused").into_response().status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
        config_error("LISTEN_ADDR").into_response().status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}
