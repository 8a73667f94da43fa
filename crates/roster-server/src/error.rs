//! Error types and axum `IntoResponse` implementation.
//!
//! Every error renders as `{ "status": "error", "message": … }`.

use axum::{
  Json,
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Admin credentials missing or wrong.
  #[error("unauthorized")]
  Unauthorized,
  /// Webhook body does not match its `x-line-signature`.
  #[error("invalid webhook signature")]
  InvalidSignature,
  #[error("{0}")]
  BadRequest(String),
  #[error(transparent)]
  Bot(#[from] roster_bot::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

fn body(status: StatusCode, message: String) -> Response {
  (status, Json(json!({ "status": "error", "message": message }))).into_response()
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    match self {
      Error::Unauthorized => {
        let mut res = body(StatusCode::UNAUTHORIZED, self.to_string());
        res.headers_mut().insert(
          header::WWW_AUTHENTICATE,
          HeaderValue::from_static("Basic realm=\"roster-admin\""),
        );
        res
      }
      Error::InvalidSignature => body(StatusCode::UNAUTHORIZED, self.to_string()),
      Error::BadRequest(msg) => body(StatusCode::BAD_REQUEST, msg),
      Error::Bot(e) => {
        tracing::error!(error = %e, "request failed");
        body(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn statuses_follow_variant() {
    assert_eq!(
      Error::BadRequest("no".into()).into_response().status(),
      StatusCode::BAD_REQUEST
    );
    assert_eq!(Error::InvalidSignature.into_response().status(), StatusCode::UNAUTHORIZED);
    assert!(
      Error::InvalidSignature
        .into_response()
        .headers()
        .get(header::WWW_AUTHENTICATE)
        .is_none()
    );
    assert_eq!(
      Error::Bot(roster_bot::Error::MissingUserId).into_response().status(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
  }

  #[test]
  fn workflow_errors_are_server_errors_even_for_empty_message() {
    // the broadcast endpoint maps an empty message to `BadRequest` itself
    assert_eq!(
      Error::Bot(roster_bot::Error::EmptyMessage).into_response().status(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
  }
}
