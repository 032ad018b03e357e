use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::errors::ServiceError;
use crate::AppState;

/// Header clients present the shared secret in.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Gate requests on the static API key from configuration. Runs ahead of the
/// directory routes; health, status, and docs stay outside it.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ServiceError> {
    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    match provided {
        Some(key) if key == state.config.api_key => Ok(next.run(request).await),
        Some(_) => Err(ServiceError::Unauthorized("invalid API key".to_string())),
        None => Err(ServiceError::Unauthorized(format!(
            "missing {} header",
            API_KEY_HEADER
        ))),
    }
}
