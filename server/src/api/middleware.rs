use axum::{
    Json,
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::sync::Arc;

/// Requires the host's shared secret as a bearer credential. Guards the
/// score submission and question generation endpoints; everything else is
/// public. Rejections are never retried by clients with the same token.
pub async fn host_auth_middleware(
    State(secret): State<Arc<String>>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok());

    let token = match auth_header {
        Some(header) if header.starts_with("Bearer ") => &header[7..],
        _ => {
            return Ok((
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Missing or invalid authorization header" })),
            )
                .into_response());
        }
    };

    if token == secret.as_str() {
        Ok(next.run(request).await)
    } else {
        Ok((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Invalid host credential" })),
        )
            .into_response())
    }
}
