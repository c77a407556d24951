//! HTTP adapter around the translate function.

use crate::function::{
    respond, translate_function, AppState, FunctionRequest, FunctionResponse, ResponseBody,
};
use axum::body::{Body, Bytes};
use axum::extract::{DefaultBodyLimit, Query, State};
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, post};
use axum::{Json, Router};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::set_header::SetResponseHeaderLayer;

/// Header marking a request body as base64 text.
const TRANSFER_ENCODING_HEADER: &str = "content-transfer-encoding";

/// Build the router.
///
/// `/` and `/translate` take the document as the request body. `/invoke`
/// takes a JSON [`FunctionRequest`] and answers with a JSON envelope.
pub fn create_router(state: Arc<AppState>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/", any(handle_http))
        .route("/translate", any(handle_http))
        .route("/invoke", post(handle_invoke))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .with_state(state)
}

async fn handle_http(
    State(state): State<Arc<AppState>>,
    method: Method,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> FunctionResponse {
    let is_base64 = headers
        .get(TRANSFER_ENCODING_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().eq_ignore_ascii_case("base64"))
        .unwrap_or(false);

    if is_base64 && !body.is_empty() {
        let text: Vec<u8> = body
            .iter()
            .copied()
            .filter(|b| !b.is_ascii_whitespace())
            .collect();
        return match BASE64.decode(&text) {
            Ok(decoded) => respond(&state, method.as_str(), &params, Some(decoded.as_slice())).await,
            Err(e) => {
                log::warn!("Rejected request with invalid base64 body: {}", e);
                FunctionResponse::text(400, "Invalid base64 body")
            }
        };
    }

    respond(&state, method.as_str(), &params, Some(body.as_ref())).await
}

async fn handle_invoke(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FunctionRequest>,
) -> Json<FunctionResponse> {
    Json(translate_function(&state, request).await)
}

impl IntoResponse for FunctionResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = match self.body {
            ResponseBody::Empty => Body::empty(),
            ResponseBody::Text(text) => Body::from(text),
            ResponseBody::Binary(bytes) => Body::from(bytes),
        };

        let mut response = Response::new(body);
        *response.status_mut() = status;

        for (name, value) in &self.headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => {
                    response.headers_mut().insert(name, value);
                }
                _ => log::warn!("Dropping invalid response header {}: {}", name, value),
            }
        }

        response
    }
}
