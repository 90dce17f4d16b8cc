use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::models::{
    ErrorResponse, ExtractResponse, PROCESSING_FAILED, RequestError, URL_REQUIRED,
    parse_extract_url,
};
use crate::state::AppState;

/// `POST /api/v1/extract`
///
/// The body is read raw and parsed here so that malformed JSON, and bodies
/// axum refuses to buffer (over the size limit), are reported as a JSON 500
/// with details instead of axum's plain-text rejection.
pub async fn extract(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let result = match body {
        Ok(body) => handle_extract(&state, &body).await,
        Err(rejection) => Err(RequestError::Body(rejection.body_text())),
    };

    match result {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(error = %e, "error processing request");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::with_details(PROCESSING_FAILED, e.to_string())),
            )
                .into_response()
        }
    }
}

async fn handle_extract(state: &AppState, body: &[u8]) -> Result<Response, RequestError> {
    let Some(url) = parse_extract_url(body)? else {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(URL_REQUIRED)),
        )
            .into_response());
    };

    tracing::info!(url = %url, "processing PDF");

    let response = match state.pipeline.extract_text(&url).await {
        Ok(text) => Json(ExtractResponse::new(text)).into_response(),
        Err(e) => {
            tracing::error!(url = %url, kind = e.kind(), error = %e, "PDF extraction failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::extraction_failed(
                    &e,
                    state.expose_pipeline_errors,
                )),
            )
                .into_response()
        }
    };

    Ok(response)
}
