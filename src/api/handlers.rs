//! HTTP request handlers

use super::types::{EmbellishRequest, EmbellishResponse, ErrorResponse, SuccessResponse};
use super::AppState;
use crate::interaction::{DispatchError, ViewSubmission};
use crate::platform::{Platform, StateStore};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router<S, P>(state: AppState<S, P>) -> Router
where
    S: StateStore + 'static,
    P: Platform + 'static,
{
    Router::new()
        // Modal submissions (forward / edit / regenerate)
        .route("/api/interactions/view-submit", post(view_submit::<S, P>))
        // Flow start
        .route("/api/interactions/embellish", post(embellish::<S, P>))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

async fn view_submit<S: StateStore, P: Platform>(
    State(state): State<AppState<S, P>>,
    Json(submission): Json<ViewSubmission>,
) -> Json<SuccessResponse> {
    let ack = state.dispatcher.handle(&submission).await;
    Json(SuccessResponse {
        success: ack.is_success(),
    })
}

async fn embellish<S: StateStore, P: Platform>(
    State(state): State<AppState<S, P>>,
    Json(req): Json<EmbellishRequest>,
) -> Result<Json<EmbellishResponse>, AppError> {
    let text = state
        .dispatcher
        .embellish(&req.user, &req.room_id, &req.text)
        .await
        .map_err(|e| {
            tracing::error!(user_id = %req.user.id, error = %e, "Embellish failed");
            AppError::from(e)
        })?;

    Ok(Json(EmbellishResponse { text }))
}

async fn get_version() -> &'static str {
    concat!("embellisher ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    NotFound(String),
    BadGateway(String),
    Internal(String),
}

impl From<DispatchError> for AppError {
    fn from(e: DispatchError) -> Self {
        match e {
            DispatchError::UnknownRoom(_) => AppError::NotFound(e.to_string()),
            DispatchError::Inference(_) => AppError::BadGateway(e.to_string()),
            DispatchError::Store(_) | DispatchError::Platform(_) => {
                AppError::Internal(e.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
