//! HTTP 라우트 정의
//!
//! ```text
//! GET  /health  - 상태 확인 (부수효과 없음)
//! POST /submit  - 배치 제출 (단일 실행, 진행 중이면 409)
//! ```

use crate::api::handlers::{health_check, submit_batch};
use crate::api::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/submit", post(submit_batch))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
