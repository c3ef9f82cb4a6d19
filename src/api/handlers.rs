//! HTTP 핸들러
//!
//! 진입점은 둘뿐이다: 상태 확인과 배치 제출.
//! 제출은 게이트 획득이 최우선이다. 획득 실패면 브라우저에 손대기 전에
//! 즉시 거절하고, 획득 성공이면 허가증(RAII)이 모든 종료 경로에서
//! 게이트를 되돌려 놓는다.

use crate::api::state::AppState;
use crate::browser::connect_to_portal_page;
use crate::error::SubmitError;
use crate::gate::SubmitPermit;
use crate::infrastructure::DomDriver;
use crate::models::{Case, CaseResult};
use crate::orchestrator::run_batch;
use crate::portal::PortalSchema;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// 상태 확인 응답
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

/// 배치 제출 요청
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub cases: Vec<Case>,
}

/// 배치 제출 응답. 입력 순서 그대로 건수만큼 담긴다
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub results: Vec<CaseResult>,
}

/// 동기 거절 응답 (게이트 점유, 브라우저 연결 실패)
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// GET /health
///
/// 게이트 상태나 브라우저 연결과 무관한 고정 응답
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "등록면허세 자동신고 서비스 동작 중".to_string(),
    })
}

/// POST /submit
pub async fn submit_batch(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SubmitRequest>,
) -> Response {
    // 게이트 획득이 가장 먼저다. 실패면 브라우저 접촉 없이 즉시 거절
    let Some(_permit) = SubmitPermit::try_acquire(&state.gate) else {
        warn!("🚫 제출 거절: 다른 배치가 진행 중");
        return (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: SubmitError::AlreadyRunning.to_string(),
            }),
        )
            .into_response();
    };

    info!("📨 배치 제출 접수: {} 건", req.cases.len());

    // 세션 유지 워커는 첫 제출 때 한 번만 띄운다
    state.ensure_keep_alive();

    // 브라우저 연결은 호출마다 새로 맺는다
    let (browser, page) = match connect_to_portal_page(
        state.config.browser_debug_port,
        &state.config.portal_url,
        &state.config.portal_title,
    )
    .await
    {
        Ok(pair) => pair,
        Err(e) => {
            let err = SubmitError::BrowserConnection {
                port: state.config.browser_debug_port,
                source: e.into(),
            };
            warn!("❌ {}", err);
            return (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: err.to_string(),
                }),
            )
                .into_response();
        }
    };

    let driver = DomDriver::new(page);
    let schema = PortalSchema::load_or_default(&state.config.schema_path).await;

    let results = run_batch(&driver, &req.cases, &schema, &state.config).await;

    // 배치가 끝나면 연결을 버린다
    drop(browser);

    (StatusCode::OK, Json(SubmitResponse { results })).into_response()
    // _permit drop → 게이트 해제 (모든 경로 공통)
}
