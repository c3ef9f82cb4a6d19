//! HTTP 계층 테스트
//!
//! 브라우저 없이 라우터만 띄워 게이트 거절 경로와 상태 확인을 검증한다

use axum::body::Body;
use axum::http::{Request, StatusCode};
use regtax_submit::api::{create_router, AppState};
use regtax_submit::config::Config;
use serde_json::Value;
use tower::ServiceExt;

fn sample_case_json() -> Value {
    serde_json::json!({
        "register_type": "설정",
        "taxpayer_type": "01",
        "name": "홍길동",
        "id_front": "900101",
        "id_back": "1234567",
        "phone": "010-1234-5678",
        "address": "서울특별시 중구 세종대로 110",
        "address_detail": "101동 202호",
        "property_address": "부산광역시 해운대구 센텀로 45",
        "property_detail": "3층",
        "tax_base": 150000000
    })
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_returns_static_payload() {
    let state = AppState::new(Config::default());
    let app = create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["message"].is_string());
}

#[tokio::test]
async fn submit_is_rejected_while_gate_held() {
    let state = AppState::new(Config::default());

    // 다른 배치가 진행 중인 상황을 만든다
    assert!(state.gate.try_acquire());

    let app = create_router(state.clone());
    let body = serde_json::json!({ "cases": [sample_case_json()] });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/submit")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    // 거절 응답에는 결과가 없어야 하고, 브라우저 접촉도 없어야 한다
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert!(json["error"].is_string());
    assert!(json.get("results").is_none());

    // 거절 경로는 남의 점유를 풀면 안 된다
    assert!(state.gate.is_held());
}

#[tokio::test]
async fn gate_is_released_after_connection_failure() {
    // 브라우저가 없는 포트를 가리키게 해서 연결 실패 경로를 태운다
    let config = Config {
        browser_debug_port: 1,
        ..Config::default()
    };
    let state = AppState::new(config);
    let app = create_router(state.clone());

    let body = serde_json::json!({ "cases": [sample_case_json()] });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/submit")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert!(json["error"].is_string());

    // 허가증 drop 으로 게이트가 되돌아와 있어야 한다
    assert!(!state.gate.is_held());
    assert!(state.gate.try_acquire());
}
