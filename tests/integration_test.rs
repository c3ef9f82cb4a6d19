//! 실제 브라우저·포털 세션이 필요한 통합 테스트
//!
//! 기본적으로 무시된다. 디버깅 포트가 열린 브라우저에 위택스 로그인 탭을
//! 띄워 두고 수동 실행할 것: cargo test -- --ignored

use regtax_submit::browser::connect_to_portal_page;
use regtax_submit::config::Config;
use regtax_submit::infrastructure::DomDriver;
use regtax_submit::logger;
use regtax_submit::models::Case;
use regtax_submit::orchestrator::run_batch;
use regtax_submit::portal::PortalSchema;

fn sample_case(name: &str, address: &str) -> Case {
    serde_json::from_value(serde_json::json!({
        "register_type": "설정",
        "taxpayer_type": "01",
        "name": name,
        "id_front": "900101",
        "id_back": "1234567",
        "phone": "010-1234-5678",
        "address": address,
        "address_detail": "101동 202호",
        "property_address": "서울특별시 중구 세종대로 110",
        "property_detail": "",
        "tax_base": 150000000
    }))
    .expect("테스트 케이스 구성 실패")
}

#[tokio::test]
#[ignore] // 기본 무시. 수동 실행: cargo test -- --ignored
async fn test_browser_connection() {
    logger::init();
    let config = Config::from_env();

    let result = connect_to_portal_page(
        config.browser_debug_port,
        &config.portal_url,
        &config.portal_title,
    )
    .await;

    assert!(result.is_ok(), "브라우저 접속에 성공해야 한다");
}

#[tokio::test]
#[ignore]
async fn test_batch_preserves_order_and_isolates_failures() {
    logger::init();
    let config = Config::from_env();

    let (_browser, page) = connect_to_portal_page(
        config.browser_debug_port,
        &config.portal_url,
        &config.portal_title,
    )
    .await
    .expect("브라우저 접속 실패");

    let driver = DomDriver::new(page);
    let schema = PortalSchema::load_or_default(&config.schema_path).await;

    // 두 번째 건은 검색될 리 없는 주소라 실패해야 하고,
    // 그래도 세 번째 건은 계속 시도되어야 한다
    let cases = vec![
        sample_case("홍길동", "서울특별시 중구 세종대로 110"),
        sample_case("김철수", "존재하지않는주소 999-999"),
        sample_case("이영희", "서울특별시 종로구 사직로 161"),
    ];

    let results = run_batch(&driver, &cases, &schema, &config).await;

    assert_eq!(results.len(), cases.len(), "결과는 입력 건수와 같아야 한다");
    assert_eq!(results[0].name, "홍길동");
    assert_eq!(results[1].name, "김철수");
    assert_eq!(results[2].name, "이영희");
    assert!(!results[1].is_success(), "없는 주소는 실패로 남아야 한다");
}
