use anyhow::{Context, Result};
use regtax_submit::api;
use regtax_submit::config::Config;
use regtax_submit::logger;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // 로그 초기화
    logger::init();

    // 설정 로드
    let config = Config::from_env();

    info!("{}", "=".repeat(60));
    info!("🚀 등록면허세 자동신고 서비스 시작");
    info!("📡 브라우저 디버깅 포트: {}", config.browser_debug_port);
    info!("🌐 대기 주소: {}", config.bind_addr);
    info!("{}", "=".repeat(60));

    let state = api::AppState::new(config.clone());
    let router = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("주소 바인딩 실패: {}", config.bind_addr))?;

    axum::serve(listener, router)
        .await
        .context("HTTP 서버 실행 실패")?;

    Ok(())
}
