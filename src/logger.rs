//! 로그 초기화
//!
//! RUST_LOG 환경변수로 레벨을 제어한다. 기본값은 info.

use tracing_subscriber::{fmt, EnvFilter};

/// tracing 구독자 초기화. 테스트에서 중복 호출해도 안전하다
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
