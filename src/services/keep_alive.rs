//! 세션 유지 워커 - 업무 능력 계층
//!
//! 포털은 약 20분 무활동이면 세션을 끊는다. 10분 간격 틱으로 2배 여유를
//! 둔다. 틱마다 브라우저에 새로 붙어 포인터를 조금 움직이고 문서를
//! 새로고침한 뒤 연결을 버린다.
//!
//! 게이트가 점유 중이면 그 틱은 통째로 건너뛴다. 대기도 재시도도 없이
//! 다음 간격을 기다린다. 배치는 유한한 일회성 작업이지만 이 루프는
//! 무한하므로 한 틱쯤은 잃어도 된다.

use crate::browser::connect_to_portal_page;
use crate::config::Config;
use crate::gate::SingleFlightGate;
use crate::infrastructure::DomDriver;
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, sleep};
use tracing::{info, warn};

/// 포인터 이동 사이 정착 대기
const MOUSE_SETTLE: Duration = Duration::from_millis(300);

/// 틱 수행 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// 게이트 점유로 건너뜀. 브라우저 접촉 없음
    Skipped,
    /// 활동 신호와 새로고침 수행
    Performed,
}

/// 세션 유지 루프를 백그라운드 태스크로 띄운다. 프로세스 수명 동안 돈다
pub fn spawn(gate: Arc<SingleFlightGate>, config: Config) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let period = Duration::from_secs(config.keep_alive_interval_secs);
        info!("💓 세션 유지 워커 시작 (간격: {:?})", period);

        let mut ticker = interval(period);
        // 기동 직후의 첫 틱은 의미가 없으므로 소비만 한다
        ticker.tick().await;

        loop {
            ticker.tick().await;
            match tick(&gate, &config).await {
                Ok(TickOutcome::Skipped) => {}
                Ok(TickOutcome::Performed) => {
                    info!("💓 세션 유지 틱 완료");
                }
                Err(e) => {
                    // 틱 실패는 삼킨다. 루프와 게이트 상태에는 영향 없음
                    warn!("⚠️ 세션 유지 틱 실패 (무시): {}", e);
                }
            }
        }
    })
}

/// 세션 유지 틱 한 번
///
/// 게이트 확인이 가장 먼저다. 점유 중이면 브라우저에 일절 손대지 않는다
pub async fn tick(gate: &SingleFlightGate, config: &Config) -> Result<TickOutcome> {
    if gate.is_held() {
        info!("⏭ 배치 진행 중이라 세션 유지 틱 건너뜀");
        return Ok(TickOutcome::Skipped);
    }

    let (_browser, page) = connect_to_portal_page(
        config.browser_debug_port,
        &config.portal_url,
        &config.portal_title,
    )
    .await?;

    let driver = DomDriver::new(page);

    // 작은 포인터 이동 두 번 = 활동 신호
    driver.move_mouse(120.0, 160.0).await?;
    sleep(MOUSE_SETTLE).await;
    driver.move_mouse(320.0, 280.0).await?;
    sleep(MOUSE_SETTLE).await;

    driver.reload().await?;

    // _browser drop 으로 연결 종료
    Ok(TickOutcome::Performed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn tick_skips_without_touching_browser_while_gate_held() {
        let gate = SingleFlightGate::new();
        assert!(gate.try_acquire());

        // 브라우저가 전혀 없는 환경에서도 게이트 점유 중에는 접속을
        // 시도하지 않으므로 즉시 Skipped 로 끝나야 한다
        let config = Config {
            browser_debug_port: 1,
            ..Config::default()
        };
        let outcome = tick(&gate, &config).await.unwrap();
        assert_eq!(outcome, TickOutcome::Skipped);
    }
}
