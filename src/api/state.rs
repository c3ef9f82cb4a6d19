//! HTTP 계층 공유 상태

use crate::config::Config;
use crate::gate::SingleFlightGate;
use crate::services::keep_alive;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// 서비스 전역 상태
///
/// 게이트는 제출 핸들러와 세션 유지 워커가 공유한다
pub struct AppState {
    pub config: Config,
    pub gate: Arc<SingleFlightGate>,
    keep_alive_started: AtomicBool,
}

impl AppState {
    pub fn new(config: Config) -> Arc<Self> {
        Arc::new(Self {
            config,
            gate: Arc::new(SingleFlightGate::new()),
            keep_alive_started: AtomicBool::new(false),
        })
    }

    /// 세션 유지 워커가 없으면 띄운다. 최초 한 번만 실제로 띄워진다
    pub fn ensure_keep_alive(&self) {
        if !self.keep_alive_started.swap(true, Ordering::SeqCst) {
            // 워커는 프로세스 수명 동안 돌므로 핸들은 쥐지 않는다
            let _ = keep_alive::spawn(Arc::clone(&self.gate), self.config.clone());
        }
    }
}
