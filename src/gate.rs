//! 단일 실행 게이트
//!
//! 브라우저 세션은 하나뿐이므로 배치는 동시에 하나만 돈다.
//! 비차단 try-lock: 점유 중이면 두 번째 요청은 즉시 거절하고 대기열은 없다.
//! 세션 유지 워커는 `is_held()` 만 확인하고 자기 틱을 건너뛴다.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// 프로세스 전역 이진 잠금 (점유 | 해제)
#[derive(Debug, Default)]
pub struct SingleFlightGate {
    held: AtomicBool,
}

impl SingleFlightGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// 비차단 획득 시도. 이미 점유 중이면 false
    pub fn try_acquire(&self) -> bool {
        self.held
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// 해제. 점유자 범위 안에서 중복 호출해도 안전하다
    pub fn release(&self) {
        self.held.store(false, Ordering::Release);
    }

    /// 점유 여부 조회 (세션 유지 워커의 틱 스킵 판단용)
    pub fn is_held(&self) -> bool {
        self.held.load(Ordering::Acquire)
    }

}

/// 게이트 점유 허가증. drop 시 자동 해제
pub struct SubmitPermit {
    gate: Arc<SingleFlightGate>,
}

impl SubmitPermit {
    /// 획득에 성공하면 RAII 허가증을 돌려준다.
    /// 허가증이 drop 되는 모든 경로에서 게이트가 해제된다
    pub fn try_acquire(gate: &Arc<SingleFlightGate>) -> Option<Self> {
        if gate.try_acquire() {
            Some(Self {
                gate: Arc::clone(gate),
            })
        } else {
            None
        }
    }
}

impl Drop for SubmitPermit {
    fn drop(&mut self) {
        self.gate.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_is_rejected() {
        let gate = SingleFlightGate::new();
        assert!(gate.try_acquire());
        assert!(!gate.try_acquire());
        assert!(gate.is_held());

        gate.release();
        assert!(!gate.is_held());
        assert!(gate.try_acquire());
    }

    #[test]
    fn release_is_idempotent() {
        let gate = SingleFlightGate::new();
        assert!(gate.try_acquire());
        gate.release();
        gate.release();
        assert!(gate.try_acquire());
    }

    #[test]
    fn permit_releases_on_drop() {
        let gate = Arc::new(SingleFlightGate::new());

        {
            let _permit = SubmitPermit::try_acquire(&gate).expect("첫 획득은 성공해야 한다");
            assert!(gate.is_held());
            assert!(SubmitPermit::try_acquire(&gate).is_none());
        }

        // 허가증 drop 이후에는 다시 획득 가능
        assert!(!gate.is_held());
        assert!(SubmitPermit::try_acquire(&gate).is_some());
    }
}
