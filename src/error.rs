//! 서비스 표면 오류 타입
//!
//! 흐름 내부는 anyhow 로 전파하고, HTTP 경계에서 외부로 드러나는 오류만
//! 여기에서 분류한다. 건별 실패(CaseResult)는 오류가 아니라 결과 값이다.

use thiserror::Error;

/// 제출 요청이 동기적으로 실패하는 경우
#[derive(Debug, Error)]
pub enum SubmitError {
    /// 다른 배치가 이미 진행 중 (게이트 점유). 대기열 없이 즉시 거절한다
    #[error("이미 신고 작업이 진행 중입니다. 잠시 후 다시 시도하세요")]
    AlreadyRunning,

    /// 브라우저 디버깅 포트 접속 실패
    #[error("브라우저 연결 실패 (포트: {port}): {source}")]
    BrowserConnection {
        port: u16,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
