//! 배치 처리기 - 편성 계층
//!
//! ## 책임
//!
//! 1. **순차 순회**: 접수 순서대로 건을 하나씩 처리한다. 브라우저 탭은
//!    하나, 논리적 조작 초점도 하나이므로 동시 처리는 하지 않는다
//! 2. **실패 격리**: 건 하나가 아무리 크게 죽어도 나머지 건은 계속 시도한다
//! 3. **순서 보존**: 결과는 입력과 같은 순서로 건수만큼 돌려준다.
//!    중간 중단은 없다
//! 4. **통계 출력**: 시작 배너와 최종 성공/실패 집계를 남긴다

use crate::config::Config;
use crate::infrastructure::DomDriver;
use crate::models::{Case, CaseResult};
use crate::portal::PortalSchema;
use crate::workflow::{CaseCtx, CaseFlow};
use tracing::info;

/// 배치 전체를 처리하고 건별 결과를 입력 순서대로 돌려준다
pub async fn run_batch(
    driver: &DomDriver,
    cases: &[Case],
    schema: &PortalSchema,
    config: &Config,
) -> Vec<CaseResult> {
    let total = cases.len();
    log_batch_start(total);

    // 흐름 객체는 한 번만 만들어 재사용
    let flow = CaseFlow::new(schema, config);
    let mut results = Vec::with_capacity(total);

    for (idx, case) in cases.iter().enumerate() {
        let ctx = CaseCtx::new(idx + 1, total, &case.name);
        info!("\n{}", "─".repeat(60));
        info!("{} 📄 처리 시작 ({})", ctx, case.register_type);

        // CaseFlow 는 오류를 결과 값으로 접어서 돌려준다. 여기서는 결과를
        // 쌓기만 하면 건별 격리가 보장된다
        let result = flow.run(driver, case, &ctx).await;
        results.push(result);
    }

    log_batch_complete(&results);
    results
}

// ========== 로그 보조 함수 ==========

fn log_batch_start(total: usize) {
    info!("\n{}", "=".repeat(60));
    info!("📦 배치 처리 시작: 총 {} 건", total);
    info!(
        "시작 시각: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
}

fn log_batch_complete(results: &[CaseResult]) {
    let success = results.iter().filter(|r| r.is_success()).count();
    let failed = results.len() - success;

    info!("\n{}", "=".repeat(60));
    info!("📊 배치 처리 완료");
    info!(
        "완료 시각: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("✅ 성공: {}/{}", success, results.len());
    info!("❌ 실패: {}", failed);
    info!("{}", "=".repeat(60));
}
