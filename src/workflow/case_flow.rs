//! 신고 건 처리 흐름 - 흐름 계층
//!
//! 핵심 책임: "신고 한 건"의 전체 화면 진행을 정의한다
//!
//! 진행 순서:
//! 1. 신고 양식 열기 (메뉴 → 하위 메뉴, 안내 팝업은 있으면 닫음)
//! 2. 납세자 구분·성명·주민번호·전화번호 입력
//! 3. 납세자 주소검색 (팝업)
//! 4. 물건 종류·원인 코드 선택, 물건 소재지 주소검색 (팝업)
//! 5. 과세표준액(설정 건) → 세액계산 → 첨부 → 제출
//!
//! 실패 격리: 어떤 단계가 죽어도 이 건의 실패 결과만 남기고 다음 건으로
//! 넘어갈 수 있게 한다. 납세자 주소검색 실패는 팝업만 닫고 끝내지만,
//! 물건 소재지 검색 실패는 화면이 깊이 들어간 뒤라 재사용이 불안전하므로
//! 포털 홈으로 복귀시킨다. 그 밖의 오류도 홈 복귀를 시도한다.

use crate::config::Config;
use crate::infrastructure::DomDriver;
use crate::models::{cause_code, is_establishment, Case, CaseResult};
use crate::portal::PortalSchema;
use crate::services::AddressSearchFlow;
use crate::workflow::case_ctx::CaseCtx;
use anyhow::{bail, Result};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, warn};

/// 메뉴 클릭 후 화면 전환 정착 대기
const MENU_SETTLE: Duration = Duration::from_millis(700);
/// 신고 양식 출현 대기 상한
const FORM_OPEN_TIMEOUT: Duration = Duration::from_secs(10);
/// 입력 단계 사이 정착 대기
const STEP_SETTLE: Duration = Duration::from_millis(400);
/// 세액계산 결과 반영 대기.
/// 포털이 계산 완료 신호를 주지 않으므로 고정 대기를 쓴다
const FEE_CALC_WAIT: Duration = Duration::from_millis(1500);
/// 제출 직후 처리 반영 대기
const SUBMIT_SETTLE: Duration = Duration::from_secs(1);

/// 신고 건 처리 흐름
///
/// - 한 건의 화면 진행 순서를 편성한다
/// - 자원(page)을 직접 쥐지 않고 DomDriver 능력만 쓴다
pub struct CaseFlow<'a> {
    schema: &'a PortalSchema,
    config: &'a Config,
}

impl<'a> CaseFlow<'a> {
    pub fn new(schema: &'a PortalSchema, config: &'a Config) -> Self {
        Self { schema, config }
    }

    /// 한 건을 처리하고 결과를 돌려준다. 오류는 이 경계를 넘지 않는다
    pub async fn run(&self, driver: &DomDriver, case: &Case, ctx: &CaseCtx) -> CaseResult {
        match self.run_steps(driver, case, ctx).await {
            Ok(result) => result,
            Err(e) => {
                // 건 경계에서 포착. 원문 오류를 결과에 싣고 홈 복귀를 시도한다
                let detail = format!("{:#}", e);
                error!("{} ❌ 처리 중 오류: {}", ctx, detail);
                self.reset_to_home(ctx, driver).await;
                CaseResult::failure(&case.name, detail)
            }
        }
    }

    async fn run_steps(
        &self,
        driver: &DomDriver,
        case: &Case,
        ctx: &CaseCtx,
    ) -> Result<CaseResult> {
        let s = self.schema;

        // ========== 1. 신고 양식 진입 ==========
        info!("{} 📋 신고 양식 진입", ctx);
        driver.click(&s.menu_report).await?;
        sleep(MENU_SETTLE).await;
        driver.click(&s.menu_regtax).await?;

        if !driver.wait_for(&s.taxpayer_type_select, FORM_OPEN_TIMEOUT).await? {
            bail!("신고 양식이 나타나지 않음");
        }

        // 진입 시 안내 팝업이 뜰 때가 있다. 없으면 그냥 지나간다 (결과 무시)
        let _ = driver.click_if_present(&s.info_dialog_close).await;

        // ========== 2. 납세자 정보 입력 ==========
        driver.select(&s.taxpayer_type_select, &case.taxpayer_type).await?;
        sleep(STEP_SETTLE).await;

        // 성명란은 개인 구분에서만 존재한다. 법인 구분은 건너뛴다
        if case.taxpayer_type == s.individual_taxpayer_type {
            driver.fill(&s.taxpayer_name_input, &case.name).await?;
        }

        driver.fill(&s.id_front_input, &case.id_front).await?;
        driver.fill(&s.id_back_input, &case.id_back).await?;
        driver.fill(&s.phone_input, &case.phone).await?;

        // ========== 3. 납세자 주소검색 ==========
        driver.click(&s.taxpayer_addr_button).await?;

        let addr_flow = AddressSearchFlow::new(s);
        if !addr_flow
            .run(driver, &case.address, &case.address_detail, "납세자 주소")
            .await
        {
            // 얕은 단계의 실패: 팝업은 흐름이 이미 닫았고 화면은 그대로
            // 재사용 가능하므로 홈 복귀 없이 이 건만 접는다
            warn!("{} ⚠️ 납세자 주소검색 실패, 이 건 건너뜀", ctx);
            return Ok(CaseResult::failure(
                &case.name,
                format!("주소 검색 실패 (납세자 주소): {}", case.address),
            ));
        }

        driver.click(&s.taxpayer_confirm_button).await?;
        sleep(STEP_SETTLE).await;

        // ========== 4. 물건·원인 입력 ==========
        driver.select(&s.object_kind_select, &s.object_kind_value).await?;
        sleep(STEP_SETTLE).await;
        driver.select(&s.object_detail_select, &s.object_detail_value).await?;
        sleep(STEP_SETTLE).await;
        driver
            .select(&s.cause_code_select, cause_code(&case.register_type))
            .await?;

        driver.click(&s.property_addr_button).await?;

        if !addr_flow
            .run(
                driver,
                &case.property_address,
                &case.property_detail,
                "물건 소재지",
            )
            .await
        {
            // 깊은 단계의 실패: 화면이 재사용 불가 상태이므로 홈으로 되돌린다
            warn!("{} ⚠️ 물건 소재지 주소검색 실패, 홈으로 복귀 후 다음 건", ctx);
            self.reset_to_home(ctx, driver).await;
            return Ok(CaseResult::failure(
                &case.name,
                format!("주소 검색 실패 (물건 소재지): {}", case.property_address),
            ));
        }

        // ========== 5. 과세표준 → 세액계산 → 첨부 → 제출 ==========
        if is_establishment(&case.register_type) {
            if let Some(tax_base) = case.tax_base {
                driver
                    .fill(&s.tax_base_input, &tax_base.to_string())
                    .await?;
            }
        }

        driver.click(&s.fee_calc_button).await?;
        sleep(FEE_CALC_WAIT).await;

        // 포털이 첨부를 요구하지만 업무상 내용은 무관하다. 자리채움 파일 고정
        driver
            .upload(&s.attachment_input, &self.config.attachment_path)
            .await?;
        driver.click(&s.attachment_confirm_button).await?;
        sleep(STEP_SETTLE).await;

        driver.click(&s.submit_button).await?;
        sleep(SUBMIT_SETTLE).await;

        info!("{} ✅ 제출 완료", ctx);
        Ok(CaseResult::success(&case.name))
    }

    /// 포털 홈으로 복귀. 복구 이동 자체가 실패해도 다음 건 진행을 막지 않는다
    async fn reset_to_home(&self, ctx: &CaseCtx, driver: &DomDriver) {
        if let Err(e) = driver.goto(&self.config.portal_url).await {
            error!("{} ⚠️ 홈 복귀 실패 (무시하고 계속): {}", ctx, e);
        }
    }
}
