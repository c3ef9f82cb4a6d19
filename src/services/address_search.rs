//! 주소검색 팝업 처리 - 업무 능력 계층
//!
//! 이미 열려 있는 주소검색 팝업(iframe) 하나를 끝까지 처리한다.
//! 질의 입력 → 검색 → 첫 후보 선택 → 상세주소 입력 → 확인.
//! 후보가 없으면 즉시 실패로 보고한다. 재질의나 재시도는 없다.
//!
//! 실패 경로에서는 이 흐름이 팝업을 닫아 주고, 성공 경로에서는 확인
//! 단계가 팝업을 닫으므로 호출부는 닫기를 신경 쓰지 않는다.
//! 오류는 이 경계를 넘지 않는다. 어떤 실패든 false 로만 보고한다.

use crate::infrastructure::DomDriver;
use crate::portal::PortalSchema;
use anyhow::Result;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// 팝업 iframe 출현 대기 상한
const POPUP_OPEN_TIMEOUT: Duration = Duration::from_secs(10);
/// 검색 버튼 클릭 후 결과 렌더링 대기.
/// 포털은 렌더링 완료 신호를 주지 않으므로 고정 대기를 쓴다
const RESULT_RENDER_WAIT: Duration = Duration::from_millis(1500);
/// 첫 후보 행 출현 대기 상한
const RESULT_APPEAR_TIMEOUT: Duration = Duration::from_secs(5);
/// 단계 사이 정착 대기
const STEP_SETTLE: Duration = Duration::from_millis(500);

/// 주소검색 팝업 흐름
pub struct AddressSearchFlow<'a> {
    schema: &'a PortalSchema,
}

impl<'a> AddressSearchFlow<'a> {
    pub fn new(schema: &'a PortalSchema) -> Self {
        Self { schema }
    }

    /// 팝업을 처리하고 성공 여부를 돌려준다
    ///
    /// `label` 은 로그 표기용 (납세자 주소 / 물건 소재지)
    pub async fn run(&self, driver: &DomDriver, query: &str, detail: &str, label: &str) -> bool {
        match self.run_inner(driver, query, detail, label).await {
            Ok(found) => found,
            Err(e) => {
                warn!("⚠️ 주소검색 중 오류 ({}): {}", label, e);
                self.close_popup(driver).await;
                false
            }
        }
    }

    async fn run_inner(
        &self,
        driver: &DomDriver,
        query: &str,
        detail: &str,
        label: &str,
    ) -> Result<bool> {
        let s = self.schema;

        // 팝업 문서가 뜰 때까지 대기
        if !driver.wait_for(&s.addr_popup_iframe, POPUP_OPEN_TIMEOUT).await? {
            warn!("⚠️ 주소검색 팝업이 열리지 않음 ({})", label);
            return Ok(false);
        }

        let frame = driver.frame(&s.addr_popup_iframe);

        // 질의 입력란이 준비될 때까지 대기 후 검색
        if !frame.wait_for(&s.addr_query_input, POPUP_OPEN_TIMEOUT).await? {
            warn!("⚠️ 주소검색 입력란이 나타나지 않음 ({})", label);
            self.close_popup(driver).await;
            return Ok(false);
        }

        frame.fill(&s.addr_query_input, query).await?;
        frame.click(&s.addr_search_button).await?;
        sleep(RESULT_RENDER_WAIT).await;

        // 후보가 하나도 없으면 즉시 실패. 재질의 없음
        if !frame.wait_for(&s.addr_first_result, RESULT_APPEAR_TIMEOUT).await? {
            warn!("⚠️ 주소 검색 결과 없음 ({}): {}", label, query);
            self.close_popup(driver).await;
            return Ok(false);
        }

        // 첫 후보 선택 → 상세주소 → 확인 (확인이 팝업을 닫는다)
        frame.click(&s.addr_first_result).await?;
        sleep(STEP_SETTLE).await;

        frame.fill(&s.addr_detail_input, detail).await?;
        frame.click(&s.addr_confirm_button).await?;
        sleep(STEP_SETTLE).await;

        debug!("✓ 주소검색 완료 ({}): {}", label, query);
        Ok(true)
    }

    /// 팝업 닫기. 최선 노력이며 결과는 의도적으로 무시한다
    async fn close_popup(&self, driver: &DomDriver) {
        let frame = driver.frame(&self.schema.addr_popup_iframe);
        let _ = frame.click_if_present(&self.schema.addr_popup_close).await;
    }
}
