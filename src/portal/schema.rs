//! 포털 요소 스키마
//!
//! 위택스 화면의 요소 식별자 전부를 한곳에 모은다. 포털 마크업은 언제든
//! 바뀔 수 있는 외부 계약이므로 흐름 코드에 새겨 넣지 않고, TOML 파일로
//! 덮어쓸 수 있는 설정으로 다룬다. 파일이 없으면 내장 기본값을 쓴다.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tokio::fs;
use tracing::{info, warn};

/// 위택스 등록면허세(등록분) 화면의 요소 식별자 모음
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PortalSchema {
    // --- 메뉴 진입 ---
    /// 상단 "신고하기" 메뉴
    pub menu_report: String,
    /// "등록면허세(등록분)" 하위 메뉴
    pub menu_regtax: String,
    /// 진입 시 뜨는 안내 팝업 닫기 버튼 (없을 수도 있다)
    pub info_dialog_close: String,

    // --- 납세자 입력부 ---
    pub taxpayer_type_select: String,
    pub taxpayer_name_input: String,
    pub id_front_input: String,
    pub id_back_input: String,
    pub phone_input: String,
    /// 이 구분 코드일 때만 성명 입력란이 존재한다 (법인 구분은 성명란이 없다)
    pub individual_taxpayer_type: String,
    /// 납세자 주소검색 버튼 (팝업 열림)
    pub taxpayer_addr_button: String,
    /// 납세자 정보 확인 버튼
    pub taxpayer_confirm_button: String,

    // --- 주소검색 팝업 (중첩 문서) ---
    pub addr_popup_iframe: String,
    pub addr_query_input: String,
    pub addr_search_button: String,
    /// 검색 결과 첫 행. 이 요소의 출현 여부로 결과 유무를 판정한다
    pub addr_first_result: String,
    pub addr_detail_input: String,
    pub addr_confirm_button: String,
    pub addr_popup_close: String,

    // --- 물건·원인 입력부 ---
    pub object_kind_select: String,
    pub object_kind_value: String,
    pub object_detail_select: String,
    pub object_detail_value: String,
    pub cause_code_select: String,
    /// 물건 소재지 주소검색 버튼
    pub property_addr_button: String,
    pub tax_base_input: String,
    /// 세액 미리계산 버튼
    pub fee_calc_button: String,

    // --- 첨부·제출 ---
    pub attachment_input: String,
    pub attachment_confirm_button: String,
    pub submit_button: String,
}

impl Default for PortalSchema {
    fn default() -> Self {
        Self {
            menu_report: "#gnb_menu_report".to_string(),
            menu_regtax: "#lnb_regtax_regist".to_string(),
            info_dialog_close: ".ui-dialog .btn_confirm".to_string(),

            taxpayer_type_select: "#sel_taxpayer_type".to_string(),
            taxpayer_name_input: "#txt_taxpayer_name".to_string(),
            id_front_input: "#txt_rrn_front".to_string(),
            id_back_input: "#txt_rrn_back".to_string(),
            phone_input: "#txt_phone".to_string(),
            individual_taxpayer_type: "01".to_string(),
            taxpayer_addr_button: "#btn_taxpayer_addr".to_string(),
            taxpayer_confirm_button: "#btn_taxpayer_confirm".to_string(),

            addr_popup_iframe: "iframe#addr_popup".to_string(),
            addr_query_input: "#txt_addr_query".to_string(),
            addr_search_button: "#btn_addr_search".to_string(),
            addr_first_result: "#addr_result_list tr:first-child a".to_string(),
            addr_detail_input: "#txt_addr_detail".to_string(),
            addr_confirm_button: "#btn_addr_confirm".to_string(),
            addr_popup_close: "#btn_addr_close".to_string(),

            object_kind_select: "#sel_object_kind".to_string(),
            object_kind_value: "30".to_string(),
            object_detail_select: "#sel_object_detail".to_string(),
            object_detail_value: "3001".to_string(),
            cause_code_select: "#sel_cause_code".to_string(),
            property_addr_button: "#btn_property_addr".to_string(),
            tax_base_input: "#txt_tax_base".to_string(),
            fee_calc_button: "#btn_fee_calc".to_string(),

            attachment_input: "#file_attachment".to_string(),
            attachment_confirm_button: "#btn_attach_confirm".to_string(),
            submit_button: "#btn_submit_report".to_string(),
        }
    }
}

impl PortalSchema {
    /// TOML 파일에서 스키마를 읽는다. 파일에 없는 항목은 기본값을 쓴다
    pub async fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("스키마 파일을 읽을 수 없음: {}", path.display()))?;

        let schema: PortalSchema = toml::from_str(&content)
            .with_context(|| format!("스키마 파일 해석 실패: {}", path.display()))?;

        Ok(schema)
    }

    /// 덮어쓰기 파일이 있으면 읽고, 없거나 깨져 있으면 내장 기본값으로 간다
    pub async fn load_or_default(path: &str) -> Self {
        let p = Path::new(path);
        if !p.exists() {
            return Self::default();
        }

        match Self::from_file(p).await {
            Ok(schema) => {
                info!("✓ 포털 스키마 로드: {}", path);
                schema
            }
            Err(e) => {
                warn!("⚠️ 포털 스키마 로드 실패, 기본값 사용: {}", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let toml_src = r##"
            submit_button = "#btn_submit_v2"
            cause_code_select = "#sel_cause_v2"
        "##;

        let schema: PortalSchema = toml::from_str(toml_src).unwrap();
        assert_eq!(schema.submit_button, "#btn_submit_v2");
        assert_eq!(schema.cause_code_select, "#sel_cause_v2");
        // 나머지는 기본값 유지
        assert_eq!(schema.menu_report, PortalSchema::default().menu_report);
    }

    #[tokio::test]
    async fn missing_file_falls_back_to_default() {
        let schema = PortalSchema::load_or_default("no_such_schema.toml").await;
        assert_eq!(schema.submit_button, PortalSchema::default().submit_button);
    }
}
