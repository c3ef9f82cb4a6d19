//! 신고 건 입출력 모델

use serde::{Deserialize, Serialize};

/// 신고 한 건의 입력값. 제출 후 변경 불가, CaseFlow 가 정확히 한 번 소비한다
#[derive(Debug, Clone, Deserialize)]
pub struct Case {
    /// 등록 구분 ("설정" | "변경" | "말소"). 어휘 밖의 값도 받아들이며
    /// 원인 코드 매핑 시점에 기본 코드로 떨어진다
    pub register_type: String,
    /// 납세자 구분 코드 (포털 select 의 value)
    pub taxpayer_type: String,
    /// 납세자 성명
    pub name: String,
    /// 주민등록번호 앞자리
    pub id_front: String,
    /// 주민등록번호 뒷자리
    pub id_back: String,
    /// 전화번호
    pub phone: String,
    /// 납세자 주소 (주소검색 질의)
    pub address: String,
    /// 납세자 상세주소
    pub address_detail: String,
    /// 물건 소재지 주소 (주소검색 질의)
    pub property_address: String,
    /// 물건 상세주소
    pub property_detail: String,
    /// 과세표준액. 설정 건에서만 의미가 있다
    #[serde(default)]
    pub tax_base: Option<u64>,
}

/// 건별 처리 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    Success,
    Failure,
}

/// 건별 처리 결과. 배치가 반환될 때 한 번 내보내고 저장하지 않는다
#[derive(Debug, Clone, Serialize)]
pub struct CaseResult {
    pub status: CaseStatus,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CaseResult {
    pub fn success(name: impl Into<String>) -> Self {
        Self {
            status: CaseStatus::Success,
            name: name.into(),
            error: None,
        }
    }

    pub fn failure(name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            status: CaseStatus::Failure,
            name: name.into(),
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == CaseStatus::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_deserializes_from_submit_payload() {
        let raw = serde_json::json!({
            "register_type": "설정",
            "taxpayer_type": "01",
            "name": "홍길동",
            "id_front": "900101",
            "id_back": "1234567",
            "phone": "010-1234-5678",
            "address": "서울특별시 중구 세종대로 110",
            "address_detail": "101동 202호",
            "property_address": "부산광역시 해운대구 센텀로 45",
            "property_detail": "3층",
            "tax_base": 150000000
        });

        let case: Case = serde_json::from_value(raw).unwrap();
        assert_eq!(case.register_type, "설정");
        assert_eq!(case.tax_base, Some(150_000_000));
    }

    #[test]
    fn tax_base_is_optional() {
        let raw = serde_json::json!({
            "register_type": "말소",
            "taxpayer_type": "02",
            "name": "주식회사 한빛",
            "id_front": "110111",
            "id_back": "0012345",
            "phone": "02-555-0100",
            "address": "서울특별시 서초구 서초대로 301",
            "address_detail": "",
            "property_address": "서울특별시 서초구 반포대로 21",
            "property_detail": ""
        });

        let case: Case = serde_json::from_value(raw).unwrap();
        assert_eq!(case.tax_base, None);
    }

    #[test]
    fn failure_result_carries_error_text() {
        let result = CaseResult::failure("홍길동", "주소 검색 실패");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "failure");
        assert_eq!(json["error"], "주소 검색 실패");
    }

    #[test]
    fn success_result_omits_error_field() {
        let result = CaseResult::success("홍길동");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "success");
        assert!(json.get("error").is_none());
    }
}
