//! 등록원인 코드 매핑
//!
//! 포털이 요구하는 4자리 원인 코드. 대외 계약이므로 값을 그대로 보존할 것

use phf::phf_map;

/// 등록 구분 → 원인 코드
static CAUSE_CODES: phf::Map<&'static str, &'static str> = phf_map! {
    "설정" => "0556",
    "변경" => "9984",
    "말소" => "9991",
};

/// 어휘에 없는 등록 구분이 들어오면 설정과 같은 코드로 처리한다
pub const DEFAULT_CAUSE_CODE: &str = "0556";

/// 등록 구분 문자열을 원인 코드로 변환
pub fn cause_code(register_type: &str) -> &'static str {
    CAUSE_CODES
        .get(register_type)
        .copied()
        .unwrap_or(DEFAULT_CAUSE_CODE)
}

/// 과세표준액 입력이 적용되는 설정 건 여부
pub fn is_establishment(register_type: &str) -> bool {
    register_type == "설정"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_types_map_to_portal_codes() {
        assert_eq!(cause_code("설정"), "0556");
        assert_eq!(cause_code("변경"), "9984");
        assert_eq!(cause_code("말소"), "9991");
    }

    #[test]
    fn unknown_type_falls_back_to_default() {
        assert_eq!(cause_code("이전"), DEFAULT_CAUSE_CODE);
        assert_eq!(cause_code(""), DEFAULT_CAUSE_CODE);
    }

    #[test]
    fn only_establishment_takes_tax_base() {
        assert!(is_establishment("설정"));
        assert!(!is_establishment("변경"));
        assert!(!is_establishment("말소"));
        assert!(!is_establishment("기타"));
    }
}
