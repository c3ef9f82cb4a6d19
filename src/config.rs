/// 서비스 설정
#[derive(Clone, Debug)]
pub struct Config {
    /// HTTP 대기 주소
    pub bind_addr: String,
    /// 브라우저 디버깅 포트
    pub browser_debug_port: u16,
    /// 위택스 메인 URL (실패 복구 시 복귀 지점)
    pub portal_url: String,
    /// 대상 탭을 찾을 때 사용하는 페이지 제목 일부
    pub portal_title: String,
    /// 포털 요소 스키마 덮어쓰기 파일 (없으면 내장 기본값 사용)
    pub schema_path: String,
    /// 첨부파일 자리채움 경로 (포털이 파일을 요구하지만 내용은 무관)
    pub attachment_path: String,
    /// 세션 유지 틱 간격(초). 포털은 약 20분 무활동 시 세션을 끊는다
    pub keep_alive_interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:5001".to_string(),
            browser_debug_port: 9222,
            portal_url: "https://www.wetax.go.kr/main/".to_string(),
            portal_title: "위택스".to_string(),
            schema_path: "portal_schema.toml".to_string(),
            attachment_path: "assets/placeholder.png".to_string(),
            keep_alive_interval_secs: 600,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or(default.bind_addr),
            browser_debug_port: std::env::var("BROWSER_DEBUG_PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.browser_debug_port),
            portal_url: std::env::var("PORTAL_URL").unwrap_or(default.portal_url),
            portal_title: std::env::var("PORTAL_TITLE").unwrap_or(default.portal_title),
            schema_path: std::env::var("PORTAL_SCHEMA_PATH").unwrap_or(default.schema_path),
            attachment_path: std::env::var("ATTACHMENT_PATH").unwrap_or(default.attachment_path),
            keep_alive_interval_secs: std::env::var("KEEP_ALIVE_INTERVAL_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.keep_alive_interval_secs),
        }
    }
}
