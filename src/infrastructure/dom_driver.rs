//! DOM 드라이버 - 기반 계층
//!
//! 유일한 page 자원을 보유하고 화면 조작 능력만 노출한다.
//! Case 나 배치 흐름은 전혀 모른다.
//!
//! 조작은 전부 JS 평가로 수행한다. 포털 화면은 iframe(주소검색 팝업)을
//! 쓰는데, CDP 셀렉터 질의는 메인 문서만 보므로 iframe 내부는
//! contentDocument 경유 JS 로만 닿을 수 있다. 파일 첨부만 예외로
//! DOM.setFileInputFiles CDP 명령을 쓴다 (JS 는 input.files 를 채울 수 없다).

use anyhow::{bail, Context, Result};
use chromiumoxide::cdp::browser_protocol::dom::SetFileInputFilesParams;
use chromiumoxide::cdp::browser_protocol::input::{
    DispatchMouseEventParams, DispatchMouseEventType,
};
use chromiumoxide::Page;
use serde_json::Value as JsonValue;
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

/// 요소 출현 대기 중 재확인 간격
const ELEMENT_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// DOM 드라이버
pub struct DomDriver {
    page: Page,
}

impl DomDriver {
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// JS 평가 후 JSON 값 반환
    pub async fn eval(&self, js_code: impl Into<String>) -> Result<JsonValue> {
        let result = self.page.evaluate(js_code.into()).await?;
        let json_value = result.into_value()?;
        Ok(json_value)
    }

    async fn eval_bool(&self, js_code: String) -> Result<bool> {
        let value = self.eval(js_code).await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    /// 메인 문서에서 요소 존재 확인
    pub async fn exists(&self, selector: &str) -> Result<bool> {
        self.eval_bool(exists_js(None, selector)).await
    }

    /// 요소가 나타날 때까지 상한 시간 안에서 대기. 시간 초과면 false
    pub async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<bool> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            if self.exists(selector).await? {
                return Ok(true);
            }
            if tokio::time::Instant::now() >= deadline {
                debug!("요소 대기 시간 초과: {}", selector);
                return Ok(false);
            }
            sleep(ELEMENT_POLL_INTERVAL).await;
        }
    }

    /// 요소 클릭. 요소가 없으면 오류
    pub async fn click(&self, selector: &str) -> Result<()> {
        let clicked = self
            .eval_bool(click_js(None, selector))
            .await
            .with_context(|| format!("클릭 실행 실패: {}", selector))?;
        if !clicked {
            bail!("클릭할 요소를 찾을 수 없음: {}", selector);
        }
        Ok(())
    }

    /// 최선 노력 클릭. 요소가 없어도 오류로 보지 않고 false 만 돌려준다.
    /// 호출부가 반환값을 의도적으로 무시하는 정리용 동작에 쓴다
    pub async fn click_if_present(&self, selector: &str) -> bool {
        match self.eval_bool(click_js(None, selector)).await {
            Ok(clicked) => clicked,
            Err(e) => {
                debug!("최선 노력 클릭 실패 ({}): {}", selector, e);
                false
            }
        }
    }

    /// 입력란 값 채우기 (input 이벤트 포함)
    pub async fn fill(&self, selector: &str, value: &str) -> Result<()> {
        let filled = self
            .eval_bool(fill_js(None, selector, value))
            .await
            .with_context(|| format!("입력 실행 실패: {}", selector))?;
        if !filled {
            bail!("입력란을 찾을 수 없음: {}", selector);
        }
        Ok(())
    }

    /// select 값 지정 (change 이벤트 포함)
    pub async fn select(&self, selector: &str, value: &str) -> Result<()> {
        let selected = self
            .eval_bool(select_js(None, selector, value))
            .await
            .with_context(|| format!("선택 실행 실패: {}", selector))?;
        if !selected {
            bail!("선택 상자를 찾을 수 없음: {}", selector);
        }
        Ok(())
    }

    /// iframe 범위 드라이버
    pub fn frame<'a>(&'a self, frame_selector: &'a str) -> FrameDriver<'a> {
        FrameDriver {
            driver: self,
            frame_selector,
        }
    }

    /// 파일 입력란에 로컬 파일을 지정한다
    pub async fn upload(&self, selector: &str, file_path: &str) -> Result<()> {
        let element = self
            .page
            .find_element(selector)
            .await
            .with_context(|| format!("파일 입력란을 찾을 수 없음: {}", selector))?;

        let params = SetFileInputFilesParams::builder()
            .files(vec![file_path.to_string()])
            .backend_node_id(element.backend_node_id)
            .build()
            .map_err(|e| anyhow::anyhow!("setFileInputFiles 파라미터 구성 실패: {}", e))?;

        self.page
            .execute(params)
            .await
            .with_context(|| format!("파일 지정 실패: {}", file_path))?;
        Ok(())
    }

    /// 포인터 이동 이벤트 전달 (세션 유지용 활동 신호)
    pub async fn move_mouse(&self, x: f64, y: f64) -> Result<()> {
        let params = DispatchMouseEventParams::builder()
            .r#type(DispatchMouseEventType::MouseMoved)
            .x(x)
            .y(y)
            .build()
            .map_err(|e| anyhow::anyhow!("마우스 이벤트 구성 실패: {}", e))?;

        self.page.execute(params).await.context("마우스 이동 실패")?;
        Ok(())
    }

    /// 문서 새로고침
    pub async fn reload(&self) -> Result<()> {
        self.page.reload().await.context("새로고침 실패")?;
        Ok(())
    }

    /// 지정 URL 로 이동
    pub async fn goto(&self, url: &str) -> Result<()> {
        self.page
            .goto(url)
            .await
            .with_context(|| format!("이동 실패: {}", url))?;
        Ok(())
    }
}

/// iframe 내부를 조작하는 범위 드라이버
///
/// 같은 출처 iframe 전제. contentDocument 가 아직 없으면 요소 없음과
/// 동일하게 처리한다
pub struct FrameDriver<'a> {
    driver: &'a DomDriver,
    frame_selector: &'a str,
}

impl FrameDriver<'_> {
    pub async fn exists(&self, selector: &str) -> Result<bool> {
        self.driver
            .eval_bool(exists_js(Some(self.frame_selector), selector))
            .await
    }

    pub async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<bool> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            if self.exists(selector).await? {
                return Ok(true);
            }
            if tokio::time::Instant::now() >= deadline {
                debug!(
                    "iframe 요소 대기 시간 초과: {} ({})",
                    selector, self.frame_selector
                );
                return Ok(false);
            }
            sleep(ELEMENT_POLL_INTERVAL).await;
        }
    }

    pub async fn click(&self, selector: &str) -> Result<()> {
        let clicked = self
            .driver
            .eval_bool(click_js(Some(self.frame_selector), selector))
            .await
            .with_context(|| format!("iframe 클릭 실행 실패: {}", selector))?;
        if !clicked {
            bail!("iframe 안에서 요소를 찾을 수 없음: {}", selector);
        }
        Ok(())
    }

    pub async fn fill(&self, selector: &str, value: &str) -> Result<()> {
        let filled = self
            .driver
            .eval_bool(fill_js(Some(self.frame_selector), selector, value))
            .await
            .with_context(|| format!("iframe 입력 실행 실패: {}", selector))?;
        if !filled {
            bail!("iframe 안에서 입력란을 찾을 수 없음: {}", selector);
        }
        Ok(())
    }

    /// 최선 노력 클릭. 요소나 iframe 이 없어도 false 만 돌려준다
    pub async fn click_if_present(&self, selector: &str) -> bool {
        match self
            .driver
            .eval_bool(click_js(Some(self.frame_selector), selector))
            .await
        {
            Ok(clicked) => clicked,
            Err(e) => {
                debug!("iframe 최선 노력 클릭 실패 ({}): {}", selector, e);
                false
            }
        }
    }
}

// ========== JS 조각 구성 ==========

/// 문자열을 JS 리터럴로 안전하게 인용
fn js_str(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

/// 대상 문서 결정부. iframe 지정 시 contentDocument 를 경유한다
fn doc_js(frame: Option<&str>) -> String {
    match frame {
        Some(frame_sel) => format!(
            "const f = document.querySelector({}); const d = f && f.contentDocument; if (!d) return false;",
            js_str(frame_sel)
        ),
        None => "const d = document;".to_string(),
    }
}

fn exists_js(frame: Option<&str>, selector: &str) -> String {
    format!(
        "(function() {{ {} return !!d.querySelector({}); }})()",
        doc_js(frame),
        js_str(selector)
    )
}

fn click_js(frame: Option<&str>, selector: &str) -> String {
    format!(
        "(function() {{ {} const el = d.querySelector({}); if (!el) return false; el.click(); return true; }})()",
        doc_js(frame),
        js_str(selector)
    )
}

fn fill_js(frame: Option<&str>, selector: &str, value: &str) -> String {
    format!(
        "(function() {{ {} const el = d.querySelector({}); if (!el) return false; \
         el.value = {}; \
         el.dispatchEvent(new Event('input', {{ bubbles: true }})); \
         el.dispatchEvent(new Event('change', {{ bubbles: true }})); \
         return true; }})()",
        doc_js(frame),
        js_str(selector),
        js_str(value)
    )
}

fn select_js(frame: Option<&str>, selector: &str, value: &str) -> String {
    format!(
        "(function() {{ {} const el = d.querySelector({}); if (!el) return false; \
         el.value = {}; \
         el.dispatchEvent(new Event('change', {{ bubbles: true }})); \
         return true; }})()",
        doc_js(frame),
        js_str(selector),
        js_str(value)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn js_str_escapes_quotes() {
        assert_eq!(js_str("a\"b"), r#""a\"b""#);
        assert_eq!(js_str("서울"), "\"서울\"");
    }

    #[test]
    fn frame_snippets_guard_missing_content_document() {
        let js = exists_js(Some("iframe#addr_popup"), "#row");
        assert!(js.contains("contentDocument"));
        assert!(js.contains("if (!d) return false;"));
    }

    #[test]
    fn fill_snippet_dispatches_input_events() {
        let js = fill_js(None, "#txt_phone", "010-0000-0000");
        assert!(js.contains("new Event('input'"));
        assert!(js.contains("new Event('change'"));
    }
}
