//! 브라우저 접속
//!
//! 브라우저 프로세스는 외부에서 이미 띄워져 있고, 본 서비스는 디버깅 포트로
//! 붙기만 한다. 연결은 제출 호출·세션 유지 틱마다 새로 맺고 작업이 끝나면
//! 버린다. 오래 쥐고 있는 연결 소유권은 없다.

use anyhow::{Context, Result};
use chromiumoxide::{Browser, Page};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info};

/// 접속 직후 브라우저 상태 동기화를 기다리는 시간
const CONNECT_SETTLE: Duration = Duration::from_millis(300);

/// 디버깅 포트로 접속해 위택스 탭을 찾는다
///
/// 제목에 `portal_title` 이 들어간 탭을 먼저 찾고, 없으면 URL 로 찾고,
/// 그래도 없으면 새 탭을 열어 포털로 이동한다.
pub async fn connect_to_portal_page(
    port: u16,
    portal_url: &str,
    portal_title: &str,
) -> Result<(Browser, Page)> {
    let browser_url = format!("http://localhost:{}", port);
    debug!("브라우저 접속 중: {}", browser_url);

    let (browser, mut handler) = Browser::connect(&browser_url)
        .await
        .with_context(|| format!("브라우저 접속 실패 (포트: {})", port))?;

    // 브라우저 이벤트는 백그라운드에서 소비
    tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    sleep(CONNECT_SETTLE).await;

    let pages = browser.pages().await.context("탭 목록 조회 실패")?;
    debug!("탭 {} 개 확인", pages.len());

    // 1순위: 제목 매칭
    for p in pages.iter() {
        if let Ok(Some(title)) = p.get_title().await {
            if title.contains(portal_title) {
                info!("✓ 포털 탭 발견: {}", title);
                return Ok((browser, p.clone()));
            }
        }
    }

    // 2순위: URL 매칭
    for p in pages.iter() {
        if let Ok(Some(url)) = p.url().await {
            if url.starts_with(portal_url) {
                info!("✓ 포털 탭 발견 (URL): {}", url);
                return Ok((browser, p.clone()));
            }
        }
    }

    // 없으면 새 탭을 열어 포털로 이동
    info!("포털 탭이 없어 새로 연다: {}", portal_url);
    let page = browser
        .new_page(portal_url)
        .await
        .with_context(|| format!("포털 페이지 열기 실패: {}", portal_url))?;

    Ok((browser, page))
}
