//! ページ移動

use nas_viewer_common::pagination::{next_page_url, page_url, previous_page_url};
use tracing::error;

use crate::dom;
use crate::error::UiResult;

pub fn navigate_to_page(page: u32) {
    report(dom::current_url().and_then(|url| dom::navigate(&page_url(&url, page))));
}

pub fn next_page() {
    report(dom::current_url().and_then(|url| dom::navigate(&next_page_url(&url))));
}

/// 1ページ目では何もしない
pub fn previous_page() {
    let result = dom::current_url().and_then(|url| match previous_page_url(&url) {
        Some(target) => dom::navigate(&target),
        None => Ok(()),
    });
    report(result);
}

fn report(result: UiResult<()>) {
    if let Err(e) = result {
        error!("ページ移動に失敗: {}", e);
    }
}
