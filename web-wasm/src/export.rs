//! CSVエクスポート

use gloo::timers::callback::Timeout;
use gloo::utils::document;
use nas_viewer_common::{csv_file_name, table_to_csv, CSV_MIME_TYPE};
use tracing::{error, info};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement};

use crate::dom;
use crate::error::{UiError, UiResult};

/// 表示中のテーブル（ヘッダー含む）をCSVでダウンロードする
pub fn export_to_csv() {
    if let Err(e) = try_export() {
        error!("CSVエクスポートに失敗: {}", e);
    }
}

fn try_export() -> UiResult<()> {
    let Some(table) = dom::query_one(".data-table") else {
        return Ok(());
    };

    let rows: Vec<Vec<String>> = dom::query_all_in(&table, "tr")
        .iter()
        .map(|tr| dom::query_all_in(tr, "th, td").iter().map(dom::text_of).collect())
        .collect();
    let content = table_to_csv(&rows);

    let today = dom::utc_today().ok_or_else(|| UiError::Js("現在日付を取得できません".into()))?;
    let file_name = csv_file_name(today);
    download(&content, &file_name)?;

    info!("CSVエクスポート: {} ({}行)", file_name, rows.len());
    Ok(())
}

fn download(content: &str, file_name: &str) -> UiResult<()> {
    let parts = js_sys::Array::of1(&JsValue::from_str(content));
    let options = BlobPropertyBag::new();
    options.set_type(CSV_MIME_TYPE);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    let document = document();
    let body = document.body().ok_or(UiError::MissingElement("body"))?;
    let link = document.create_element("a")?.unchecked_into::<HtmlAnchorElement>();
    link.set_href(&url);
    link.set_download(file_name);
    link.style().set_property("visibility", "hidden")?;

    body.append_child(&link)?;
    link.click();
    link.remove();

    // クリック処理が終わってから解放する
    Timeout::new(0, move || {
        let _ = web_sys::Url::revoke_object_url(&url);
    })
    .forget();
    Ok(())
}
