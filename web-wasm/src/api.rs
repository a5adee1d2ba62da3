//! サーバーAPI呼び出し（fetch）

use gloo::utils::window;
use nas_viewer_common::{decode_response, Error};
use serde::de::DeserializeOwned;
use tracing::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use crate::error::UiResult;

/// リクエストを送り、ステータスと本文を返す
///
/// 通信自体の失敗は `Error::Network`
pub async fn fetch_text(method: &str, url: &str, json_content: bool) -> UiResult<(u16, String)> {
    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::SameOrigin);

    let request = Request::new_with_str_and_init(url, &opts)?;
    if json_content {
        request.headers().set("Content-Type", "application/json")?;
    }

    debug!("{} {}", method, url);
    let resp_value = JsFuture::from(window().fetch_with_request(&request))
        .await
        .map_err(|e| Error::Network(format!("{:?}", e)))?;
    let resp: Response = resp_value.dyn_into()?;

    let text = JsFuture::from(resp.text()?)
        .await
        .map_err(|e| Error::Network(format!("{:?}", e)))?;
    Ok((resp.status(), text.as_string().unwrap_or_default()))
}

pub async fn get_json<T: DeserializeOwned>(url: &str) -> UiResult<T> {
    let (status, body) = fetch_text("GET", url, false).await?;
    Ok(decode_response(status, &body)?)
}

/// 本文なしのPOST
pub async fn post_json<T: DeserializeOwned>(url: &str) -> UiResult<T> {
    let (status, body) = fetch_text("POST", url, true).await?;
    Ok(decode_response(status, &body)?)
}
