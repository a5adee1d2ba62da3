//! DOM操作ヘルパー

use chrono::{NaiveDate, NaiveDateTime};
use gloo::utils::{document, window};
use url::Url;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, HtmlInputElement};

use crate::error::{UiError, UiResult};

/// IDで要素を取得する（無ければ `MissingElement`）
pub fn by_id<T: JsCast>(id: &'static str) -> UiResult<T> {
    by_id_opt(id).ok_or(UiError::MissingElement(id))
}

pub fn by_id_opt<T: JsCast>(id: &str) -> Option<T> {
    document().get_element_by_id(id)?.dyn_into::<T>().ok()
}

/// セレクタに一致する要素を全て取得する
pub fn query_all(selector: &str) -> Vec<Element> {
    query_all_in(&document().into(), selector)
}

pub fn query_all_in(root: &web_sys::Node, selector: &str) -> Vec<Element> {
    let list = if let Some(element) = root.dyn_ref::<Element>() {
        element.query_selector_all(selector)
    } else if let Some(doc) = root.dyn_ref::<web_sys::Document>() {
        doc.query_selector_all(selector)
    } else {
        return Vec::new();
    };

    let Ok(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn query_one(selector: &str) -> Option<Element> {
    document().query_selector(selector).ok().flatten()
}

pub fn set_display(element: &HtmlElement, value: &str) -> UiResult<()> {
    element.style().set_property("display", value)?;
    Ok(())
}

pub fn is_hidden(element: &HtmlElement) -> bool {
    element
        .style()
        .get_property_value("display")
        .map(|v| v == "none")
        .unwrap_or(false)
}

pub fn set_text(id: &str, text: &str) {
    if let Some(element) = by_id_opt::<Element>(id) {
        element.set_text_content(Some(text));
    }
}

pub fn text_of(element: &Element) -> String {
    element.text_content().unwrap_or_default().trim().to_string()
}

/// 入力欄の値（無ければ空文字）
pub fn input_value(id: &str) -> String {
    by_id_opt::<HtmlInputElement>(id)
        .map(|input| input.value())
        .unwrap_or_default()
}

/// チェックされたチェックボックスの値
pub fn checked_values(selector: &str) -> Vec<String> {
    query_all(selector)
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlInputElement>().ok())
        .filter(|cb| cb.checked())
        .map(|cb| cb.value())
        .collect()
}

pub fn current_url() -> UiResult<Url> {
    let href = window().location().href()?;
    Ok(Url::parse(&href)?)
}

/// ページ遷移（フルリロード）
pub fn navigate(url: &Url) -> UiResult<()> {
    window().location().set_href(url.as_str())?;
    Ok(())
}

pub fn reload() -> UiResult<()> {
    window().location().reload()?;
    Ok(())
}

/// 端末のローカル時刻
pub fn local_now() -> Option<NaiveDateTime> {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())?
        .and_hms_opt(now.get_hours(), now.get_minutes(), now.get_seconds())
}

/// UTCの日付（ファイル名用）
pub fn utc_today() -> Option<NaiveDate> {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(now.get_utc_full_year() as i32, now.get_utc_month() + 1, now.get_utc_date())
}
