//! 起動処理
//!
//! 設定とログを初期化し、DOM読み込み後にイベントを結び付ける。
//! HTML側の `onclick` から呼ばれる関数は `window` に公開する。

use gloo::events::{EventListener, EventListenerOptions};
use gloo::utils::{document, window};
use nas_viewer_common::ClientConfig;
use tracing::{info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event, HtmlElement, KeyboardEvent, Node};

use crate::controller::{config, set_config, with_controller};
use crate::logging::init_logging;
use crate::modals::PATH_MODAL_ID;
use crate::table::CLICKABLE_ROWS_SELECTOR;
use crate::video::VIDEO_MODAL_ID;
use crate::{clock, dom, export, filters, modals, pagination, preload, refresh, table, video};

const CONFIG_SCRIPT_ID: &str = "app-config";

/// キーボードショートカット
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// Ctrl+R
    Refresh,
    /// Ctrl+F
    ApplyFilters,
    /// Escape
    CloseModals,
}

pub fn shortcut_for(ctrl: bool, key: &str) -> Option<Shortcut> {
    match (ctrl, key) {
        (true, "r") => Some(Shortcut::Refresh),
        (true, "f") => Some(Shortcut::ApplyFilters),
        (_, "Escape") => Some(Shortcut::CloseModals),
        _ => None,
    }
}

pub fn start() {
    let loaded = load_config();
    let config = match &loaded {
        Ok(config) => config.clone(),
        Err(_) => ClientConfig::default(),
    };
    init_logging(&config.log_level);
    if let Err(e) = loaded {
        warn!("設定の読み込みに失敗したため既定値を使用します: {}", e);
    }
    set_config(config);
    expose_globals();

    if document().ready_state() == "loading" {
        let listener = EventListener::once(&document(), "DOMContentLoaded", |_| on_dom_ready());
        with_controller(move |c| c.listeners.push(listener));
    } else {
        on_dom_ready();
    }
}

/// `<script id="app-config" type="application/json">` を読む。無ければ既定値
fn load_config() -> nas_viewer_common::Result<ClientConfig> {
    match dom::by_id_opt::<Element>(CONFIG_SCRIPT_ID) {
        Some(script) => ClientConfig::from_json(&script.text_content().unwrap_or_default()),
        None => Ok(ClientConfig::default()),
    }
}

fn on_dom_ready() {
    let config = config();

    let listeners = initialize_event_listeners(config.date_column as usize);
    with_controller(move |c| c.listeners.extend(listeners));

    filters::apply_filters();
    clock::start_clock();
    table::update_statistics();
    table::emphasize_error_categories();

    spawn_local(filters::setup_date_input_restrictions());
    if config.preload {
        spawn_local(preload::load_data_in_batches());
    }
    info!("初期化完了 ({}行)", table::body_rows().len());
}

fn initialize_event_listeners(date_column: usize) -> Vec<EventListener> {
    let mut listeners = Vec::new();

    if let Some(button) = dom::query_one(".search-btn") {
        listeners.push(EventListener::new(&button, "click", |_| spawn_local(filters::handle_search())));
    }

    for (index, row) in dom::query_all(CLICKABLE_ROWS_SELECTOR).into_iter().enumerate() {
        let Ok(row) = row.dyn_into::<HtmlElement>() else {
            continue;
        };
        let target = row.clone();
        listeners.push(EventListener::new(&row, "click", move |event| {
            table::handle_row_click(event, &target, index, date_column)
        }));
    }

    for checkbox in dom::query_all("input[type=\"checkbox\"]") {
        listeners.push(EventListener::new(&checkbox, "change", |_| filters::debounce_filters()));
    }

    if let Some(close) = dom::query_one(".close") {
        listeners.push(EventListener::new(&close, "click", |_| modals::close_modal()));
    }

    listeners.push(EventListener::new(&window(), "click", on_window_click));
    // preventDefault するため passive にしない
    listeners.push(EventListener::new_with_options(
        &document(),
        "keydown",
        EventListenerOptions::enable_prevent_default(),
        on_keydown,
    ));

    listeners
}

/// モーダルの背景クリックで閉じる
fn on_window_click(event: &Event) {
    let Some(target) = event.target().and_then(|t| t.dyn_into::<Node>().ok()) else {
        return;
    };
    if is_element(&target, PATH_MODAL_ID) {
        modals::close_modal();
    }
    if is_element(&target, VIDEO_MODAL_ID) {
        video::close_video_modal();
    }
}

fn is_element(target: &Node, id: &str) -> bool {
    dom::by_id_opt::<Node>(id).is_some_and(|node| node.is_same_node(Some(target)))
}

fn on_keydown(event: &Event) {
    let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
        return;
    };
    match shortcut_for(event.ctrl_key(), &event.key()) {
        Some(Shortcut::Refresh) => {
            event.prevent_default();
            spawn_local(refresh::refresh_data());
        }
        Some(Shortcut::ApplyFilters) => {
            event.prevent_default();
            filters::apply_filters();
        }
        Some(Shortcut::CloseModals) => {
            video::close_video_modal();
            modals::close_modal();
        }
        None => {}
    }
}

/// ページ番号として受け付ける数値（1未満・非有限は拒否）
pub fn page_from_number(value: f64) -> Option<u32> {
    (value.is_finite() && value >= 1.0).then(|| value.min(f64::from(u32::MAX)) as u32)
}

pub fn page_from_str(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok().filter(|&page| page >= 1)
}

fn page_arg(value: &JsValue) -> Option<u32> {
    match value.as_f64() {
        Some(number) => page_from_number(number),
        None => value.as_string().as_deref().and_then(page_from_str),
    }
}

fn string_arg(value: &JsValue) -> String {
    value.as_string().unwrap_or_default()
}

fn set_global(name: &str, function: JsValue) {
    if let Err(e) = js_sys::Reflect::set(&window(), &JsValue::from_str(name), &function) {
        warn!("{} の公開に失敗: {:?}", name, e);
    }
}

fn expose_globals() {
    set_global(
        "refreshData",
        Closure::<dyn Fn()>::new(|| spawn_local(refresh::refresh_data())).into_js_value(),
    );
    set_global(
        "copyPath",
        Closure::<dyn Fn()>::new(|| spawn_local(modals::copy_path())).into_js_value(),
    );
    set_global(
        "showPathModal",
        Closure::<dyn Fn(JsValue)>::new(|path: JsValue| modals::show_path_modal(&string_arg(&path)))
            .into_js_value(),
    );
    set_global("closeModal", Closure::<dyn Fn()>::new(modals::close_modal).into_js_value());
    set_global(
        "playVideo",
        Closure::<dyn Fn(JsValue, JsValue, JsValue, JsValue)>::new(
            |full: JsValue, relative: JsValue, device: JsValue, datetime: JsValue| {
                video::play_video(
                    string_arg(&full),
                    string_arg(&relative),
                    string_arg(&device),
                    string_arg(&datetime),
                )
            },
        )
        .into_js_value(),
    );
    set_global("closeVideoModal", Closure::<dyn Fn()>::new(video::close_video_modal).into_js_value());
    set_global("applyFilters", Closure::<dyn Fn()>::new(filters::apply_filters).into_js_value());
    set_global("exportToCSV", Closure::<dyn Fn()>::new(export::export_to_csv).into_js_value());
    set_global(
        "handleSearch",
        Closure::<dyn Fn()>::new(|| spawn_local(filters::handle_search())).into_js_value(),
    );
    set_global(
        "navigateToPage",
        Closure::<dyn Fn(JsValue)>::new(|page: JsValue| match page_arg(&page) {
            Some(page) => pagination::navigate_to_page(page),
            None => warn!("不正なページ番号: {:?}", page),
        })
        .into_js_value(),
    );
    set_global("nextPage", Closure::<dyn Fn()>::new(pagination::next_page).into_js_value());
    set_global("previousPage", Closure::<dyn Fn()>::new(pagination::previous_page).into_js_value());
    set_global(
        "clearInput",
        Closure::<dyn Fn(JsValue)>::new(|id: JsValue| filters::clear_input(&string_arg(&id))).into_js_value(),
    );
    set_global(
        "loadDataInBatches",
        Closure::<dyn Fn()>::new(|| spawn_local(preload::load_data_in_batches())).into_js_value(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortcut_for() {
        assert_eq!(shortcut_for(true, "r"), Some(Shortcut::Refresh));
        assert_eq!(shortcut_for(true, "f"), Some(Shortcut::ApplyFilters));
        assert_eq!(shortcut_for(false, "Escape"), Some(Shortcut::CloseModals));
        assert_eq!(shortcut_for(true, "Escape"), Some(Shortcut::CloseModals));
    }

    #[test]
    fn test_shortcut_requires_ctrl() {
        assert_eq!(shortcut_for(false, "r"), None);
        assert_eq!(shortcut_for(false, "f"), None);
        // Shift で大文字になった場合は対象外
        assert_eq!(shortcut_for(true, "R"), None);
        assert_eq!(shortcut_for(true, "x"), None);
    }

    #[test]
    fn test_page_arguments() {
        assert_eq!(page_from_number(3.0), Some(3));
        assert_eq!(page_from_number(2.7), Some(2));
        assert_eq!(page_from_number(0.0), None);
        assert_eq!(page_from_number(f64::NAN), None);
        assert_eq!(page_from_str(" 4 "), Some(4));
        assert_eq!(page_from_str("0"), None);
        assert_eq!(page_from_str("abc"), None);
    }
}
