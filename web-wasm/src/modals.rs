//! パス表示モーダルとクリップボード

use gloo::utils::{document, window};
use nas_viewer_common::NotificationKind;
use tracing::{error, info};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Element, HtmlDocument, HtmlElement, HtmlTextAreaElement};

use crate::dom;
use crate::error::{UiError, UiResult};
use crate::notify::notify;

pub const PATH_MODAL_ID: &str = "pathModal";
const MODAL_PATH_ID: &str = "modal-path";

pub fn show_path_modal(file_path: &str) {
    dom::set_text(MODAL_PATH_ID, file_path);
    if let Some(modal) = dom::by_id_opt::<HtmlElement>(PATH_MODAL_ID) {
        let _ = dom::set_display(&modal, "block");
    }
}

pub fn close_modal() {
    if let Some(modal) = dom::by_id_opt::<HtmlElement>(PATH_MODAL_ID) {
        let _ = dom::set_display(&modal, "none");
    }
}

/// 表示中のパスをクリップボードへコピーする
///
/// Clipboard API が使えない・失敗した場合は `execCommand('copy')` で再試行
pub async fn copy_path() {
    let Some(path_element) = dom::by_id_opt::<Element>(MODAL_PATH_ID) else {
        return;
    };
    let text = path_element.text_content().unwrap_or_default();

    match write_clipboard(&text).await {
        Ok(()) => on_copied(&text),
        Err(e) => {
            error!("クリップボードコピー失敗: {}", e);
            match fallback_copy_text(&text) {
                Ok(true) => on_copied(&text),
                Ok(false) => {
                    error!("フォールバックコピー失敗: execCommand('copy') が false を返しました");
                    notify("コピーに失敗しました", NotificationKind::Error);
                }
                Err(e) => {
                    error!("フォールバックコピー失敗: {}", e);
                    notify("コピーに失敗しました", NotificationKind::Error);
                }
            }
        }
    }
}

fn on_copied(text: &str) {
    info!("コピー: {}", text);
    notify("パスをクリップボードにコピーしました", NotificationKind::Success);
    close_modal();
}

async fn write_clipboard(text: &str) -> UiResult<()> {
    let navigator = window().navigator();
    let clipboard = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard"))?;
    if clipboard.is_undefined() || clipboard.is_null() {
        return Err(UiError::Js("Clipboard API が利用できません".into()));
    }

    let write_text = js_sys::Reflect::get(&clipboard, &JsValue::from_str("writeText"))?
        .dyn_into::<js_sys::Function>()?;
    let promise = write_text
        .call1(&clipboard, &JsValue::from_str(text))?
        .dyn_into::<js_sys::Promise>()?;
    JsFuture::from(promise).await?;
    Ok(())
}

/// 画面外の `<textarea>` を選択してコピーする。`<textarea>` は必ず取り除く
fn fallback_copy_text(text: &str) -> UiResult<bool> {
    let document = document();
    let body = document.body().ok_or(UiError::MissingElement("body"))?;

    let textarea = document.create_element("textarea")?.unchecked_into::<HtmlTextAreaElement>();
    textarea.set_value(text);
    textarea
        .style()
        .set_css_text("position: fixed; left: -999999px; top: -999999px;");
    body.append_child(&textarea)?;

    let _ = textarea.focus();
    textarea.select();
    let copied = document.unchecked_ref::<HtmlDocument>().exec_command("copy");
    textarea.remove();

    Ok(copied?)
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use gloo::utils::body;
    use js_sys::Object;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const PATH: &str = "/nas/cam1/2024/01/15/a.mp4";

    fn mount_modal() -> Element {
        let root = document().create_element("div").unwrap();
        root.set_inner_html(&format!(
            r#"<div id="pathModal" style="display: block"><span id="modal-path">{}</span></div>"#,
            PATH
        ));
        body().append_child(&root).unwrap();
        root
    }

    /// インスタンスにプロパティを定義してプロトタイプ側を隠す
    fn stub(target: &Object, name: &str, value: &JsValue) {
        let descriptor = Object::new();
        js_sys::Reflect::set(&descriptor, &JsValue::from_str("value"), value).unwrap();
        js_sys::Reflect::set(&descriptor, &JsValue::from_str("configurable"), &JsValue::TRUE).unwrap();
        Object::define_property(target, &JsValue::from_str(name), &descriptor);
    }

    fn unstub(target: &Object, name: &str) {
        js_sys::Reflect::delete_property(target, &JsValue::from_str(name)).unwrap();
    }

    /// Clipboard API を無効にし、`execCommand` を差し替えてコピーする
    async fn copy_with_exec_command(body_js: &str) {
        let navigator = window().navigator();
        let document = document();
        stub(&navigator, "clipboard", &JsValue::UNDEFINED);
        stub(&document, "execCommand", &js_sys::Function::new_no_args(body_js));

        copy_path().await;

        unstub(&document, "execCommand");
        unstub(&navigator, "clipboard");
    }

    fn assert_single_notification(text: &str) {
        let shown = dom::query_all(".notification");
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].text_content().as_deref(), Some(text));
    }

    fn path_modal() -> HtmlElement {
        dom::by_id(PATH_MODAL_ID).unwrap()
    }

    #[wasm_bindgen_test]
    async fn test_fallback_copy_success_closes_modal() {
        let root = mount_modal();
        copy_with_exec_command("return true;").await;

        assert!(dom::query_all("textarea").is_empty());
        assert_single_notification("パスをクリップボードにコピーしました");
        assert!(dom::is_hidden(&path_modal()));
        root.remove();
    }

    #[wasm_bindgen_test]
    async fn test_exec_command_false_is_failure() {
        let root = mount_modal();
        copy_with_exec_command("return false;").await;

        assert!(dom::query_all("textarea").is_empty());
        assert_single_notification("コピーに失敗しました");
        assert!(!dom::is_hidden(&path_modal()));
        root.remove();
    }

    #[wasm_bindgen_test]
    async fn test_exec_command_throw_is_failure() {
        let root = mount_modal();
        copy_with_exec_command("throw new Error('denied');").await;

        assert!(dom::query_all("textarea").is_empty());
        assert_single_notification("コピーに失敗しました");
        root.remove();
    }

    #[wasm_bindgen_test]
    fn test_fallback_always_removes_textarea() {
        let _ = fallback_copy_text(PATH);
        assert!(dom::query_all("textarea").is_empty());
    }
}
