//! 通知表示
//!
//! 画面右上に1件だけ表示する。新しい通知は古い通知の要素とタイマーを破棄してから出す。

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use gloo::utils::document;
use nas_viewer_common::{NotificationId, NotificationKind};
use tracing::{debug, error};
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::controller::{config, drop_later, with_controller};
use crate::dom;
use crate::error::{UiError, UiResult};

/// 表示中の通知要素と、その要素に紐づくリスナー・タイマー
pub(crate) struct NotificationView {
    id: NotificationId,
    element: HtmlElement,
    _click: EventListener,
    auto_dismiss: Option<Timeout>,
    removal: Option<Timeout>,
}

/// 通知を表示する（失敗はログのみ）
pub fn notify(message: impl Into<String>, kind: NotificationKind) {
    if let Err(e) = show_notification(message.into(), kind) {
        error!("通知の表示に失敗: {}", e);
    }
}

pub fn show_notification(message: String, kind: NotificationKind) -> UiResult<()> {
    let config = config();
    let (previous, shown) = with_controller(|c| {
        let previous = c.notification_view.take();
        let shown = c.notifier.show(message, kind, js_sys::Date::now());
        (previous, shown)
    })
    .ok_or(UiError::Busy)?;

    if let Some(previous) = previous {
        previous.element.remove();
        drop_later(previous);
    }
    // 取りこぼした要素も掃除する
    for stray in dom::query_all(".notification") {
        stray.remove();
    }

    let notification = shown.notification;
    let id = notification.id;
    let element = document().create_element("div")?.unchecked_into::<HtmlElement>();
    element.set_class_name(&format!("notification notification-{}", notification.kind));
    element.set_text_content(Some(&notification.message));
    element.style().set_css_text(&format!(
        "position: fixed; top: 20px; right: 20px; background: {}; color: {}; \
         padding: 12px 20px; border-radius: 5px; z-index: 1000; \
         animation: slideIn 0.3s ease-out; max-width: 300px; cursor: pointer;",
        notification.kind.background_color(),
        notification.kind.text_color(),
    ));
    document()
        .body()
        .ok_or(UiError::MissingElement("body"))?
        .append_child(&element)?;

    let click = EventListener::new(&element, "click", move |_| begin_exit(id));
    let duration = config.notification_duration_ms(notification.kind);
    let auto_dismiss = Timeout::new(duration, move || begin_exit(id));

    let view = NotificationView {
        id,
        element,
        _click: click,
        auto_dismiss: Some(auto_dismiss),
        removal: None,
    };
    with_controller(move |c| c.notification_view = Some(view));
    debug!("通知 [{}] {}", notification.kind, notification.message);
    Ok(())
}

/// 退場アニメーションを始め、終了後に要素を取り除く
fn begin_exit(id: NotificationId) {
    let exit_ms = config().exit_animation_ms;
    with_controller(|c| {
        if !c.notifier.begin_exit(id) {
            return;
        }
        let Some(view) = c.notification_view.as_mut().filter(|v| v.id == id) else {
            return;
        };
        let animation = format!("slideOut {}ms ease-out", exit_ms);
        if let Err(e) = view.element.style().set_property("animation", &animation) {
            debug!("アニメーション設定に失敗: {:?}", e);
        }
        if let Some(timer) = view.auto_dismiss.take() {
            drop_later(timer);
        }
        view.removal = Some(Timeout::new(exit_ms, move || remove(id)));
    });
}

fn remove(id: NotificationId) {
    let view = with_controller(|c| {
        if !c.notifier.remove(id) {
            return None;
        }
        c.notification_view.take()
    })
    .flatten();

    if let Some(view) = view {
        if view.element.is_connected() {
            view.element.remove();
        }
        drop_later(view);
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_second_notification_replaces_first() {
        notify("1件目", NotificationKind::Info);
        notify("2件目", NotificationKind::Error);

        let shown = dom::query_all(".notification");
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].text_content().as_deref(), Some("2件目"));
        assert!(shown[0].class_name().contains("notification-error"));
    }
}
