//! 画面全体で共有する状態
//!
//! 通知・動画セッション・行選択・リクエスト世代・タイマーを1か所に持つ。
//! 状態は `thread_local` の `RefCell` に置く。
//! 借用を `.await` をまたいで保持しないこと。

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::{Interval, Timeout};
use nas_viewer_common::{AvailableDates, ClientConfig, Notifier, RequestTracker, RowSelection, VideoModal};
use tracing::{error, warn};
use url::Url;

use crate::dom;
use crate::notify::NotificationView;
use crate::video::VideoBindings;

#[derive(Default)]
pub struct Controller {
    pub notifier: Notifier,
    pub(crate) notification_view: Option<NotificationView>,

    pub video: VideoModal,
    pub(crate) video_bindings: Option<VideoBindings>,

    pub selection: RowSelection,
    pub search_requests: RequestTracker,
    pub refresh_requests: RequestTracker,
    pub available_dates: AvailableDates,

    pub(crate) debounce: Option<Timeout>,
    pub(crate) pending_navigation: Option<Timeout>,
    pub(crate) clock: Option<Interval>,
    pub(crate) listeners: Vec<EventListener>,
}

thread_local! {
    static CONFIG: RefCell<Rc<ClientConfig>> = RefCell::new(Rc::new(ClientConfig::default()));
    static CONTROLLER: RefCell<Controller> = RefCell::new(Controller::default());
}

pub fn config() -> Rc<ClientConfig> {
    CONFIG.with(|c| c.borrow().clone())
}

pub fn set_config(config: ClientConfig) {
    CONFIG.with(|c| *c.borrow_mut() = Rc::new(config));
}

/// コントローラを可変借用して `f` を実行する
///
/// 借用中に呼ばれた場合は警告を出して `None`
pub fn with_controller<R>(f: impl FnOnce(&mut Controller) -> R) -> Option<R> {
    CONTROLLER.with(|cell| match cell.try_borrow_mut() {
        Ok(mut controller) => Some(f(&mut controller)),
        Err(_) => {
            warn!("コントローラが使用中のため処理をスキップしました");
            None
        }
    })
}

/// 実行中のコールバックが自分自身を破棄しないよう、破棄を次のタスクに回す
pub fn drop_later<T: 'static>(value: T) {
    wasm_bindgen_futures::spawn_local(async move {
        drop(value);
    });
}

/// 遅延実行するページ遷移
pub enum Navigation {
    To(Url),
    Reload,
}

/// 一定時間後にページ遷移する。予約済みの遷移は取り消す
pub fn schedule_navigation(navigation: Navigation, delay_ms: u32) {
    let timer = Timeout::new(delay_ms, move || {
        let result = match &navigation {
            Navigation::To(url) => dom::navigate(url),
            Navigation::Reload => dom::reload(),
        };
        if let Err(e) = result {
            error!("ページ遷移に失敗: {}", e);
        }
    });
    with_controller(|c| c.pending_navigation.replace(timer));
}
