//! 動画モーダル
//!
//! `<video>` 要素は1つだけなので、開くたびに前の再生状態とイベントリスナーを破棄する。
//! リスナーはセッション世代を持ち、古い世代のイベントは状態機械側で捨てられる。

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use nas_viewer_common::video::MSG_INIT_FAILED;
use nas_viewer_common::{video_url, MediaEvent, Narration, NotificationKind, SessionToken, VideoSession};
use tracing::{debug, error, info};
use web_sys::{HtmlAnchorElement, HtmlElement, HtmlSourceElement, HtmlVideoElement};

use crate::controller::{config, drop_later, with_controller};
use crate::dom;
use crate::error::UiResult;
use crate::notify::notify;

pub const VIDEO_MODAL_ID: &str = "videoModal";

/// 現在のセッションに紐づくリスナーとフォーカス用タイマー
pub(crate) struct VideoBindings {
    _listeners: Vec<EventListener>,
    _focus: Option<Timeout>,
}

struct VideoElements {
    modal: HtmlElement,
    player: HtmlVideoElement,
    source: HtmlSourceElement,
}

impl VideoElements {
    fn find() -> UiResult<Self> {
        Ok(Self {
            modal: dom::by_id(VIDEO_MODAL_ID)?,
            player: dom::by_id("video-player")?,
            source: dom::by_id("video-source")?,
        })
    }

    /// 再生を止めてソースを外す
    fn reset(&self) -> UiResult<()> {
        self.player.pause()?;
        self.player.set_current_time(0.0);
        self.player.remove_attribute("src")?;
        self.source.remove_attribute("src")?;
        Ok(())
    }
}

pub fn play_video(full_path: String, relative_path: String, device: String, datetime: String) {
    let session = VideoSession {
        full_path,
        relative_path,
        device,
        datetime,
    };
    if let Err(e) = open_video(session) {
        error!("動画再生の初期化エラー: {}", e);
        notify(MSG_INIT_FAILED, NotificationKind::Error);
    }
}

fn open_video(session: VideoSession) -> UiResult<()> {
    let elements = VideoElements::find()?;
    let config = config();

    // 前のセッションのリスナーは新しい src を設定する前に外す
    if let Some(Some(previous)) = with_controller(|c| c.video_bindings.take()) {
        drop(previous);
    }
    elements.reset()?;

    dom::set_text("video-device", &session.device);
    dom::set_text("video-datetime", &session.datetime);
    dom::set_text("video-path", &session.relative_path);

    let url = video_url(&config.video_url, &session.relative_path);
    elements.source.set_src(&url);
    elements.player.load();

    if let Some(download) = dom::by_id_opt::<HtmlAnchorElement>("video-download") {
        download.set_href(&url);
        download.set_download(session.download_name());
    }
    dom::set_display(&elements.modal, "block")?;

    info!("動画再生: {}", session.full_path);
    let Some(token) = with_controller(|c| c.video.open(session)) else {
        return Ok(());
    };

    let player = &elements.player;
    let listeners = vec![
        media_listener(player, player, "error", token, |_| MediaEvent::Error),
        media_listener(&elements.source, player, "error", token, |_| MediaEvent::Error),
        media_listener(player, player, "loadstart", token, |_| MediaEvent::LoadStart),
        media_listener(player, player, "canplay", token, |_| MediaEvent::CanPlay),
        media_listener(player, player, "loadedmetadata", token, |player| MediaEvent::LoadedMetadata {
            duration: player.duration(),
        }),
    ];

    let player = elements.player.clone();
    let focus = Timeout::new(config.focus_delay_ms, move || {
        if with_controller(|c| c.video.is_current(token)) == Some(true) {
            let _ = player.focus();
        }
    });

    let bindings = VideoBindings {
        _listeners: listeners,
        _focus: Some(focus),
    };
    with_controller(move |c| c.video_bindings = Some(bindings));
    Ok(())
}

fn media_listener(
    target: &web_sys::EventTarget,
    player: &HtmlVideoElement,
    event_type: &'static str,
    token: SessionToken,
    to_event: fn(&HtmlVideoElement) -> MediaEvent,
) -> EventListener {
    let player = player.clone();
    EventListener::new(target, event_type, move |_| on_media_event(token, to_event(&player)))
}

fn on_media_event(token: SessionToken, event: MediaEvent) {
    let narration = with_controller(|c| c.video.handle(token, event)).flatten();
    match narration {
        Some(Narration::Notify(message, kind)) => {
            if kind == NotificationKind::Error {
                error!("動画エラー: {:?}", event);
            }
            notify(message, kind);
        }
        Some(Narration::Log(message)) => info!("{}", message),
        None => debug!("破棄された動画イベント: {:?}", event),
    }
}

/// 動画モーダルを閉じる（要素が無ければ何もしない）
pub fn close_video_modal() {
    let Ok(elements) = VideoElements::find() else {
        return;
    };
    if let Err(e) = elements.reset() {
        debug!("動画のリセットに失敗: {}", e);
    }
    if let Err(e) = dom::set_display(&elements.modal, "none") {
        debug!("動画モーダルの非表示に失敗: {}", e);
    }

    let bindings = with_controller(|c| {
        c.video.close();
        c.video_bindings.take()
    })
    .flatten();
    if let Some(bindings) = bindings {
        drop_later(bindings);
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use gloo::utils::{body, document};
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn mount_modal() {
        let modal = document().create_element("div").unwrap();
        modal.set_id(VIDEO_MODAL_ID);
        modal.set_inner_html(
            r#"<video id="video-player"><source id="video-source" src="/api/video?path=a.mp4"></video>"#,
        );
        body().append_child(&modal).unwrap();
    }

    #[wasm_bindgen_test]
    fn test_close_twice_leaves_modal_hidden() {
        mount_modal();
        close_video_modal();
        close_video_modal();

        let modal: HtmlElement = dom::by_id(VIDEO_MODAL_ID).unwrap();
        let source = document().get_element_by_id("video-source").unwrap();
        let player = document()
            .get_element_by_id("video-player")
            .unwrap()
            .dyn_into::<HtmlVideoElement>()
            .unwrap();

        assert!(dom::is_hidden(&modal));
        assert!(source.get_attribute("src").is_none());
        assert!(player.get_attribute("src").is_none());
        assert_eq!(with_controller(|c| c.video.state().is_open()), Some(false));

        modal.remove();
    }
}
