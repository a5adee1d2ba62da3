//! 動画モーダルの状態管理
//!
//! `Closed → Open(Loading) → Open(Ready) | Open(Errored)`、`Open(*) → Closed`。
//! 開くたびに世代番号を進め、古い世代のメディアイベントは無視する。

use crate::date::split_duration;
use crate::notifier::NotificationKind;

pub const MSG_LOAD_ERROR: &str = "動画の読み込みに失敗しました。ファイルが存在しない可能性があります。";
pub const MSG_LOAD_START: &str = "動画を読み込み中...";
pub const MSG_CAN_PLAY: &str = "動画の準備が完了しました";
pub const MSG_INIT_FAILED: &str = "動画再生機能の初期化に失敗しました";

/// 再生対象
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoSession {
    pub full_path: String,
    pub relative_path: String,
    pub device: String,
    pub datetime: String,
}

impl VideoSession {
    /// ダウンロード時のファイル名
    pub fn download_name(&self) -> &str {
        &self.datetime
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VideoState {
    #[default]
    Closed,
    Loading,
    Ready,
    Errored,
}

impl VideoState {
    pub fn is_open(&self) -> bool {
        !matches!(self, VideoState::Closed)
    }
}

/// セッション世代
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionToken(u64);

/// `<video>` 要素から届くイベント
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaEvent {
    LoadStart,
    CanPlay,
    Error,
    LoadedMetadata { duration: f64 },
}

/// イベントに対する応答
#[derive(Debug, Clone, PartialEq)]
pub enum Narration {
    Notify(String, NotificationKind),
    /// ログ出力のみ
    Log(String),
}

#[derive(Debug, Default)]
pub struct VideoModal {
    generation: u64,
    state: VideoState,
    session: Option<VideoSession>,
}

impl VideoModal {
    pub fn new() -> Self {
        Self::default()
    }

    /// 新しいセッションを開く（前のセッションは破棄）
    pub fn open(&mut self, session: VideoSession) -> SessionToken {
        self.generation += 1;
        self.state = VideoState::Loading;
        self.session = Some(session);
        SessionToken(self.generation)
    }

    /// 閉じる。開いていた場合は `true`
    ///
    /// 世代を進めるので、閉じた後に届いたイベントは無視される
    pub fn close(&mut self) -> bool {
        let was_open = self.state.is_open();
        self.generation += 1;
        self.state = VideoState::Closed;
        self.session = None;
        was_open
    }

    pub fn state(&self) -> VideoState {
        self.state
    }

    pub fn session(&self) -> Option<&VideoSession> {
        self.session.as_ref()
    }

    pub fn is_current(&self, token: SessionToken) -> bool {
        self.state.is_open() && token.0 == self.generation
    }

    /// メディアイベントを処理する
    ///
    /// エラーでもモーダルは閉じない
    pub fn handle(&mut self, token: SessionToken, event: MediaEvent) -> Option<Narration> {
        if !self.is_current(token) {
            return None;
        }

        match event {
            MediaEvent::Error => {
                self.state = VideoState::Errored;
                Some(Narration::Notify(MSG_LOAD_ERROR.to_string(), NotificationKind::Error))
            }
            MediaEvent::LoadStart => {
                self.state = VideoState::Loading;
                Some(Narration::Notify(MSG_LOAD_START.to_string(), NotificationKind::Info))
            }
            MediaEvent::CanPlay => {
                self.state = VideoState::Ready;
                Some(Narration::Notify(MSG_CAN_PLAY.to_string(), NotificationKind::Success))
            }
            MediaEvent::LoadedMetadata { duration } => split_duration(duration)
                .map(|(minutes, seconds)| Narration::Log(format!("動画時間: {}分{}秒", minutes, seconds))),
        }
    }
}
