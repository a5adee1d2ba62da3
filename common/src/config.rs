//! クライアント設定
//!
//! ページに埋め込まれた `<script id="app-config" type="application/json">` から読み込む。
//! 省略された項目は既定値になる。

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::notifier::NotificationKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientConfig {
    pub refresh_url: String,
    pub data_url: String,
    pub video_url: String,
    pub available_dates_url: String,

    /// チェックボックス変更の待ち時間
    pub debounce_ms: u32,
    pub search_reload_delay_ms: u32,
    pub refresh_reload_delay_ms: u32,
    pub focus_delay_ms: u32,
    pub notification_ms: u32,
    pub error_notification_ms: u32,
    pub exit_animation_ms: u32,
    pub clock_refresh_ms: u32,

    /// 分割読み込み
    pub preload: bool,
    pub batch_limit: u32,
    pub batch_pause_ms: u32,
    pub batch_start_delay_ms: u32,

    /// 日付列（1始まり）
    pub date_column: u32,

    /// データが存在する日付。未指定ならAPIから取得する
    pub available_dates: Option<Vec<String>>,

    /// `error` / `warn` / `info` / `debug` / `trace`
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            refresh_url: "/api/refresh".into(),
            data_url: "/api/data".into(),
            video_url: "/api/video".into(),
            available_dates_url: "/api/available-dates".into(),
            debounce_ms: 300,
            search_reload_delay_ms: 1000,
            refresh_reload_delay_ms: 1500,
            focus_delay_ms: 100,
            notification_ms: 3000,
            error_notification_ms: 5000,
            exit_animation_ms: 300,
            clock_refresh_ms: 60_000,
            preload: false,
            batch_limit: 100,
            batch_pause_ms: 500,
            batch_start_delay_ms: 1000,
            date_column: 6,
            available_dates: None,
            log_level: "info".into(),
        }
    }
}

impl ClientConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ClientConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.batch_limit == 0 {
            return Err(Error::Config("batchLimit は1以上を指定してください".into()));
        }
        if self.date_column == 0 {
            return Err(Error::Config("dateColumn は1以上を指定してください".into()));
        }
        Ok(())
    }

    /// 通知の表示時間（エラーは長め）
    pub fn notification_duration_ms(&self, kind: NotificationKind) -> u32 {
        match kind {
            NotificationKind::Error => self.error_notification_ms,
            _ => self.notification_ms,
        }
    }
}
