//! 通知の状態管理
//!
//! 画面に出る通知は常に1件だけ。新しい通知は古い通知を取り除いてから表示する。
//! 表示・退場・削除のタイミングは呼び出し側のタイマーが駆動し、
//! ここでは「まだ現在の通知か」を判定して二重削除を防ぐ。

use std::fmt;

/// 通知の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NotificationKind {
    #[default]
    Success,
    Error,
    Info,
    Warning,
}

impl NotificationKind {
    /// 文字列から種類を得る（未知の値は `Success`）
    pub fn parse(kind: &str) -> Self {
        match kind {
            "error" => NotificationKind::Error,
            "info" => NotificationKind::Info,
            "warning" => NotificationKind::Warning,
            _ => NotificationKind::Success,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
            NotificationKind::Info => "info",
            NotificationKind::Warning => "warning",
        }
    }

    pub fn background_color(&self) -> &'static str {
        match self {
            NotificationKind::Success => "#28a745",
            NotificationKind::Error => "#dc3545",
            NotificationKind::Info => "#17a2b8",
            NotificationKind::Warning => "#ffc107",
        }
    }

    pub fn text_color(&self) -> &'static str {
        match self {
            NotificationKind::Warning => "#212529",
            _ => "white",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 通知ID（表示ごとに単調増加）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NotificationId(u64);

/// 通知1件
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub kind: NotificationKind,
    /// 生成時刻（ミリ秒）
    pub created_at: f64,
}

/// 表示状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Visible,
    Leaving,
}

/// `Notifier::show` の結果
#[derive(Debug, Clone, PartialEq)]
pub struct Shown {
    /// 置き換えられた通知
    pub replaced: Option<NotificationId>,
    pub notification: Notification,
}

#[derive(Debug, Default)]
pub struct Notifier {
    next_id: u64,
    current: Option<(Notification, Phase)>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, message: impl Into<String>, kind: NotificationKind, now: f64) -> Shown {
        self.next_id += 1;
        let notification = Notification {
            id: NotificationId(self.next_id),
            message: message.into(),
            kind,
            created_at: now,
        };
        let replaced = self
            .current
            .replace((notification.clone(), Phase::Visible))
            .map(|(old, _)| old.id);

        Shown { replaced, notification }
    }

    /// 退場アニメーションを開始する
    ///
    /// 現在表示中かつ未退場の場合のみ `true`
    pub fn begin_exit(&mut self, id: NotificationId) -> bool {
        match &mut self.current {
            Some((current, phase)) if current.id == id && *phase == Phase::Visible => {
                *phase = Phase::Leaving;
                true
            }
            _ => false,
        }
    }

    /// 通知を取り除く（現在の通知でなければ何もしない）
    pub fn remove(&mut self, id: NotificationId) -> bool {
        if self.is_current(id) {
            self.current = None;
            true
        } else {
            false
        }
    }

    /// 現在の通知を即座に取り除く
    pub fn dismiss(&mut self) -> Option<NotificationId> {
        self.current.take().map(|(n, _)| n.id)
    }

    pub fn is_current(&self, id: NotificationId) -> bool {
        matches!(&self.current, Some((n, _)) if n.id == id)
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref().map(|(n, _)| n)
    }

    pub fn phase(&self) -> Option<Phase> {
        self.current.as_ref().map(|(_, p)| *p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse_fallback() {
        assert_eq!(NotificationKind::parse("error"), NotificationKind::Error);
        assert_eq!(NotificationKind::parse("warning"), NotificationKind::Warning);
        assert_eq!(NotificationKind::parse("danger"), NotificationKind::Success);
        assert_eq!(NotificationKind::parse(""), NotificationKind::Success);
    }

    #[test]
    fn test_kind_colors() {
        assert_eq!(NotificationKind::Info.background_color(), "#17a2b8");
        assert_eq!(NotificationKind::Warning.text_color(), "#212529");
        assert_eq!(NotificationKind::Error.text_color(), "white");
    }

    #[test]
    fn test_show_twice_keeps_only_second() {
        let mut notifier = Notifier::new();
        let first = notifier.show("1件目", NotificationKind::Info, 0.0);
        let second = notifier.show("2件目", NotificationKind::Success, 10.0);

        assert_eq!(first.replaced, None);
        assert_eq!(second.replaced, Some(first.notification.id));
        assert_eq!(notifier.current().map(|n| n.message.as_str()), Some("2件目"));
    }

    #[test]
    fn test_stale_timer_cannot_remove_successor() {
        let mut notifier = Notifier::new();
        let first = notifier.show("古い通知", NotificationKind::Error, 0.0).notification;
        let second = notifier.show("新しい通知", NotificationKind::Info, 1.0).notification;

        assert!(!notifier.begin_exit(first.id));
        assert!(!notifier.remove(first.id));
        assert!(notifier.is_current(second.id));
    }

    #[test]
    fn test_exit_and_remove_idempotent() {
        let mut notifier = Notifier::new();
        let id = notifier.show("完了", NotificationKind::Success, 0.0).notification.id;

        assert!(notifier.begin_exit(id));
        assert!(!notifier.begin_exit(id));
        assert_eq!(notifier.phase(), Some(Phase::Leaving));

        assert!(notifier.remove(id));
        assert!(!notifier.remove(id));
        assert!(notifier.current().is_none());
    }

    #[test]
    fn test_dismiss_without_notification() {
        let mut notifier = Notifier::new();
        assert_eq!(notifier.dismiss(), None);
    }
}
