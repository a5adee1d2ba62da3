//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP error! status: {status}")]
    Http { status: u16, detail: Option<String> },

    #[error("Network error: {0}")]
    Network(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// 利用者向けメッセージ
    ///
    /// HTTPエラーでサーバーが `detail` を返していればそれを、
    /// それ以外は `fallback` を返す
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Error::Http { detail: Some(detail), .. } if !detail.is_empty() => detail.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_http() {
        let error = Error::Http { status: 500, detail: None };
        assert_eq!(format!("{}", error), "HTTP error! status: 500");
    }

    #[test]
    fn test_error_display_network() {
        let error = Error::Network("TypeError: Failed to fetch".to_string());
        assert_eq!(format!("{}", error), "Network error: TypeError: Failed to fetch");
    }

    #[test]
    fn test_error_from_url() {
        let url_error = url::Url::parse("not a url").unwrap_err();
        let error: Error = url_error.into();
        assert!(matches!(error, Error::Url(_)));
    }

    #[test]
    fn test_user_message_prefers_detail() {
        let error = Error::Http {
            status: 400,
            detail: Some("日付の形式が不正です".to_string()),
        };
        assert_eq!(error.user_message("検索に失敗しました"), "日付の形式が不正です");
    }

    #[test]
    fn test_user_message_fallback() {
        let http = Error::Http { status: 500, detail: None };
        assert_eq!(http.user_message("検索に失敗しました"), "検索に失敗しました");

        let empty = Error::Http { status: 500, detail: Some(String::new()) };
        assert_eq!(empty.user_message("検索に失敗しました"), "検索に失敗しました");

        let network = Error::Network("connection refused".to_string());
        assert_eq!(network.user_message("検索に失敗しました"), "検索に失敗しました");
    }

    #[test]
    fn test_invalid_date_from_parse() {
        // 解釈できない日付は入力値をそのまま保持する
        match crate::date::DateKey::parse(" 2024/13/40 ") {
            Err(Error::InvalidDate(raw)) => assert_eq!(raw, "2024/13/40"),
            other => panic!("unexpected: {:?}", other),
        }
        assert_eq!(
            format!("{}", Error::InvalidDate("不明".to_string())),
            "Invalid date: 不明"
        );
    }
}
