//! UI層のエラー型

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug)]
pub enum UiError {
    #[error(transparent)]
    Common(#[from] nas_viewer_common::Error),

    #[error("JS error: {0}")]
    Js(String),

    #[error("要素が見つかりません: {0}")]
    MissingElement(&'static str),

    #[error("コントローラが使用中です")]
    Busy,
}

impl UiError {
    /// 利用者向けメッセージ（サーバーの `detail` があればそれを使う）
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            UiError::Common(e) => e.user_message(fallback),
            _ => fallback.to_string(),
        }
    }
}

impl From<JsValue> for UiError {
    fn from(value: JsValue) -> Self {
        UiError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl From<url::ParseError> for UiError {
    fn from(e: url::ParseError) -> Self {
        UiError::Common(e.into())
    }
}

impl From<serde_wasm_bindgen::Error> for UiError {
    fn from(e: serde_wasm_bindgen::Error) -> Self {
        UiError::Js(e.to_string())
    }
}

pub type UiResult<T> = std::result::Result<T, UiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use nas_viewer_common::Error;

    #[test]
    fn test_user_message_from_http_detail() {
        let err = UiError::Common(Error::Http {
            status: 400,
            detail: Some("不正な日付です".to_string()),
        });
        assert_eq!(err.user_message("検索に失敗しました"), "不正な日付です");
    }

    #[test]
    fn test_user_message_fallback() {
        assert_eq!(UiError::Busy.user_message("検索に失敗しました"), "検索に失敗しました");
        assert_eq!(
            UiError::MissingElement("videoModal").user_message("失敗"),
            "失敗"
        );
    }

    #[test]
    fn test_missing_element_display() {
        let err = UiError::MissingElement("video-player");
        assert_eq!(format!("{}", err), "要素が見つかりません: video-player");
    }
}
