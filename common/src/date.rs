//! 日付ユーティリティ
//!
//! 絞り込みでは日付を `YYYY-MM-DD` のゼロ埋め文字列に正規化して比較する。
//! ゼロ埋めされていれば文字列順と時系列順が一致する。

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{Error, Result};

/// 画面表示用の日時フォーマット
pub const DISPLAY_DATETIME_FORMAT: &str = "%Y年%m月%d日 %H時%M分";

/// 正規化済みの日付キー（`YYYY-MM-DD`）
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(String);

impl DateKey {
    /// `YYYY-MM-DD` / `YYYY/MM/DD` を受け付け、ゼロ埋めした形に揃える
    ///
    /// # Examples
    /// ```
    /// use nas_viewer_common::DateKey;
    ///
    /// let key = DateKey::parse("2024/1/5").unwrap();
    /// assert_eq!(key.as_str(), "2024-01-05");
    /// ```
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let normalized = trimmed.replace('/', "-");
        let date = NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
            .map_err(|_| Error::InvalidDate(trimmed.to_string()))?;
        Ok(Self::from_date(date))
    }

    /// 先頭の日付部分だけを読む（`2024/01/05 10:00` → `2024-01-05`）
    ///
    /// 日付の後ろは空白か `T` で区切られている必要がある
    pub fn parse_leading(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let normalized = trimmed.replace('/', "-");
        let invalid = || Error::InvalidDate(trimmed.to_string());
        let (date, rest) = NaiveDate::parse_and_remainder(&normalized, "%Y-%m-%d").map_err(|_| invalid())?;
        if !rest.is_empty() && !rest.starts_with(|c: char| c.is_whitespace() || c == 'T') {
            return Err(invalid());
        }
        Ok(Self::from_date(date))
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.format("%Y-%m-%d").to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for DateKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 空文字を「指定なし」として扱う日付入力の解釈
pub fn parse_optional(raw: &str) -> Result<Option<DateKey>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    DateKey::parse(raw).map(Some)
}

/// 時計表示用の文字列（例: `2024年01月15日 09時05分`）
pub fn format_display_datetime(datetime: &NaiveDateTime) -> String {
    datetime.format(DISPLAY_DATETIME_FORMAT).to_string()
}

/// 動画の長さ（秒）を分・秒に分解する
///
/// 長さが取得できない（NaN / 無限大 / 負数）場合は `None`
pub fn split_duration(seconds: f64) -> Option<(u64, u64)> {
    if !seconds.is_finite() || seconds < 0.0 {
        return None;
    }
    let total = seconds.floor() as u64;
    Some((total / 60, total % 60))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hyphen() {
        let key = DateKey::parse("2024-01-15").unwrap();
        assert_eq!(key.as_str(), "2024-01-15");
    }

    #[test]
    fn test_parse_slash() {
        let key = DateKey::parse("2024/01/15").unwrap();
        assert_eq!(key.as_str(), "2024-01-15");
    }

    #[test]
    fn test_parse_pads_single_digits() {
        // ゼロ埋めされていない入力も時系列順に比較できる形にする
        let key = DateKey::parse("2024/1/5").unwrap();
        assert_eq!(key.as_str(), "2024-01-05");
        assert!(key < DateKey::parse("2024-01-10").unwrap());
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let key = DateKey::parse("  2024-03-01\n").unwrap();
        assert_eq!(key.to_string(), "2024-03-01");
    }

    #[test]
    fn test_parse_leading_ignores_time() {
        assert_eq!(DateKey::parse_leading("2024/01/05 10:00").unwrap().as_str(), "2024-01-05");
        assert_eq!(DateKey::parse_leading("2024-1-5T08:30:00").unwrap().as_str(), "2024-01-05");
        assert_eq!(DateKey::parse_leading("2024/01/15").unwrap().as_str(), "2024-01-15");
        assert!(DateKey::parse_leading("2024/01/05x").is_err());
        assert!(DateKey::parse_leading("10:00").is_err());
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(DateKey::parse("昨日"), Err(Error::InvalidDate(_))));
        assert!(matches!(DateKey::parse("2024-13-01"), Err(Error::InvalidDate(_))));
    }

    #[test]
    fn test_parse_optional_empty() {
        assert_eq!(parse_optional("").unwrap(), None);
        assert_eq!(parse_optional("   ").unwrap(), None);
        assert_eq!(
            parse_optional("2024-02-29").unwrap(),
            Some(DateKey::parse("2024-02-29").unwrap())
        );
    }

    #[test]
    fn test_format_display_datetime() {
        let dt = NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(9, 3, 0)
            .unwrap();
        assert_eq!(format_display_datetime(&dt), "2024年01月05日 09時03分");
    }

    #[test]
    fn test_split_duration() {
        assert_eq!(split_duration(125.9), Some((2, 5)));
        assert_eq!(split_duration(59.0), Some((0, 59)));
        assert_eq!(split_duration(f64::NAN), None);
        assert_eq!(split_duration(f64::INFINITY), None);
    }
}
