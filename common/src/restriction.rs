//! 日付入力の制限
//!
//! データが存在する日付だけを選べるようにする。
//! 一覧は受け取った時点でソート・重複除去する。

use std::collections::BTreeSet;

use tracing::warn;

use crate::date::DateKey;

/// 入力欄に設定する範囲
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateBounds {
    pub min: DateKey,
    pub max: DateKey,
}

/// 入力値の検証結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateCheck {
    /// 空欄（指定なし）
    Empty,
    Allowed,
    /// データがない日付。入力欄を空に戻す
    Rejected,
}

pub const MSG_NO_DATA_FOR_DATE: &str = "選択された日付にはデータが存在しません";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailableDates {
    dates: BTreeSet<DateKey>,
}

impl AvailableDates {
    /// 解釈できない日付は警告を出して読み飛ばす
    pub fn new<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let dates = raw
            .into_iter()
            .filter_map(|s| match DateKey::parse(s.as_ref()) {
                Ok(date) => Some(date),
                Err(e) => {
                    warn!("利用可能日付を読み飛ばしました: {}", e);
                    None
                }
            })
            .collect();
        Self { dates }
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// 空の場合は制限しない
    pub fn bounds(&self) -> Option<DateBounds> {
        let min = self.dates.first()?.clone();
        let max = self.dates.last()?.clone();
        Some(DateBounds { min, max })
    }

    pub fn check(&self, value: &str) -> DateCheck {
        if value.trim().is_empty() {
            return DateCheck::Empty;
        }
        match DateKey::parse(value) {
            Ok(date) if self.dates.contains(&date) => DateCheck::Allowed,
            _ => DateCheck::Rejected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsorted_input_is_sorted() {
        let dates = AvailableDates::new(["2024-01-20", "2024-01-03", "2024-01-10", "2024-01-03"]);
        let bounds = dates.bounds().unwrap();
        assert_eq!(bounds.min.as_str(), "2024-01-03");
        assert_eq!(bounds.max.as_str(), "2024-01-20");
        assert_eq!(dates.len(), 3);
    }

    #[test]
    fn test_empty_has_no_bounds() {
        let dates = AvailableDates::new(Vec::<String>::new());
        assert!(dates.is_empty());
        assert_eq!(dates.bounds(), None);
    }

    #[test]
    fn test_check() {
        let dates = AvailableDates::new(["2024-01-03", "2024/01/10"]);
        assert_eq!(dates.check(""), DateCheck::Empty);
        assert_eq!(dates.check("2024-01-10"), DateCheck::Allowed);
        assert_eq!(dates.check("2024-01-04"), DateCheck::Rejected);
        assert_eq!(dates.check("garbage"), DateCheck::Rejected);
    }

    #[test]
    fn test_invalid_entries_are_skipped() {
        let dates = AvailableDates::new(["2024-01-03", "unknown"]);
        assert_eq!(dates.len(), 1);
    }
}
