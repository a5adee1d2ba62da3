//! 絞り込みエンジン
//!
//! カテゴリ・機器名のチェック状態と日付範囲から各行の表示可否を決める。
//! カテゴリ・機器名の選択が空の場合は「制限なし」として全件を通す。

use std::collections::BTreeSet;

use tracing::warn;

use crate::date::{parse_optional, DateKey};
use crate::types::Row;

/// 絞り込み条件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub categories: BTreeSet<String>,
    pub devices: BTreeSet<String>,
    pub start_date: Option<DateKey>,
    pub end_date: Option<DateKey>,
}

impl FilterCriteria {
    /// 入力欄の生の値から条件を組み立てる
    ///
    /// 日付が解釈できない場合はその側を指定なしとして扱う
    pub fn from_inputs<C, D>(categories: C, devices: D, start_date: &str, end_date: &str) -> Self
    where
        C: IntoIterator<Item = String>,
        D: IntoIterator<Item = String>,
    {
        Self {
            categories: categories.into_iter().collect(),
            devices: devices.into_iter().collect(),
            start_date: lenient_bound(start_date),
            end_date: lenient_bound(end_date),
        }
    }

    pub fn has_date_range(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some()
    }

    /// 日付が範囲内か（両端を含む）
    ///
    /// 時刻付きのセルは日付部分で比較する。
    /// 日付が空・解釈不能の場合は表示側に倒す
    pub fn date_in_range(&self, raw_date: &str) -> bool {
        if !self.has_date_range() || raw_date.trim().is_empty() {
            return true;
        }

        let date = match DateKey::parse_leading(raw_date) {
            Ok(date) => date,
            Err(e) => {
                warn!("日付フィルターの処理中にエラーが発生: {}", e);
                return true;
            }
        };

        if matches!(&self.start_date, Some(start) if date < *start) {
            return false;
        }
        if matches!(&self.end_date, Some(end) if date > *end) {
            return false;
        }
        true
    }

    pub fn matches(&self, row: &Row) -> bool {
        let show_category = self.categories.is_empty() || self.categories.contains(&row.category);
        let show_device = self.devices.is_empty() || self.devices.contains(&row.device);
        show_category && show_device && self.date_in_range(&row.date)
    }
}

fn lenient_bound(raw: &str) -> Option<DateKey> {
    parse_optional(raw).unwrap_or_else(|e| {
        warn!("日付フィルターの処理中にエラーが発生: {}", e);
        None
    })
}

/// 絞り込み結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
    /// 入力行と同じ並びの表示可否
    pub visibility: Vec<bool>,
    pub visible_count: usize,
    pub total: usize,
}

impl FilterOutcome {
    /// 表示件数が全件と異なるときだけ出す通知文
    pub fn summary(&self) -> Option<String> {
        (self.visible_count != self.total)
            .then(|| format!("{}/{}件のデータを表示中", self.visible_count, self.total))
    }

    /// 表示対象の行を取り出す
    pub fn visible_rows<'a>(&self, rows: &'a [Row]) -> Vec<&'a Row> {
        rows.iter()
            .zip(&self.visibility)
            .filter_map(|(row, &visible)| visible.then_some(row))
            .collect()
    }
}

/// 全行に条件を適用する
pub fn apply_filters(rows: &[Row], criteria: &FilterCriteria) -> FilterOutcome {
    let visibility: Vec<bool> = rows.iter().map(|row| criteria.matches(row)).collect();
    let visible_count = visibility.iter().filter(|&&v| v).count();

    FilterOutcome {
        visibility,
        visible_count,
        total: rows.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(category: &str, device: &str, date: &str) -> Row {
        Row {
            category: category.to_string(),
            device: device.to_string(),
            date: date.to_string(),
            ..Default::default()
        }
    }

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn range(start: &str, end: &str) -> FilterCriteria {
        FilterCriteria::from_inputs(Vec::new(), Vec::new(), start, end)
    }

    #[test]
    fn test_empty_criteria_shows_all() {
        let rows = vec![row("エラー", "cam1", "2024-01-01"), row("通常", "cam2", "")];
        let outcome = apply_filters(&rows, &FilterCriteria::default());
        assert_eq!(outcome.visibility, vec![true, true]);
        assert_eq!(outcome.visible_count, 2);
        assert_eq!(outcome.summary(), None);
    }

    #[test]
    fn test_category_restriction() {
        let criteria = FilterCriteria {
            categories: set(&["エラー"]),
            ..Default::default()
        };
        assert!(criteria.matches(&row("エラー", "cam1", "")));
        assert!(!criteria.matches(&row("通常", "cam1", "")));
    }

    #[test]
    fn test_device_restriction() {
        let criteria = FilterCriteria {
            devices: set(&["cam2"]),
            ..Default::default()
        };
        assert!(!criteria.matches(&row("通常", "cam1", "")));
        assert!(criteria.matches(&row("通常", "cam2", "")));
    }

    #[test]
    fn test_date_range_inclusive() {
        let criteria = range("2024-01-10", "2024-01-20");
        assert!(criteria.date_in_range("2024-01-10"));
        assert!(criteria.date_in_range("2024-01-20"));
        assert!(criteria.date_in_range("2024/01/15"));
        assert!(!criteria.date_in_range("2024/01/05"));
        assert!(!criteria.date_in_range("2024-01-21"));
    }

    #[test]
    fn test_date_range_open_sides() {
        let from = range("2024-01-10", "");
        assert!(from.date_in_range("2030-12-31"));
        assert!(!from.date_in_range("2024-01-09"));

        let until = range("", "2024-01-10");
        assert!(until.date_in_range("1999-01-01"));
        assert!(!until.date_in_range("2024-01-11"));
    }

    #[test]
    fn test_date_with_time_uses_date_part() {
        let criteria = range("2024-01-10", "2024-01-20");
        assert!(!criteria.date_in_range("2024/01/05 10:00"));
        assert!(criteria.date_in_range("2024/01/20 23:59"));
        assert!(!criteria.date_in_range("2024-01-21T00:00:00"));
    }

    #[test]
    fn test_missing_or_malformed_row_date_is_kept() {
        let criteria = range("2024-01-10", "2024-01-20");
        assert!(criteria.date_in_range(""));
        assert!(criteria.date_in_range("不明"));
    }

    #[test]
    fn test_malformed_bound_is_ignored() {
        let criteria = range("abc", "2024-01-20");
        assert_eq!(criteria.start_date, None);
        assert!(criteria.date_in_range("2000-01-01"));
        assert!(!criteria.date_in_range("2024-02-01"));
    }

    #[test]
    fn test_summary_when_partially_visible() {
        let rows = vec![row("エラー", "cam1", ""), row("通常", "cam1", ""), row("通常", "cam2", "")];
        let criteria = FilterCriteria {
            categories: set(&["エラー"]),
            ..Default::default()
        };
        let outcome = apply_filters(&rows, &criteria);
        assert_eq!(outcome.visible_count, 1);
        assert_eq!(outcome.total, 3);
        assert_eq!(outcome.summary().as_deref(), Some("1/3件のデータを表示中"));
        assert_eq!(outcome.visible_rows(&rows), vec![&rows[0]]);
    }

    #[test]
    fn test_apply_filters_empty_rows() {
        let outcome = apply_filters(&[], &range("2024-01-01", ""));
        assert_eq!(outcome.total, 0);
        assert_eq!(outcome.visible_count, 0);
        assert_eq!(outcome.summary(), None);
    }
}
