//! 絞り込み・ページ送りのシナリオテスト

use std::collections::BTreeSet;

use nas_viewer_common::pagination::{next_page_url, previous_page_url};
use nas_viewer_common::{apply_filters, FilterCriteria, Row};
use url::Url;

fn row(id: &str, category: &str, device: &str, date: &str) -> Row {
    Row {
        id: id.to_string(),
        category: category.to_string(),
        device: device.to_string(),
        date: date.to_string(),
        ..Default::default()
    }
}

fn sample_rows() -> Vec<Row> {
    vec![
        row("1", "エラー", "cam1", "2024/01/05"),
        row("2", "通常", "cam1", "2024/01/10"),
        row("3", "エラー", "cam2", "2024/01/15"),
        row("4", "通常", "cam3", "2024/01/20"),
        row("5", "エラー", "cam3", "2024/01/25"),
    ]
}

/// カテゴリ「エラー」のみ選択、機器名は未選択
#[test]
fn test_error_category_only() {
    let rows = sample_rows();
    let criteria = FilterCriteria::from_inputs(vec!["エラー".to_string()], Vec::new(), "", "");
    let outcome = apply_filters(&rows, &criteria);

    let ids: Vec<&str> = outcome.visible_rows(&rows).iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "3", "5"]);
    assert_eq!(outcome.visible_count, 3);
    assert_eq!(outcome.summary().as_deref(), Some("3/5件のデータを表示中"));
}

/// 日付範囲 2024-01-10〜2024-01-20
#[test]
fn test_date_range_scenario() {
    let criteria = FilterCriteria::from_inputs(Vec::new(), Vec::new(), "2024-01-10", "2024-01-20");
    assert!(criteria.matches(&row("a", "通常", "cam1", "2024/01/15")));
    assert!(!criteria.matches(&row("b", "通常", "cam1", "2024/01/05")));
}

/// カテゴリ・機器名が未選択なら日付条件だけで決まる
#[test]
fn test_empty_sets_reduce_to_date_range() {
    let rows = sample_rows();
    let criteria = FilterCriteria::from_inputs(Vec::new(), Vec::new(), "2024-01-10", "2024-01-20");
    for r in &rows {
        assert_eq!(criteria.matches(r), criteria.date_in_range(&r.date), "row {}", r.id);
    }
}

/// 選択外のカテゴリは日付に関係なく非表示
#[test]
fn test_unselected_category_hidden_regardless_of_date() {
    let categories: BTreeSet<String> = ["通常".to_string()].into_iter().collect();
    let criteria = FilterCriteria {
        categories,
        ..Default::default()
    };
    for r in sample_rows().iter().filter(|r| r.category == "エラー") {
        assert!(!criteria.matches(r));
    }
}

/// 複合条件（カテゴリ + 機器名 + 日付）
#[test]
fn test_combined_criteria() {
    let rows = sample_rows();
    let criteria = FilterCriteria::from_inputs(
        vec!["エラー".to_string()],
        vec!["cam3".to_string()],
        "2024-01-01",
        "",
    );
    let outcome = apply_filters(&rows, &criteria);
    assert_eq!(outcome.visibility, vec![false, false, false, false, true]);
}

#[test]
fn test_page_navigation_scenario() {
    let current = Url::parse("http://nas.local/?page=2").unwrap();
    assert_eq!(next_page_url(&current).as_str(), "http://nas.local/?page=3");

    let first = Url::parse("http://nas.local/?page=1").unwrap();
    assert!(previous_page_url(&first).is_none());
}
