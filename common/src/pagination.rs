//! ページ送りとURLクエリ操作
//!
//! ページ番号はURLの `page` パラメータだけが保持する。

use url::Url;

use crate::date::DateKey;

pub const PAGE_PARAM: &str = "page";
pub const START_DATE_PARAM: &str = "start_date";
pub const END_DATE_PARAM: &str = "end_date";

/// 現在のページ番号（未指定・不正値は1）
pub fn current_page(url: &Url) -> u32 {
    url.query_pairs()
        .find(|(key, _)| key == PAGE_PARAM)
        .and_then(|(_, value)| value.trim().parse::<u32>().ok())
        .filter(|&page| page >= 1)
        .unwrap_or(1)
}

/// クエリパラメータを1つ設定したURLを返す
///
/// 既存のキーは最初の位置で置き換え、重複分は取り除く
pub fn with_query_param(url: &Url, key: &str, value: &str) -> Url {
    let mut pairs: Vec<(String, String)> = Vec::new();
    let mut replaced = false;

    for (k, v) in url.query_pairs() {
        if k == key {
            if !replaced {
                pairs.push((k.into_owned(), value.to_string()));
                replaced = true;
            }
        } else {
            pairs.push((k.into_owned(), v.into_owned()));
        }
    }
    if !replaced {
        pairs.push((key.to_string(), value.to_string()));
    }

    let mut next = url.clone();
    next.query_pairs_mut().clear().extend_pairs(pairs);
    next
}

/// 指定ページへのURL
pub fn page_url(url: &Url, page: u32) -> Url {
    with_query_param(url, PAGE_PARAM, &page.to_string())
}

/// 次ページのURL（上限はサーバー側で扱う）
pub fn next_page_url(url: &Url) -> Url {
    page_url(url, current_page(url).saturating_add(1))
}

/// 前ページのURL（1ページ目では `None`）
pub fn previous_page_url(url: &Url) -> Option<Url> {
    let page = current_page(url);
    (page > 1).then(|| page_url(url, page - 1))
}

/// 検索後に遷移するURL
///
/// 日付は指定がある側だけ書き換え、ページは1に戻す
pub fn search_reload_url(url: &Url, start_date: Option<&DateKey>, end_date: Option<&DateKey>) -> Url {
    let mut next = url.clone();
    if let Some(start) = start_date {
        next = with_query_param(&next, START_DATE_PARAM, start.as_str());
    }
    if let Some(end) = end_date {
        next = with_query_param(&next, END_DATE_PARAM, end.as_str());
    }
    page_url(&next, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_current_page_default() {
        assert_eq!(current_page(&url("http://localhost/")), 1);
        assert_eq!(current_page(&url("http://localhost/?page=abc")), 1);
        assert_eq!(current_page(&url("http://localhost/?page=0")), 1);
        assert_eq!(current_page(&url("http://localhost/?page=4")), 4);
    }

    #[test]
    fn test_next_page() {
        let next = next_page_url(&url("http://localhost/?page=2"));
        assert_eq!(next.as_str(), "http://localhost/?page=3");
    }

    #[test]
    fn test_next_page_without_param() {
        let next = next_page_url(&url("http://localhost/?start_date=2024-01-01"));
        assert_eq!(next.as_str(), "http://localhost/?start_date=2024-01-01&page=2");
    }

    #[test]
    fn test_previous_page_noop_on_first() {
        assert_eq!(previous_page_url(&url("http://localhost/?page=1")), None);
        assert_eq!(previous_page_url(&url("http://localhost/")), None);
    }

    #[test]
    fn test_previous_page() {
        let prev = previous_page_url(&url("http://localhost/?page=3&end_date=2024-01-02")).unwrap();
        assert_eq!(prev.as_str(), "http://localhost/?page=2&end_date=2024-01-02");
    }

    #[test]
    fn test_with_query_param_replaces_duplicates() {
        let next = with_query_param(&url("http://localhost/?page=1&a=b&page=9"), "page", "5");
        assert_eq!(next.as_str(), "http://localhost/?page=5&a=b");
    }

    #[test]
    fn test_search_reload_url() {
        let start = DateKey::parse("2024-01-10").unwrap();
        let next = search_reload_url(&url("http://localhost/?page=7"), Some(&start), None);
        assert_eq!(next.as_str(), "http://localhost/?page=1&start_date=2024-01-10");
    }

    #[test]
    fn test_search_reload_url_keeps_absent_dates() {
        let next = search_reload_url(&url("http://localhost/?end_date=2024-02-01"), None, None);
        assert_eq!(next.as_str(), "http://localhost/?end_date=2024-02-01&page=1");
    }
}
