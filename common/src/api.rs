//! サーバーAPIのリクエスト/レスポンス型
//!
//! エンドポイント本体は外部（サーバー側）にあり、ここでは
//! クエリ文字列の組み立てとレスポンスのデコードだけを扱う。

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::filter::FilterCriteria;

/// `/api/data` のクエリ
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataQuery {
    pub devices: Vec<String>,
    pub categories: Vec<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl DataQuery {
    /// 絞り込み条件から検索用クエリを作る
    pub fn from_criteria(criteria: &FilterCriteria) -> Self {
        Self {
            devices: criteria.devices.iter().cloned().collect(),
            categories: criteria.categories.iter().cloned().collect(),
            start_date: criteria.start_date.as_ref().map(|d| d.to_string()),
            end_date: criteria.end_date.as_ref().map(|d| d.to_string()),
            ..Default::default()
        }
    }

    /// 分割読み込み用のクエリ
    pub fn batch(page: u32, limit: u32) -> Self {
        Self {
            page: (page > 1).then_some(page),
            limit: Some(limit),
            ..Default::default()
        }
    }

    /// `application/x-www-form-urlencoded` 形式のクエリ文字列
    ///
    /// 空の一覧・未指定の値はパラメータごと省く
    pub fn to_query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        if let Some(start) = &self.start_date {
            serializer.append_pair("start_date", start);
        }
        if let Some(end) = &self.end_date {
            serializer.append_pair("end_date", end);
        }
        if !self.categories.is_empty() {
            serializer.append_pair("categories", &self.categories.join(","));
        }
        if !self.devices.is_empty() {
            serializer.append_pair("devices", &self.devices.join(","));
        }
        if let Some(page) = self.page {
            serializer.append_pair("page", &page.to_string());
        }
        if let Some(limit) = self.limit {
            serializer.append_pair("limit", &limit.to_string());
        }
        serializer.finish()
    }

    /// エンドポイントにクエリを付けたURL
    pub fn to_url(&self, endpoint: &str) -> String {
        let query = self.to_query_string();
        if query.is_empty() {
            endpoint.to_string()
        } else {
            format!("{}?{}", endpoint, query)
        }
    }
}

/// `/api/refresh` のレスポンス
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshResponse {
    pub count: u64,
}

/// `/api/data` のレスポンス（使用するフィールドのみ）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataResponse {
    pub total: u64,
    pub detail: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub total_pages: Option<u32>,
}

/// `/api/available-dates` のレスポンス
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AvailableDatesResponse {
    pub dates: Vec<String>,
}

/// エラー時のレスポンス本文
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ErrorBody {
    detail: Option<String>,
}

/// ステータスと本文からレスポンスをデコードする
///
/// 2xx 以外は本文の `detail` を拾って `Error::Http` にする
pub fn decode_response<T>(status: u16, body: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    if !(200..300).contains(&status) {
        let detail = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.detail);
        return Err(Error::Http { status, detail });
    }
    Ok(serde_json::from_str(body)?)
}

/// 動画配信URL（`relative_path` はパーセントエンコードする）
pub fn video_url(endpoint: &str, relative_path: &str) -> String {
    format!("{}?path={}", endpoint, urlencoding::encode(relative_path))
}

/// 分割読み込みで追加取得するページ番号
///
/// 1ページ目は取得済みとして2ページ目以降を返す
pub fn remaining_pages(total: u64, limit: u32) -> std::ops::RangeInclusive<u32> {
    let limit = u64::from(limit.max(1));
    let pages = total.div_ceil(limit).min(u64::from(u32::MAX)) as u32;
    2..=pages
}
