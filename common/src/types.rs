//! テーブル行の型定義
//!
//! 行データはサーバー側でレンダリングされたテーブルから読み取る。
//! クライアント側に独立した行ストアは持たない。

use serde::{Deserialize, Serialize};

/// エラー行のカテゴリ名
pub const ERROR_CATEGORY: &str = "エラー";

/// テーブルの1行
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Row {
    pub id: String,

    /// 表示用日時（`YYYY年MM月DD日 HH時MM分`）
    pub datetime: String,

    pub option: String,

    /// `data-category` 属性
    pub category: String,

    /// `data-device` 属性
    pub device: String,

    pub file_path: String,

    /// 日付列のテキスト（`YYYY-MM-DD` または `YYYY/MM/DD`）
    pub date: String,
}

impl Row {
    /// セル列（id, 日時, オプション, カテゴリ, パス, 日付）から行を組み立てる
    ///
    /// 足りないセルは空文字になる
    pub fn from_cells(cells: &[String], device: &str, category: &str) -> Self {
        let cell = |i: usize| cells.get(i).map(|s| s.trim().to_string()).unwrap_or_default();
        Self {
            id: cell(0),
            datetime: cell(1),
            option: cell(2),
            category: if category.is_empty() { cell(3) } else { category.to_string() },
            device: device.to_string(),
            file_path: cell(4),
            date: cell(5),
        }
    }

    pub fn is_error(&self) -> bool {
        self.category == ERROR_CATEGORY
    }
}
