//! CSVエクスポート
//!
//! 各セルをダブルクォートで囲んでカンマ区切りにするだけの簡易形式。
//! セル内のダブルクォートはエスケープしない。

use chrono::NaiveDate;

/// CSVのMIMEタイプ
pub const CSV_MIME_TYPE: &str = "text/csv;charset=utf-8;";

/// 表のセル（ヘッダー行を含む）をCSV文字列にする
///
/// # Examples
/// ```
/// use nas_viewer_common::table_to_csv;
///
/// let rows = vec![vec!["A,B".to_string(), "C".to_string()]];
/// assert_eq!(table_to_csv(&rows), "\"A,B\",\"C\"");
/// ```
pub fn table_to_csv<S: AsRef<str>>(rows: &[Vec<S>]) -> String {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|cell| format!("\"{}\"", cell.as_ref().trim()))
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// ダウンロードファイル名（例: `nas_data_2024-01-15.csv`）
pub fn csv_file_name(today: NaiveDate) -> String {
    format!("nas_data_{}.csv", today.format("%Y-%m-%d"))
}
