//! データテーブル（行の読み取り・件数表示・行選択）

use nas_viewer_common::types::ERROR_CATEGORY;
use nas_viewer_common::Row;
use tracing::{debug, info};
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement};

use crate::controller::with_controller;
use crate::dom;

pub const BODY_ROWS_SELECTOR: &str = "#data-table-body tr";
pub const CLICKABLE_ROWS_SELECTOR: &str = ".data-table tbody tr";
const VISIBLE_COUNT_ID: &str = "visible-count";
const TOTAL_COUNT_ID: &str = "total-count";

pub fn body_rows() -> Vec<HtmlElement> {
    dom::query_all(BODY_ROWS_SELECTOR)
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .collect()
}

/// `<tr>` を行データにする
///
/// 日付は `date_column` 列目（1始まり）のテキスト
pub fn read_row(row: &Element, date_column: usize) -> Row {
    let cells: Vec<String> = dom::query_all_in(row, "td").iter().map(dom::text_of).collect();
    let device = row.get_attribute("data-device").unwrap_or_default();
    let category = row.get_attribute("data-category").unwrap_or_default();

    let mut typed = Row::from_cells(&cells, &device, &category);
    typed.date = date_column
        .checked_sub(1)
        .and_then(|i| cells.get(i))
        .cloned()
        .unwrap_or_default();
    typed
}

/// 表示件数を更新する。`None` なら非表示でない行を数える
pub fn update_visible_count(count: Option<usize>) {
    let count = count.unwrap_or_else(|| body_rows().iter().filter(|row| !dom::is_hidden(row)).count());
    dom::set_text(VISIBLE_COUNT_ID, &count.to_string());
}

pub fn update_statistics() {
    dom::set_text(TOTAL_COUNT_ID, &body_rows().len().to_string());
    update_visible_count(None);
}

pub fn handle_row_click(event: &Event, row: &HtmlElement, index: usize, date_column: usize) {
    // パスセルのクリックはパス表示に任せる
    let on_path_cell = event
        .target()
        .and_then(|t| t.dyn_into::<Element>().ok())
        .and_then(|t| t.closest(".file-path-cell").ok().flatten())
        .is_some();
    if on_path_cell {
        return;
    }

    for other in dom::query_all(CLICKABLE_ROWS_SELECTOR) {
        let _ = other.class_list().remove_1("selected");
    }
    let _ = row.class_list().add_1("selected");
    with_controller(|c| c.selection.select(index));

    let data = read_row(row, date_column);
    match serde_json::to_string(&data) {
        Ok(json) => info!("選択された行: {}", json),
        Err(_) => info!("選択された行: {:?}", data),
    }
}

/// エラーカテゴリのセルを強調する
pub fn emphasize_error_categories() {
    let mut count = 0;
    for cell in dom::query_all(".category-cell") {
        if dom::text_of(&cell) != ERROR_CATEGORY {
            continue;
        }
        if let Ok(cell) = cell.dyn_into::<HtmlElement>() {
            let style = cell.style();
            let _ = style.set_property("font-weight", "bold");
            let _ = style.set_property("letter-spacing", "0.5px");
            count += 1;
        }
    }
    debug!("エラーセル {}件を強調", count);
}
