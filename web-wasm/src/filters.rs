//! 絞り込み・検索・日付入力の制限

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use gloo::utils::window;
use nas_viewer_common::filter;
use nas_viewer_common::pagination::search_reload_url;
use nas_viewer_common::restriction::{DateCheck, MSG_NO_DATA_FOR_DATE};
use nas_viewer_common::{
    AvailableDates, AvailableDatesResponse, DataQuery, DataResponse, FilterCriteria, NotificationKind, Row,
};
use tracing::{debug, error, info, warn};
use wasm_bindgen::JsValue;
use web_sys::HtmlInputElement;

use crate::api;
use crate::controller::{config, drop_later, schedule_navigation, with_controller, Navigation};
use crate::dom;
use crate::error::UiResult;
use crate::notify::notify;
use crate::table;

pub const START_DATE_ID: &str = "start-date";
pub const END_DATE_ID: &str = "end-date";
const CATEGORY_CHECKBOXES: &str = ".category-options input[type=\"checkbox\"]";
const DEVICE_CHECKBOXES: &str = ".device-options input[type=\"checkbox\"]";

/// 画面の入力から絞り込み条件を読む
pub fn read_criteria() -> FilterCriteria {
    FilterCriteria::from_inputs(
        dom::checked_values(CATEGORY_CHECKBOXES),
        dom::checked_values(DEVICE_CHECKBOXES),
        &dom::input_value(START_DATE_ID),
        &dom::input_value(END_DATE_ID),
    )
}

/// 条件を全行に適用し、表示を切り替える
pub fn apply_filters() {
    let criteria = read_criteria();
    let date_column = config().date_column as usize;

    let elements = table::body_rows();
    let rows: Vec<Row> = elements.iter().map(|el| table::read_row(el, date_column)).collect();
    let outcome = filter::apply_filters(&rows, &criteria);

    for (element, &visible) in elements.iter().zip(&outcome.visibility) {
        if let Err(e) = dom::set_display(element, if visible { "" } else { "none" }) {
            warn!("行の表示切り替えに失敗: {}", e);
        }
    }
    table::update_visible_count(Some(outcome.visible_count));
    debug!("絞り込み結果: {}/{}", outcome.visible_count, outcome.total);

    if let Some(summary) = outcome.summary() {
        notify(summary, NotificationKind::Success);
    }
}

/// チェックボックス変更時の遅延適用
///
/// 待機中に再度呼ばれた場合は前の予約を取り消す
pub fn debounce_filters() {
    let delay = config().debounce_ms;
    let timer = Timeout::new(delay, || {
        if let Some(Some(own)) = with_controller(|c| c.debounce.take()) {
            drop_later(own);
        }
        apply_filters();
    });
    let previous = with_controller(|c| c.debounce.replace(timer)).flatten();
    drop(previous);
}

/// サーバー検索を行い、成功したら条件付きURLへ遷移する
pub async fn handle_search() {
    let Some(token) = with_controller(|c| c.search_requests.issue()) else {
        return;
    };
    let config = config();
    let criteria = read_criteria();

    notify("検索を実行中...", NotificationKind::Info);
    let url = DataQuery::from_criteria(&criteria).to_url(&config.data_url);
    let result = api::get_json::<DataResponse>(&url).await;

    if with_controller(|c| c.search_requests.is_latest(token)) != Some(true) {
        debug!("古い検索結果を破棄しました");
        return;
    }

    match result {
        Ok(data) => {
            info!("検索結果: {}件", data.total);
            notify(format!("{}件のデータが見つかりました", data.total), NotificationKind::Success);
            match dom::current_url() {
                Ok(current) => {
                    let target = search_reload_url(&current, criteria.start_date.as_ref(), criteria.end_date.as_ref());
                    schedule_navigation(Navigation::To(target), config.search_reload_delay_ms);
                }
                Err(e) => error!("遷移先URLの生成に失敗: {}", e),
            }
        }
        Err(e) => {
            error!("検索エラー: {}", e);
            notify(e.user_message("検索に失敗しました"), NotificationKind::Error);
        }
    }
}

/// 入力欄を空にする
pub fn clear_input(id: &str) {
    if let Some(input) = dom::by_id_opt::<HtmlInputElement>(id) {
        input.set_value("");
    }
}

/// データが存在する日付だけを選べるようにする
pub async fn setup_date_input_restrictions() {
    let raw = match load_available_dates().await {
        Ok(raw) => raw,
        Err(e) => {
            warn!("利用可能日付の取得に失敗: {}", e);
            return;
        }
    };

    let dates = AvailableDates::new(raw);
    let Some(bounds) = dates.bounds() else {
        debug!("利用可能日付がないため日付制限は行いません");
        return;
    };

    let mut listeners = Vec::new();
    for id in [START_DATE_ID, END_DATE_ID] {
        let Some(input) = dom::by_id_opt::<HtmlInputElement>(id) else {
            continue;
        };
        input.set_min(bounds.min.as_str());
        input.set_max(bounds.max.as_str());

        let target = input.clone();
        listeners.push(EventListener::new(&input, "change", move |_| check_date_input(&target)));
    }

    info!("日付制限: {} 〜 {} ({}日)", bounds.min, bounds.max, dates.len());
    with_controller(move |c| {
        c.available_dates = dates;
        c.listeners.extend(listeners);
    });
}

fn check_date_input(input: &HtmlInputElement) {
    let value = input.value();
    if with_controller(|c| c.available_dates.check(&value)) == Some(DateCheck::Rejected) {
        input.set_value("");
        notify(MSG_NO_DATA_FOR_DATE, NotificationKind::Warning);
    }
}

/// 設定 → `window.availableDates` → API の順に日付一覧を探す
async fn load_available_dates() -> UiResult<Vec<String>> {
    let config = config();
    if let Some(dates) = &config.available_dates {
        return Ok(dates.clone());
    }

    let embedded = js_sys::Reflect::get(&window(), &JsValue::from_str("availableDates"))?;
    if !embedded.is_undefined() && !embedded.is_null() {
        return Ok(serde_wasm_bindgen::from_value(embedded)?);
    }

    let response: AvailableDatesResponse = api::get_json(&config.available_dates_url).await?;
    Ok(response.dates)
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use gloo::timers::future::TimeoutFuture;
    use gloo::utils::{body, document};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const UNTOUCHED: &str = "未更新";

    fn mount_table() -> web_sys::Element {
        let root = document().create_element("div").unwrap();
        root.set_inner_html(
            r#"<span id="visible-count"></span>
            <table class="data-table"><tbody id="data-table-body">
              <tr data-device="cam1" data-category="エラー"><td>1</td><td></td><td></td><td class="category-cell">エラー</td><td class="file-path-cell"></td><td>2024/01/05</td></tr>
              <tr data-device="cam2" data-category="通常"><td>2</td><td></td><td></td><td class="category-cell">通常</td><td class="file-path-cell"></td><td>2024/01/15</td></tr>
              <tr data-device="cam3" data-category="エラー"><td>3</td><td></td><td></td><td class="category-cell">エラー</td><td class="file-path-cell"></td><td>2024/01/25</td></tr>
            </tbody></table>"#,
        );
        body().append_child(&root).unwrap();
        root
    }

    fn visible_count_text() -> String {
        document()
            .get_element_by_id("visible-count")
            .and_then(|el| el.text_content())
            .unwrap_or_default()
    }

    fn mark_untouched() {
        dom::set_text("visible-count", UNTOUCHED);
    }

    #[wasm_bindgen_test]
    async fn test_rapid_toggles_run_one_filter_pass() {
        let root = mount_table();
        let delay = config().debounce_ms;
        mark_untouched();

        // 待ち時間内に繰り返し呼ぶと、前の予約は実行されない
        debounce_filters();
        TimeoutFuture::new(delay / 2).await;
        debounce_filters();
        TimeoutFuture::new(delay / 2).await;
        debounce_filters();
        TimeoutFuture::new(delay / 2).await;
        assert_eq!(visible_count_text(), UNTOUCHED);

        TimeoutFuture::new(delay / 2 + 50).await;
        assert_eq!(visible_count_text(), "3");
        assert_eq!(with_controller(|c| c.debounce.is_none()), Some(true));

        // 取り消された予約が後から走らないこと
        mark_untouched();
        TimeoutFuture::new(delay + 50).await;
        assert_eq!(visible_count_text(), UNTOUCHED);

        root.remove();
    }
}
