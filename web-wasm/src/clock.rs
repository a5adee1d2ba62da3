//! 日時表示

use gloo::timers::callback::Interval;
use nas_viewer_common::format_display_datetime;

use crate::controller::{config, with_controller};
use crate::dom;

/// `.datetime-display` を現在時刻で書き換える（更新ボタンは残す）
pub fn update_date_time() {
    let Some(display) = dom::query_one(".datetime-display") else {
        return;
    };
    let Some(now) = dom::local_now() else {
        return;
    };

    let refresh_button = display
        .query_selector(".refresh-btn")
        .ok()
        .flatten()
        .map(|button| button.outer_html())
        .unwrap_or_default();
    display.set_inner_html(&format!("{}{}", format_display_datetime(&now), refresh_button));
}

pub fn start_clock() {
    update_date_time();
    let interval = Interval::new(config().clock_refresh_ms, update_date_time);
    with_controller(move |c| c.clock = Some(interval));
}
