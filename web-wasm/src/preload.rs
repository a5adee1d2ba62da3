//! 分割読み込み
//!
//! 1ページ目を取得し、件数が上限を超えていれば残りのページを間隔を空けて順に取得する。

use gloo::timers::future::TimeoutFuture;
use nas_viewer_common::{remaining_pages, DataQuery, DataResponse, NotificationKind};
use tracing::{debug, error, warn};

use crate::api;
use crate::controller::config;
use crate::notify::notify;

pub async fn load_data_in_batches() {
    let config = config();
    let limit = config.batch_limit;

    let first_url = DataQuery::batch(1, limit).to_url(&config.data_url);
    let first: DataResponse = match api::get_json(&first_url).await {
        Ok(data) => data,
        Err(e) => {
            error!("データロードエラー: {}", e);
            return;
        }
    };

    if first.total <= u64::from(limit) {
        debug!("全{}件を取得済み", first.total);
        return;
    }

    notify(
        format!("データが{}件あります。残りを読み込み中...", first.total),
        NotificationKind::Info,
    );
    TimeoutFuture::new(config.batch_start_delay_ms).await;

    for page in remaining_pages(first.total, limit) {
        let url = DataQuery::batch(page, limit).to_url(&config.data_url);
        if let Err(e) = api::get_json::<DataResponse>(&url).await {
            warn!("ページ{}の読み込みに失敗: {}", page, e);
            break;
        }
        debug!("ページ{}を読み込みました", page);
        TimeoutFuture::new(config.batch_pause_ms).await;
    }

    notify("全データの読み込みが完了しました", NotificationKind::Success);
}
