//! データ再取得

use nas_viewer_common::{NotificationKind, RefreshResponse};
use tracing::{debug, error, info};

use crate::api;
use crate::controller::{config, schedule_navigation, with_controller, Navigation};
use crate::notify::notify;

/// サーバーにデータ更新を依頼し、成功したらリロードする
pub async fn refresh_data() {
    let Some(token) = with_controller(|c| c.refresh_requests.issue()) else {
        return;
    };
    let config = config();

    notify("データを更新中...", NotificationKind::Info);
    let result = api::post_json::<RefreshResponse>(&config.refresh_url).await;

    if with_controller(|c| c.refresh_requests.is_latest(token)) != Some(true) {
        debug!("古い更新結果を破棄しました");
        return;
    }

    match result {
        Ok(result) => {
            info!("データ更新: {}件", result.count);
            notify(format!("データを更新しました ({}件)", result.count), NotificationKind::Success);
            schedule_navigation(Navigation::Reload, config.refresh_reload_delay_ms);
        }
        Err(e) => {
            error!("データ更新エラー: {}", e);
            notify("データ更新に失敗しました", NotificationKind::Error);
        }
    }
}
