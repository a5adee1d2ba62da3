//! NAS Viewer Web クライアント (WASM)
//!
//! サーバーで描画済みのテーブルに、絞り込み・検索・動画再生などの操作を結び付ける

mod api;
mod bootstrap;
mod clock;
mod controller;
mod dom;
mod error;
mod export;
mod filters;
mod logging;
mod modals;
mod notify;
mod pagination;
mod preload;
mod refresh;
mod table;
mod video;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    bootstrap::start();
}
