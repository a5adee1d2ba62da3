//! NAS Viewer Common Library
//!
//! ブラウザ側(WASM)から使う、DOMに依存しない型とロジック

pub mod api;
pub mod config;
pub mod csv;
pub mod date;
pub mod error;
pub mod filter;
pub mod notifier;
pub mod pagination;
pub mod request;
pub mod restriction;
pub mod selection;
pub mod types;
pub mod video;

pub use api::{decode_response, remaining_pages, video_url, AvailableDatesResponse, DataQuery, DataResponse, RefreshResponse};
pub use config::ClientConfig;
pub use csv::{csv_file_name, table_to_csv, CSV_MIME_TYPE};
pub use date::{format_display_datetime, DateKey};
pub use error::{Error, Result};
pub use filter::{apply_filters, FilterCriteria, FilterOutcome};
pub use notifier::{Notification, NotificationId, NotificationKind, Notifier};
pub use request::{RequestToken, RequestTracker};
pub use restriction::{AvailableDates, DateBounds, DateCheck};
pub use selection::RowSelection;
pub use types::Row;
pub use video::{MediaEvent, Narration, SessionToken, VideoModal, VideoSession, VideoState};
