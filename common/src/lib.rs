//! Daily Report Common Library
//!
//! 日報ドラフトの保持・派生フィールド算出（画面側から独立）

pub mod types;
pub mod error;
pub mod date;
pub mod quantity;
pub mod station;
pub mod length;
pub mod deviation;
pub mod ledger;
pub mod notify;
pub mod storage;
pub mod store;
pub mod form;
pub mod validation;
pub mod export;

pub use types::{Draft, PhotoSlot, StationField};
pub use error::{Error, Result};
pub use deviation::{compute_deviation, DeviationClass, DeviationOutcome};
pub use form::DeviationReport;
pub use ledger::{LedgerError, MaterialEntry, MaterialLedger, MaterialRow};
pub use length::compute_length;
pub use notify::{Notifier, NotifyLevel, RecordingNotifier};
pub use quantity::{parse_quantity, Quantity};
pub use station::{format_station, StationFormat};
pub use storage::{MemoryStorage, Storage};
pub use store::{DraftStore, DEFAULT_STORAGE_KEY};
pub use validation::validate_for_submission;
