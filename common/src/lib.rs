//! Crash Symbolizer Common Library
//!
//! Web(WASM)とターミナルクライアントで共有されるフォームコントローラ

pub mod types;
pub mod error;
pub mod i18n;
pub mod validation;
pub mod protocol;
pub mod transport;
pub mod controller;
pub mod session;
pub mod copy;

pub use types::{Arch, FormFields, InputMethod, Lang, NoticeKind, Notification, OutputTab, SelectedFile};
pub use error::{Error, Result};
pub use i18n::Msg;
pub use validation::{format_file_size, is_valid_version, validate_fields, Validation};
pub use protocol::{
    ClearLogsResponse, CrashPayload, LogsResponse, SymbolizeRequest, SymbolizeResponse,
};
pub use transport::{Timer, Transport, TransportError};
pub use controller::{
    FormController, LanguageStore, SubmitControl, SubmitOutcome, LANGUAGE_STORAGE_KEY,
    NOTIFICATION_TTL, POLL_INTERVAL, RESULT_TAB_DELAY,
};
pub use session::{poll_logs_once, submit, ControllerHandle};
pub use copy::{copy_with_fallback, CopyStrategy};
