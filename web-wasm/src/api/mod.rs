//! バックエンド通信

mod backend;

pub use backend::{FetchTransport, GlooTimer};
