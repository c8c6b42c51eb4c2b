//! # Emailer 共有ユーティリティ
//!
//! ワークスペース全体で使用する共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - 購読者の実装（`tracing-subscriber`）は `observability` feature でのみ引き込む

pub mod observability;

pub use observability::{LogFormat, TracingConfig};
