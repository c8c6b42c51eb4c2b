//! # Emailer インフラ層
//!
//! 外部のメール配信サービスとの通信を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **プロバイダ実装**: [`EmailProvider`] トレイトの具体実装（Brevo / SMTP / SES / Noop）
//! - **トランスポート**: Brevo トランザクションメール API への HTTP 通信
//! - **エラー変換**: SDK・HTTP クライアントのエラーを
//!   [`EmailError`](emailer_domain::EmailError) に変換し、境界の外に漏らさない
//!
//! ## 依存関係
//!
//! ```text
//! send-mail → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`provider`] - メール送信プロバイダ
//! - [`error`] - トランスポートエラー定義
//! - `mock` - テスト用モック（`test-utils` feature）
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use emailer_infra::provider::{BrevoEmailProvider, EmailProvider};
//!
//! async fn notify() -> Result<(), emailer_domain::EmailError> {
//!     let provider = BrevoEmailProvider::new("xkeysib-...", "Example", "noreply@example.com");
//!     provider
//!         .send("a@example.com", "Hi", "<p>Hello</p>", None)
//!         .await?;
//!     Ok(())
//! }
//! ```

pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod provider;

pub use error::TransportError;
pub use provider::{
    BrevoEmailProvider,
    EmailProvider,
    NoopEmailProvider,
    SesEmailProvider,
    SmtpEmailProvider,
};
