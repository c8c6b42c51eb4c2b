//! # Emailer ドメイン層
//!
//! トランザクションメール送信に関するドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **値オブジェクト**: 送信元情報・API キー・送信メッセージは不変
//! - **単一のエラー種別**: 送信失敗はすべて [`EmailError::SendFailed`] に集約する
//! - **外部依存なし**: HTTP クライアントや SDK の型はこのクレートに現れない
//!
//! ## 依存関係の方向
//!
//! ```text
//! send-mail → infra → domain
//! ```
//!
//! ドメイン層はインフラ層に依存しない。
//!
//! ## モジュール構成
//!
//! - [`credential`] - プロバイダ API キー
//! - [`email`] - 送信元情報と送信メッセージ
//! - [`error`] - 送信エラー
//!
//! ## 使用例
//!
//! ```rust
//! use emailer_domain::email::{OutboundMessage, SenderIdentity};
//!
//! let sender = SenderIdentity::new("Example", "noreply@example.com");
//! let message = OutboundMessage::new(sender, "a@example.com", "Hi", "<p>Hello</p>");
//!
//! assert_eq!(message.recipients(), ["a@example.com"]);
//! ```

pub mod credential;
pub mod email;
pub mod error;

pub use credential::ApiKey;
pub use email::{Metadata, OutboundMessage, SenderIdentity};
pub use error::EmailError;
