//! # メール送信プロバイダ
//!
//! トランザクションメールの送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `EmailProvider` trait でメール送信を抽象化
//! - **4 つの実装**: Brevo（本番用）、SMTP（Mailpit 開発用）、SES、Noop（ログのみ）
//! - **起動時に選択**: 呼び出し側が構築時に実装を選ぶ。実行時のフォールバックやルーティングはしない
//! - **リトライなし**: 1 回の送信につきトランスポート呼び出しは 1 回だけ

pub mod brevo;
mod mailbox;
mod noop;
mod ses;
mod smtp;

use async_trait::async_trait;
pub use brevo::BrevoEmailProvider;
use emailer_domain::{EmailError, Metadata};
pub use noop::NoopEmailProvider;
pub use ses::SesEmailProvider;
pub use smtp::SmtpEmailProvider;

/// メール送信トレイト
///
/// すべてのプロバイダが満たす送信契約。
///
/// - 宛先は 1 件のみ
/// - 件名・HTML 本文はそのまま送信する
/// - `metadata` は受け付けるが送信内容には含めない
/// - 失敗時は理由を問わず [`EmailError::SendFailed`] を返す
#[async_trait]
pub trait EmailProvider: Send + Sync {
    /// メールを送信する
    ///
    /// 配信サービスがメッセージを受け付けた場合に `Ok(true)` を返す。
    /// 到達確認（バウンス・開封など）はこの呼び出しでは観測できない。
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        html_body: &str,
        metadata: Option<&Metadata>,
    ) -> Result<bool, EmailError>;
}
