//! Noop メール送信実装
//!
//! メールを実際に送信せず、ログ出力のみ行う。
//! テスト環境や送信無効化時に使用する。

use async_trait::async_trait;
use emailer_domain::{EmailError, Metadata};

use super::EmailProvider;

/// Noop メール送信（ログ出力のみ）
#[derive(Debug, Clone)]
pub struct NoopEmailProvider;

#[async_trait]
impl EmailProvider for NoopEmailProvider {
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        _html_body: &str,
        _metadata: Option<&Metadata>,
    ) -> Result<bool, EmailError> {
        tracing::info!(to = %recipient, subject = %subject, "Noop: メール送信をスキップ");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sendがtrueを返す() {
        let sender = NoopEmailProvider;

        let result = sender
            .send("test@example.com", "テスト件名", "<p>テスト</p>", None)
            .await;

        assert_eq!(result, Ok(true));
    }
}
