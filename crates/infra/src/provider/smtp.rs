//! SMTP メール送信実装
//!
//! lettre の `AsyncSmtpTransport` を使用してメールを送信する。
//! 開発環境では Mailpit（ローカル SMTP サーバー）に接続する。

use async_trait::async_trait;
use emailer_domain::{EmailError, Metadata, OutboundMessage, SenderIdentity};
use lettre::{
    AsyncSmtpTransport,
    AsyncTransport,
    Tokio1Executor,
    message::{Mailbox, Message, header::ContentType},
};

use super::{EmailProvider, mailbox::sender_mailbox};

/// SMTP メール送信
///
/// `lettre::AsyncSmtpTransport<Tokio1Executor>` をラップする。
/// Mailpit（開発）や SMTP リレー（テスト環境）で使用する。
pub struct SmtpEmailProvider {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender:    SenderIdentity,
}

impl SmtpEmailProvider {
    /// 新しい SMTP 送信インスタンスを作成
    ///
    /// # 引数
    ///
    /// - `host`: SMTP サーバーのホスト名（例: "localhost"）
    /// - `port`: SMTP サーバーのポート番号（例: 1025 for Mailpit）
    /// - `sender`: 送信元
    pub fn new(host: &str, port: u16, sender: SenderIdentity) -> Self {
        // builder_dangerous: TLS なしで接続（Mailpit 等のローカル SMTP 向け）
        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
            .port(port)
            .build();

        Self { transport, sender }
    }
}

/// 送信メッセージから lettre のメッセージを組み立てる
fn build_message(message: &OutboundMessage) -> Result<Message, EmailError> {
    let from = sender_mailbox(&message.sender)
        .map_err(|e| EmailError::send_failed(message, format_args!("送信元アドレス不正: {e}")))?;

    let to = message
        .recipient
        .parse::<Mailbox>()
        .map_err(|e| EmailError::send_failed(message, format_args!("宛先アドレス不正: {e}")))?;

    Message::builder()
        .from(from)
        .to(to)
        .subject(&message.subject)
        .header(ContentType::TEXT_HTML)
        .body(message.html_body.clone())
        .map_err(|e| EmailError::send_failed(message, format_args!("メッセージ構築失敗: {e}")))
}

#[async_trait]
impl EmailProvider for SmtpEmailProvider {
    #[tracing::instrument(skip_all, fields(provider = "smtp", %recipient, %subject))]
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        html_body: &str,
        _metadata: Option<&Metadata>,
    ) -> Result<bool, EmailError> {
        let message = OutboundMessage::new(self.sender.clone(), recipient, subject, html_body);
        let email = build_message(&message)?;

        self.transport.send(email).await.map_err(|e| {
            tracing::warn!(error = %e, "SMTP: メール送信に失敗");
            EmailError::send_failed(&message, format_args!("SMTP 送信失敗: {e}"))
        })?;

        tracing::info!("SMTP: メールを送信しました");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(recipient: &str) -> OutboundMessage {
        OutboundMessage::new(
            SenderIdentity::new("Example", "noreply@example.com"),
            recipient,
            "Hi",
            "<p>Hello</p>",
        )
    }

    #[test]
    fn test_メッセージは送信元と単一の宛先を持つ() {
        let email = build_message(&message("a@example.com")).unwrap();

        let envelope = email.envelope();
        assert_eq!(
            envelope.from().map(ToString::to_string).as_deref(),
            Some("noreply@example.com")
        );
        let to: Vec<String> = envelope.to().iter().map(ToString::to_string).collect();
        assert_eq!(to, vec!["a@example.com".to_string()]);
    }

    #[test]
    fn test_宛先アドレスが不正ならsend_failedを返す() {
        let err = build_message(&message("not an address")).unwrap_err();

        let text = err.to_string();
        assert!(text.contains("Hi"), "件名を含むこと: {text}");
        assert!(text.contains("not an address"), "宛先を含むこと: {text}");
        assert!(text.contains("宛先アドレス不正"), "詳細を含むこと: {text}");
    }

    #[test]
    fn test_送信元アドレスが不正ならsend_failedを返す() {
        let message = OutboundMessage::new(
            SenderIdentity::new("Example", "invalid"),
            "a@example.com",
            "Hi",
            "<p>Hello</p>",
        );

        let err = build_message(&message).unwrap_err();

        assert!(err.to_string().contains("送信元アドレス不正"));
    }

    #[tokio::test]
    async fn test_接続できないサーバーへの送信はsend_failedを返す() {
        // 空きポートを確保してすぐ閉じ、接続拒否される宛先を作る
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let sut = SmtpEmailProvider::new(
            "127.0.0.1",
            port,
            SenderIdentity::new("Example", "noreply@example.com"),
        );

        let result = sut.send("a@example.com", "Hi", "<p>Hello</p>", None).await;

        assert!(matches!(
            result,
            Err(EmailError::SendFailed { ref recipient, .. }) if recipient == "a@example.com"
        ));
    }

    #[test]
    fn トレイトはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SmtpEmailProvider>();
    }
}
