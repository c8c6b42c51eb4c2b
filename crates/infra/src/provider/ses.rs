//! SES メール送信実装
//!
//! AWS SES v2 API を使用してメールを送信する。

use async_trait::async_trait;
use aws_sdk_sesv2::{
    Client,
    types::{Body, Content, Destination, EmailContent, Message},
};
use emailer_domain::{EmailError, Metadata, OutboundMessage, SenderIdentity};

use super::{EmailProvider, mailbox::encoded_from};

/// SES メール送信
///
/// `aws_sdk_sesv2::Client` をラップする。
pub struct SesEmailProvider {
    client: Client,
    sender: SenderIdentity,
}

impl SesEmailProvider {
    /// 新しい SES 送信インスタンスを作成
    ///
    /// # 引数
    ///
    /// - `client`: AWS SES v2 クライアント
    /// - `sender`: 送信元（アドレスは SES で検証済みであること）
    pub fn new(client: Client, sender: SenderIdentity) -> Self {
        Self { client, sender }
    }

    /// AWS の標準的な認証情報チェーン（環境変数・プロファイル等）からクライアントを作成
    pub async fn from_env(sender: SenderIdentity) -> Self {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .load()
            .await;
        Self::new(Client::new(&config), sender)
    }
}

/// 送信メッセージから SES のメール本体を組み立てる
fn build_content(message: &OutboundMessage) -> Result<EmailContent, EmailError> {
    let subject = Content::builder()
        .data(&message.subject)
        .build()
        .map_err(|e| EmailError::send_failed(message, format_args!("件名構築失敗: {e}")))?;
    let html = Content::builder()
        .data(&message.html_body)
        .build()
        .map_err(|e| EmailError::send_failed(message, format_args!("HTML 本文構築失敗: {e}")))?;

    Ok(EmailContent::builder()
        .simple(
            Message::builder()
                .subject(subject)
                .body(Body::builder().html(html).build())
                .build(),
        )
        .build())
}

#[async_trait]
impl EmailProvider for SesEmailProvider {
    #[tracing::instrument(skip_all, fields(provider = "ses", %recipient, %subject))]
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        html_body: &str,
        _metadata: Option<&Metadata>,
    ) -> Result<bool, EmailError> {
        let message = OutboundMessage::new(self.sender.clone(), recipient, subject, html_body);
        let destination = Destination::builder()
            .to_addresses(&message.recipient)
            .build();
        let from = encoded_from(&message.sender).map_err(|e| {
            EmailError::send_failed(&message, format_args!("送信元アドレス不正: {e}"))
        })?;
        let content = build_content(&message)?;

        let output = self
            .client
            .send_email()
            .from_email_address(from)
            .destination(destination)
            .content(content)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "SES: メール送信に失敗");
                EmailError::send_failed(&message, format_args!("SES 送信失敗: {e}"))
            })?;

        tracing::info!(
            message_id = output.message_id().unwrap_or("-"),
            "SES: メールを送信しました"
        );
        Ok(true)
    }
}
