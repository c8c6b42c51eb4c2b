//! Brevo メール送信実装
//!
//! Brevo（旧 Sendinblue）のトランザクションメール API を使用してメールを送信する。
//! 本番環境で使用する。

pub mod api;

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use emailer_domain::{ApiKey, EmailError, Metadata, OutboundMessage, SenderIdentity};

use self::api::{
    DEFAULT_API_URL,
    HttpTransactionalEmailApi,
    SendTransacEmailRequest,
    TransactionalEmailApi,
};
use super::EmailProvider;
use crate::error::TransportError;

/// Brevo メール送信
///
/// 送信元情報と API キーを生存期間中保持する。どちらも送信時には読み取りのみ。
pub struct BrevoEmailProvider {
    api:     Arc<dyn TransactionalEmailApi>,
    api_key: ApiKey,
    sender:  SenderIdentity,
}

impl BrevoEmailProvider {
    /// 新しい Brevo 送信インスタンスを作成
    ///
    /// API キーが空でも失敗しない。不正なキーは送信時に API が拒否する。
    ///
    /// # 引数
    ///
    /// - `api_key`: Brevo API キー
    /// - `sender_name`: 送信元の表示名
    /// - `sender_address`: 送信元メールアドレス（Brevo で検証済みであること）
    pub fn new(
        api_key: impl Into<String>,
        sender_name: impl Into<String>,
        sender_address: impl Into<String>,
    ) -> Self {
        Self::with_api(
            Arc::new(HttpTransactionalEmailApi::new(DEFAULT_API_URL)),
            ApiKey::new(api_key),
            SenderIdentity::new(sender_name, sender_address),
        )
    }

    /// API の URL とタイムアウトを指定して作成
    pub fn with_endpoint(
        api_key: ApiKey,
        sender: SenderIdentity,
        api_url: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, TransportError> {
        let api = match timeout {
            Some(timeout) => HttpTransactionalEmailApi::with_timeout(api_url, timeout)?,
            None => HttpTransactionalEmailApi::new(api_url),
        };
        Ok(Self::with_api(Arc::new(api), api_key, sender))
    }

    /// 任意のトランスポートを使って作成
    pub fn with_api(
        api: Arc<dyn TransactionalEmailApi>,
        api_key: ApiKey,
        sender: SenderIdentity,
    ) -> Self {
        Self {
            api,
            api_key,
            sender,
        }
    }

    /// 設定済みの送信元
    pub fn sender(&self) -> &SenderIdentity {
        &self.sender
    }
}

#[async_trait]
impl EmailProvider for BrevoEmailProvider {
    #[tracing::instrument(skip_all, fields(provider = "brevo", %recipient, %subject))]
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        html_body: &str,
        _metadata: Option<&Metadata>,
    ) -> Result<bool, EmailError> {
        let message = OutboundMessage::new(self.sender.clone(), recipient, subject, html_body);
        let request = SendTransacEmailRequest::from(&message);

        let response = self
            .api
            .send_transac_email(&request, &self.api_key)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Brevo: メール送信に失敗");
                tracing::debug!(span_trace = %e.span_trace(), "Brevo: 送信失敗時の呼び出し経路");
                EmailError::send_failed(&message, format_args!("Brevo API エラー: {e}"))
            })?;

        tracing::info!(
            message_id = response.message_id.as_deref().unwrap_or("-"),
            "Brevo: メールを送信しました"
        );
        Ok(true)
    }
}
