//! # Brevo トランザクションメール API
//!
//! Brevo（旧 Sendinblue）v3 API の `POST /smtp/email` を呼び出すトランスポート。
//!
//! ## リクエスト
//!
//! ```text
//! POST {base_url}/smtp/email
//! accept: application/json
//! api-key: <API キー>            ← キーが空の場合は付与しない
//!
//! {"sender":{"name":"..","email":".."},"to":[{"email":".."}],"subject":"..","htmlContent":".."}
//! ```
//!
//! 2xx を受理、それ以外はステータスとレスポンスボディをそのまま
//! [`TransportError`] として返す。

use std::time::Duration;

use async_trait::async_trait;
use emailer_domain::{ApiKey, OutboundMessage};
use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};

use crate::error::TransportError;

/// Brevo API のデフォルトベース URL
pub const DEFAULT_API_URL: &str = "https://api.brevo.com/v3";

/// API キーを載せるリクエストヘッダ名
pub const API_KEY_HEADER: &str = "api-key";

// --- リクエスト/レスポンス型 ---

/// 送信元・宛先の連絡先
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrevoContact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name:  Option<String>,
    pub email: String,
}

/// トランザクションメール送信リクエスト
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendTransacEmailRequest {
    pub sender:       BrevoContact,
    pub to:           Vec<BrevoContact>,
    pub subject:      String,
    pub html_content: String,
}

impl From<&OutboundMessage> for SendTransacEmailRequest {
    fn from(message: &OutboundMessage) -> Self {
        Self {
            sender:       BrevoContact {
                name:  Some(message.sender.name().to_string()),
                email: message.sender.address().to_string(),
            },
            to:           vec![BrevoContact {
                name:  None,
                email: message.recipient.clone(),
            }],
            subject:      message.subject.clone(),
            html_content: message.html_body.clone(),
        }
    }
}

/// トランザクションメール送信レスポンス
///
/// 2xx であれば送信成功とみなすため、ボディが解釈できなくてもエラーにしない。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendTransacEmailResponse {
    pub message_id: Option<String>,
}

/// トランザクションメール API トレイト
///
/// テスト時にスタブを使用できるようトレイトで定義。
#[async_trait]
pub trait TransactionalEmailApi: Send + Sync {
    /// トランザクションメールを 1 通送信する
    async fn send_transac_email(
        &self,
        request: &SendTransacEmailRequest,
        api_key: &ApiKey,
    ) -> Result<SendTransacEmailResponse, TransportError>;
}

/// reqwest による Brevo API クライアント実装
///
/// `reqwest::Client` は内部で参照カウントされており、並行呼び出しで共有してよい。
#[derive(Clone)]
pub struct HttpTransactionalEmailApi {
    base_url: String,
    client:   reqwest::Client,
}

impl HttpTransactionalEmailApi {
    /// 新しいクライアントを作成する
    ///
    /// # 引数
    ///
    /// - `base_url`: API のベース URL（例: `https://api.brevo.com/v3`）
    pub fn new(base_url: &str) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// リクエストタイムアウト付きのクライアントを作成する
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(base_url, client))
    }

    /// 構築済みの `reqwest::Client` を使う
    pub fn with_client(base_url: &str, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }
}

#[async_trait]
impl TransactionalEmailApi for HttpTransactionalEmailApi {
    async fn send_transac_email(
        &self,
        request: &SendTransacEmailRequest,
        api_key: &ApiKey,
    ) -> Result<SendTransacEmailResponse, TransportError> {
        let url = format!("{}/smtp/email", self.base_url);

        let mut builder = self
            .client
            .post(&url)
            .header(ACCEPT, "application/json")
            .json(request);
        if !api_key.is_empty() {
            builder = builder.header(API_KEY_HEADER, api_key.expose());
        }

        let response = builder.send().await?;
        let status = response.status();

        if status.is_success() {
            // 2xx の時点で受理済み。ボディが読めなくても送信失敗にはしない
            let body = response.text().await.unwrap_or_else(|e| {
                tracing::warn!(%status, error = %e, "Brevo API: 成功レスポンスのボディを読めませんでした");
                String::new()
            });
            Ok(serde_json::from_str(&body).unwrap_or_default())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(TransportError::rejected(status, body))
        }
    }
}
