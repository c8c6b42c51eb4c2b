//! # テスト用モック
//!
//! プロバイダのテストで使用するインメモリのトランスポート。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! emailer-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use emailer_domain::ApiKey;
use reqwest::StatusCode;

use crate::{
    error::TransportError,
    provider::brevo::api::{
        SendTransacEmailRequest,
        SendTransacEmailResponse,
        TransactionalEmailApi,
    },
};

// ===== MockTransactionalEmailApi =====

/// 記録された API 呼び出し
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub request: SendTransacEmailRequest,
    pub api_key: ApiKey,
}

/// 応答の振る舞い
#[derive(Debug, Clone)]
enum Behavior {
    Accept,
    Reject { status: StatusCode, body: String },
    RequireApiKey,
}

/// 呼び出しを記録するトランザクションメール API モック
///
/// clone したインスタンス同士で記録を共有する。
#[derive(Debug, Clone)]
pub struct MockTransactionalEmailApi {
    calls:    Arc<Mutex<Vec<RecordedCall>>>,
    behavior: Behavior,
}

impl MockTransactionalEmailApi {
    /// すべてのリクエストを受理するモック
    pub fn new() -> Self {
        Self::with_behavior(Behavior::Accept)
    }

    /// すべてのリクエストを指定ステータスで拒否するモック
    pub fn failing(status: StatusCode, body: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::Reject {
            status,
            body: body.into(),
        })
    }

    /// API キーが空のリクエストを 401 で拒否するモック
    pub fn requiring_api_key() -> Self {
        Self::with_behavior(Behavior::RequireApiKey)
    }

    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            behavior,
        }
    }

    /// 記録された呼び出しを取得する
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockTransactionalEmailApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TransactionalEmailApi for MockTransactionalEmailApi {
    async fn send_transac_email(
        &self,
        request: &SendTransacEmailRequest,
        api_key: &ApiKey,
    ) -> Result<SendTransacEmailResponse, TransportError> {
        self.calls.lock().unwrap().push(RecordedCall {
            request: request.clone(),
            api_key: api_key.clone(),
        });

        match &self.behavior {
            Behavior::Accept => Ok(SendTransacEmailResponse {
                message_id: Some("<mock@smtp-relay.brevo.com>".to_string()),
            }),
            Behavior::Reject { status, body } => Err(TransportError::rejected(*status, body.clone())),
            Behavior::RequireApiKey if api_key.is_empty() => Err(TransportError::rejected(
                StatusCode::UNAUTHORIZED,
                r#"{"code":"unauthorized","message":"Key not found"}"#,
            )),
            Behavior::RequireApiKey => Ok(SendTransacEmailResponse::default()),
        }
    }
}
