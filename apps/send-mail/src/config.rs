//! # send-mail 設定
//!
//! 環境変数からメール送信の設定を読み込む。
//!
//! ## 環境変数一覧
//!
//! | 変数名 | 必須 | デフォルト | 説明 |
//! |--------|------|------------|------|
//! | `EMAIL_BACKEND` | No | `noop` | 送信バックエンド（brevo / smtp / ses / noop） |
//! | `EMAIL_SENDER_NAME` | No | `Emailer` | 送信元の表示名 |
//! | `EMAIL_SENDER_ADDRESS` | No | `noreply@example.com` | 送信元メールアドレス |
//! | `BREVO_API_KEY` | No | 空 | Brevo API キー（空でも起動できる） |
//! | `BREVO_API_URL` | No | `https://api.brevo.com/v3` | Brevo API のベース URL |
//! | `BREVO_TIMEOUT_SECS` | No | なし | Brevo API のリクエストタイムアウト（秒、1 以上） |
//! | `SMTP_HOST` | No | `localhost` | SMTP ホスト |
//! | `SMTP_PORT` | No | `1025` | SMTP ポート |

use std::{env, num::NonZeroU64, time::Duration};

use emailer_domain::{ApiKey, SenderIdentity};
use emailer_infra::provider::brevo::api::DEFAULT_API_URL;
use strum::{Display, EnumString};
use thiserror::Error;

/// 設定エラー
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 未知の送信バックエンド
    #[error("EMAIL_BACKEND が不正です（brevo / smtp / ses / noop のいずれか）: {0}")]
    UnknownBackend(String),

    /// 数値として解釈できない値
    #[error("{name} は有効な数値である必要があります: {value}")]
    InvalidNumber {
        /// 環境変数名
        name:  &'static str,
        /// 設定された値
        value: String,
    },
}

/// 送信バックエンド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum EmailBackend {
    /// Brevo トランザクションメール API
    Brevo,
    /// SMTP（Mailpit 等）
    Smtp,
    /// Amazon SES v2
    Ses,
    /// 送信しない（ログ出力のみ）
    Noop,
}

/// Brevo の設定
#[derive(Debug, Clone)]
pub struct BrevoConfig {
    /// API キー
    pub api_key: ApiKey,
    /// API のベース URL
    pub api_url: String,
    /// リクエストタイムアウト
    pub timeout: Option<Duration>,
}

/// SMTP の設定
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// SMTP ホスト
    pub host: String,
    /// SMTP ポート
    pub port: u16,
}

/// メール送信の設定
#[derive(Debug, Clone)]
pub struct MailerConfig {
    /// 送信バックエンド
    pub backend: EmailBackend,
    /// 送信元
    pub sender:  SenderIdentity,
    /// Brevo 設定（backend=brevo の場合に使用）
    pub brevo:   BrevoConfig,
    /// SMTP 設定（backend=smtp の場合に使用）
    pub smtp:    SmtpConfig,
}

impl MailerConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意の参照関数から設定を読み込む
    ///
    /// `lookup` は変数名を受け取り、未設定なら `None` を返す。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let backend_name = var("EMAIL_BACKEND", "noop");
        let backend = backend_name
            .parse::<EmailBackend>()
            .map_err(|_| ConfigError::UnknownBackend(backend_name.clone()))?;

        // 0 秒は即時タイムアウトになるため受け付けない
        let timeout = lookup("BREVO_TIMEOUT_SECS")
            .map(|value| parse_number::<NonZeroU64>("BREVO_TIMEOUT_SECS", value))
            .transpose()?
            .map(|secs| Duration::from_secs(secs.get()));

        Ok(Self {
            backend,
            sender: SenderIdentity::new(
                var("EMAIL_SENDER_NAME", "Emailer"),
                var("EMAIL_SENDER_ADDRESS", "noreply@example.com"),
            ),
            brevo: BrevoConfig {
                api_key: ApiKey::new(var("BREVO_API_KEY", "")),
                api_url: var("BREVO_API_URL", DEFAULT_API_URL),
                timeout,
            },
            smtp: SmtpConfig {
                host: var("SMTP_HOST", "localhost"),
                port: parse_number("SMTP_PORT", var("SMTP_PORT", "1025"))?,
            },
        })
    }
}

fn parse_number<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::InvalidNumber { name, value })
}
