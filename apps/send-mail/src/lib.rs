//! # send-mail
//!
//! 設定に従ってメール送信プロバイダを構築し、1 通のメールを送信するコマンド。
//!
//! プロバイダは起動時に 1 つだけ選択する。送信に失敗しても別のプロバイダへの
//! フォールバックやリトライは行わない。

pub mod config;

use std::sync::Arc;

use config::{EmailBackend, MailerConfig};
use emailer_infra::{
    BrevoEmailProvider,
    EmailProvider,
    NoopEmailProvider,
    SesEmailProvider,
    SmtpEmailProvider,
    TransportError,
};

/// 設定に従って送信プロバイダを構築する
pub async fn build_provider(
    config: &MailerConfig,
) -> Result<Arc<dyn EmailProvider>, TransportError> {
    let sender = config.sender.clone();

    let provider: Arc<dyn EmailProvider> = match config.backend {
        EmailBackend::Brevo => Arc::new(BrevoEmailProvider::with_endpoint(
            config.brevo.api_key.clone(),
            sender,
            &config.brevo.api_url,
            config.brevo.timeout,
        )?),
        EmailBackend::Smtp => Arc::new(SmtpEmailProvider::new(
            &config.smtp.host,
            config.smtp.port,
            sender,
        )),
        EmailBackend::Ses => Arc::new(SesEmailProvider::from_env(sender).await),
        EmailBackend::Noop => Arc::new(NoopEmailProvider),
    };

    tracing::info!(backend = %config.backend, "送信プロバイダを初期化しました");
    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(backend: &str) -> MailerConfig {
        MailerConfig::from_lookup(|name| match name {
            "EMAIL_BACKEND" => Some(backend.to_string()),
            "BREVO_API_URL" => Some("http://127.0.0.1:9/v3".to_string()),
            _ => None,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_noopプロバイダは送信に成功する() {
        let provider = build_provider(&config("noop")).await.unwrap();

        let result = provider
            .send("a@example.com", "Hi", "<p>Hello</p>", None)
            .await;

        assert_eq!(result, Ok(true));
    }

    #[tokio::test]
    async fn test_brevoプロバイダは空のapiキーでも構築できる() {
        let provider = build_provider(&config("brevo")).await;

        assert!(provider.is_ok());
    }

    #[tokio::test]
    async fn test_smtpプロバイダを構築できる() {
        let provider = build_provider(&config("smtp")).await;

        assert!(provider.is_ok());
    }
}
