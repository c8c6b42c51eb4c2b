//! # send-mail
//!
//! トランザクションメールを 1 通送信する。
//!
//! ## 使い方
//!
//! ```bash
//! send-mail <宛先> <件名> <HTML 本文> [メタデータ JSON]
//!
//! # 例
//! EMAIL_BACKEND=brevo BREVO_API_KEY=xkeysib-... \
//!   cargo run -p emailer-send-mail -- a@example.com "Hi" "<p>Hello</p>"
//! ```
//!
//! 環境変数は [`emailer_send_mail::config`] を参照。
//! 送信に成功すると終了コード 0、失敗すると 1 で終了する。

use anyhow::{Context as _, bail};
use emailer_domain::Metadata;
use emailer_send_mail::{build_provider, config::MailerConfig};
use emailer_shared::observability::{TracingConfig, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    let _app_span = init_tracing(&TracingConfig::from_env(env!("CARGO_BIN_NAME")));

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (recipient, subject, html_body, metadata_json) = match args.as_slice() {
        [recipient, subject, html_body] => (recipient, subject, html_body, None),
        [recipient, subject, html_body, metadata] => {
            (recipient, subject, html_body, Some(metadata))
        }
        _ => bail!("使い方: send-mail <宛先> <件名> <HTML 本文> [メタデータ JSON]"),
    };
    let metadata = metadata_json
        .map(|json| serde_json::from_str::<Metadata>(json))
        .transpose()
        .context("メタデータは JSON オブジェクトである必要があります")?;

    // 設定読み込み
    let config = MailerConfig::from_env().context("設定の読み込みに失敗しました")?;

    let provider = build_provider(&config)
        .await
        .context("送信プロバイダの初期化に失敗しました")?;

    provider
        .send(recipient, subject, html_body, metadata.as_ref())
        .await?;

    tracing::info!(%recipient, "メールを送信しました");
    Ok(())
}
