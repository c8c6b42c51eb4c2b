//! # ログ出力
//!
//! `send-mail` のトレーシング購読者を組み立てる。
//!
//! - `LOG_FORMAT`: `json`（本番）/ `pretty`（開発、デフォルト）
//! - `RUST_LOG`: フィルタ。未設定なら [`DEFAULT_FILTER`]
//!
//! 全イベントは `app` スパン（`service` フィールド付き）の下に記録される。

use strum::EnumString;

/// `RUST_LOG` 未設定時のフィルタ
pub const DEFAULT_FILTER: &str = "info,emailer=debug";

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// 1 行 1 JSON。スパンのフィールドも平坦化して出力する
    Json,
    /// 人間向けの複数行出力
    #[default]
    Pretty,
}

impl LogFormat {
    /// 文字列からログ形式を決める
    ///
    /// 解釈できない値は `Pretty` として扱い、stderr に警告を出す。
    /// 購読者の初期化前に呼ばれるため `tracing` には流せない。
    pub fn parse(s: &str) -> Self {
        s.parse().unwrap_or_else(|_| {
            eprintln!("WARNING: LOG_FORMAT={s:?} は解釈できないため pretty で出力します");
            Self::Pretty
        })
    }

    /// `LOG_FORMAT` から読み取る
    pub fn from_env() -> Self {
        std::env::var("LOG_FORMAT")
            .map(|value| Self::parse(&value))
            .unwrap_or_default()
    }
}

/// トレーシング設定
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// `app` スパンの `service` フィールドに載るサービス名
    pub service_name: String,
    /// ログ出力形式
    pub log_format:   LogFormat,
}

impl TracingConfig {
    pub fn new(service_name: impl Into<String>, log_format: LogFormat) -> Self {
        Self {
            service_name: service_name.into(),
            log_format,
        }
    }

    /// `LOG_FORMAT` を読んで設定を作る
    pub fn from_env(service_name: impl Into<String>) -> Self {
        Self::new(service_name, LogFormat::from_env())
    }

    /// サービス名を持つルートスパン
    pub fn app_span(&self) -> tracing::Span {
        tracing::info_span!("app", service = %self.service_name)
    }
}

/// 購読者をグローバルに登録し、`app` スパンに入った状態を返す
///
/// 戻り値を保持している間のイベントはすべて `app` スパンの下に記録される。
/// `ErrorLayer` も登録するので、インフラ層のエラーが捕捉する `SpanTrace` に
/// 送信中のスパンが残る。
#[cfg(feature = "observability")]
pub fn init_tracing(config: &TracingConfig) -> tracing::span::EnteredSpan {
    use tracing_subscriber::{EnvFilter, Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let output = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(output)
        .with(tracing_error::ErrorLayer::default())
        .init();

    config.app_span().entered()
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        sync::{Arc, Mutex},
    };

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("json", LogFormat::Json)]
    #[case("JSON", LogFormat::Json)]
    #[case("pretty", LogFormat::Pretty)]
    #[case("unknown", LogFormat::Pretty)]
    #[case("", LogFormat::Pretty)]
    fn test_ログ形式をパースする(#[case] input: &str, #[case] expected: LogFormat) {
        assert_eq!(LogFormat::parse(input), expected);
    }

    #[test]
    fn test_デフォルトはpretty() {
        assert_eq!(LogFormat::default(), LogFormat::Pretty);
    }

    /// fmt 出力を溜めるバッファ
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_appスパンは設定のサービス名を持つ() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let config = TracingConfig::new("nightly-digest", LogFormat::Pretty);

        tracing::subscriber::with_default(subscriber, || {
            let _span = config.app_span().entered();
            tracing::info!("送信開始");
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(
            output.contains("app{service=nightly-digest}"),
            "サービス名がスパンに載ること: {output}"
        );
    }
}
