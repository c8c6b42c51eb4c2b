//! # トランスポートエラー定義
//!
//! 外部のメール配信 API との通信で発生するエラーを表現する。
//!
//! ## 設計方針
//!
//! - **ドメインエラーとの分離**: プロバイダ境界を越える前に
//!   [`EmailError::SendFailed`](emailer_domain::EmailError::SendFailed) へ変換する
//! - **SpanTrace 自動捕捉**: `From` 実装や convenience constructor で
//!   エラー生成時の呼び出し経路を自動記録する
//!
//! ## 構造
//!
//! `std::io::Error` と同じ struct + enum パターンを採用:
//! - [`TransportError`]: エラー種別と [`SpanTrace`] を保持するラッパー
//! - `TransportErrorKind`: エラーの具体的な種別（Request, Rejected）。クレート外には出さない

use std::fmt;

use derive_more::Display;
use reqwest::StatusCode;
use thiserror::Error;
use tracing_error::SpanTrace;

/// トランスポートで発生するエラー
///
/// Display はエラー種別のメッセージのみを出力する。
/// このテキストが送信エラーの詳細としてそのまま呼び出し元に渡る。
#[derive(Display)]
#[display("{kind}")]
pub struct TransportError {
    kind:       TransportErrorKind,
    span_trace: SpanTrace,
}

/// トランスポートエラーの種別
#[derive(Debug, Error)]
pub(crate) enum TransportErrorKind {
    /// リクエスト送信エラー
    ///
    /// 接続失敗、タイムアウト、TLS エラーなど、レスポンスを受け取れなかった場合。
    #[error("リクエスト送信エラー: {0}")]
    Request(#[source] reqwest::Error),

    /// API がリクエストを拒否した（非 2xx レスポンス）
    ///
    /// 認証失敗、不正なペイロード、レート制限、サービス障害など。
    /// レスポンスボディはそのまま保持する。
    #[error("{status}: {body}")]
    Rejected {
        /// HTTP ステータス
        status: StatusCode,
        /// レスポンスボディ
        body:   String,
    },
}

// ===== TransportError のメソッド =====

impl TransportError {
    /// SpanTrace を取得する
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    // ===== Convenience constructors =====

    /// API による拒否エラーを生成する
    pub fn rejected(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            kind:       TransportErrorKind::Rejected {
                status,
                body: body.into(),
            },
            span_trace: SpanTrace::capture(),
        }
    }
}

// ===== トレイト実装 =====

impl fmt::Debug for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportError")
            .field("kind", &self.kind)
            .field("span_trace", &self.span_trace)
            .finish()
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(source: reqwest::Error) -> Self {
        Self {
            kind:       TransportErrorKind::Request(source),
            span_trace: SpanTrace::capture(),
        }
    }
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::layer::SubscriberExt as _;

    use super::*;

    /// テスト用に ErrorLayer 付き subscriber を設定する
    fn with_error_layer(f: impl FnOnce()) {
        let subscriber = tracing_subscriber::registry().with(tracing_error::ErrorLayer::default());
        let _guard = tracing::subscriber::set_default(subscriber);
        f();
    }

    #[test]
    fn test_rejectedでspan_traceがキャプチャされる() {
        with_error_layer(|| {
            let span = tracing::info_span!("test_brevo_send", recipient = "a@example.com");
            let _enter = span.enter();

            let err = TransportError::rejected(StatusCode::UNAUTHORIZED, "Key not found");

            assert_eq!(format!("{err}"), "401 Unauthorized: Key not found");
            let trace_str = format!("{}", err.span_trace());
            assert!(
                trace_str.contains("test_brevo_send"),
                "SpanTrace がスパン名を含むこと: {trace_str}",
            );
        });
    }

    #[test]
    fn test_rejectedのdisplayはステータスとボディを出力する() {
        let err = TransportError::rejected(
            StatusCode::UNAUTHORIZED,
            r#"{"code":"unauthorized","message":"Key not found"}"#,
        );

        assert_eq!(
            format!("{err}"),
            r#"401 Unauthorized: {"code":"unauthorized","message":"Key not found"}"#
        );
    }

    #[tokio::test]
    async fn test_接続失敗はreqwestのエラーをsourceに持つ() {
        use std::error::Error;

        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let source = reqwest::Client::new()
            .post(format!("http://127.0.0.1:{port}/v3/smtp/email"))
            .send()
            .await
            .unwrap_err();

        let err = TransportError::from(source);

        assert!(err.to_string().starts_with("リクエスト送信エラー: "), "{err}");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_sourceはrejectedでnoneを返す() {
        use std::error::Error;

        let err = TransportError::rejected(StatusCode::BAD_REQUEST, "invalid");
        assert!(err.source().is_none());
    }
}
