//! # 送信エラー
//!
//! メール送信で発生するエラーを定義する。
//!
//! 認証失敗・不正なリクエスト・レート制限・ネットワーク障害・サービス停止のいずれも
//! 区別せず [`EmailError::SendFailed`] に集約する。一時的な失敗か恒久的な失敗かの
//! 判断は呼び出し側の責務とする。

use std::fmt;

use thiserror::Error;

use crate::email::OutboundMessage;

/// メール送信エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmailError {
    /// メール送信に失敗
    ///
    /// `detail` にはトランスポートが報告したエラー文字列をそのまま格納する。
    #[error("メール送信に失敗: '{subject}' を {recipient} に送信できませんでした: {detail}")]
    SendFailed {
        /// 件名
        subject:   String,
        /// 宛先メールアドレス
        recipient: String,
        /// トランスポートのエラー詳細
        detail:    String,
    },
}

impl EmailError {
    /// 送信メッセージとエラー詳細から SendFailed を生成する
    pub fn send_failed(message: &OutboundMessage, detail: impl fmt::Display) -> Self {
        Self::SendFailed {
            subject:   message.subject.clone(),
            recipient: message.recipient.clone(),
            detail:    detail.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::email::SenderIdentity;

    fn message() -> OutboundMessage {
        OutboundMessage::new(
            SenderIdentity::new("Example", "noreply@example.com"),
            "bad@x",
            "Subj",
            "<b>x</b>",
        )
    }

    #[test]
    fn test_メッセージに件名と宛先と詳細が含まれる() {
        let err = EmailError::send_failed(&message(), "401 Unauthorized");

        let text = err.to_string();

        assert!(text.contains("Subj"), "件名を含むこと: {text}");
        assert!(text.contains("bad@x"), "宛先を含むこと: {text}");
        assert!(text.contains("401 Unauthorized"), "詳細を含むこと: {text}");
    }

    #[test]
    fn test_send_failedはフィールドを保持する() {
        let err = EmailError::send_failed(&message(), "timeout");

        assert_eq!(
            err,
            EmailError::SendFailed {
                subject:   "Subj".to_string(),
                recipient: "bad@x".to_string(),
                detail:    "timeout".to_string(),
            }
        );
    }
}
