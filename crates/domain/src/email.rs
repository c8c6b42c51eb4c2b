//! # メール
//!
//! 送信元情報と、1 回の送信ごとに組み立てる送信メッセージを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 用途 |
//! |---|------------|------|
//! | [`SenderIdentity`] | 送信元 | 表示名と送信元アドレス |
//! | [`OutboundMessage`] | 送信メッセージ | 1 回の送信で組み立てる一時的な値 |
//! | [`Metadata`] | メタデータ | プロバイダ間のインターフェース互換用。送信内容には含めない |

use std::collections::HashMap;

/// 送信メタデータ
///
/// 他のプロバイダとのインターフェース互換のために受け付けるが、
/// 現在のどの実装も送信リクエストには含めない。
pub type Metadata = HashMap<String, serde_json::Value>;

/// 送信元情報
///
/// 構築後は不変。表示名・アドレスとも形式チェックは行わない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderIdentity {
    name:    String,
    address: String,
}

impl SenderIdentity {
    /// 送信元情報を作成する
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name:    name.into(),
            address: address.into(),
        }
    }

    /// 表示名
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 送信元アドレス
    pub fn address(&self) -> &str {
        &self.address
    }
}

/// 送信メッセージ
///
/// 送信のたびに新しく作成され、送信後は保持されない。
/// 宛先は常に 1 件のみ（CC / BCC なし）。件名・本文はエスケープせずそのまま渡す。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    /// 送信元
    pub sender:    SenderIdentity,
    /// 宛先メールアドレス
    pub recipient: String,
    /// 件名
    pub subject:   String,
    /// HTML 本文
    pub html_body: String,
}

impl OutboundMessage {
    /// 送信メッセージを作成する
    pub fn new(
        sender: SenderIdentity,
        recipient: impl Into<String>,
        subject: impl Into<String>,
        html_body: impl Into<String>,
    ) -> Self {
        Self {
            sender,
            recipient: recipient.into(),
            subject: subject.into(),
            html_body: html_body.into(),
        }
    }

    /// 宛先一覧（常に 1 件）
    pub fn recipients(&self) -> [&str; 1] {
        [self.recipient.as_str()]
    }
}
