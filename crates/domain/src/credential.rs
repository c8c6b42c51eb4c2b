//! # 認証情報
//!
//! メール配信プロバイダの API キーを定義する。

/// プロバイダ API キー
///
/// 送信元インスタンスが生存期間中ずっと保持し、送信のたびに読み取り専用で使う。
/// 空文字列も受け付ける。不正なキーは送信時にプロバイダ側で拒否される。
///
/// # セキュリティ
///
/// Debug 出力ではキーの値をマスクする。
#[derive(Clone, Default)]
pub struct ApiKey(String);

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ApiKey").field(&"[REDACTED]").finish()
    }
}

impl ApiKey {
    /// API キーを作成する
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// キーが空かどうか
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// キーの文字列を取り出す
    ///
    /// トランスポートがリクエストヘッダを組み立てるときにのみ使う。
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl From<String> for ApiKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug出力でキーがマスクされる() {
        let key = ApiKey::new("xkeysib-secret");

        let debug = format!("{key:?}");

        assert_eq!(debug, "ApiKey(\"[REDACTED]\")");
        assert!(!debug.contains("xkeysib-secret"));
    }

    #[test]
    fn test_空文字列のキーを作成できる() {
        let key = ApiKey::new("");

        assert!(key.is_empty());
        assert_eq!(key.expose(), "");
    }

    #[test]
    fn test_exposeで元の文字列を取得できる() {
        let key = ApiKey::from("xkeysib-123".to_string());

        assert!(!key.is_empty());
        assert_eq!(key.expose(), "xkeysib-123");
    }
}
