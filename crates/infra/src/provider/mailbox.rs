//! 送信元 mailbox の組み立て
//!
//! 表示名に `,` や `"` を含む場合は lettre に quoted-string を任せる。
//! 非 ASCII の表示名は RFC 2047 の encoded-word（UTF-8 / Base64）にする。
//! SES の `FromEmailAddress` は非 ASCII をそのまま受け付けないため。

use base64::{Engine as _, engine::general_purpose::STANDARD};
use emailer_domain::SenderIdentity;
use lettre::{
    Address,
    address::AddressError,
    message::Mailbox,
};

/// encoded-word 1 語に詰める元バイト数の上限（Base64 後 60 文字、全体 72 文字）
const ENCODED_WORD_MAX_BYTES: usize = 45;

/// 送信元の lettre `Mailbox`
///
/// 表示名が空白のみの場合はアドレスのみの mailbox になる。
pub(crate) fn sender_mailbox(sender: &SenderIdentity) -> Result<Mailbox, AddressError> {
    let address = sender.address().parse::<Address>()?;
    let name = Some(sender.name().trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string);
    Ok(Mailbox::new(name, address))
}

/// ヘッダにそのまま載せられる ASCII のみの From 表記
pub(crate) fn encoded_from(sender: &SenderIdentity) -> Result<String, AddressError> {
    let mailbox = sender_mailbox(sender)?;
    match mailbox.name.as_deref() {
        Some(name) if !name.is_ascii() => Ok(format!("{} <{}>", encode_words(name), mailbox.email)),
        _ => Ok(mailbox.to_string()),
    }
}

fn encode_words(text: &str) -> String {
    let mut words = Vec::new();
    let mut start = 0;
    let mut end = 0;
    for (index, ch) in text.char_indices() {
        let next = index + ch.len_utf8();
        if next - start > ENCODED_WORD_MAX_BYTES {
            words.push(encode_word(&text[start..end]));
            start = end;
        }
        end = next;
    }
    words.push(encode_word(&text[start..end]));
    words.join(" ")
}

fn encode_word(chunk: &str) -> String {
    format!("=?UTF-8?B?{}?=", STANDARD.encode(chunk))
}
