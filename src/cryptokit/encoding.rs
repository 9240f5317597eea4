use crate::utils::error::{KitError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use url::form_urlencoded;

/// Query-string escaping: space becomes `+`, only `A-Za-z0-9-_.~` stay literal.
pub fn url_encode(str: &str) -> String {
    form_urlencoded::byte_serialize(str.as_bytes())
        .collect::<String>()
        .replace('*', "%2A")
        .replace("%7E", "~")
}

pub fn url_decode(str: &str) -> Result<String> {
    percent_decode(str, true)
}

/// RFC 3986 escaping: like [`url_encode`] but space is `%20`.
pub fn rawurlencode(str: &str) -> String {
    url_encode(str).replace('+', "%20")
}

/// Decode `%XX` escapes. A literal `+` is kept.
pub fn rawurldecode(str: &str) -> Result<String> {
    percent_decode(str, false)
}

fn percent_decode(str: &str, plus_as_space: bool) -> Result<String> {
    let bytes = str.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let hex = bytes
                    .get(i + 1..i + 3)
                    .and_then(|h| std::str::from_utf8(h).ok())
                    .and_then(|h| u8::from_str_radix(h, 16).ok())
                    .ok_or_else(|| {
                        KitError::parse(format!("invalid URL escape at byte {} of '{}'", i, str))
                    })?;
                out.push(hex);
                i += 3;
            }
            b'+' if plus_as_space => {
                out.push(b' ');
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8(out).map_err(|e| KitError::parse(format!("decoded URL is not UTF-8: {}", e)))
}

/// `a=1&b=2` from key/value pairs, sorted by key. Values of one key keep their order.
pub fn http_build_query(pairs: &[(&str, &str)]) -> String {
    let mut sorted = pairs.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    sorted
        .iter()
        .map(|(k, v)| format!("{}={}", url_encode(k), url_encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

pub fn base64_encode<T: AsRef<[u8]>>(data: T) -> String {
    STANDARD.encode(data.as_ref())
}

/// Decode standard base64. Stripped `=` padding is put back first.
pub fn base64_decode_bytes(str: &str) -> Result<Vec<u8>> {
    let padded = match str.len() % 4 {
        2 => format!("{}==", str),
        3 => format!("{}=", str),
        _ => str.to_string(),
    };
    STANDARD.decode(padded).map_err(|e| KitError::CryptoError {
        message: format!("base64 decode failed: {}", e),
    })
}

pub fn base64_decode(str: &str) -> Result<String> {
    String::from_utf8(base64_decode_bytes(str)?).map_err(|e| KitError::CryptoError {
        message: format!("base64 payload is not UTF-8: {}", e),
    })
}
