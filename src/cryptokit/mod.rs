//! Digests, URL and base64 encoding, and the reversible dynamic cipher.

mod dynamic;
mod encoding;

pub use dynamic::{dynamic_decrypt, dynamic_encrypt, dynamic_encrypt_with_expiry, DynamicCipher};
pub use encoding::{
    base64_decode, base64_decode_bytes, base64_encode, http_build_query, rawurldecode,
    rawurlencode, url_decode, url_encode,
};

use crate::utils::error::Result;
use sha1::{Digest, Sha1};
use std::path::Path;

/// Lowercase hex MD5 of `data`.
pub fn md5<T: AsRef<[u8]>>(data: T) -> String {
    format!("{:x}", md5::compute(data.as_ref()))
}

pub fn md5_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let data = std::fs::read(path.as_ref())?;
    Ok(md5(data))
}

pub fn sha1<T: AsRef<[u8]>>(data: T) -> String {
    let mut hasher = Sha1::new();
    hasher.update(data.as_ref());
    hex::encode(hasher.finalize())
}

pub fn sha1_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let data = std::fs::read(path.as_ref())?;
    Ok(sha1(data))
}

/// IEEE CRC-32, the same checksum zip and gzip use.
pub fn crc32<T: AsRef<[u8]>>(data: T) -> u32 {
    let mut crc = flate2::Crc::new();
    crc.update(data.as_ref());
    crc.sum()
}
