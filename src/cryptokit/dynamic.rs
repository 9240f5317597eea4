use super::encoding::{base64_decode_bytes, base64_encode};
use super::md5;
use crate::timekit;
use crate::utils::error::{KitError, Result};

const CKEY_LENGTH: usize = 4;
const BOX_SIZE: usize = 127;
const EXPIRY_WIDTH: usize = 10;
const DIGEST_WIDTH: usize = 16;
const HEADER_WIDTH: usize = EXPIRY_WIDTH + DIGEST_WIDTH;

/// Reversible, salted cipher producing URL-safe tokens.
///
/// Every encryption draws a fresh four character salt, so the same plaintext
/// gives a different token each time. Tokens may carry an expiry; a token that
/// is expired or has been tampered with fails to decrypt.
#[derive(Clone)]
pub struct DynamicCipher {
    keya: String,
    keyb: String,
}

impl std::fmt::Debug for DynamicCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamicCipher").finish_non_exhaustive()
    }
}

impl DynamicCipher {
    pub fn new(secret: &str) -> Self {
        let key = md5(secret);
        Self {
            keya: md5(&key[..16]),
            keyb: md5(&key[16..32]),
        }
    }

    /// Encrypt without expiry.
    pub fn encrypt(&self, plain: &str) -> String {
        self.encrypt_at(plain, 0)
    }

    /// Encrypt a token that stops decrypting `seconds` from now.
    pub fn encrypt_with_expiry(&self, plain: &str, seconds: u64) -> String {
        let expire_at = if seconds == 0 {
            0
        } else {
            timekit::now_timestamp() + seconds as i64
        };
        self.encrypt_at(plain, expire_at)
    }

    fn encrypt_at(&self, plain: &str, expire_at: i64) -> String {
        let salt = md5(timekit::microtime().to_string());
        let keyc = &salt[salt.len() - CKEY_LENGTH..];
        self.seal(keyc, plain.as_bytes(), expire_at)
    }

    fn seal(&self, keyc: &str, plain: &[u8], expire_at: i64) -> String {
        let mut frame = Vec::with_capacity(HEADER_WIDTH + plain.len());
        frame.extend_from_slice(format!("{:010}", expire_at).as_bytes());
        frame.extend_from_slice(&self.digest(plain).as_bytes()[..DIGEST_WIDTH]);
        frame.extend_from_slice(plain);

        let sealed = self.keystream_xor(keyc, &frame);
        let body = base64_encode(sealed)
            .replace('/', ".")
            .replace('+', "-")
            .replace('=', "_");
        format!("{}{}", keyc, body)
    }

    pub fn decrypt(&self, token: &str) -> Result<String> {
        let plain = self.decrypt_bytes(token)?;
        String::from_utf8(plain).map_err(|_| KitError::InvalidToken)
    }

    pub fn decrypt_bytes(&self, token: &str) -> Result<Vec<u8>> {
        let keyc = token.get(..CKEY_LENGTH).ok_or(KitError::InvalidToken)?;
        let body = token[CKEY_LENGTH..]
            .replace('.', "/")
            .replace('-', "+")
            .replace('_', "=");
        let sealed = base64_decode_bytes(&body).map_err(|_| KitError::InvalidToken)?;

        let frame = self.keystream_xor(keyc, &sealed);
        if frame.len() < HEADER_WIDTH {
            return Err(KitError::InvalidToken);
        }

        let expire_at: i64 = std::str::from_utf8(&frame[..EXPIRY_WIDTH])
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or(KitError::InvalidToken)?;
        let plain = &frame[HEADER_WIDTH..];

        let fresh = expire_at == 0 || expire_at > timekit::now_timestamp();
        let intact = frame[EXPIRY_WIDTH..HEADER_WIDTH] == self.digest(plain).as_bytes()[..DIGEST_WIDTH];
        if fresh && intact {
            Ok(plain.to_vec())
        } else {
            tracing::debug!("Token rejected: fresh={} intact={}", fresh, intact);
            Err(KitError::InvalidToken)
        }
    }

    fn digest(&self, plain: &[u8]) -> String {
        let mut input = plain.to_vec();
        input.extend_from_slice(self.keyb.as_bytes());
        md5(input)
    }

    /// RC4-style keystream over a 127 entry box, keyed by keya and the salt.
    fn keystream_xor(&self, keyc: &str, data: &[u8]) -> Vec<u8> {
        let crypt_key = format!("{}{}", self.keya, md5(format!("{}{}", self.keya, keyc)));
        let key = crypt_key.as_bytes();

        let mut sbox: [usize; BOX_SIZE] = std::array::from_fn(|i| i);
        let mut j = 0;
        for i in 0..BOX_SIZE {
            j = (j + sbox[i] + key[i % key.len()] as usize) % BOX_SIZE;
            sbox.swap(i, j);
        }

        let (mut a, mut j) = (0, 0);
        data.iter()
            .map(|&byte| {
                a = (a + 1) % BOX_SIZE;
                j = (j + sbox[a]) % BOX_SIZE;
                sbox.swap(a, j);
                byte ^ sbox[(sbox[a] + sbox[j]) % BOX_SIZE] as u8
            })
            .collect()
    }
}

pub fn dynamic_encrypt(secret: &str, plain: &str) -> String {
    DynamicCipher::new(secret).encrypt(plain)
}

pub fn dynamic_encrypt_with_expiry(secret: &str, plain: &str, seconds: u64) -> String {
    DynamicCipher::new(secret).encrypt_with_expiry(plain, seconds)
}

pub fn dynamic_decrypt(secret: &str, token: &str) -> Result<String> {
    DynamicCipher::new(secret).decrypt(token)
}
