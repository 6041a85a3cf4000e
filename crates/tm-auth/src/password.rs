//! Password hashing.
//!
//! HMAC-SHA512 keyed with a fresh 64-byte random key per user: the key is
//! the stored salt, the MAC over the password bytes is the stored hash.
//! Both are base64-encoded for text-safe storage. Plaintext passwords are
//! never stored and none of this material is ever logged.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha512;

type HmacSha512 = Hmac<Sha512>;

/// Key/salt length in bytes.
const SALT_LEN: usize = 64;

/// Derived password material, both fields base64-encoded.
#[derive(Clone)]
pub struct PasswordMaterial {
    pub hash: String,
    pub salt: String,
}

/// Derive hash and salt for a new password.
///
/// The salt is drawn from the operating system CSPRNG; hashing the same
/// password twice yields different material.
pub fn hash(password: &str) -> PasswordMaterial {
    let mut key = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut key);

    let mut mac = HmacSha512::new_from_slice(&key)
        .expect("HMAC accepts keys of any length");
    mac.update(password.as_bytes());
    let digest = mac.finalize().into_bytes();

    PasswordMaterial {
        hash: BASE64.encode(digest),
        salt: BASE64.encode(key),
    }
}

/// Verify a password against stored material.
///
/// Comparison is constant-time. Fails closed: malformed base64 or a
/// truncated digest verifies as `false`, indistinguishable from a wrong
/// password.
pub fn verify(password: &str, stored_hash: &str, stored_salt: &str) -> bool {
    let Ok(key) = BASE64.decode(stored_salt) else {
        return false;
    };
    let Ok(expected) = BASE64.decode(stored_hash) else {
        return false;
    };

    let Ok(mut mac) = HmacSha512::new_from_slice(&key) else {
        return false;
    };
    mac.update(password.as_bytes());
    mac.verify_slice(&expected).is_ok()
}
