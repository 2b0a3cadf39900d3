//! Sealed-box encryption of secret values.
//!
//! GitHub expects secrets encrypted with libsodium's `crypto_box_seal`:
//! an ephemeral X25519 keypair per message, XSalsa20-Poly1305 with a nonce
//! derived from both public keys, and the ephemeral public key prepended to
//! the ciphertext. The `crypto_box` crate implements the same construction.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use crypto_box::aead::OsRng;
use ghsecrets_types::{PublicKey, Result, SealedSecret, SecretError};

/// Length of an X25519 public key.
pub const KEY_LEN: usize = 32;

/// Bytes a sealed box adds to the plaintext (ephemeral key + MAC).
pub const SEAL_OVERHEAD: usize = 48;

/// Decode a base64 public key into a `crypto_box` key.
pub fn decode_public_key(key: &str) -> Result<crypto_box::PublicKey> {
    let bytes = STANDARD
        .decode(key.trim())
        .map_err(|e| SecretError::Encryption(format!("Public key is not valid base64: {}", e)))?;

    let bytes: [u8; KEY_LEN] = bytes.as_slice().try_into().map_err(|_| {
        SecretError::Encryption(format!(
            "Public key must be {} bytes, got {}",
            KEY_LEN,
            bytes.len()
        ))
    })?;

    Ok(crypto_box::PublicKey::from(bytes))
}

/// Seal `plaintext` for the holder of `key`.
///
/// The result always carries the ciphertext and the key id; an empty
/// plaintext still yields a non-empty sealed box.
pub fn seal_secret(key: &PublicKey, plaintext: &str) -> Result<SealedSecret> {
    let recipient = decode_public_key(&key.key)?;

    let sealed = recipient
        .seal(&mut OsRng, plaintext.as_bytes())
        .map_err(|e| SecretError::Encryption(format!("Failed to seal secret: {}", e)))?;

    Ok(SealedSecret {
        encrypted_value: STANDARD.encode(sealed),
        key_id: key.key_id.clone(),
    })
}
