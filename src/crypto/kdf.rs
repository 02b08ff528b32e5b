//! Argon2id key derivation for password-based encryption.

use crate::config::{argon2_params, KdfParams};
use crate::error::{Error, Result};
use argon2::{Algorithm, Argon2, Params, Version};
use hmac::{Hmac, Mac};
use rand::{CryptoRng, RngCore};
use sha2::Sha256;
use zeroize::Zeroizing;

type HmacSha256 = Hmac<Sha256>;

/// Label for the AES-CBC subkey.
const ENC_KEY_LABEL: &[u8] = b"stegox-v1-enc";

/// Label for the HMAC subkey.
const MAC_KEY_LABEL: &[u8] = b"stegox-v1-mac";

/// Salt carried in every frame.
pub type Salt = [u8; argon2_params::SALT_LENGTH];

/// Encryption and MAC keys for one message.
pub struct SessionKeys {
    enc: Zeroizing<[u8; 32]>,
    mac: Zeroizing<[u8; 32]>,
}

impl SessionKeys {
    /// AES-256 key.
    pub fn enc_key(&self) -> &[u8; 32] {
        &self.enc
    }

    /// HMAC-SHA256 key.
    pub fn mac_key(&self) -> &[u8; 32] {
        &self.mac
    }
}

/// Key derivation using Argon2id.
#[derive(Debug, Clone)]
pub struct KeyDerivation {
    salt: Salt,
}

impl KeyDerivation {
    /// Create a new KDF with a salt drawn from `rng`.
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut salt = [0u8; argon2_params::SALT_LENGTH];
        rng.fill_bytes(&mut salt);
        Self { salt }
    }

    /// Create a KDF from an existing salt (for decryption).
    pub fn from_salt(salt: Salt) -> Self {
        Self { salt }
    }

    /// Get the salt for storage in the frame.
    pub fn salt(&self) -> &Salt {
        &self.salt
    }

    /// Derive the 256-bit master key from a password.
    pub fn derive_key(&self, password: &str, params: &KdfParams) -> Result<Zeroizing<[u8; 32]>> {
        let params = Params::new(
            params.memory_cost,
            params.time_cost,
            params.parallelism,
            Some(argon2_params::OUTPUT_LENGTH),
        )
        .map_err(|e| Error::KeyDerivation(e.to_string()))?;

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        let mut key = Zeroizing::new([0u8; 32]);
        argon2
            .hash_password_into(password.as_bytes(), &self.salt, &mut *key)
            .map_err(|e| Error::KeyDerivation(e.to_string()))?;

        Ok(key)
    }

    /// Derive the encryption and MAC subkeys from a password.
    pub fn derive_session_keys(&self, password: &str, params: &KdfParams) -> Result<SessionKeys> {
        let master = self.derive_key(password, params)?;
        Ok(SessionKeys {
            enc: expand(&master, ENC_KEY_LABEL)?,
            mac: expand(&master, MAC_KEY_LABEL)?,
        })
    }
}

/// HMAC-SHA256(master, label) as a domain-separated subkey.
fn expand(master: &[u8; 32], label: &[u8]) -> Result<Zeroizing<[u8; 32]>> {
    let mut mac = HmacSha256::new_from_slice(master)
        .map_err(|e| Error::KeyDerivation(e.to_string()))?;
    mac.update(label);
    let mut out = Zeroizing::new([0u8; 32]);
    out.copy_from_slice(&mac.finalize().into_bytes());
    Ok(out)
}
