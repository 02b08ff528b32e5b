//! AES-256-CBC encryption authenticated with HMAC-SHA256.
//!
//! Encrypt-then-MAC: the tag covers `salt || iv || ciphertext` and is checked
//! in constant time before the padding is looked at, so a wrong password and
//! a bad padding byte fail the same way.

use crate::config::{KdfParams, IV_SIZE, TAG_SIZE};
use crate::crypto::kdf::{KeyDerivation, Salt, SessionKeys};
use crate::error::{Error, Result};
use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use hmac::{Hmac, Mac};
use rand::{CryptoRng, RngCore};
use sha2::Sha256;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;
type HmacSha256 = Hmac<Sha256>;

/// CBC initialization vector.
pub type Iv = [u8; IV_SIZE];

/// Integrity tag.
pub type Tag = [u8; TAG_SIZE];

/// Everything needed to decrypt a message with its password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sealed {
    /// Salt for key derivation.
    pub salt: Salt,
    /// CBC IV.
    pub iv: Iv,
    /// HMAC-SHA256 over salt, IV and ciphertext.
    pub tag: Tag,
    /// PKCS#7-padded AES-256-CBC ciphertext.
    pub ciphertext: Vec<u8>,
}

/// AES-256-CBC + HMAC-SHA256 cipher bound to one set of session keys.
pub struct Cipher {
    keys: SessionKeys,
}

impl Cipher {
    /// Create a cipher from derived session keys.
    pub fn new(keys: SessionKeys) -> Self {
        Self { keys }
    }

    /// Encrypt and authenticate `plaintext` under `iv`.
    pub fn seal(&self, plaintext: &[u8], salt: Salt, iv: Iv) -> Result<Sealed> {
        let ciphertext = Aes256CbcEnc::new_from_slices(self.keys.enc_key(), &iv)
            .map_err(|e| Error::Encryption(e.to_string()))?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext);

        let tag = self.compute_tag(&salt, &iv, &ciphertext)?;

        Ok(Sealed {
            salt,
            iv,
            tag,
            ciphertext,
        })
    }

    /// Verify the tag, then decrypt.
    pub fn open(&self, sealed: &Sealed) -> Result<Vec<u8>> {
        let mut mac = self.mac()?;
        mac.update(&sealed.salt);
        mac.update(&sealed.iv);
        mac.update(&sealed.ciphertext);
        mac.verify_slice(&sealed.tag)
            .map_err(|_| Error::AuthenticationFailure)?;

        Aes256CbcDec::new_from_slices(self.keys.enc_key(), &sealed.iv)
            .map_err(|_| Error::AuthenticationFailure)?
            .decrypt_padded_vec_mut::<Pkcs7>(&sealed.ciphertext)
            .map_err(|_| Error::AuthenticationFailure)
    }

    fn compute_tag(&self, salt: &Salt, iv: &Iv, ciphertext: &[u8]) -> Result<Tag> {
        let mut mac = self.mac()?;
        mac.update(salt);
        mac.update(iv);
        mac.update(ciphertext);
        let mut tag = [0u8; TAG_SIZE];
        tag.copy_from_slice(&mac.finalize().into_bytes());
        Ok(tag)
    }

    fn mac(&self) -> Result<HmacSha256> {
        HmacSha256::new_from_slice(self.keys.mac_key())
            .map_err(|e| Error::KeyDerivation(e.to_string()))
    }
}

/// Encrypt data with a password.
///
/// Salt and IV are drawn from `rng`; the key comes from Argon2id.
pub fn encrypt<R: RngCore + CryptoRng>(
    plaintext: &[u8],
    password: &str,
    params: &KdfParams,
    rng: &mut R,
) -> Result<Sealed> {
    let kdf = KeyDerivation::generate(rng);
    let mut iv = [0u8; IV_SIZE];
    rng.fill_bytes(&mut iv);

    let cipher = Cipher::new(kdf.derive_session_keys(password, params)?);
    cipher.seal(plaintext, *kdf.salt(), iv)
}

/// Decrypt data with a password.
pub fn decrypt(sealed: &Sealed, password: &str, params: &KdfParams) -> Result<Vec<u8>> {
    let kdf = KeyDerivation::from_salt(sealed.salt);
    let cipher = Cipher::new(kdf.derive_session_keys(password, params)?);
    cipher.open(sealed)
}
