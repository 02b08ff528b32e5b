//! Cryptographic operations for StegoX.
//!
//! This module provides:
//! - AES-256-CBC encryption with an HMAC-SHA256 integrity tag
//! - Argon2id password-based key derivation

mod cipher;
mod kdf;

pub use cipher::{decrypt, encrypt, Cipher, Iv, Sealed, Tag};
pub use kdf::{KeyDerivation, Salt, SessionKeys};
