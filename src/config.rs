//! Configuration constants and types for StegoX.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Size of the big-endian ciphertext length field.
pub const LENGTH_FIELD_SIZE: usize = 4;

/// HMAC-SHA256 tag size.
pub const TAG_SIZE: usize = 32;

/// AES block size; CBC IVs and padded ciphertexts are multiples of it.
pub const BLOCK_SIZE: usize = 16;

/// AES-CBC IV size.
pub const IV_SIZE: usize = BLOCK_SIZE;

/// Fixed frame header: length + tag + salt + iv.
pub const HEADER_SIZE: usize = LENGTH_FIELD_SIZE + TAG_SIZE + argon2_params::SALT_LENGTH + IV_SIZE;

/// Header size in carrier units (one bit per unit).
pub const HEADER_BITS: usize = HEADER_SIZE * 8;

/// Bytes a frame adds on top of the ciphertext.
pub const FRAME_OVERHEAD: usize = HEADER_SIZE;

/// Argon2id parameters for key derivation.
pub mod argon2_params {
    /// Memory cost in KiB (64 MB).
    pub const MEMORY_COST: u32 = 65536;

    /// Time cost (iterations).
    pub const TIME_COST: u32 = 3;

    /// Parallelism factor.
    pub const PARALLELISM: u32 = 4;

    /// Output length in bytes (256 bits).
    pub const OUTPUT_LENGTH: usize = 32;

    /// Salt length in bytes.
    pub const SALT_LENGTH: usize = 16;
}

/// Argon2id cost parameters.
///
/// These are not stored in the frame, so hide and reveal must agree on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfParams {
    /// Memory cost in KiB.
    pub memory_cost: u32,
    /// Number of passes.
    pub time_cost: u32,
    /// Lanes.
    pub parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            memory_cost: argon2_params::MEMORY_COST,
            time_cost: argon2_params::TIME_COST,
            parallelism: argon2_params::PARALLELISM,
        }
    }
}

impl KdfParams {
    /// Create custom KDF parameters.
    pub fn new(memory_cost: u32, time_cost: u32, parallelism: u32) -> Self {
        Self {
            memory_cost,
            time_cost,
            parallelism,
        }
    }

    /// Minimal parameters for tests and benchmarks. Never use for real secrets.
    pub fn fast_insecure() -> Self {
        Self::new(64, 1, 1)
    }

    /// Validate the parameters against Argon2's limits.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.parallelism == 0 {
            return Err("Parallelism must be at least 1".to_string());
        }
        if self.time_cost == 0 {
            return Err("Time cost must be at least 1".to_string());
        }
        if self.memory_cost < 8 * self.parallelism {
            return Err(format!(
                "Memory cost must be at least {} KiB for parallelism {}",
                8 * self.parallelism,
                self.parallelism
            ));
        }
        Ok(())
    }
}

/// Configuration for the codec.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Key derivation cost.
    #[serde(default)]
    pub kdf: KdfParams,
}

impl CodecConfig {
    /// Create a configuration with custom KDF parameters.
    pub fn new(kdf: KdfParams) -> Self {
        Self { kdf }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> std::result::Result<(), String> {
        self.kdf.validate()
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: CodecConfig = serde_json::from_str(&text)?;
        config.validate().map_err(Error::Config)?;
        Ok(config)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_layout() {
        assert_eq!(HEADER_SIZE, 68);
        assert_eq!(HEADER_BITS, 544);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(CodecConfig::default().validate().is_ok());
        assert!(KdfParams::fast_insecure().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_lanes() {
        let params = KdfParams::new(65536, 3, 0);
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_low_memory() {
        let params = KdfParams::new(16, 1, 4);
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_json_roundtrip() {
        let config = CodecConfig::new(KdfParams::new(1024, 2, 2));
        let json = config.to_json().unwrap();
        let parsed: CodecConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, config);
    }

    #[test]
    fn test_missing_kdf_uses_defaults() {
        let parsed: CodecConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.kdf, KdfParams::default());
    }

    #[test]
    fn test_from_json_file_rejects_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("codec.json");
        std::fs::write(
            &path,
            r#"{"kdf":{"memory_cost":4,"time_cost":1,"parallelism":1}}"#,
        )
        .unwrap();

        assert!(matches!(
            CodecConfig::from_json_file(&path),
            Err(Error::Config(_))
        ));
    }
}
