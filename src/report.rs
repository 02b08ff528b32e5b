//! Capacity and password reports for callers that present results to users.

use crate::carrier::{AudioCarrier, Carrier, MediaFormat, MediaKind};
use crate::stego::capacity;
use rand::{CryptoRng, RngCore};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::HashSet;

/// (High, Medium) rating thresholds in message bytes for images and video.
const VISUAL_THRESHOLDS: (usize, usize) = (10_000, 1_000);

/// (High, Medium) rating thresholds in message bytes for audio.
const AUDIO_THRESHOLDS: (usize, usize) = (50_000, 5_000);

/// Shown when a password and message pair needs no improvement.
pub const EXCELLENT_CONFIGURATION: &str = "Excellent security configuration";

/// Rough class of how much a carrier can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EfficiencyRating {
    High,
    Medium,
    Low,
}

/// What a carrier can hold and how much of it a message would use.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapacityReport {
    /// Container format the rating was computed for.
    pub format: MediaFormat,
    /// Carrier units (one payload bit each).
    pub total_units: usize,
    /// Payload bits.
    pub capacity_bits: usize,
    /// Payload bytes, frame overhead included.
    pub capacity_bytes: usize,
    /// Largest message that fits.
    pub max_message_bytes: usize,
    /// Efficiency class.
    pub rating: EfficiencyRating,
    /// Playing time, audio only.
    pub duration_secs: Option<f64>,
    /// Message bytes per second of audio.
    pub bytes_per_second: Option<f64>,
}

impl CapacityReport {
    /// Build a report for a carrier.
    pub fn for_carrier<C: Carrier>(carrier: &C) -> Self {
        Self::for_units(carrier.unit_count(), carrier.format())
    }

    /// Build a report for an audio carrier, including its duration.
    pub fn for_audio(audio: &AudioCarrier) -> Self {
        let mut report = Self::for_carrier(audio);
        let duration = audio.duration_secs();
        if duration > 0.0 {
            report.duration_secs = Some(duration);
            report.bytes_per_second = Some(report.max_message_bytes as f64 / duration);
        }
        report
    }

    /// Build a report for a carrier of `unit_count` units in `format`.
    ///
    /// Audio is rated against larger thresholds than images and video.
    pub fn for_units(unit_count: usize, format: MediaFormat) -> Self {
        let max_message_bytes = capacity::max_message_bytes(unit_count);
        let (high, medium) = match format.kind() {
            MediaKind::Audio => AUDIO_THRESHOLDS,
            MediaKind::Image | MediaKind::Video => VISUAL_THRESHOLDS,
        };
        let rating = if max_message_bytes > high {
            EfficiencyRating::High
        } else if max_message_bytes > medium {
            EfficiencyRating::Medium
        } else {
            EfficiencyRating::Low
        };

        Self {
            format,
            total_units: unit_count,
            capacity_bits: capacity::capacity_bits(unit_count),
            capacity_bytes: capacity::capacity_bytes(unit_count),
            max_message_bytes,
            rating,
            duration_secs: None,
            bytes_per_second: None,
        }
    }

    /// Percentage of carrier bits a message of `message_len` bytes would
    /// occupy once framed. May exceed 100 when it does not fit.
    pub fn usage_percent(&self, message_len: usize) -> f64 {
        if self.capacity_bits == 0 {
            return 100.0;
        }
        (capacity::frame_len(message_len) * 8) as f64 / self.capacity_bits as f64 * 100.0
    }
}

/// Overall password/message strength class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SecurityRating {
    Excellent,
    Good,
    Moderate,
    Weak,
}

/// Heuristic strength of a password and message pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecurityMetrics {
    /// Distinct lowercase characters divided by message length.
    pub message_entropy: f64,
    /// 0 to 100 in steps of 25.
    pub password_strength: u32,
    /// Mean of password strength and entropy scaled to 100.
    pub security_score: f64,
    /// Class of `security_score`.
    pub rating: SecurityRating,
    /// Suggestions for improving the score, or a single note that none
    /// are needed.
    pub recommendations: Vec<String>,
}

impl SecurityMetrics {
    /// Score a message and password.
    pub fn evaluate(message: &str, password: &str) -> Self {
        let message_entropy = message_entropy(message);
        let password_strength = password_strength(password);
        let security_score = (password_strength as f64 + message_entropy * 100.0) / 2.0;

        let rating = if security_score >= 80.0 {
            SecurityRating::Excellent
        } else if security_score >= 60.0 {
            SecurityRating::Good
        } else if security_score >= 40.0 {
            SecurityRating::Moderate
        } else {
            SecurityRating::Weak
        };

        let mut recommendations = Vec::new();
        if password_strength < 75 {
            recommendations.push(
                "Use a stronger password with mixed case, numbers, and symbols".to_string(),
            );
        }
        if message_entropy < 0.3 {
            recommendations
                .push("Consider using a more varied message with different characters".to_string());
        }
        if recommendations.is_empty() {
            recommendations.push(EXCELLENT_CONFIGURATION.to_string());
        }

        Self {
            message_entropy,
            password_strength,
            security_score,
            rating,
            recommendations,
        }
    }
}

/// 25 points each for length >= 8, an uppercase, a lowercase and a digit.
pub fn password_strength(password: &str) -> u32 {
    let checks = [
        password.chars().count() >= 8,
        password.chars().any(char::is_uppercase),
        password.chars().any(char::is_lowercase),
        password.chars().any(|c| c.is_ascii_digit()),
    ];
    checks.iter().filter(|&&ok| ok).count() as u32 * 25
}

/// Distinct lowercase characters over total characters.
pub fn message_entropy(message: &str) -> f64 {
    let total = message.chars().count();
    if total == 0 {
        return 0.0;
    }
    let distinct: HashSet<char> = message.to_lowercase().chars().collect();
    distinct.len() as f64 / total as f64
}

/// Hex SHA-256 of a message.
pub fn fingerprint(message: &[u8]) -> String {
    hex::encode(Sha256::digest(message))
}

/// Whether two messages have the same fingerprint.
pub fn verify_integrity(original: &[u8], extracted: &[u8]) -> bool {
    fingerprint(original) == fingerprint(extracted)
}

/// A random 16-character hex password.
pub fn generate_password<R: RngCore + CryptoRng>(rng: &mut R) -> String {
    let mut bytes = [0u8; 8];
    rng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Human-readable byte count.
pub fn format_bytes(bytes: usize) -> String {
    const KIB: f64 = 1024.0;
    let value = bytes as f64;
    if bytes < 1024 {
        format!("{} bytes", bytes)
    } else if value < KIB * KIB {
        format!("{:.1} KB", value / KIB)
    } else {
        format!("{:.1} MB", value / KIB / KIB)
    }
}
