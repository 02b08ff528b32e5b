//! Passphrase gate consulted before a reveal.
//!
//! Speech recognition lives outside this crate. A caller either supplies its
//! own [`Authorizer`] or transcribes the spoken passphrase itself and hands
//! the text to a [`TranscriptGate`].

use std::collections::HashSet;

/// Default word-overlap threshold for accepting a transcript.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.8;

/// Decides whether a reveal may proceed.
pub trait Authorizer {
    /// Returns true if `passphrase` grants access.
    fn authorize(&self, passphrase: &str) -> bool;
}

impl<F> Authorizer for F
where
    F: Fn(&str) -> bool,
{
    fn authorize(&self, passphrase: &str) -> bool {
        self(passphrase)
    }
}

/// Gate that always grants access.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl Authorizer for AllowAll {
    fn authorize(&self, _passphrase: &str) -> bool {
        true
    }
}

/// Compares an externally produced transcript with the expected phrase.
///
/// Both sides are normalized (lowercase, punctuation stripped, whitespace
/// collapsed) and compared by Jaccard similarity of their word sets.
#[derive(Debug, Clone)]
pub struct TranscriptGate {
    transcript: String,
    threshold: f64,
}

impl TranscriptGate {
    /// Gate using the default threshold.
    pub fn new(transcript: impl Into<String>) -> Self {
        Self::with_threshold(transcript, DEFAULT_SIMILARITY_THRESHOLD)
    }

    /// Gate with a custom threshold in `0.0..=1.0`.
    pub fn with_threshold(transcript: impl Into<String>, threshold: f64) -> Self {
        Self {
            transcript: transcript.into(),
            threshold: threshold.clamp(0.0, 1.0),
        }
    }

    /// Similarity of the transcript to `expected`.
    pub fn similarity(&self, expected: &str) -> f64 {
        similarity(&normalize_text(&self.transcript), &normalize_text(expected))
    }
}

impl Authorizer for TranscriptGate {
    fn authorize(&self, passphrase: &str) -> bool {
        self.similarity(passphrase) >= self.threshold
    }
}

/// Lowercase, drop punctuation, collapse runs of whitespace.
pub fn normalize_text(text: &str) -> String {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Jaccard similarity of the word sets of two normalized strings.
pub fn similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }

    let words_a: HashSet<&str> = a.split(' ').collect();
    let words_b: HashSet<&str> = b.split(' ').collect();
    let union = words_a.union(&words_b).count();
    if union == 0 {
        return 0.0;
    }
    words_a.intersection(&words_b).count() as f64 / union as f64
}
