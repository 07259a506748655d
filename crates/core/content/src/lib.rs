use sha2::{Digest, Sha256};
use unicode_normalization::UnicodeNormalization;

pub mod moderation;

/// Canonicalise raw text for comparison and matching
///
/// NFKC compatibility normalisation, case folding, then whitespace
/// runs collapsed to a single space and the ends trimmed. Idempotent.
/// Moderation matching and duplicate fingerprints must both go through
/// this one function: two different normalisations would let case or
/// width tricks slip past one of them.
pub fn normalise(text: &str) -> String {
    text.nfkc()
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Fingerprint of normalised content, used for duplicate suppression
pub fn fingerprint(normalised: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(normalised.as_bytes());
    format!("{:x}", hasher.finalize())
}
