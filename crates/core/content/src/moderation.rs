use crate::normalise;

/// Terms that reject a submission outright
///
/// Fixed at process start; matching is substring over normalised text,
/// which is deliberately conservative for free-text anecdotes.
pub static DENY_LIST: &[&str] = &["死ね", "殺す", "fuck", "porn", "sex", "暴力"];

/// Whether the given text contains any denylisted term
pub fn is_flagged(text: &str) -> bool {
    let haystack = normalise(text);
    DENY_LIST
        .iter()
        .any(|term| haystack.contains(&normalise(term)))
}

#[cfg(test)]
mod tests {
    use super::is_flagged;

    #[test]
    fn flags_plain_terms() {
        assert!(is_flagged("死ね"));
        assert!(is_flagged("this is porn"));
    }

    #[test]
    fn flags_case_and_width_variants() {
        assert!(is_flagged("FUCK this"));
        assert!(is_flagged("ｆｕｃｋ"));
        assert!(is_flagged("ＰＯＲＮ"));
    }

    #[test]
    fn flags_embedded_terms() {
        assert!(is_flagged("何度も殺すぞと言われた"));
    }

    #[test]
    fn passes_clean_text() {
        assert!(!is_flagged("子どもの頃、不思議な光を見た"));
        assert!(!is_flagged("hello world"));
    }
}
