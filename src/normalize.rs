//! Display-name canonicalization for the fuzzy matching tiers.

/// Canonicalize a display name for low-confidence comparison.
///
/// Lowercases, then keeps only word characters (ASCII alphanumerics and
/// underscore) and Hangul syllables. Everything else — whitespace,
/// half/full-width brackets and quotes, punctuation — is stripped.
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|&c| c.is_ascii_alphanumeric() || c == '_' || is_hangul_syllable(c))
        .collect()
}

fn is_hangul_syllable(c: char) -> bool {
    ('가'..='힣').contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_whitespace_and_case() {
        assert_eq!(normalize_name("Samsung Electronics"), "samsungelectronics");
    }

    #[test]
    fn strips_brackets_and_quotes() {
        assert_eq!(normalize_name("KODEX 200(주)"), "kodex200주");
        assert_eq!(normalize_name("\"TIGER\" [미국S&P500]"), "tiger미국sp500");
    }

    #[test]
    fn strips_fullwidth_brackets() {
        assert_eq!(normalize_name("삼성전자（우）"), "삼성전자우");
    }

    #[test]
    fn keeps_hangul_and_digits() {
        assert_eq!(normalize_name("삼성전자"), "삼성전자");
        assert_eq!(normalize_name("KB 금융 123"), "kb금융123");
    }

    #[test]
    fn empty_and_symbol_only_inputs() {
        assert_eq!(normalize_name(""), "");
        assert_eq!(normalize_name("()[]“”·—"), "");
    }
}
