//! Translation of user queries into FTS5 match expressions.
//!
//! Each whitespace-separated token becomes a quoted prefix term and the
//! terms are ANDed:
//!
//! ```text
//! inv finance      →  "inv"* "finance"*
//! q4-report        →  "q4-report"*
//! 5"x7             →  "5""x7"*               (quotes doubled)
//! ```
//!
//! Quoting keeps FTS5 operators (`-`, `:`, `^`, `AND`, `NEAR`, ...) literal.
//! Inside the quotes the `unicode61` tokenizer still splits on punctuation,
//! so `q4-report` matches the adjacent words `q4 report…` with the last
//! one as a prefix. Matching is case-insensitive.

/// Build the MATCH expression for `query`.
///
/// Returns `None` when no token carries an alphanumeric character, i.e.
/// when there is nothing the tokenizer could index.
pub fn build_match_expr(query: &str) -> Option<String> {
    let terms: Vec<String> = query
        .split_whitespace()
        .filter(|token| token.chars().any(char::is_alphanumeric))
        .map(prefix_term)
        .collect();

    if terms.is_empty() {
        None
    } else {
        Some(terms.join(" "))
    }
}

fn prefix_term(token: &str) -> String {
    format!("\"{}\"*", token.replace('"', "\"\""))
}

/// Whether `query` should list everything instead of searching.
pub fn is_blank(query: &str) -> bool {
    query.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_token() {
        assert_eq!(build_match_expr("inv").as_deref(), Some("\"inv\"*"));
    }

    #[test]
    fn test_tokens_are_anded() {
        assert_eq!(
            build_match_expr("  inv \t finance\n").as_deref(),
            Some("\"inv\"* \"finance\"*")
        );
    }

    #[test]
    fn test_operators_are_quoted() {
        assert_eq!(
            build_match_expr("NOT q4-report").as_deref(),
            Some("\"NOT\"* \"q4-report\"*")
        );
    }

    #[test]
    fn test_embedded_quotes_doubled() {
        assert_eq!(build_match_expr("a\"b").as_deref(), Some("\"a\"\"b\"*"));
    }

    #[test]
    fn test_punctuation_only_tokens_dropped() {
        assert_eq!(build_match_expr("- ** tax").as_deref(), Some("\"tax\"*"));
        assert_eq!(build_match_expr("- ** ()"), None);
    }

    #[test]
    fn test_unicode_tokens_kept() {
        assert_eq!(build_match_expr("résumé").as_deref(), Some("\"résumé\"*"));
    }

    #[test]
    fn test_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   \t"));
        assert!(!is_blank(" x "));
    }
}
