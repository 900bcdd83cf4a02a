//! Utility functions and helpers.

pub mod http;
pub mod report;

use url::Url;

/// Resolve a potentially relative URL against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> Option<Url> {
    base.join(href.trim()).ok()
}

/// Collapse runs of whitespace into single spaces and trim.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Last space-separated token of a labelled value, e.g.
/// `"Referência: 11/2022"` -> `"11/2022"`.
pub fn last_token(s: &str) -> &str {
    let s = s.trim();
    s.rsplit(' ').next().unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url() {
        let base = Url::parse("https://www.ccee.org.br/acervo-ccee").unwrap();
        assert_eq!(
            resolve_url(&base, "/documents/80415/deck.zip").unwrap().as_str(),
            "https://www.ccee.org.br/documents/80415/deck.zip"
        );
        assert_eq!(
            resolve_url(&base, "https://other.com/x").unwrap().as_str(),
            "https://other.com/x"
        );
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  Deck de\n   Preços "), "Deck de Preços");
    }

    #[test]
    fn test_last_token() {
        assert_eq!(last_token("Referência: 11/2022"), "11/2022");
        assert_eq!(last_token(" 12MB "), "12MB");
        assert_eq!(last_token(""), "");
    }
}
