// Search filter construction.
// Translates a free-text keyword into GitHub search qualifier syntax.

/// Terms OR-ed together when the user has not typed anything.
const DEFAULT_TERMS: [&str; 5] = ["ai", "agent", "mcp", "llm", "machine-learning"];

/// Qualifiers applied to every search.
const CONSTRAINTS: &str = "stars:>=1000 fork:true is:public archived:false";

/// Fields a user keyword is matched against.
const KEYWORD_SCOPE: &str = "in:name,description,topics";

/// Build the `q` filter expression for a keyword.
///
/// The keyword is trimmed and otherwise passed through untouched, so any
/// qualifier syntax it contains (colons, quotes) reaches GitHub as-is.
pub fn build_filter(keyword: &str) -> String {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        format!("{} {}", DEFAULT_TERMS.join(" OR "), CONSTRAINTS)
    } else {
        format!("{} {} {}", keyword, KEYWORD_SCOPE, CONSTRAINTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_keyword_uses_default_terms() {
        assert_eq!(
            build_filter(""),
            "ai OR agent OR mcp OR llm OR machine-learning stars:>=1000 fork:true is:public archived:false"
        );
    }

    #[test]
    fn test_whitespace_keyword_is_empty() {
        assert_eq!(build_filter("  \t "), build_filter(""));
    }

    #[test]
    fn test_keyword_is_scoped() {
        assert_eq!(
            build_filter("langchain"),
            "langchain in:name,description,topics stars:>=1000 fork:true is:public archived:false"
        );
    }

    #[test]
    fn test_keyword_is_trimmed_not_escaped() {
        let filter = build_filter("  \"vector db\" language:rust ");
        assert!(filter.starts_with("\"vector db\" language:rust in:name,description,topics "));
        assert!(filter.ends_with(CONSTRAINTS));
    }
}
