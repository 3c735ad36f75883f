#[cfg(test)]
mod tests {
    use crate::routes::product::utils::escape_like_pattern;

    #[test]
    fn test_search_term_wildcards_are_escaped() {
        assert_eq!(escape_like_pattern("100% cotton"), "100\\% cotton");
        assert_eq!(escape_like_pattern("snake_case"), "snake\\_case");
        assert_eq!(escape_like_pattern("a\\b"), "a\\\\b");
        assert_eq!(escape_like_pattern("steel tumbler"), "steel tumbler");
    }

    #[test]
    fn test_bare_wildcard_search_matches_nothing_literal() {
        // A lone "%" must not turn into a match-everything pattern.
        assert_eq!(escape_like_pattern("%"), "\\%");
        assert_eq!(escape_like_pattern("__"), "\\_\\_");
    }
}
