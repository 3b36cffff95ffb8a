// src/core/skills.rs

/// Normalize free-text skill input into the token sequence sent to the
/// backend: split on commas, trim, lower-case, order preserved.
///
/// Empty tokens from consecutive commas are kept; the backend tolerates them.
pub fn tokenize(raw: &str) -> Vec<String> {
    raw.split(',').map(|token| token.trim().to_lowercase()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_trims_and_lowercases() {
        assert_eq!(
            tokenize("Python, SQL , Machine Learning"),
            vec!["python", "sql", "machine learning"]
        );
    }

    #[test]
    fn test_tokenize_preserves_order() {
        assert_eq!(tokenize("rust, go, c"), vec!["rust", "go", "c"]);
        assert_eq!(tokenize("c, go, rust"), vec!["c", "go", "rust"]);
    }

    #[test]
    fn test_tokenize_keeps_empty_tokens() {
        assert_eq!(tokenize("python,,sql"), vec!["python", "", "sql"]);
        assert_eq!(tokenize(""), vec![""]);
    }
}
