use crate::porter;

/// ROUGE tokenization: lowercase, every char outside `[a-z0-9]` becomes a
/// separator, and with `stem` tokens longer than 3 chars are Porter-stemmed.
pub fn rouge_tokens(text: &str, stem: bool) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                ' '
            }
        })
        .collect();
    cleaned
        .split_whitespace()
        .map(|tok| {
            if stem && tok.len() > 3 {
                porter::stem(tok)
            } else {
                tok.to_string()
            }
        })
        .collect()
}

/// Whitespace tokens of the stripped string, as BLEU and length metrics see them.
pub fn whitespace_tokens(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punctuation_splits_and_case_folds() {
        assert_eq!(
            rouge_tokens("Hello, World! It's 2024.", false),
            vec!["hello", "world", "it", "s", "2024"]
        );
    }

    #[test]
    fn stems_only_long_tokens() {
        assert_eq!(
            rouge_tokens("The cats were running", true),
            vec!["the", "cat", "were", "run"]
        );
    }

    #[test]
    fn empty_and_symbol_only_inputs() {
        assert!(rouge_tokens("", true).is_empty());
        assert!(rouge_tokens("?! ...", true).is_empty());
    }
}
