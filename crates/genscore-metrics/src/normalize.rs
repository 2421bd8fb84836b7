/// Lowercase, drop ASCII punctuation, collapse whitespace. Articles are kept.
pub fn normalize_answer(s: &str) -> String {
    let lowered = s.to_lowercase();
    let no_punc: String = lowered
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect();
    no_punc.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation_and_spacing() {
        assert_eq!(normalize_answer("  The  Eiffel-Tower!\n"), "the eiffeltower");
    }

    #[test]
    fn keeps_articles() {
        assert_eq!(normalize_answer("A cat"), "a cat");
    }
}
