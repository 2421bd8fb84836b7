use crate::config::{BlockingStrategy, Truncation};

/// Applies the truncation side of a blocking strategy to a prompt.
///
/// Remote providers cannot see the model's token budget, so `max_length` is
/// counted in whitespace tokens. Padding is left to the inference engine.
pub fn apply_blocking(prompt: &str, strategy: &BlockingStrategy) -> String {
    let Some(max) = strategy.max_length else {
        return prompt.to_string();
    };
    let tokens: Vec<&str> = prompt.split_whitespace().collect();
    if tokens.len() <= max {
        return prompt.to_string();
    }
    let kept = match strategy.truncation {
        Truncation::Left => &tokens[tokens.len() - max..],
        Truncation::Right => &tokens[..max],
    };
    kept.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Padding;

    fn strategy(truncation: Truncation, max_length: Option<usize>) -> BlockingStrategy {
        BlockingStrategy {
            padding: Padding::Left,
            truncation,
            max_length,
        }
    }

    #[test]
    fn no_limit_leaves_prompt_untouched() {
        let s = strategy(Truncation::Left, None);
        assert_eq!(apply_blocking("  keep   spacing ", &s), "  keep   spacing ");
    }

    #[test]
    fn left_truncation_keeps_the_tail() {
        let s = strategy(Truncation::Left, Some(2));
        assert_eq!(apply_blocking("one two three four", &s), "three four");
    }

    #[test]
    fn right_truncation_keeps_the_head() {
        let s = strategy(Truncation::Right, Some(3));
        assert_eq!(apply_blocking("one two three four", &s), "one two three");
    }

    #[test]
    fn short_prompt_is_not_rewritten() {
        let s = strategy(Truncation::Left, Some(8));
        assert_eq!(apply_blocking("a  b", &s), "a  b");
    }
}
