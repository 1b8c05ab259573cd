//! Lexical name resemblance, independent of structure.
//!
//! Scores fall in three tiers: 1.0 for equal normalized names, 0.8 when one
//! contains the other, and at most 0.6 from token overlap.

const CONTAINMENT_SCORE: f64 = 0.8;
const TOKEN_OVERLAP_SCALE: f64 = 0.6;

/// Fuzzy similarity of two names in [0, 1].
pub fn fuzzy_match(a: &str, b: &str) -> f64 {
    let norm_a = normalize(a);
    let norm_b = normalize(b);

    if norm_a == norm_b {
        return 1.0;
    }
    if norm_a.contains(&norm_b) || norm_b.contains(&norm_a) {
        return CONTAINMENT_SCORE;
    }

    let tokens_a = tokens(a);
    let tokens_b = tokens(b);
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let matched = tokens_a
        .iter()
        .filter(|ta| tokens_b.iter().any(|tb| ta.contains(tb.as_str()) || tb.contains(ta.as_str())))
        .count();
    matched as f64 / tokens_a.len().max(tokens_b.len()) as f64 * TOKEN_OVERLAP_SCALE
}

/// Lower-case and keep only ASCII letters and digits.
fn normalize(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// Lower-cased alphanumeric runs longer than two characters.
fn tokens(s: &str) -> Vec<String> {
    s.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| w.len() > 2)
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_names() {
        assert_eq!(fuzzy_match("Button", "Button"), 1.0);
        assert_eq!(fuzzy_match("Button", "button"), 1.0);
        assert_eq!(fuzzy_match("my-button", "my button"), 1.0);
    }

    #[test]
    fn containment() {
        assert_eq!(fuzzy_match("PrimaryButton", "primary"), 0.8);
        assert_eq!(fuzzy_match("btn", "submit-btn-large"), 0.8);
    }

    #[test]
    fn short_tokens_only() {
        assert_eq!(fuzzy_match("ab", "cd"), 0.0);
    }

    #[test]
    fn token_overlap_is_partial() {
        let score = fuzzy_match("Card Header Large", "Header Card Small");
        assert!(score > 0.0 && score <= TOKEN_OVERLAP_SCALE);
        // card + header match, 2 of 3 tokens.
        assert!((score - 0.4).abs() < 1e-9);
    }

    #[test]
    fn unrelated_long_words() {
        assert_eq!(fuzzy_match("navigation", "elephant"), 0.0);
    }

    #[test]
    fn empty_normalized_name_is_contained_in_any_name() {
        assert_eq!(fuzzy_match("---", "Button"), 0.8);
        assert_eq!(fuzzy_match("", "Card"), 0.8);
        assert_eq!(fuzzy_match("Card", "/ /"), 0.8);
    }

    #[test]
    fn always_within_bounds() {
        let names = ["", "a", "Nav Bar", "nav/bar/item", "Settings Screen", "Screen"];
        for a in names {
            for b in names {
                let s = fuzzy_match(a, b);
                assert!((0.0..=1.0).contains(&s), "{a:?} vs {b:?} = {s}");
            }
        }
    }
}
