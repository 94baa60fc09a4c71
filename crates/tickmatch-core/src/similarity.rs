//! Deterministic fuzzy scoring on a 0-100 scale.
//!
//! Both sides are normalized (lowercase, punctuation to spaces, whitespace
//! collapsed) and compared two ways:
//!
//! - whole string: normalized Damerau-Levenshtein similarity
//! - token set: each query token against its best-matching choice token,
//!   averaged over query tokens, so word order does not matter
//!
//! The score is the better of the two, rounded to an integer. An exact word hit
//! scores that token 1.0; one adjacent transposition in a five-letter word
//! ("telsa" vs "tesla") scores 0.8.

use strsim::normalized_damerau_levenshtein;

/// Highest possible score.
pub const MAX_SCORE: u8 = 100;

/// Lowercases, maps every non-alphanumeric character to a space and collapses
/// runs of whitespace.
pub fn normalize(text: &str) -> String {
    let mapped = text
        .chars()
        .map(|ch| {
            if ch.is_alphanumeric() {
                ch.to_lowercase().next().unwrap_or(ch)
            } else {
                ' '
            }
        })
        .collect::<String>();

    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Similarity of `query` to `choice` in `0..=100`.
pub fn score(query: &str, choice: &str) -> u8 {
    let query = normalize(query);
    let choice = normalize(choice);
    if query.is_empty() || choice.is_empty() {
        return 0;
    }
    if query == choice {
        return MAX_SCORE;
    }

    let whole = normalized_damerau_levenshtein(&query, &choice);
    let token = token_similarity(&query, &choice);
    to_score(whole.max(token))
}

/// Index and score of the best-scoring choice. Ties keep the earliest choice.
pub fn best_match<I, S>(query: &str, choices: I) -> Option<(usize, u8)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut best: Option<(usize, u8)> = None;
    for (index, choice) in choices.into_iter().enumerate() {
        let candidate_score = score(query, choice.as_ref());
        match best {
            Some((_, best_score)) if best_score >= candidate_score => {}
            _ => best = Some((index, candidate_score)),
        }
    }
    best
}

fn token_similarity(query: &str, choice: &str) -> f64 {
    let choice_tokens = choice.split_whitespace().collect::<Vec<_>>();
    let query_tokens = query.split_whitespace().collect::<Vec<_>>();
    if query_tokens.is_empty() || choice_tokens.is_empty() {
        return 0.0;
    }

    let total = query_tokens
        .iter()
        .map(|query_token| {
            choice_tokens
                .iter()
                .map(|choice_token| normalized_damerau_levenshtein(query_token, choice_token))
                .fold(0.0_f64, f64::max)
        })
        .sum::<f64>();

    total / query_tokens.len() as f64
}

fn to_score(similarity: f64) -> u8 {
    (similarity.clamp(0.0, 1.0) * f64::from(MAX_SCORE)).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_punctuation_and_case() {
        assert_eq!(normalize("  Tesla Inc. (NASDAQ:TSLA) "), "tesla inc nasdaq tsla");
        assert_eq!(normalize("3M-Company"), "3m company");
        assert_eq!(normalize("!!"), "");
    }

    #[test]
    fn word_hit_scores_full_marks() {
        assert_eq!(score("TESLA", "Tesla Inc. (NASDAQ:TSLA)"), 100);
        assert_eq!(score("AAPL", "Apple Inc. (AAPL)"), 100);
    }

    #[test]
    fn token_order_does_not_matter() {
        assert_eq!(
            score("bank apple", "Apple Bank for Savings (APPL)"),
            score("apple bank", "Apple Bank for Savings (APPL)")
        );
    }

    #[test]
    fn transposition_typo_clears_default_threshold() {
        assert_eq!(score("TELSA", "Tesla Inc. (NASDAQ:TSLA)"), 80);
    }

    #[test]
    fn related_beats_unrelated() {
        let related = score("Microsoft", "Microsoft Corporation (MSFT)");
        let unrelated = score("Microsoft", "Tesla Inc. (TSLA)");
        assert!(related > unrelated);
        assert!(unrelated < 80);
    }

    #[test]
    fn empty_input_scores_zero() {
        assert_eq!(score("", "Apple Inc. (AAPL)"), 0);
        assert_eq!(score("apple", ""), 0);
    }

    #[test]
    fn best_match_prefers_first_on_tie() {
        let choices = ["Apple Inc. (AAPL)", "Apple Hospitality REIT (APLE)"];
        assert_eq!(best_match("apple", choices), Some((0, 100)));
    }

    #[test]
    fn best_match_picks_more_specific_name() {
        let choices = ["Apple Inc. (AAPL)", "Apple Bank for Savings (APPL)"];
        assert_eq!(best_match("Apple Bank", choices).map(|(index, _)| index), Some(1));
    }

    #[test]
    fn best_match_on_no_choices_is_none() {
        assert_eq!(best_match("apple", Vec::<String>::new()), None);
    }
}
