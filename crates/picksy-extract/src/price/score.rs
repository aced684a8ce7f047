//! Candidate scoring for the generic price search. All tuning constants
//! live here.

/// id/class fragments of elements that hold the price actually charged.
const REAL_PRICE_KEYWORDS: [&str; 7] = [
    "priceblock",
    "selling",
    "final",
    "discount-price",
    "sale-price",
    "offer-price",
    "current-price",
];

/// id/class fragments of list prices, MRPs and struck comparisons.
const NOISE_KEYWORDS: [&str; 7] = [
    "mrp",
    "strike",
    "was-price",
    "wasprice",
    "list-price",
    "old-price",
    "original-price",
];

const REAL_PRICE_BONUS: f64 = 4.0;
const NOISE_PENALTY: f64 = 3.0;
const STRIKETHROUGH_PENALTY: f64 = 4.0;
const LOW_VALUE_PENALTY: f64 = 3.0;
/// At or below this the amount is usually an add-on, shipping or EMI line.
const LOW_VALUE_CEILING: i64 = 800;
const REPEAT_CAP: usize = 5;
const REPEAT_WEIGHT: f64 = 1.5;

/// What the search knows about one candidate element.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Lower-cased id and class.
    pub marker: String,
    pub struck: bool,
    pub value: i64,
}

/// Base score from element markers and magnitude, before repetition.
#[must_use]
pub fn score_candidate(marker: &str, struck: bool, value: i64) -> f64 {
    let mut score = 0.0;
    if REAL_PRICE_KEYWORDS.iter().any(|k| marker.contains(k)) {
        score += REAL_PRICE_BONUS;
    }
    if NOISE_KEYWORDS.iter().any(|k| marker.contains(k)) {
        score -= NOISE_PENALTY;
    }
    if struck {
        score -= STRIKETHROUGH_PENALTY;
    }
    if value >= 1_000 {
        score += 1.0;
    }
    if value >= 10_000 {
        score += 1.0;
    }
    if value <= LOW_VALUE_CEILING {
        score -= LOW_VALUE_PENALTY;
    }
    score
}

/// Bonus for a value seen `count` times among all candidates (the
/// candidate itself included).
#[must_use]
pub fn repetition_bonus(count: usize) -> f64 {
    // count is capped at 5, so the cast is exact.
    #[allow(clippy::cast_precision_loss)]
    let capped = count.min(REPEAT_CAP) as f64;
    capped * REPEAT_WEIGHT
}

/// Highest-scoring candidate, ties broken by the larger value.
///
/// Struck-through candidates are only eligible when nothing else is.
#[must_use]
pub fn pick_best(candidates: &[Candidate]) -> Option<&Candidate> {
    let any_clean = candidates.iter().any(|c| !c.struck);
    candidates
        .iter()
        .filter(|c| !any_clean || !c.struck)
        .map(|c| (total_score(c, candidates), c))
        .max_by(|(sa, a), (sb, b)| sa.total_cmp(sb).then(a.value.cmp(&b.value)))
        .map(|(_, c)| c)
}

fn total_score(candidate: &Candidate, all: &[Candidate]) -> f64 {
    let repeats = all.iter().filter(|c| c.value == candidate.value).count();
    score_candidate(&candidate.marker, candidate.struck, candidate.value) + repetition_bonus(repeats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(marker: &str, struck: bool, value: i64) -> Candidate {
        Candidate {
            marker: marker.to_string(),
            struck,
            value,
        }
    }

    #[test]
    fn real_price_keyword_bonus() {
        assert!((score_candidate("priceblock_dealprice", false, 900) - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn noise_and_strike_penalties_stack() {
        let score = score_candidate("a-text-strike mrp", true, 900);
        assert!((score - (-7.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn magnitude_adjustments() {
        assert!((score_candidate("", false, 500) - (-3.0)).abs() < f64::EPSILON);
        assert!(score_candidate("", false, 801).abs() < f64::EPSILON);
        assert!((score_candidate("", false, 1_000) - 1.0).abs() < f64::EPSILON);
        assert!((score_candidate("", false, 25_000) - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn repetition_bonus_is_capped() {
        assert!((repetition_bonus(1) - 1.5).abs() < f64::EPSILON);
        assert!((repetition_bonus(5) - 7.5).abs() < f64::EPSILON);
        assert!((repetition_bonus(9) - 7.5).abs() < f64::EPSILON);
    }

    #[test]
    fn tie_breaks_on_larger_value() {
        let candidates = vec![candidate("price", false, 1_200), candidate("price", false, 1_500)];
        assert_eq!(pick_best(&candidates).unwrap().value, 1_500);
    }

    #[test]
    fn repeated_value_beats_one_off() {
        let candidates = vec![
            candidate("price", false, 2_499),
            candidate("price", false, 2_499),
            candidate("price", false, 2_999),
        ];
        assert_eq!(pick_best(&candidates).unwrap().value, 2_499);
    }

    #[test]
    fn struck_candidate_never_wins_over_clean_one() {
        let candidates = vec![
            candidate("priceblock_ourprice selling final", true, 99_999),
            candidate("priceblock_ourprice selling final", true, 99_999),
            candidate("misc", false, 150),
        ];
        let best = pick_best(&candidates).unwrap();
        assert!(!best.struck);
        assert_eq!(best.value, 150);
    }

    #[test]
    fn struck_candidates_used_when_nothing_else() {
        let candidates = vec![candidate("a-price", true, 1_999)];
        assert_eq!(pick_best(&candidates).unwrap().value, 1_999);
    }

    #[test]
    fn empty_has_no_winner() {
        assert!(pick_best(&[]).is_none());
    }
}
