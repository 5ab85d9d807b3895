use std::cmp::Ordering;

use tracing::warn;

use crate::config::ScoringConfig;
use crate::error::{RationError, Result};
use crate::models::Candidate;

/// A candidate with its fused ranking score.
#[derive(Debug, Clone, Copy)]
pub struct RankedCandidate<'a> {
    pub candidate: &'a Candidate,
    pub score: f64,
}

fn required_signal(candidate: &Candidate, value: Option<f64>, signal: &'static str) -> Result<f64> {
    match value {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(RationError::MissingScore {
            id: candidate.id.clone(),
            signal,
        }),
    }
}

/// Weighted blend of similarity and popularity.
///
/// Fails with `MissingScore` when either signal is absent or not finite.
pub fn fused_score(candidate: &Candidate, weights: &ScoringConfig) -> Result<f64> {
    let similarity = required_signal(candidate, candidate.similarity, "similarity")?;
    let popularity = required_signal(candidate, candidate.popularity, "popularity")?;
    Ok(weights.similarity_weight * similarity + weights.popularity_weight * popularity)
}

/// Score, sort best-first, then truncate to `limit`.
///
/// Candidates missing a signal are dropped, not fatal. Equal scores keep
/// their input order.
pub fn rank_candidates<'a, I>(
    candidates: I,
    weights: &ScoringConfig,
    limit: Option<usize>,
) -> Vec<RankedCandidate<'a>>
where
    I: IntoIterator<Item = &'a Candidate>,
{
    let mut ranked: Vec<RankedCandidate<'a>> = candidates
        .into_iter()
        .filter_map(|candidate| match fused_score(candidate, weights) {
            Ok(score) => Some(RankedCandidate { candidate, score }),
            Err(e) => {
                warn!(error = %e, "dropping candidate from ranking");
                None
            }
        })
        .collect();

    // sort_by is stable: ties stay in first-seen order.
    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    if let Some(limit) = limit {
        ranked.truncate(limit);
    }

    ranked
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn scored(id: &str, similarity: Option<f64>, popularity: Option<f64>) -> Candidate {
        Candidate {
            id: id.to_string(),
            name: id.to_string(),
            description: None,
            category: "Eggs".to_string(),
            price: 1.0,
            calories: 150.0,
            protein: 12.0,
            fat: 10.0,
            carbs: 1.0,
            is_vegan: false,
            restrictions: BTreeSet::new(),
            similarity,
            popularity,
        }
    }

    #[test]
    fn test_fused_score_weights() {
        let weights = ScoringConfig::default();
        let a = scored("a", Some(0.9), Some(0.1));
        let b = scored("b", Some(0.5), Some(0.9));
        assert!((fused_score(&a, &weights).unwrap() - 0.74).abs() < 1e-9);
        assert!((fused_score(&b, &weights).unwrap() - 0.58).abs() < 1e-9);
    }

    #[test]
    fn test_rank_orders_by_score() {
        let foods = vec![
            scored("b", Some(0.5), Some(0.9)),
            scored("a", Some(0.9), Some(0.1)),
        ];
        let ranked = rank_candidates(&foods, &ScoringConfig::default(), None);
        let ids: Vec<&str> = ranked.iter().map(|r| r.candidate.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let foods = vec![
            scored("first", Some(0.5), Some(0.5)),
            scored("second", Some(0.5), Some(0.5)),
            scored("third", Some(0.5), Some(0.5)),
        ];
        let ranked = rank_candidates(&foods, &ScoringConfig::default(), None);
        let ids: Vec<&str> = ranked.iter().map(|r| r.candidate.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_missing_score_drops_only_that_candidate() {
        let foods = vec![
            scored("ok", Some(0.4), Some(0.4)),
            scored("no_sim", None, Some(0.9)),
            scored("no_pop", Some(0.9), None),
            scored("nan", Some(f64::NAN), Some(0.9)),
        ];
        let err = fused_score(&foods[1], &ScoringConfig::default()).unwrap_err();
        assert!(matches!(err, RationError::MissingScore { signal: "similarity", .. }));

        let ranked = rank_candidates(&foods, &ScoringConfig::default(), None);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].candidate.id, "ok");
    }

    #[test]
    fn test_limit_applies_after_sort() {
        let foods = vec![
            scored("low", Some(0.1), Some(0.1)),
            scored("mid", Some(0.5), Some(0.5)),
            scored("high", Some(0.9), Some(0.9)),
        ];
        let ranked = rank_candidates(&foods, &ScoringConfig::default(), Some(2));
        let ids: Vec<&str> = ranked.iter().map(|r| r.candidate.id.as_str()).collect();
        assert_eq!(ids, vec!["high", "mid"]);
    }
}
