// Topic similarity scoring.
//
// Each topic's "embedding" is the character length of its description; the
// email's is the `email_embeddings_average_embedding` feature. Similarity
// decays exponentially with the distance between the two:
//
//   similarity = exp(-|email - topic| / decay_scale)
//
// so identical lengths score exactly 1.0 and larger gaps score strictly
// less. `predict` picks the highest-scoring topic.

use std::collections::BTreeMap;

use crate::error::ClassifyError;
use crate::features::traits::FeatureSet;
use crate::store::models::TopicTable;

/// Feature key holding the email's length embedding.
pub const EMAIL_EMBEDDING_FEATURE: &str = "email_embeddings_average_embedding";

/// Default distance (in characters) at which similarity falls to 1/e.
pub const DEFAULT_DECAY_SCALE: f64 = 50.0;

/// Similarity per topic name, in the topic table's (ascending name) order.
pub type TopicScoreTable = BTreeMap<String, f64>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopicScorer {
    /// Larger values make similarity fall off more slowly with distance.
    pub decay_scale: f64,
}

impl Default for TopicScorer {
    fn default() -> Self {
        Self {
            decay_scale: DEFAULT_DECAY_SCALE,
        }
    }
}

impl TopicScorer {
    pub fn new(decay_scale: f64) -> Self {
        Self { decay_scale }
    }

    /// Score every topic in `topics` against the email's features.
    ///
    /// A missing or non-numeric embedding feature counts as 0.0.
    pub fn score(&self, features: &FeatureSet, topics: &TopicTable) -> TopicScoreTable {
        let email_embedding = email_embedding(features);

        topics
            .iter()
            .map(|(name, entry)| {
                let topic_embedding = entry.description.chars().count() as f64;
                (name.clone(), self.similarity(email_embedding, topic_embedding))
            })
            .collect()
    }

    /// The best-matching topic name.
    pub fn predict(
        &self,
        features: &FeatureSet,
        topics: &TopicTable,
    ) -> Result<String, ClassifyError> {
        Self::predict_from_scores(&self.score(features, topics))
    }

    /// The best topic in an already computed score table.
    ///
    /// Ties go to the first maximum in table order, which for a TopicTable
    /// is the lexicographically smallest name.
    pub fn predict_from_scores(scores: &TopicScoreTable) -> Result<String, ClassifyError> {
        let mut best: Option<(&String, f64)> = None;
        for (name, &score) in scores {
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((name, score)),
            }
        }
        best
            .map(|(name, _)| name.clone())
            .ok_or(ClassifyError::NoTopicsAvailable)
    }

    /// Similarity between two embeddings.
    pub fn similarity(&self, email_embedding: f64, topic_embedding: f64) -> f64 {
        let distance = (email_embedding - topic_embedding).abs();
        (-distance / self.decay_scale).exp()
    }
}

/// Read the email embedding out of a feature set.
pub fn email_embedding(features: &FeatureSet) -> f64 {
    features
        .get(EMAIL_EMBEDDING_FEATURE)
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::traits::FeatureValue;
    use crate::store::models::TopicEntry;

    fn topics(entries: &[(&str, &str)]) -> TopicTable {
        entries
            .iter()
            .map(|(name, description)| {
                (
                    name.to_string(),
                    TopicEntry {
                        description: description.to_string(),
                    },
                )
            })
            .collect()
    }

    fn features_with_embedding(embedding: f64) -> FeatureSet {
        FeatureSet::from([(
            EMAIL_EMBEDDING_FEATURE.to_string(),
            FeatureValue::Float(embedding),
        )])
    }

    #[test]
    fn test_exact_length_match_scores_one() {
        let scorer = TopicScorer::default();
        let table = topics(&[("work", "0123456789")]);
        let scores = scorer.score(&features_with_embedding(10.0), &table);
        assert_eq!(scores["work"], 1.0);
    }

    #[test]
    fn test_known_distance() {
        let scorer = TopicScorer::default();
        // distance 50 -> e^-1
        let table = topics(&[("long", "x".repeat(60).as_str())]);
        let scores = scorer.score(&features_with_embedding(10.0), &table);
        assert!((scores["long"] - (-1.0f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_missing_embedding_is_zero() {
        let scorer = TopicScorer::default();
        let table = topics(&[("empty", "")]);
        let scores = scorer.score(&FeatureSet::new(), &table);
        assert_eq!(scores["empty"], 1.0);
    }

    #[test]
    fn test_text_embedding_is_zero() {
        let features = FeatureSet::from([(
            EMAIL_EMBEDDING_FEATURE.to_string(),
            FeatureValue::Text("12".to_string()),
        )]);
        assert_eq!(email_embedding(&features), 0.0);
    }

    #[test]
    fn test_predict_picks_closest() {
        let scorer = TopicScorer::default();
        let long = "x".repeat(80);
        let table = topics(&[
            ("short", "abc"),
            ("medium", "abcdefghij"),
            ("long", long.as_str()),
        ]);
        let predicted = scorer.predict(&features_with_embedding(9.0), &table).unwrap();
        assert_eq!(predicted, "medium");
    }

    #[test]
    fn test_predict_tie_goes_to_smallest_name() {
        let scorer = TopicScorer::default();
        let table = topics(&[("zeta", "abcd"), ("alpha", "wxyz")]);
        let predicted = scorer.predict(&features_with_embedding(4.0), &table).unwrap();
        assert_eq!(predicted, "alpha");
    }

    #[test]
    fn test_predict_empty_table() {
        let scorer = TopicScorer::default();
        let err = scorer
            .predict(&features_with_embedding(4.0), &TopicTable::new())
            .unwrap_err();
        assert_eq!(err, ClassifyError::NoTopicsAvailable);
    }

    #[test]
    fn test_predict_from_scores_matches_predict() {
        let scorer = TopicScorer::default();
        let table = topics(&[("a", "abcdef"), ("b", "ab"), ("c", "abcdefghijkl")]);
        let features = features_with_embedding(3.0);
        let scores = scorer.score(&features, &table);
        assert_eq!(
            TopicScorer::predict_from_scores(&scores),
            scorer.predict(&features, &table)
        );
        assert_eq!(TopicScorer::predict_from_scores(&scores).unwrap(), "b");
    }

    #[test]
    fn test_wider_scale_decays_slower() {
        let narrow = TopicScorer::new(10.0);
        let wide = TopicScorer::new(100.0);
        assert!(wide.similarity(0.0, 30.0) > narrow.similarity(0.0, 30.0));
    }
}
