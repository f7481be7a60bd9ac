// Classification pipeline — ties the feature registry, the scorers and the
// stores together.
//
// Two modes:
// - Topic: features -> TopicScorer against the current topic table
// - NearestEmail: NearestEmailClassifier against every stored email
//
// Both reload their data from the stores on every call; nothing is cached.

use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::features::registry::FeatureGeneratorRegistry;
use crate::features::traits::FeatureSet;
use crate::scoring::nearest::{NearestEmailClassifier, NearestMatch};
use crate::scoring::topic::{TopicScoreTable, TopicScorer};
use crate::store::models::Email;
use crate::store::traits::{EmailStore, TopicStore};

/// Which classifier a request is routed to.
///
/// Serialized in snake_case for the API. On the command line clap spells it
/// `nearest-email`, and `nearest_email` is accepted too.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationMode {
    #[default]
    Topic,
    #[value(alias = "nearest_email")]
    NearestEmail,
}

impl ClassificationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassificationMode::Topic => "topic",
            ClassificationMode::NearestEmail => "nearest_email",
        }
    }
}

impl std::fmt::Display for ClassificationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of topic-mode classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicClassification {
    pub predicted_topic: String,
    pub topic_scores: TopicScoreTable,
    pub features: FeatureSet,
    pub available_topics: Vec<String>,
}

/// Classify an email against the stored topics.
///
/// `generators` narrows which feature generators run; None runs them all.
/// Leaving out `email_embeddings` is allowed, every topic is then scored as
/// if the email's embedding were 0.0.
pub async fn classify_by_topic(
    registry: &FeatureGeneratorRegistry,
    scorer: &TopicScorer,
    topics: &dyn TopicStore,
    email: &Email,
    generators: Option<&[&str]>,
) -> Result<TopicClassification> {
    let features = registry.generate_all(email, generators)?;
    let topic_table = topics.load().await?;

    let topic_scores = scorer.score(&features, &topic_table);
    let predicted_topic = TopicScorer::predict_from_scores(&topic_scores)?;

    info!(
        topic = %predicted_topic,
        score = format!("{:.3}", topic_scores[&predicted_topic]),
        candidates = topic_scores.len(),
        "Classified email by topic"
    );

    Ok(TopicClassification {
        predicted_topic,
        available_topics: topic_table.into_keys().collect(),
        topic_scores,
        features,
    })
}

/// Classify an email by copying the label of the most similar stored email.
pub async fn classify_by_nearest(emails: &dyn EmailStore, email: &Email) -> Result<NearestMatch> {
    let stored = emails.list().await?;
    let result = NearestEmailClassifier.classify(email, &stored);

    if result.matched.is_none() {
        debug!("No stored emails to compare against");
    } else {
        info!(
            label = result.predicted_class.as_deref().unwrap_or("<none>"),
            similarity = format!("{:.3}", result.similarity),
            stored = stored.len(),
            "Classified email by nearest match"
        );
    }

    Ok(result)
}
