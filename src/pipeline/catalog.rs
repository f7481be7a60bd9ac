// Catalog operations — adding topics, storing labeled emails, and describing
// the pipeline.
//
// Topic name uniqueness is enforced by the store's atomic `insert`. The
// rule spanning both stores lives here: a stored email's label must name an
// existing topic.

use std::collections::BTreeMap;

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use crate::error::ClassifyError;
use crate::features::registry::{FeatureGeneratorRegistry, GeneratorInfo};
use crate::scoring::topic::TopicScorer;
use crate::store::models::{StoredEmail, TopicEntry, TopicTable};
use crate::store::traits::{EmailStore, TopicStore};

/// Add a new topic. Fails with `TopicExists` if the name is taken.
///
/// Returns the updated topic table.
pub async fn add_topic(
    topics: &dyn TopicStore,
    name: &str,
    description: &str,
) -> Result<TopicTable> {
    let table = topics
        .insert(
            name,
            TopicEntry {
                description: description.to_string(),
            },
        )
        .await?;

    info!(topic = name, total = table.len(), "Added topic");
    Ok(table)
}

/// Append an email to the store, checking its label against the topics.
///
/// Returns the email's position in the store.
pub async fn store_email(
    topics: &dyn TopicStore,
    emails: &dyn EmailStore,
    email: StoredEmail,
) -> Result<usize> {
    if let Some(label) = &email.ground_truth {
        let table = topics.load().await?;
        if !table.contains_key(label) {
            return Err(ClassifyError::UnknownTopicLabel(label.clone()).into());
        }
    }

    let label = email.ground_truth.clone();
    let position = emails.append(email).await?;
    info!(
        email_id = position,
        label = label.as_deref().unwrap_or("<none>"),
        "Stored email"
    );
    Ok(position)
}

/// Snapshot of what the pipeline can do right now.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineInfo {
    pub available_topics: Vec<String>,
    pub topics_with_descriptions: BTreeMap<String, String>,
    pub generators: Vec<GeneratorInfo>,
    pub decay_scale: f64,
}

pub async fn pipeline_info(
    registry: &FeatureGeneratorRegistry,
    scorer: &TopicScorer,
    topics: &dyn TopicStore,
) -> Result<PipelineInfo> {
    let table = topics.load().await?;

    Ok(PipelineInfo {
        available_topics: table.keys().cloned().collect(),
        topics_with_descriptions: table
            .into_iter()
            .map(|(name, entry)| (name, entry.description))
            .collect(),
        generators: registry.list_generators(),
        decay_scale: scorer.decay_scale,
    })
}
