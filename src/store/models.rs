// Data models — the records that flow between the stores and the pipeline.
//
// These live apart from the store backends so the feature and scoring code
// can use them without depending on any particular storage format.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// An email as submitted for classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    pub subject: String,
    pub body: String,
}

impl Email {
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// An email kept in the email store, optionally labeled with its topic.
///
/// Stored emails have no ID; their position in the store is their identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEmail {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub ground_truth: Option<String>,
}

impl StoredEmail {
    pub fn new(email: Email, ground_truth: Option<String>) -> Self {
        Self {
            subject: email.subject,
            body: email.body,
            ground_truth,
        }
    }
}

/// The stored attributes of a topic. The name is the key in a `TopicTable`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicEntry {
    pub description: String,
}

/// All known topics keyed by name.
///
/// A BTreeMap so iteration (and therefore scoring and tie-breaking) always
/// runs in ascending name order.
pub type TopicTable = BTreeMap<String, TopicEntry>;
