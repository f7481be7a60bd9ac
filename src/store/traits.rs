// Store traits — backend-agnostic async interface for topics and emails.
//
// Implementors: JsonStore (flat JSON files in the data directory) and
// MemoryStore (tokio RwLocks, for tests and throwaway runs). Methods are
// async so file-backed and in-memory backends fit behind one interface.
//
// Each method is atomic with respect to the others on the same store:
// `insert` checks for an existing name and writes under one lock, so two
// concurrent inserts can neither both succeed nor drop each other's topic.
// Cross-store rules such as "labels must name a known topic" live in the
// pipeline layer.

use anyhow::Result;
use async_trait::async_trait;

use super::models::{StoredEmail, TopicEntry, TopicTable};

#[async_trait]
pub trait TopicStore: Send + Sync {
    /// Load every topic with its description.
    async fn load(&self) -> Result<TopicTable>;

    /// Add a topic and return the updated table.
    ///
    /// Fails with `ClassifyError::TopicExists` if `name` is taken, leaving
    /// the stored table untouched.
    async fn insert(&self, name: &str, entry: TopicEntry) -> Result<TopicTable>;
}

#[async_trait]
pub trait EmailStore: Send + Sync {
    /// List stored emails in insertion order.
    async fn list(&self) -> Result<Vec<StoredEmail>>;

    /// Append an email and return its position in the store.
    async fn append(&self, email: StoredEmail) -> Result<usize>;
}
