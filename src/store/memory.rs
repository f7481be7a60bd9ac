// MemoryStore — in-process backend for tests and throwaway runs.
//
// Same semantics as JsonStore minus the files: topics are a table, emails an
// append-only Vec. Each collection sits behind its own tokio RwLock.

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use super::models::{StoredEmail, TopicEntry, TopicTable};
use super::traits::{EmailStore, TopicStore};
use crate::error::ClassifyError;

#[derive(Default)]
pub struct MemoryStore {
    topics: RwLock<TopicTable>,
    emails: RwLock<Vec<StoredEmail>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing data.
    pub fn with_data(topics: TopicTable, emails: Vec<StoredEmail>) -> Self {
        Self {
            topics: RwLock::new(topics),
            emails: RwLock::new(emails),
        }
    }
}

#[async_trait]
impl TopicStore for MemoryStore {
    async fn load(&self) -> Result<TopicTable> {
        Ok(self.topics.read().await.clone())
    }

    async fn insert(&self, name: &str, entry: TopicEntry) -> Result<TopicTable> {
        let mut topics = self.topics.write().await;
        if topics.contains_key(name) {
            return Err(ClassifyError::TopicExists(name.to_string()).into());
        }
        topics.insert(name.to_string(), entry);
        Ok(topics.clone())
    }
}

#[async_trait]
impl EmailStore for MemoryStore {
    async fn list(&self) -> Result<Vec<StoredEmail>> {
        Ok(self.emails.read().await.clone())
    }

    async fn append(&self, email: StoredEmail) -> Result<usize> {
        let mut emails = self.emails.write().await;
        emails.push(email);
        Ok(emails.len() - 1)
    }
}
