// JsonStore — flat JSON file backend implementing both store traits.
//
// Topics live in `topic_keywords.json` as an object keyed by topic name,
// emails in `emails.json` as an array. Every write rewrites the whole file.
//
// Read-modify-write cycles are serialized by an in-process tokio Mutex held
// across the awaits. Files are replaced by writing a sibling temp file and
// renaming it over the target, so unlocked readers see either the old or the
// new contents, never a partial write. Two separate processes sharing a data
// directory can still race; last write wins.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::sync::Mutex;

use super::models::{StoredEmail, TopicEntry, TopicTable};
use super::traits::{EmailStore, TopicStore};
use crate::error::ClassifyError;

pub const TOPICS_FILE: &str = "topic_keywords.json";
pub const EMAILS_FILE: &str = "emails.json";

pub struct JsonStore {
    data_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn topics_path(&self) -> PathBuf {
        self.data_dir.join(TOPICS_FILE)
    }

    pub fn emails_path(&self) -> PathBuf {
        self.data_dir.join(EMAILS_FILE)
    }

    /// Create the data directory and seed any missing files.
    ///
    /// Returns the number of files created, so `mailtopic init` can report
    /// whether anything changed.
    pub async fn initialize(&self) -> Result<usize> {
        let _guard = self.write_lock.lock().await;
        self.ensure_dir().await?;

        let mut created = 0;
        if !self.topics_path().exists() {
            write_json(&self.topics_path(), &TopicTable::new()).await?;
            created += 1;
        }
        if !self.emails_path().exists() {
            write_json(&self.emails_path(), &Vec::<StoredEmail>::new()).await?;
            created += 1;
        }
        Ok(created)
    }

    async fn ensure_dir(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.data_dir)
            .await
            .with_context(|| {
                format!(
                    "Failed to create data directory: {}",
                    self.data_dir.display()
                )
            })
    }

    /// Read the emails file, creating it as `[]` if missing.
    ///
    /// Callers must hold `write_lock`.
    async fn read_emails_locked(&self) -> Result<Vec<StoredEmail>> {
        let path = self.emails_path();
        if !path.exists() {
            self.ensure_dir().await?;
            write_json(&path, &Vec::<StoredEmail>::new()).await?;
            return Ok(Vec::new());
        }
        read_json(&path).await
    }

    async fn read_topics(&self) -> Result<TopicTable> {
        let path = self.topics_path();
        if !path.exists() {
            return Ok(TopicTable::new());
        }
        read_json(&path).await
    }
}

#[async_trait]
impl TopicStore for JsonStore {
    async fn load(&self) -> Result<TopicTable> {
        self.read_topics().await
    }

    async fn insert(&self, name: &str, entry: TopicEntry) -> Result<TopicTable> {
        let _guard = self.write_lock.lock().await;
        let mut topics = self.read_topics().await?;
        if topics.contains_key(name) {
            return Err(ClassifyError::TopicExists(name.to_string()).into());
        }
        topics.insert(name.to_string(), entry);

        self.ensure_dir().await?;
        write_json(&self.topics_path(), &topics).await?;
        Ok(topics)
    }
}

#[async_trait]
impl EmailStore for JsonStore {
    async fn list(&self) -> Result<Vec<StoredEmail>> {
        let path = self.emails_path();
        if path.exists() {
            return read_json(&path).await;
        }
        let _guard = self.write_lock.lock().await;
        self.read_emails_locked().await
    }

    async fn append(&self, email: StoredEmail) -> Result<usize> {
        let _guard = self.write_lock.lock().await;
        let mut emails = self.read_emails_locked().await?;
        emails.push(email);
        write_json(&self.emails_path(), &emails).await?;
        Ok(emails.len() - 1)
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {}", path.display()))
}

/// Write `value` to a temp file next to `path`, then rename it into place.
///
/// Only one writer per path at a time: callers hold `write_lock`.
async fn write_json<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, text)
        .await
        .with_context(|| format!("Failed to write {}", tmp.display()))?;
    tokio::fs::rename(&tmp, path)
        .await
        .with_context(|| format!("Failed to replace {}", path.display()))
}
