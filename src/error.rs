// Domain errors for the classification pipeline.
//
// I/O and parse failures travel as anyhow::Error. These variants are the
// ones callers are expected to react to, so the web layer recovers them with
// `downcast_ref` and picks a status code per variant.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    /// A requested feature generator name isn't registered.
    #[error("Unknown feature generator: {0}")]
    UnknownGenerator(String),

    /// A generator was registered under a name already in use.
    #[error("Feature generator already registered: {0}")]
    DuplicateGenerator(String),

    /// Two requested generators would write the same prefixed feature key.
    #[error("Feature key collision: {0}")]
    FeatureKeyCollision(String),

    /// The topic table was empty when a prediction was requested.
    #[error("No topics available for classification")]
    NoTopicsAvailable,

    /// A ground-truth label doesn't name any known topic.
    #[error("Unknown topic label: {0}")]
    UnknownTopicLabel(String),

    #[error("Topic '{0}' already exists")]
    TopicExists(String),
}

impl ClassifyError {
    /// True when the caller sent something invalid, false when the
    /// service itself is misconfigured.
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            ClassifyError::NoTopicsAvailable | ClassifyError::DuplicateGenerator(_)
        )
    }
}
