// Scoring — topic similarity and nearest-email label transfer.

pub mod nearest;
pub mod topic;

pub use nearest::{NearestEmailClassifier, NearestMatch};
pub use topic::{TopicScoreTable, TopicScorer};
