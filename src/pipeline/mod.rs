// Pipeline — the operations the HTTP layer and the CLI both call.

pub mod catalog;
pub mod classify;

pub use classify::{ClassificationMode, TopicClassification};
