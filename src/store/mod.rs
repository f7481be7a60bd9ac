// Storage layer — topic descriptions and labeled emails.
//
// Two backends sit behind the TopicStore / EmailStore traits: JsonStore
// writes flat JSON files under the configured data directory, MemoryStore
// keeps everything in process.

pub mod json;
pub mod memory;
pub mod models;
pub mod traits;

pub use json::JsonStore;
pub use memory::MemoryStore;
pub use traits::{EmailStore, TopicStore};
