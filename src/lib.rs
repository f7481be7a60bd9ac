// mailtopic: heuristic email topic classification
//
// This is the library root. Each module corresponds to a stage of the
// classification pipeline or to one of the surfaces around it.

pub mod config;
pub mod error;
pub mod features;
pub mod output;
pub mod pipeline;
pub mod scoring;
pub mod store;

#[cfg(feature = "web")]
pub mod web;
