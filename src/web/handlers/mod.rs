// HTTP handlers, one module per resource.

pub mod classify;
pub mod emails;
pub mod features;
pub mod topics;
