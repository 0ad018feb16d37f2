//! Command-line parsing and the publish workflow

pub mod args;
pub mod orchestration;

pub use args::{screen_args, Args};
pub use orchestration::{DocPublisher, WorkflowResult};
