pub mod boundary;
pub mod build;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod process;
pub mod publish;
pub mod ui;

pub use error::{DocPublishError, Result};
