//! Domain logic - plain values describing a documentation run

pub mod request;
pub mod sync;

pub use request::{DocMode, DocRequest, Release, LATEST};
pub use sync::SyncTarget;
