use std::fmt;

/// Identifier used for the daily documentation destination.
pub const LATEST: &str = "latest";

/// Which kind of documentation is being built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocMode {
    Daily,
    Release,
}

impl DocMode {
    /// Value passed to the build as the documentation tag
    pub fn tag(&self) -> &'static str {
        match self {
            DocMode::Daily => "daily",
            DocMode::Release => "release",
        }
    }
}

impl fmt::Display for DocMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Release identifier, e.g. `1.14` or `latest`. The format is not validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release(String);

impl Release {
    pub fn new(id: impl Into<String>) -> Self {
        Release(id.into())
    }

    pub fn latest() -> Self {
        Release(LATEST.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_latest(&self) -> bool {
        self.0 == LATEST
    }
}

impl fmt::Display for Release {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A resolved documentation request: what to build and where it goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocRequest {
    pub mode: DocMode,
    pub release: Release,
}

impl DocRequest {
    /// Daily docs always publish to `latest`
    pub fn daily() -> Self {
        DocRequest {
            mode: DocMode::Daily,
            release: Release::latest(),
        }
    }

    pub fn release(id: impl Into<String>) -> Self {
        DocRequest {
            mode: DocMode::Release,
            release: Release::new(id),
        }
    }

    pub fn is_release(&self) -> bool {
        self.mode == DocMode::Release
    }

    /// Expand a branch pattern such as `v{release}-branch`
    pub fn release_branch(&self, pattern: &str) -> String {
        pattern.replace("{release}", self.release.as_str())
    }
}

impl Default for DocRequest {
    fn default() -> Self {
        DocRequest::daily()
    }
}
