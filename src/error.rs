use thiserror::Error;

/// Unified error type for publish-docs operations
#[derive(Error, Debug)]
pub enum DocPublishError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Checkout failed: {0}")]
    Checkout(String),

    #[error("Environment setup failed: {0}")]
    Environment(String),

    #[error("Command failed: {0}")]
    Command(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in publish-docs
pub type Result<T> = std::result::Result<T, DocPublishError>;

impl DocPublishError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        DocPublishError::Config(msg.into())
    }

    /// Create a checkout error with context
    pub fn checkout(msg: impl Into<String>) -> Self {
        DocPublishError::Checkout(msg.into())
    }

    /// Create an environment error with context
    pub fn environment(msg: impl Into<String>) -> Self {
        DocPublishError::Environment(msg.into())
    }

    /// Create a command error with context
    pub fn command(msg: impl Into<String>) -> Self {
        DocPublishError::Command(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DocPublishError::config("bad bucket");
        assert_eq!(err.to_string(), "Configuration error: bad bucket");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: DocPublishError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (DocPublishError::config("x"), "Configuration error"),
            (DocPublishError::checkout("x"), "Checkout failed"),
            (DocPublishError::environment("x"), "Environment setup failed"),
            (DocPublishError::command("x"), "Command failed"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }

    #[test]
    fn test_error_keeps_context() {
        let err = DocPublishError::checkout("upstream/v7-branch not found");
        assert!(err.to_string().contains("upstream/v7-branch"));
    }
}
