use std::fmt;
use std::path::PathBuf;

/// One directory mirrored to one remote prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncTarget {
    pub source: PathBuf,
    pub destination: String,
    /// Remove remote objects that are absent locally
    pub delete: bool,
}

impl SyncTarget {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<String>, delete: bool) -> Self {
        SyncTarget {
            source: source.into(),
            destination: destination.into(),
            delete,
        }
    }

    /// Arguments for `aws s3 sync`
    pub fn sync_args(&self, quiet: bool) -> Vec<String> {
        let mut args = vec!["s3".to_string(), "sync".to_string()];
        if quiet {
            args.push("--quiet".to_string());
        }
        if self.delete {
            args.push("--delete".to_string());
        }
        args.push(self.source.to_string_lossy().into_owned());
        args.push(self.destination.clone());
        args
    }
}

impl fmt::Display for SyncTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source.display(), self.destination)?;
        if self.delete {
            write!(f, " (delete)")?;
        }
        Ok(())
    }
}
