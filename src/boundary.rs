use std::fmt;
use std::path::PathBuf;

/// Non-fatal issues that should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum PublishWarning {
    /// A command-line flag that is not understood; it was ignored
    UnrecognizedFlag { flag: String },
    /// Arguments after the first operand or `--`; they were ignored
    IgnoredArguments { args: Vec<String> },
    /// The documentation build left warnings behind
    BuildWarnings { file: PathBuf, count: usize },
    /// A sync command failed; the remote copy may be incomplete
    SyncFailed { destination: String },
}

impl fmt::Display for PublishWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishWarning::UnrecognizedFlag { flag } => {
                write!(f, "Invalid option: {}", flag)
            }
            PublishWarning::IgnoredArguments { args } => {
                write!(f, "Ignoring extra arguments: {}", args.join(" "))
            }
            PublishWarning::BuildWarnings { file, count } => {
                let noun = if *count == 1 { "warning" } else { "warnings" };
                write!(
                    f,
                    "Documentation build reported {} {} (see {})",
                    count,
                    noun,
                    file.display()
                )
            }
            PublishWarning::SyncFailed { destination } => {
                write!(
                    f,
                    "Upload to '{}' failed; remote docs may be incomplete",
                    destination
                )
            }
        }
    }
}
