//! Terminal output.
//!
//! Progress and results go to stdout, errors and warnings to stderr.

use console::style;

use crate::boundary::PublishWarning;
use crate::domain::{DocMode, DocRequest, SyncTarget};
use crate::process::Invocation;

/// Line printed when the publisher finishes, whatever the outcome.
pub const DONE: &str = "=> Done";

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a non-fatal warning.
pub fn display_warning(warning: &PublishWarning) {
    eprintln!("{} {}", style("⚠").yellow(), warning);
}

pub fn display_done() {
    println!("{}", DONE);
}

/// Headline for a run, e.g. `Building release docs (1.14)`
pub fn request_banner(request: &DocRequest) -> String {
    match request.mode {
        DocMode::Daily => "Building daily docs".to_string(),
        DocMode::Release => format!("Building release docs ({})", request.release),
    }
}

/// Print what a dry run would do.
///
/// # Arguments
/// * `checkout` - `(remote_branch, local_branch)` for release builds
/// * `build` - The build command
/// * `targets` - Sync targets in upload order
pub fn display_plan(
    checkout: Option<(&str, &str)>,
    build: &Invocation,
    targets: &[SyncTarget],
) {
    println!("\n{}", style("Dry run:").bold());

    let mut step = 1;
    if let Some((remote, local)) = checkout {
        println!("  Step {}: check out {} as {}", step, remote, local);
        step += 1;
        println!("  Step {}: remove untracked and ignored files", step);
        step += 1;
    }

    println!("  Step {}: {}", step, build);
    step += 1;

    for target in targets {
        println!("  Step {}: sync {}", step, target);
        step += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_daily() {
        assert_eq!(request_banner(&DocRequest::daily()), "Building daily docs");
    }

    #[test]
    fn test_banner_release() {
        assert_eq!(
            request_banner(&DocRequest::release("1.14")),
            "Building release docs (1.14)"
        );
    }
}
