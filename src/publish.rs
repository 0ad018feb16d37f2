//! Upload of the generated documentation to the object store

use crate::config::Config;
use crate::domain::{DocRequest, SyncTarget};
use crate::error::Result;
use crate::process::{CommandRunner, Invocation};
use std::path::Path;

/// Sync target for the HTML output.
///
/// `latest` is mirrored with deletion. A release goes to `<release>.0` and is
/// only ever added to.
pub fn html_target(request: &DocRequest, config: &Config, workspace: &Path) -> SyncTarget {
    let publish = &config.publish;
    let source = workspace.join(&config.build.html_dir);

    if request.release.is_latest() {
        SyncTarget::new(
            source,
            format!("{}/{}", publish.bucket, publish.latest),
            true,
        )
    } else {
        SyncTarget::new(
            source,
            format!("{}/{}.0", publish.bucket, request.release),
            false,
        )
    }
}

/// Sync target for the API docs, keyed by the raw release identifier.
///
/// Daily API docs share the HTML's `latest` prefix.
pub fn api_target(request: &DocRequest, config: &Config, workspace: &Path) -> SyncTarget {
    let publish = &config.publish;
    let key = if request.release.is_latest() {
        publish.latest.as_str()
    } else {
        request.release.as_str()
    };

    SyncTarget::new(
        workspace.join(&config.build.api_dir),
        format!("{}/{}/{}", publish.bucket, publish.api_prefix, key),
        true,
    )
}

/// Everything that should be uploaded, HTML first.
///
/// The API docs are included only when their output directory exists.
pub fn plan(request: &DocRequest, config: &Config, workspace: &Path) -> Vec<SyncTarget> {
    let mut targets = vec![html_target(request, config, workspace)];

    let api = api_target(request, config, workspace);
    if api.source.is_dir() {
        targets.push(api);
    } else {
        tracing::debug!("No API docs at {}, skipping", api.source.display());
    }

    targets
}

pub fn sync_invocation(target: &SyncTarget, config: &Config, workspace: &Path) -> Invocation {
    Invocation::new(config.publish.program.clone())
        .args(target.sync_args(config.publish.quiet))
        .current_dir(workspace)
}

/// Mirror one directory. Returns whether the sync command succeeded.
pub fn sync(
    runner: &dyn CommandRunner,
    target: &SyncTarget,
    config: &Config,
    workspace: &Path,
) -> Result<bool> {
    let code = runner.status(&sync_invocation(target, config, workspace))?;
    if code != Some(0) {
        tracing::warn!("Sync of {} exited with {:?}", target, code);
    }
    Ok(code == Some(0))
}
