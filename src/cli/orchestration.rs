//! Main workflow orchestration logic
//!
//! Runs the three stages of a documentation publish in order:
//! prepare (release branch checkout) → build → publish. The stages are gated
//! only by the build's exit status; nothing is retried or rolled back.

use std::env;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::boundary::PublishWarning;
use crate::build::{self, capture_environment, BuildEnvironment, BuildStatus};
use crate::config::Config;
use crate::domain::{DocRequest, SyncTarget};
use crate::error::{DocPublishError, Result};
use crate::git::Repository;
use crate::process::CommandRunner;
use crate::publish;
use crate::ui;

/// Environment variable naming the directory to operate in.
pub const MAIN_REPO_STATE: &str = "MAIN_REPO_STATE";

/// Result of a publish run that got past preparation
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    pub request: DocRequest,

    /// Local branch created for a release build
    pub checkout_branch: Option<String>,

    pub build: BuildStatus,

    /// Targets uploaded successfully, in upload order
    pub published: Vec<SyncTarget>,

    /// Targets whose sync command failed
    pub failed: Vec<SyncTarget>,

    pub warnings: Vec<PublishWarning>,
}

impl WorkflowResult {
    fn new(request: &DocRequest, checkout_branch: Option<String>, build: BuildStatus) -> Self {
        WorkflowResult {
            request: request.clone(),
            checkout_branch,
            build,
            published: Vec::new(),
            failed: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// True when the build ran clean and every sync succeeded, or on a dry run
    pub fn is_success(&self) -> bool {
        match self.build {
            BuildStatus::Succeeded => self.failed.is_empty(),
            BuildStatus::Skipped => true,
            BuildStatus::Failed { .. } => false,
        }
    }
}

/// Directory to operate in: `MAIN_REPO_STATE` when set and non-empty,
/// otherwise `fallback`.
pub fn resolve_workspace(main_repo_state: Option<OsString>, fallback: PathBuf) -> PathBuf {
    match main_repo_state {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => fallback,
    }
}

/// [resolve_workspace] against the process environment and current directory
pub fn workspace_from_env() -> io::Result<PathBuf> {
    let workspace = resolve_workspace(env::var_os(MAIN_REPO_STATE), env::current_dir()?);
    if !workspace.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("working directory {} does not exist", workspace.display()),
        ));
    }
    Ok(workspace)
}

/// Random local branch name, e.g. `docs-3f2a9c1e`
pub fn temp_branch_name(prefix: &str) -> String {
    let token = Uuid::new_v4().simple().to_string();
    format!("{}{}", prefix, &token[..8])
}

/// Builds documentation in one working tree and uploads it
pub struct DocPublisher<'a> {
    config: &'a Config,
    workspace: &'a Path,
    runner: &'a dyn CommandRunner,
    repository: Option<&'a dyn Repository>,
}

impl<'a> DocPublisher<'a> {
    pub fn new(config: &'a Config, workspace: &'a Path, runner: &'a dyn CommandRunner) -> Self {
        DocPublisher {
            config,
            workspace,
            runner,
            repository: None,
        }
    }

    /// Repository used to check out release branches. Daily builds never
    /// touch it.
    pub fn with_repository(mut self, repository: &'a dyn Repository) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Remote-tracking branch a release is built from, e.g. `upstream/v1.14-branch`
    pub fn remote_branch(&self, request: &DocRequest) -> String {
        let repo = &self.config.repository;
        format!(
            "{}/{}",
            repo.upstream_remote,
            request.release_branch(&repo.release_branch)
        )
    }

    /// Run the whole workflow.
    ///
    /// Checkout and environment failures are returned as errors and stop the
    /// run before the build. Build and sync failures are recorded in the
    /// returned [WorkflowResult].
    pub fn run(&self, request: &DocRequest, dry_run: bool) -> Result<WorkflowResult> {
        if dry_run {
            return Ok(self.plan_only(request));
        }

        let checkout_branch = self.prepare(request)?;
        let status = self.build(request)?;
        let mut result = WorkflowResult::new(request, checkout_branch, status);

        if !status.is_success() {
            ui::display_error("Failed to build docs");
            return Ok(result);
        }
        ui::display_success("Documentation built");

        let warnings_file = self.workspace.join(&self.config.build.warnings_file);
        if let Some(count) = build::count_warnings(&warnings_file) {
            let warning = PublishWarning::BuildWarnings {
                file: warnings_file,
                count,
            };
            ui::display_warning(&warning);
            result.warnings.push(warning);
        }

        self.publish(request, &mut result)?;
        Ok(result)
    }

    /// Check out the release branch into a fresh local branch and clean the
    /// tree. Does nothing for daily docs.
    pub fn prepare(&self, request: &DocRequest) -> Result<Option<String>> {
        if !request.is_release() {
            return Ok(None);
        }

        let repository = self.repository.ok_or_else(|| {
            DocPublishError::checkout("Release docs need a git repository to check out from")
        })?;

        let remote_branch = self.remote_branch(request);
        let local_branch = temp_branch_name(&self.config.repository.temp_branch_prefix);

        ui::display_status(&format!(
            "Checking out {} as {}",
            remote_branch, local_branch
        ));
        repository.checkout_remote_branch(&remote_branch, &local_branch)?;

        let removed = repository.clean_untracked()?;
        tracing::info!("Removed {} untracked or ignored paths", removed.len());

        Ok(Some(local_branch))
    }

    /// Source the environment script and run the documentation build.
    pub fn build(&self, request: &DocRequest) -> Result<BuildStatus> {
        let build_config = &self.config.build;
        let env = capture_environment(self.runner, self.workspace, &build_config.env_script)?
            .prepare_for_docs(build_config);

        let invocation = build::build_invocation(build_config, request.mode, self.workspace, env);
        ui::display_status(&format!("Running {}", invocation));
        build::run_build(self.runner, &invocation)
    }

    /// Upload the HTML output and, when present, the API docs.
    ///
    /// A failed sync does not stop the next one.
    pub fn publish(&self, request: &DocRequest, result: &mut WorkflowResult) -> Result<()> {
        for target in publish::plan(request, self.config, self.workspace) {
            ui::display_status(&format!("Publishing {}", target));

            if publish::sync(self.runner, &target, self.config, self.workspace)? {
                ui::display_success(&format!("Published {}", target.destination));
                result.published.push(target);
            } else {
                let warning = PublishWarning::SyncFailed {
                    destination: target.destination.clone(),
                };
                ui::display_warning(&warning);
                result.warnings.push(warning);
                result.failed.push(target);
            }
        }
        Ok(())
    }

    fn plan_only(&self, request: &DocRequest) -> WorkflowResult {
        let checkout = request.is_release().then(|| {
            (
                self.remote_branch(request),
                temp_branch_name(&self.config.repository.temp_branch_prefix),
            )
        });

        let env = BuildEnvironment::default().prepare_for_docs(&self.config.build);
        let invocation =
            build::build_invocation(&self.config.build, request.mode, self.workspace, env);
        let targets = publish::plan(request, self.config, self.workspace);

        ui::display_plan(
            checkout
                .as_ref()
                .map(|(remote, local)| (remote.as_str(), local.as_str())),
            &invocation,
            &targets,
        );

        WorkflowResult::new(request, None, BuildStatus::Skipped)
    }
}
