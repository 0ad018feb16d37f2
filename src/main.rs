use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use publish_docs::cli::orchestration::{self, DocPublisher, WorkflowResult};
use publish_docs::cli::{screen_args, Args};
use publish_docs::config;
use publish_docs::domain::DocRequest;
use publish_docs::git::Git2Repository;
use publish_docs::process::SystemRunner;
use publish_docs::ui;

fn main() -> Result<()> {
    let (argv, flag_warnings) = screen_args(std::env::args_os());
    let args = Args::parse_from(argv);

    // RUST_LOG wins over --verbose
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if args.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    for warning in &flag_warnings {
        ui::display_warning(warning);
    }

    let request = args.request();
    ui::display_status(&ui::request_banner(&request));

    let outcome = run(&args, &request);
    let succeeded = match outcome {
        Ok(ref result) => result.is_success(),
        Err(ref e) => {
            ui::display_error(&format!("{:#}", e));
            false
        }
    };

    ui::display_done();

    if !succeeded {
        std::process::exit(1);
    }
    Ok(())
}

fn run(args: &Args, request: &DocRequest) -> Result<WorkflowResult> {
    let workspace = orchestration::workspace_from_env()
        .context("Cannot determine the working directory")?;
    tracing::debug!("Working in {}", workspace.display());

    let config = config::load_config(args.config.as_deref(), &workspace)?;

    let runner = SystemRunner;
    let repository = if request.is_release() && !args.dry_run {
        Some(Git2Repository::open(&workspace)?)
    } else {
        None
    };

    let mut publisher = DocPublisher::new(&config, &workspace, &runner);
    if let Some(ref repo) = repository {
        publisher = publisher.with_repository(repo);
    }

    let result = publisher.run(request, args.dry_run)?;
    Ok(result)
}
