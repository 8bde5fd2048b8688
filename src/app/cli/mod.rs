//! CLI Adapter.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use tracing::debug;

use crate::adapters::{GitHubCommandAdapter, HttpGitHubClient};
use crate::app::actions_context::{ContextInputs, resolve_context};
use crate::app::commands::{
    self, HideErrorPolicy, HideOutput, ProcessOptions, write_workflow_output,
};
use crate::app::logging;
use crate::domain::configuration::load_config;
use crate::domain::{AppError, FormalityConfig, Profile, PullRequestContext, Transport};
use crate::ports::GitHubPort;

#[derive(Parser)]
#[command(name = "formality")]
#[command(version)]
#[command(
    about = "Refresh the formality-check summary comment on a pull request",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// TOML configuration file
    #[arg(long, global = true, env = "FORMALITY_CONFIG")]
    config: Option<PathBuf>,
    /// Message profile (advisory, classic)
    #[arg(long, global = true)]
    profile: Option<Profile>,
    /// GitHub transport (gh, http)
    #[arg(long, global = true)]
    transport: Option<Transport>,
    /// Repository as owner/name
    #[arg(long, global = true, env = "GITHUB_REPOSITORY")]
    repo: Option<String>,
    /// Pull request number (defaults to the event payload)
    #[arg(long = "pr", global = true)]
    pr_number: Option<u64>,
    /// Workflow run id
    #[arg(long, global = true, env = "GITHUB_RUN_ID")]
    run_id: Option<u64>,
    /// Path to the webhook event payload
    #[arg(long, global = true, env = "GITHUB_EVENT_PATH")]
    event_path: Option<PathBuf>,
    /// File that collects step outputs
    #[arg(long, global = true, env = "GITHUB_OUTPUT")]
    github_output: Option<PathBuf>,
    /// Override pull_request.maintainer_can_modify from the payload
    #[arg(long, global = true)]
    maintainer_can_modify: Option<bool>,
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args)]
struct SummaryArgs {
    /// Failing-check summary text
    #[arg(long, conflicts_with = "summary_file")]
    summary: Option<String>,
    /// Read the summary from a file ("-" for stdin)
    #[arg(long)]
    summary_file: Option<PathBuf>,
}

impl SummaryArgs {
    fn read(self) -> Result<String, AppError> {
        match (self.summary, self.summary_file) {
            (Some(summary), _) => Ok(summary),
            (None, Some(path)) if path.as_os_str() == "-" => {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                Ok(buf)
            }
            (None, Some(path)) => std::fs::read_to_string(&path).map_err(|e| {
                AppError::Configuration(format!(
                    "Failed to read summary file {}: {}",
                    path.display(),
                    e
                ))
            }),
            (None, None) => Ok(String::new()),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Hide stale summaries and post a fresh one when checks failed
    #[clap(visible_alias = "p")]
    Process {
        /// Id of the job whose log holds the check results
        #[arg(long)]
        job_id: u64,
        #[command(flatten)]
        summary: SummaryArgs,
        /// Post the maintainer-edit advisory when edits are disabled
        #[arg(long)]
        warn_on_no_modify: bool,
        /// Record minimize failures instead of aborting
        #[arg(long)]
        continue_on_hide_error: bool,
    },
    /// Minimize stale summary comments only
    Hide {
        /// Record minimize failures instead of aborting
        #[arg(long)]
        continue_on_hide_error: bool,
    },
    /// Print the comment body without contacting GitHub
    Render {
        /// Id of the job whose log holds the check results
        #[arg(long)]
        job_id: u64,
        #[command(flatten)]
        summary: SummaryArgs,
        /// Include the maintainer-edit advisory
        #[arg(long)]
        no_modify: bool,
    },
}

fn hide_policy(continue_on_hide_error: bool) -> HideErrorPolicy {
    if continue_on_hide_error { HideErrorPolicy::Continue } else { HideErrorPolicy::FailFast }
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    logging::init(cli.global.verbose);

    if let Err(e) = dispatch(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn dispatch(cli: Cli) -> Result<(), AppError> {
    let GlobalArgs {
        config,
        profile,
        transport,
        repo,
        pr_number,
        run_id,
        event_path,
        github_output,
        maintainer_can_modify,
        verbose: _,
    } = cli.global;

    let mut config = load_config(config.as_deref(), profile)?;
    if let Some(transport) = transport {
        config.github.transport = transport;
    }
    debug!(
        profile = config.profile.label(),
        transport = config.github.transport.label(),
        marker = %config.marker,
        "configuration loaded"
    );

    let ctx = resolve_context(ContextInputs {
        repository: repo,
        pr_number,
        run_id,
        event_path,
        maintainer_can_modify,
    })?;

    match cli.command {
        Commands::Render { job_id, summary, no_modify } => {
            let summary = summary.read()?;
            let body = commands::render_comment(&config, &ctx, job_id, &summary, no_modify)?;
            print!("{}", body);
            Ok(())
        }
        command => match config.github.transport {
            Transport::Gh => {
                let github = GitHubCommandAdapter::new();
                run_remote(&github, &config, &ctx, command, github_output.as_deref())
            }
            Transport::Http => {
                let github = HttpGitHubClient::from_env(&config.github)?;
                run_remote(&github, &config, &ctx, command, github_output.as_deref())
            }
        },
    }
}

fn run_remote(
    github: &impl GitHubPort,
    config: &FormalityConfig,
    ctx: &PullRequestContext,
    command: Commands,
    github_output: Option<&Path>,
) -> Result<(), AppError> {
    match command {
        Commands::Process { job_id, summary, warn_on_no_modify, continue_on_hide_error } => {
            let options = ProcessOptions {
                job_id,
                summary: summary.read()?,
                warn_on_no_modify,
                hide_policy: hide_policy(continue_on_hide_error),
            };
            let output = commands::process_formalities(github, config, ctx, options)?;
            write_workflow_output(&output, github_output)
        }
        Commands::Hide { continue_on_hide_error } => {
            let report = commands::hide_old_summaries(
                github,
                config,
                &ctx.repository,
                ctx.number,
                hide_policy(continue_on_hide_error),
            )?;
            write_workflow_output(&HideOutput::new(ctx.number, report), github_output)
        }
        Commands::Render { .. } => Err(AppError::InternalError(
            "render does not contact GitHub".to_string(),
        )),
    }
}
