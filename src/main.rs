use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;

use gh_reviewer_assign::config::{AppConfig, loader};
use gh_reviewer_assign::github::GitHubClient;
use gh_reviewer_assign::notify::WebhookNotifier;
use gh_reviewer_assign::types::RepoRef;
use gh_reviewer_assign::workflow::{Outcome, ReviewAssignment, SkipReason};

#[derive(Parser)]
#[command(
    name = "gh-reviewer-assign",
    version,
    about = "Randomly assign pull request reviewers and notify them in chat"
)]
struct Cli {
    /// Path to config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Repository as `owner/repo`. Defaults to the `origin` remote.
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repo: Option<String>,

    /// Head branch of the pull request. Defaults to the current branch.
    #[arg(long, env = "GITHUB_HEAD_REF")]
    head_ref: Option<String>,

    /// Chat webhook URL, overriding `notification.webhook_url`.
    #[arg(long, env = "REVIEWER_ASSIGN_WEBHOOK_URL", hide_env_values = true)]
    webhook_url: Option<String>,

    /// Select and print reviewers without requesting them or notifying.
    #[arg(long)]
    dry_run: bool,

    /// Skip the chat notification.
    #[arg(long)]
    no_notify: bool,

    /// Seed the random draw, for reproducible selections.
    #[arg(long)]
    seed: Option<u64>,

    /// Enable debug logging.
    #[arg(long)]
    debug: bool,
}

fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .init();
}

/// Resolve the target repository: explicit flag/env first, then git remote.
fn resolve_repo(explicit: Option<&str>) -> Result<RepoRef> {
    if let Some(full_name) = explicit.filter(|s| !s.is_empty()) {
        return RepoRef::from_full_name(full_name)
            .with_context(|| format!("repository must be \"owner/repo\", got {full_name:?}"));
    }
    let cwd = std::env::current_dir().context("reading current directory")?;
    gh_reviewer_assign::git::detect_repo(&cwd)
        .context("could not detect repository; pass --repo owner/repo")
}

fn resolve_head_ref(explicit: Option<&str>) -> Result<String> {
    if let Some(head_ref) = explicit.filter(|s| !s.is_empty()) {
        return Ok(head_ref.to_owned());
    }
    let cwd = std::env::current_dir().context("reading current directory")?;
    gh_reviewer_assign::git::current_branch(&cwd)
        .context("could not detect current branch; pass --head-ref")
}

/// Build the chat notifier, or `None` when notifications are off.
fn build_notifier(
    config: &AppConfig,
    override_url: Option<&str>,
    no_notify: bool,
) -> Result<Option<WebhookNotifier>> {
    if no_notify {
        return Ok(None);
    }
    match config.notification.resolve_webhook_url(override_url)? {
        Some(url) => WebhookNotifier::new(url, config.notification.flavor).map(Some),
        None => Ok(None),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    // Configuration problems surface before anything touches the network.
    let config = loader::load_config(cli.config.as_deref())?;
    let repo = resolve_repo(cli.repo.as_deref())?;
    let head_ref = resolve_head_ref(cli.head_ref.as_deref())?;
    let notify_disabled = cli.no_notify || cli.dry_run;

    // rustls 0.23 needs a process-wide CryptoProvider before any octocrab
    // client (GitHub or webhook) is built.
    rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install default CryptoProvider"))?;

    let notifier = build_notifier(&config, cli.webhook_url.as_deref(), notify_disabled)?;
    let github = GitHubClient::connect(&config.github.host)?;
    let contacts = config.contact_book();

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    tracing::info!(repo = %repo, head_ref = %head_ref, "assigning reviewers");

    let outcome = ReviewAssignment {
        groups: &config.groups,
        contacts: &contacts,
        source: &github,
        requester: &github,
        notifier: &notifier,
        dry_run: cli.dry_run,
    }
    .run(&repo, &head_ref, &mut rng)
    .await?;

    match outcome {
        Outcome::Assigned { number, reviewers } => {
            println!("#{number}: requested {}", reviewers.join(", "));
        }
        Outcome::DryRun { number, reviewers } => {
            println!("#{number}: would request {}", reviewers.join(", "));
        }
        Outcome::Skipped {
            number,
            reason: SkipReason::Draft,
        } => println!("#{number}: draft, skipped"),
        Outcome::Skipped {
            number,
            reason: SkipReason::NoReviewers,
        } => println!("#{number}: no eligible reviewers, skipped"),
    }

    Ok(())
}
