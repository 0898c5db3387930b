//! Topics client CLI - runs one fetch-and-drain cycle against a topic.
//!
//! This is the binary entry point. See the `topics_client` library for the
//! protocol implementation.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use mimalloc::MiMalloc;
use topics_client::{
    AssignmentOutcome, ConnectionConfig, ConnectionConfigBuilder, ErrorStrategy, FailurePolicy,
    PayloadEncoding, TopicClient, TopicVariables,
};

/// Global allocator configured per M-MIMALLOC-APPS guideline.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Default engine location when neither `--host` nor `TOPICS_HOST` is given.
const DEFAULT_HOST: &str = "http://localhost";

#[derive(Parser, Debug)]
#[command(name = "topics-client")]
#[command(version)]
#[command(about = "Fetch pending assignments of a topic and post a result for each")]
struct Cli {
    /// Base URL of the workflow engine (overridden by TOPICS_HOST).
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,

    /// Application id hosting the topic.
    #[arg(long = "app")]
    application_id: String,

    /// Topic name.
    #[arg(long)]
    topic: String,

    /// Basic-auth username (overridden by TOPICS_USERNAME).
    #[arg(long)]
    username: Option<String>,

    /// Basic-auth password (overridden by TOPICS_PASSWORD).
    #[arg(long)]
    password: Option<String>,

    /// Accept any TLS certificate and skip hostname verification.
    #[arg(long)]
    insecure: bool,

    /// Keep processing after a failed assignment.
    #[arg(long)]
    continue_on_error: bool,

    /// Post variable names only, without values.
    #[arg(long)]
    keys_only: bool,

    /// Per-request timeout in seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Variable to return for every assignment, as NAME=VALUE. Repeatable.
    #[arg(long = "set", value_parser = parse_key_val)]
    variables: Vec<(String, String)>,

    /// Only list pending assignments; post nothing.
    #[arg(long)]
    dry_run: bool,
}

/// Parse a `NAME=VALUE` pair.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{s}`"))?;
    if key.is_empty() {
        return Err(format!("empty variable name in `{s}`"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Connection settings taken from the command line alone.
fn config_builder(cli: &Cli) -> ConnectionConfigBuilder {
    let mut builder = ConnectionConfig::builder(&cli.host, &cli.application_id, &cli.topic)
        .allow_insecure_tls(cli.insecure);

    if let Some(username) = &cli.username {
        builder = builder.username(username);
    }
    if let Some(password) = &cli.password {
        builder = builder.password(password);
    }
    if cli.continue_on_error {
        builder = builder.failure_policy(FailurePolicy::ContinueOnFailure);
    }
    if cli.keys_only {
        builder = builder.payload_encoding(PayloadEncoding::KeysOnly);
    }
    if let Some(secs) = cli.timeout_secs {
        builder = builder.request_timeout(Duration::from_secs(secs));
    }
    builder
}

/// Command-line settings with `TOPICS_*` environment overrides on top.
fn build_config(cli: &Cli) -> Result<ConnectionConfig> {
    config_builder(cli)
        .build()
        .context("Invalid connection settings")?
        .apply_env_overrides()
        .context("Invalid environment overrides")
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = build_config(&cli)?;

    let mut client = TopicClient::new(config, ErrorStrategy::Log);
    if !cli.dry_run {
        let variables = cli.variables.clone();
        client = client.with_handler(move |id, mut vars: TopicVariables| {
            log::debug!("Handling assignment [{id}]");
            for (name, value) in &variables {
                vars.set(name.as_str(), value.as_str());
            }
            vars
        });
    }

    // Failures are logged by the error strategy; the report is printed below.
    let Some(report) = client.connect() else {
        anyhow::bail!("Fetching assignments failed");
    };

    for outcome in report.outcomes() {
        match outcome {
            AssignmentOutcome::Posted { id, status } => println!("posted   {id} ({status})"),
            AssignmentOutcome::Skipped { id } => println!("pending  {id}"),
            AssignmentOutcome::Failed { id, error } => {
                println!("failed   {} - {error}", id.as_deref().unwrap_or("<no id>"));
            }
        }
    }

    let failed = report.failures().count();
    println!(
        "{} fetched, {} posted, {} failed, {} unprocessed",
        report.fetched,
        report.posted().count(),
        failed,
        report.unprocessed
    );

    if failed > 0 {
        anyhow::bail!("{failed} assignment(s) failed");
    }

    Ok(())
}
