//! statusboard — regenerate the project status dashboard.
//!
//! Looks up every catalog component on GitHub and PyPI, scores it, and
//! patches the marked regions of the dashboard documents:
//!
//! - `statusboard` — update `README.md` and `index.html` in the current directory
//! - `statusboard -o site html json` — update `site/index.html`, write `site/status.json`
//! - `statusboard --offline` — skip the network and render catalog overrides only

mod aggregate;
mod catalog;
mod completion;
mod fetch;
mod logging;
mod model;
mod patch;
mod render;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use completion::{Policy, Readiness};
use fetch::{HttpSource, OfflineSource, SourceConfig, StatsSource};
use model::Report;
use render::Renderer;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_TARGETS: &[&str] = &["readme", "html"];

#[derive(Parser)]
#[command(
    name = "statusboard",
    about = "Regenerate the component status dashboard from GitHub and PyPI data"
)]
struct Cli {
    /// Documents to update: readme, html, json. Defaults to readme and html.
    targets: Vec<String>,

    /// Directory holding the dashboard documents
    #[arg(short = 'o', long, default_value = ".")]
    output: PathBuf,

    /// Rule deciding whether a component counts as ready
    #[arg(long, value_enum, default_value_t = Readiness::Evidence)]
    readiness: Readiness,

    /// Do not treat a published package as 100% complete
    #[arg(long)]
    no_index_completion: bool,

    /// Skip all network lookups
    #[arg(long)]
    offline: bool,

    /// GitHub API base URL
    #[arg(long, default_value = fetch::DEFAULT_GITHUB_API)]
    github_api: String,

    /// PyPI base URL
    #[arg(long, default_value = fetch::DEFAULT_PYPI_API)]
    pypi_api: String,

    /// GitHub token, sent as a bearer credential to raise rate limits
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Fixed "now" (RFC 3339) for the Last updated labels
    #[arg(long, value_parser = parse_timestamp)]
    timestamp: Option<DateTime<Utc>>,

    /// Increase diagnostic output (repeatable)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    // Reject unknown targets before any network traffic.
    let renderers = resolve_targets(&cli.targets)
        .iter()
        .map(|target| render::create_renderer(target))
        .collect::<Result<Vec<_>>>()?;

    fs::create_dir_all(&cli.output)
        .with_context(|| format!("failed to create output directory: {}", cli.output.display()))?;

    let policy = Policy {
        readiness: cli.readiness,
        package_index_completes: !cli.no_index_completion,
    };
    let source: Box<dyn StatsSource> = if cli.offline {
        Box::new(OfflineSource)
    } else {
        Box::new(HttpSource::new(&SourceConfig {
            github_api: cli.github_api.clone(),
            pypi_api: cli.pypi_api.clone(),
            token: cli.token.clone(),
        }))
    };

    let catalog = catalog::builtin();
    let report = aggregate::aggregate(&catalog, source.as_ref(), &policy);
    let now = cli.timestamp.unwrap_or_else(Utc::now);

    for renderer in &renderers {
        let path = cli.output.join(renderer.file_name());
        write_document(renderer.as_ref(), &path, &report, now)?;
        println!("updated {}", path.display());
    }

    print_summary(&report);
    Ok(())
}

/// Positional targets, or the defaults when none are given. Duplicates are
/// dropped, first occurrence wins.
fn resolve_targets(targets: &[String]) -> Vec<String> {
    let requested: Vec<String> = if targets.is_empty() {
        DEFAULT_TARGETS.iter().map(|t| t.to_string()).collect()
    } else {
        targets.to_vec()
    };
    let mut seen = Vec::new();
    for target in requested {
        if !seen.contains(&target) {
            seen.push(target);
        }
    }
    seen
}

/// Patch the document at `path`, starting from the renderer's skeleton when
/// the file does not exist yet.
fn write_document(renderer: &dyn Renderer, path: &Path, report: &Report, now: DateTime<Utc>) -> Result<()> {
    let existing = if path.exists() {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?
    } else {
        tracing::info!("{} not found, starting from skeleton", path.display());
        renderer.skeleton()
    };

    let output = renderer.patch(&existing, report, now)?;
    fs::write(path, &output).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn print_summary(report: &Report) {
    let totals = &report.totals;
    println!("Overall completion: {}", render::percent(totals.overall_completion));
    println!("Components ready: {}/{}", totals.ready, totals.total);
    println!("  - Ready: {}", totals.ready);
    println!("  - In development: {}", totals.in_development);
    println!(
        "Issues: {} open, {} closed ({} resolved)",
        totals.open_issues,
        totals.closed_issues,
        render::percent(totals.resolution_rate)
    );
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("invalid RFC 3339 timestamp: {}", e))
}
