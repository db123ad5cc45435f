//! Walk the catalog, look up each component and score it.

use crate::catalog::parse_github_url;
use crate::completion::{self, Policy};
use crate::fetch::{pypi, Lookup, StatsSource};
use crate::model::{
    AggregateStatus, ComponentDescriptor, ComponentStatus, PackageStats, RepoStats, Report,
    DEFAULT_VERSION,
};

/// Build the report for `catalog`, in catalog order.
///
/// Lookups run one at a time; a registry call is only made for components
/// with a parsable repository URL and an index call only for components with
/// a package name.
pub fn aggregate(catalog: &[ComponentDescriptor], source: &dyn StatsSource, policy: &Policy) -> Report {
    let components: Vec<ComponentStatus> = catalog
        .iter()
        .map(|descriptor| collect(descriptor, source, policy))
        .collect();
    let totals = AggregateStatus::from_components(&components);
    Report { components, totals }
}

fn collect(descriptor: &ComponentDescriptor, source: &dyn StatsSource, policy: &Policy) -> ComponentStatus {
    tracing::info!(component = descriptor.name, "collecting status");

    let registry = descriptor.repository.and_then(|url| match parse_github_url(url) {
        Some((owner, repo)) => Some(source.repository(&owner, &repo)),
        None => {
            tracing::warn!(component = descriptor.name, "not a GitHub repository URL: {}", url);
            None
        }
    });
    let package = descriptor.package.map(|name| source.package(name));

    let repo_stats = registry.as_ref().and_then(Lookup::found);
    let package_stats = package.as_ref().and_then(Lookup::found);
    let resolution = completion::resolve(descriptor, repo_stats, package_stats, policy);

    let mut status = ComponentStatus {
        descriptor: descriptor.clone(),
        registry_exists: resolution.registry_exists,
        package_exists: resolution.package_exists,
        version: resolve_version(descriptor, repo_stats, package_stats),
        open_issues: repo_stats.map_or(0, |r| r.open_issues),
        closed_issues: repo_stats.map_or(0, |r| r.closed_issues),
        total_issues: repo_stats.map_or(0, |r| r.total_issues),
        completion: resolution.completion,
        ready: false,
        registry_url: descriptor.repository.map(str::to_string),
        package_url: descriptor.package.map(pypi::project_url),
        updated_at: repo_stats.and_then(|r| r.updated_at.clone()),
    };
    status.ready = completion::is_ready(policy.readiness, &status);

    tracing::debug!(
        component = descriptor.name,
        version = %status.version,
        completion = status.completion,
        ready = status.ready,
        "resolved"
    );
    status
}

/// Manual override, then a published package version, then the latest
/// release tag.
fn resolve_version(
    descriptor: &ComponentDescriptor,
    registry: Option<&RepoStats>,
    package: Option<&PackageStats>,
) -> String {
    if let Some(version) = descriptor.version_override {
        return version.to_string();
    }
    package
        .map(|p| p.version.as_str())
        .filter(|v| *v != DEFAULT_VERSION)
        .or_else(|| registry.map(|r| r.latest_version.as_str()))
        .unwrap_or(DEFAULT_VERSION)
        .to_string()
}
