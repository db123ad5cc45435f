//! Completion scoring and readiness classification.
//!
//! Everything here is pure: the aggregator feeds in lookup results and the
//! catalog entry, and gets back a score in `0.0..=100.0`.

use crate::model::{
    ComponentDescriptor, ComponentStatus, PackageStats, RepoStats, StatusOverride, DEFAULT_VERSION,
};
use clap::ValueEnum;

const COMPLETE_DEFAULT: f64 = 100.0;
const FUNCTIONAL_DEFAULT: f64 = 80.0;
/// Score for a repository that exists but has neither issues nor releases.
const BOOTSTRAP: f64 = 10.0;
/// Minimum completion for `Readiness::Threshold`.
pub const READY_THRESHOLD: f64 = 80.0;

/// How a component is classified as ready.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Readiness {
    /// A released version, a live repository, or a manual override.
    #[default]
    Evidence,
    /// A released version, a manual override, or completion of at least 80%.
    Threshold,
    /// Only a manual `complete`/`functional` override.
    Declared,
}

/// Scoring policy for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
    pub readiness: Readiness,
    /// A published package with a real version counts as 100% when nothing
    /// else scored the component.
    pub package_index_completes: bool,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            readiness: Readiness::default(),
            package_index_completes: true,
        }
    }
}

/// Outcome of applying the precedence rules to one component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub completion: f64,
    pub registry_exists: bool,
    pub package_exists: bool,
}

/// Share of closed issues, in percent. Zero when there are no issues.
pub fn issue_completion(closed: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    100.0 * closed.min(total) as f64 / total as f64
}

/// Apply the completion precedence rules.
///
/// `registry` and `package` are `Some` only for lookups that found the
/// component.
pub fn resolve(
    descriptor: &ComponentDescriptor,
    registry: Option<&RepoStats>,
    package: Option<&PackageStats>,
    policy: &Policy,
) -> Resolution {
    let forced = |default: f64| Resolution {
        completion: clamp(descriptor.completion_override.unwrap_or(default)),
        registry_exists: true,
        package_exists: true,
    };

    match descriptor.status_override {
        Some(StatusOverride::Complete) => return forced(COMPLETE_DEFAULT),
        Some(StatusOverride::Functional) => return forced(FUNCTIONAL_DEFAULT),
        None => {}
    }

    // A completion override only counts alongside a status override.
    let registry_exists = registry.is_some();
    let package_exists = package.is_some();

    let mut completion = registry.map(|repo| {
        if repo.total_issues > 0 {
            issue_completion(repo.closed_issues, repo.total_issues)
        } else if repo.latest_version != DEFAULT_VERSION {
            100.0
        } else {
            BOOTSTRAP
        }
    });

    if completion.is_none() && policy.package_index_completes {
        if package.is_some_and(|p| p.version != DEFAULT_VERSION) {
            completion = Some(100.0);
        }
    }

    Resolution {
        completion: completion.unwrap_or(0.0),
        registry_exists,
        package_exists,
    }
}

/// Classify a resolved component according to `readiness`.
pub fn is_ready(readiness: Readiness, status: &ComponentStatus) -> bool {
    let released = status.version != DEFAULT_VERSION;
    let overridden = status.is_overridden();
    match readiness {
        Readiness::Evidence => released || status.registry_exists || overridden,
        Readiness::Threshold => released || overridden || status.completion >= READY_THRESHOLD,
        Readiness::Declared => overridden,
    }
}

fn clamp(percent: f64) -> f64 {
    percent.clamp(0.0, 100.0)
}
