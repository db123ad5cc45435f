//! Data model for component status — format-agnostic.

use serde::Serialize;

/// Version reported when nothing better is known.
pub const DEFAULT_VERSION: &str = "0.0.0";

/// Manual status marker set in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusOverride {
    Complete,
    // The built-in catalog has no functional entries.
    #[cfg_attr(not(test), allow(dead_code))]
    Functional,
}

/// A catalog entry. Immutable for the duration of a run.
#[derive(Debug, Clone, Serialize)]
pub struct ComponentDescriptor {
    pub name: &'static str,
    pub id: &'static str,
    /// Source repository URL (GitHub)
    pub repository: Option<&'static str>,
    /// Package index name (PyPI)
    pub package: Option<&'static str>,
    pub description: &'static str,
    pub category: &'static str,
    pub license: &'static str,
    pub status_override: Option<StatusOverride>,
    pub completion_override: Option<f64>,
    pub version_override: Option<&'static str>,
    /// No public repository; links are replaced by a notice
    pub private: bool,
}

impl ComponentDescriptor {
    pub fn new(name: &'static str, id: &'static str, description: &'static str) -> Self {
        Self {
            name,
            id,
            repository: None,
            package: None,
            description,
            category: "Core",
            license: "TBD",
            status_override: None,
            completion_override: None,
            version_override: None,
            private: false,
        }
    }

    pub fn repository(mut self, url: &'static str) -> Self {
        self.repository = Some(url);
        self
    }

    pub fn package(mut self, name: &'static str) -> Self {
        self.package = Some(name);
        self
    }

    pub fn category(mut self, category: &'static str) -> Self {
        self.category = category;
        self
    }

    pub fn license(mut self, license: &'static str) -> Self {
        self.license = license;
        self
    }

    pub fn complete(mut self) -> Self {
        self.status_override = Some(StatusOverride::Complete);
        self
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn functional(mut self) -> Self {
        self.status_override = Some(StatusOverride::Functional);
        self
    }

    pub fn completion(mut self, percent: f64) -> Self {
        self.completion_override = Some(percent);
        self
    }

    pub fn version(mut self, version: &'static str) -> Self {
        self.version_override = Some(version);
        self
    }

    pub fn private(mut self) -> Self {
        self.private = true;
        self
    }
}

/// Normalized repository lookup result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepoStats {
    pub latest_version: String,
    pub open_issues: u64,
    pub closed_issues: u64,
    pub total_issues: u64,
    pub updated_at: Option<String>,
    pub created_at: Option<String>,
    pub default_branch: String,
}

impl Default for RepoStats {
    fn default() -> Self {
        Self {
            latest_version: DEFAULT_VERSION.to_string(),
            open_issues: 0,
            closed_issues: 0,
            total_issues: 0,
            updated_at: None,
            created_at: None,
            default_branch: "main".to_string(),
        }
    }
}

/// Normalized package index lookup result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackageStats {
    pub version: String,
}

/// Per-component status derived during a run.
#[derive(Debug, Clone, Serialize)]
pub struct ComponentStatus {
    #[serde(flatten)]
    pub descriptor: ComponentDescriptor,
    pub registry_exists: bool,
    pub package_exists: bool,
    pub version: String,
    pub open_issues: u64,
    pub closed_issues: u64,
    pub total_issues: u64,
    pub completion: f64,
    pub ready: bool,
    pub registry_url: Option<String>,
    pub package_url: Option<String>,
    pub updated_at: Option<String>,
}

impl ComponentStatus {
    pub fn is_overridden(&self) -> bool {
        self.descriptor.status_override.is_some()
    }

    /// Registry link is shown for confirmed repositories and for components
    /// declared complete.
    pub fn show_registry_link(&self) -> bool {
        self.registry_url.is_some()
            && (self.registry_exists
                || self.descriptor.status_override == Some(StatusOverride::Complete))
    }

    pub fn show_package_link(&self) -> bool {
        self.package_url.is_some() && self.package_exists
    }

    pub fn status_label(&self) -> &'static str {
        if self.ready {
            "Ready"
        } else {
            "In Dev"
        }
    }
}

/// Totals over every component of a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateStatus {
    pub total: usize,
    pub ready: usize,
    pub in_development: usize,
    /// `ready / total * 100`
    pub overall_completion: f64,
    pub open_issues: u64,
    pub closed_issues: u64,
    pub total_issues: u64,
    /// `closed / total issues * 100`
    pub resolution_rate: f64,
}

impl AggregateStatus {
    pub fn from_components(components: &[ComponentStatus]) -> Self {
        let total = components.len();
        let ready = components.iter().filter(|c| c.ready).count();
        let open_issues = components.iter().map(|c| c.open_issues).sum();
        let closed_issues = components.iter().map(|c| c.closed_issues).sum();
        let total_issues = components.iter().map(|c| c.total_issues).sum();

        Self {
            total,
            ready,
            in_development: total - ready,
            overall_completion: ratio(ready as f64, total as f64),
            open_issues,
            closed_issues,
            total_issues,
            resolution_rate: ratio(closed_issues as f64, total_issues as f64),
        }
    }
}

/// Everything the renderers need.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub components: Vec<ComponentStatus>,
    pub totals: AggregateStatus,
}

fn ratio(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        100.0 * part / whole
    }
}
