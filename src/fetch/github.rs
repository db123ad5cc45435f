//! GitHub repository, release and issue lookups.

use super::{classify, decode_json, HttpSource, Lookup};
use crate::model::{RepoStats, DEFAULT_VERSION};
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

static RE_LAST_PAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[?&]page=(\d+)>;\s*rel="last""#).unwrap());

#[derive(Deserialize)]
struct RepoInfo {
    updated_at: Option<String>,
    created_at: Option<String>,
    default_branch: Option<String>,
}

#[derive(Deserialize)]
struct Release {
    tag_name: Option<String>,
}

/// Look up `owner/repo`, then its latest release and issue counts.
///
/// Only the repository request decides the outcome; release and issue
/// failures fall back to defaults.
pub(super) fn repository(source: &HttpSource, owner: &str, repo: &str) -> Lookup<RepoStats> {
    let base = format!("/repos/{}/{}", owner, repo);
    let info = match classify(source.github_get(&base), decode_json::<RepoInfo>) {
        Lookup::Found(info) => info,
        Lookup::NotFound => return Lookup::NotFound,
        Lookup::Unavailable(err) => return Lookup::Unavailable(err),
    };

    let latest_version = latest_release(source, &base);
    let open_issues = issue_count(source, &base, "open");
    let total_issues = issue_count(source, &base, "all");

    Lookup::Found(RepoStats {
        latest_version,
        open_issues,
        closed_issues: total_issues.saturating_sub(open_issues),
        total_issues,
        updated_at: info.updated_at,
        created_at: info.created_at,
        default_branch: info.default_branch.unwrap_or_else(|| "main".to_string()),
    })
}

fn latest_release(source: &HttpSource, base: &str) -> String {
    let path = format!("{}/releases/latest", base);
    match classify(source.github_get(&path), decode_json::<Release>) {
        Lookup::Found(release) => release
            .tag_name
            .map(|tag| normalize_tag(&tag))
            .filter(|tag| !tag.is_empty())
            .unwrap_or_else(|| DEFAULT_VERSION.to_string()),
        Lookup::NotFound => DEFAULT_VERSION.to_string(),
        Lookup::Unavailable(err) => {
            tracing::debug!("no release for {}: {}", base, err);
            DEFAULT_VERSION.to_string()
        }
    }
}

/// Estimate the number of issues in `state` with a single one-per-page
/// listing request.
fn issue_count(source: &HttpSource, base: &str, state: &str) -> u64 {
    let path = format!("{}/issues?state={}&per_page=1", base, state);
    let lookup = classify(source.github_get(&path), |response| {
        let last = response.header("Link").and_then(last_page);
        if let Some(count) = last {
            return Ok(count);
        }
        let issues: Vec<serde_json::Value> = decode_json(response)?;
        Ok(issues.len() as u64)
    });
    match lookup {
        Lookup::Found(count) => count,
        Lookup::NotFound => 0,
        Lookup::Unavailable(err) => {
            tracing::debug!("issue count ({}) unavailable for {}: {}", state, base, err);
            0
        }
    }
}

/// Page number of the `rel="last"` entry of a `Link` header.
pub fn last_page(link: &str) -> Option<u64> {
    RE_LAST_PAGE.captures(link)?[1].parse().ok()
}

/// `v1.2.3` → `1.2.3`
pub fn normalize_tag(tag: &str) -> String {
    tag.trim_start_matches('v').to_string()
}
