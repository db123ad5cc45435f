//! Built-in component catalog and repository URL parsing.

use crate::model::ComponentDescriptor;
use regex::Regex;
use std::sync::LazyLock;

static RE_GITHUB_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"github\.com/([^/]+)/([^/\s,]+)").unwrap());

/// Components tracked on the dashboard, in display order.
pub fn builtin() -> Vec<ComponentDescriptor> {
    vec![
        ComponentDescriptor::new(
            "Frontend UI",
            "semantic-copycat-frontend",
            "Web interface for scan submission and results visualization",
        )
        .repository("https://github.com/oscarvalenzuelab/semantic-copycat-frontend")
        .category("Web Platform")
        .license("MIT"),
        ComponentDescriptor::new(
            "Backend API",
            "semantic-copycat-backend",
            "Core API services with scan queue management and orchestration",
        )
        .repository("https://github.com/oscarvalenzuelab/semantic-copycat-backend")
        .category("Web Platform")
        .license("MIT"),
        ComponentDescriptor::new(
            "PURL to Source",
            "semantic-copycat-purl2src",
            "Downloads source code from Package URLs (npm, PyPI, Maven, etc.)",
        )
        .repository("https://github.com/oscarvalenzuelab/semantic-copycat-purl2src")
        .package("semantic-copycat-purl2src")
        .category("Analysis Pipeline")
        .license("MIT")
        .complete()
        .completion(100.0)
        .version("1.1.2"),
        ComponentDescriptor::new(
            "Code Miner",
            "semantic-copycat-miner",
            "Extracts code patterns and performs initial license detection",
        )
        .category("Analysis Pipeline")
        .license("Private Beta")
        .complete()
        .version("1.7.0")
        .private(),
        ComponentDescriptor::new(
            "Binary Sniffer",
            "semantic-copycat-binarysniffer",
            "Identifies hidden OSS components embedded in binary files",
        )
        .repository("https://github.com/oscarvalenzuelab/semantic-copycat-binarysniffer")
        .package("semantic-copycat-binarysniffer")
        .category("Analysis Pipeline")
        .license("MIT")
        .complete()
        .completion(100.0)
        .version("1.10.5"),
        ComponentDescriptor::new(
            "Open Agentic Framework",
            "open-agentic-framework",
            "Agentic analysis framework for intelligent code pattern detection",
        )
        .repository("https://github.com/oscarvalenzuelab/open_agentic_framework")
        .category("Analysis Pipeline")
        .license("Apache-2.0")
        .complete()
        .completion(100.0)
        .version("1.1.0"),
        ComponentDescriptor::new(
            "OS License Identification Library",
            "semantic-copycat-oslili",
            "High-performance license detection across 700+ SPDX identifiers with confidence scores",
        )
        .repository("https://github.com/oscarvalenzuelab/semantic-copycat-oslili")
        .package("semantic-copycat-oslili")
        .category("License Analysis")
        .license("Apache-2.0")
        .complete()
        .completion(100.0)
        .version("1.5.1"),
        ComponentDescriptor::new(
            "PURL to Notice",
            "semantic-copycat-purl2notice",
            "Generates legal notices with licenses and copyright information",
        )
        .repository("https://github.com/oscarvalenzuelab/semantic-copycat-purl2notices")
        .package("semantic-copycat-purl2notices")
        .category("License Analysis")
        .license("MIT")
        .complete()
        .completion(100.0)
        .version("1.2.0"),
        ComponentDescriptor::new(
            "CCDA",
            "semantic-copycat-ccda",
            "Code Copycat Defender Advisory - Evolution of OSSA Scanner for semantic code copycat detection and advisory generation",
        )
        .repository("https://github.com/oscarvalenzuelab/semantic-copycat-ccda")
        .category("License Analysis")
        .license("MIT"),
        ComponentDescriptor::new(
            "UPMEX",
            "semantic-copycat-upmex",
            "Universal package metadata extractor supporting 13 package ecosystems",
        )
        .repository("https://github.com/oscarvalenzuelab/semantic-copycat-upmex")
        .package("semantic-copycat-upmex")
        .category("Analysis Pipeline")
        .license("MIT")
        .complete()
        .completion(100.0)
        .version("1.6.2"),
        ComponentDescriptor::new(
            "Source To ID",
            "semantic-copycat-src2id",
            "Identifies package coordinates from source code using SWHIDs and multiple strategies",
        )
        .repository("https://github.com/oscarvalenzuelab/semantic-copycat-src2id")
        .package("semantic-copycat-src2id")
        .category("Analysis Pipeline")
        .license("AGPL-3.0")
        .complete()
        .completion(100.0)
        .version("1.3.1"),
        ComponentDescriptor::new(
            "PURL2Risk",
            "semantic-copycat-purl2risk",
            "Comprehensive risk intelligence including CVEs, business continuity, and OSS health metrics",
        )
        .repository("https://github.com/oscarvalenzuelab/semantic-copycat-purl2risk")
        .category("Risk Analysis")
        .license("MIT"),
    ]
}

/// Extract `(owner, repo)` from a GitHub URL.
///
/// A trailing `.git` and trailing slashes are ignored.
pub fn parse_github_url(url: &str) -> Option<(String, String)> {
    let caps = RE_GITHUB_URL.captures(url)?;
    let owner = caps[1].to_string();
    let repo = caps[2].trim_end_matches('/');
    let repo = repo.strip_suffix(".git").unwrap_or(repo);
    if repo.is_empty() {
        return None;
    }
    Some((owner, repo.to_string()))
}
