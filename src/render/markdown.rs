//! GitHub-flavored markdown README renderer.
//!
//! Patches the summary line, the overall progress bar, the component table,
//! the summary statistics table and the `Last updated` label.

use crate::model::{AggregateStatus, ComponentStatus, Report};
use crate::patch::{self, Patcher};
use crate::render::{percent, text_bar, Renderer};
use anyhow::Result;
use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;

pub struct MarkdownRenderer;

const COMPONENTS: &str = "COMPONENTS";
const TOTALS: &str = "TOTALS";
const OVERALL_BAR_WIDTH: usize = 50;
const ROW_BAR_WIDTH: usize = 10;

static RE_SUMMARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*\d+%\*\* Complete \| \*\*\d+/\d+\*\* Components Ready").unwrap()
});

static RE_BAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?mR)^[█░]+$").unwrap());

static RE_UPDATED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Last updated: [^<*\r\n]+").unwrap());

// READMEs written before the sentinels existed: header row through the last
// contiguous `|` line.
static RE_LEGACY_TABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\| Component \| Version \|.*\n(?:\|.*(?:\n|$))*").unwrap()
});

static RE_LEGACY_TOTALS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\| Total Components \|.*\n(?:\|.*(?:\n|$))*").unwrap()
});

impl Renderer for MarkdownRenderer {
    fn patch(&self, existing: &str, report: &Report, now: DateTime<Utc>) -> Result<String> {
        let totals = &report.totals;
        let mut doc = Patcher::new(existing);
        doc.replace_first(
            "summary line",
            &RE_SUMMARY,
            &format!(
                "**{}** Complete | **{}/{}** Components Ready",
                percent(totals.overall_completion),
                totals.ready,
                totals.total
            ),
        )
        .replace_first(
            "progress bar",
            &RE_BAR,
            &text_bar(totals.overall_completion, OVERALL_BAR_WIDTH),
        )
        .replace_section_or(COMPONENTS, &RE_LEGACY_TABLE, &render_table(&report.components))
        .replace_section_or(TOTALS, &RE_LEGACY_TOTALS, &render_totals(totals))
        .replace_all(
            "last updated",
            &RE_UPDATED,
            &format!("Last updated: {}", now.format("%Y-%m-%d")),
        );
        if !doc.missing().is_empty() {
            tracing::debug!("{}: left unchanged: {}", self.file_name(), doc.missing().join(", "));
        }
        Ok(doc.finish())
    }

    fn skeleton(&self) -> String {
        SKELETON
            .replace("{{components}}", &patch::section(COMPONENTS, ""))
            .replace("{{totals}}", &patch::section(TOTALS, ""))
    }

    fn file_name(&self) -> &str {
        "README.md"
    }
}

/// Component table, one row per component.
fn render_table(components: &[ComponentStatus]) -> String {
    let mut out = String::new();
    out.push_str("| Component | Version | License | Status | Progress | Links |\n");
    out.push_str("|-----------|---------|---------|--------|----------|-------|\n");
    for component in components {
        out.push_str(&render_row(component));
        out.push('\n');
    }
    out
}

fn render_row(component: &ComponentStatus) -> String {
    let descriptor = &component.descriptor;
    let status = if component.ready {
        "✅ Ready"
    } else {
        "🚧 In Dev"
    };
    format!(
        "| **{}**<br/>*{}* | {} | {} | {} | `{}` {} | {} |",
        cell(descriptor.name),
        cell(descriptor.description),
        cell(&component.version),
        cell(descriptor.license),
        status,
        text_bar(component.completion, ROW_BAR_WIDTH),
        percent(component.completion),
        render_links(component)
    )
}

fn render_links(component: &ComponentStatus) -> String {
    if component.descriptor.private {
        return "Private repo".to_string();
    }

    let mut links = Vec::new();
    if let Some(ref url) = component.registry_url {
        if component.show_registry_link() {
            links.push(format!("[GitHub]({})", url));
        } else {
            links.push("GitHub (planned)".to_string());
        }
    }
    if let (true, Some(url)) = (component.show_package_link(), &component.package_url) {
        links.push(format!("[PyPI]({})", url));
    }

    if links.is_empty() {
        "GitHub (planned)".to_string()
    } else {
        links.join(" · ")
    }
}

fn render_totals(totals: &AggregateStatus) -> String {
    let mut out = String::new();
    out.push_str("| Total Components | Production Ready | In Development | Open Issues | Closed Issues | Issue Resolution |\n");
    out.push_str("|------------------|------------------|----------------|-------------|---------------|------------------|\n");
    out.push_str(&format!(
        "| **{}** | **{}** | **{}** | **{}** | **{}** | **{}** |\n",
        totals.total,
        totals.ready,
        totals.in_development,
        totals.open_issues,
        totals.closed_issues,
        percent(totals.resolution_rate)
    ));
    out
}

/// Escape characters that would break a table cell.
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

const SKELETON: &str = r#"# Code Copycat Defender

> **Enterprise OSS Compliance Platform - Comprehensive code similarity detection and license compliance for modern software development**

## Project Overview

<div align="center">

### Overall Project Completion

**0%** Complete | **0/0** Components Ready

░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░

</div>

---

## Component Status Dashboard

*Last updated: never*

{{components}}

---

## Platform Capabilities

### ✅ Available Features

- **Package Download Engine** - Automated source retrieval from PURL (npm, PyPI, Maven, Go, Cargo)
- **Code Pattern Mining** - Advanced signature extraction and semantic analysis algorithms
- **Binary Component Scanner** - Detection of embedded OSS components in compiled binaries
- **License Detection System** - Identification of 700+ SPDX licenses with confidence scoring
- **AI-Powered Analysis** - Intelligent pattern recognition using agentic framework
- **Metadata Extraction** - Universal parser supporting 13 package ecosystems
- **Source Identification** - Package coordinate mapping using SWHIDs and fingerprinting

### 🚧 In Development

- **Web Management Interface** - Enterprise dashboard for scan submission and monitoring
- **RESTful API** - Programmatic access with authentication and rate limiting
- **Batch Processing Pipeline** - Concurrent analysis of multiple packages with queue management
- **Compliance Dashboard** - Real-time metrics, trends, and risk assessment reports
- **CI/CD Integration** - Native plugins for Jenkins, GitLab, GitHub Actions

---

## Summary Statistics

<div align="center">

{{totals}}

</div>

---

## Getting Started

Visit the [project website](https://copycatcodedefender.com) for more information, or explore individual component repositories for specific setup instructions and documentation.

## License

Copyright © 2025 Code Copycat Defender | Enterprise OSS Compliance Platform
"#;
