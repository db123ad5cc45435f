//! HTML dashboard — patches stat badges, the component grid and the footer
//! timestamp of `index.html`.

use crate::model::{ComponentStatus, Report};
use crate::patch::{self, Patcher};
use crate::render::{percent, Renderer};
use anyhow::Result;
use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;

pub struct HtmlRenderer;

const COMPONENTS: &str = "COMPONENTS";

static RE_OVERALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<div class="stat-number">\d+(?:\.\d+)?%</div>"#).unwrap());

static RE_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<div class="stat-number">(\d+)</div>"#).unwrap());

static RE_GRID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<div class="component-grid">(.*?)</div>\s*</section>"#).unwrap()
});

static RE_UPDATED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Last updated: [^<]+").unwrap());

impl Renderer for HtmlRenderer {
    fn patch(&self, existing: &str, report: &Report, now: DateTime<Utc>) -> Result<String> {
        let totals = &report.totals;
        let cards = render_cards(&report.components);

        // Three integer badges are total/ready/in-dev; two are ready/in-dev.
        let mut counts = vec![totals.ready.to_string(), totals.in_development.to_string()];
        if RE_COUNT.find_iter(existing).count() >= 3 {
            counts.insert(0, totals.total.to_string());
        }

        let mut doc = Patcher::new(existing);
        doc.replace_first(
            "overall completion",
            &RE_OVERALL,
            &format!(r#"<div class="stat-number">{}</div>"#, percent(totals.overall_completion)),
        )
        .replace_sequence("component counts", &RE_COUNT, &counts);

        if doc.has_section(COMPONENTS) {
            doc.replace_section(COMPONENTS, &cards);
        } else {
            doc.replace_group("component grid", &RE_GRID, 1, &format!("\n{}            ", cards));
        }

        doc.replace_all(
            "last updated",
            &RE_UPDATED,
            &format!("Last updated: {}", now.format("%Y-%m-%d %H:%M UTC")),
        );
        if !doc.missing().is_empty() {
            tracing::debug!("{}: left unchanged: {}", self.file_name(), doc.missing().join(", "));
        }
        Ok(doc.finish())
    }

    fn skeleton(&self) -> String {
        SKELETON.replace("{{components}}", &patch::section(COMPONENTS, ""))
    }

    fn file_name(&self) -> &str {
        "index.html"
    }
}

fn render_cards(components: &[ComponentStatus]) -> String {
    let mut out = String::new();
    for component in components {
        out.push_str(&render_card(component));
        out.push('\n');
    }
    out
}

fn render_card(component: &ComponentStatus) -> String {
    let descriptor = &component.descriptor;
    let status_class = if component.ready {
        "status-ready"
    } else {
        "status-development"
    };

    let mut out = String::new();
    out.push_str(&format!(
        "                <div class=\"component-card\" data-category=\"{}\">\n",
        html_escape(descriptor.category)
    ));
    out.push_str("                    <div class=\"component-header\">\n");
    out.push_str(&format!(
        "                        <span class=\"component-name\">{}</span>\n",
        html_escape(descriptor.name)
    ));
    out.push_str(&format!(
        "                        <span class=\"component-status {}\">{}</span>\n",
        status_class,
        component.status_label()
    ));
    out.push_str("                    </div>\n");
    out.push_str(&format!(
        "                    <p class=\"component-desc\">{}</p>\n",
        html_escape(descriptor.description)
    ));
    out.push_str("                    <div class=\"progress-bar\">\n");
    out.push_str(&format!(
        "                        <div class=\"progress-fill\" style=\"width: {}\"></div>\n",
        percent(component.completion)
    ));
    out.push_str("                    </div>\n");
    out.push_str(&format!(
        "                    <small>Version: {} | License: {}</small>\n",
        html_escape(&component.version),
        html_escape(descriptor.license)
    ));

    let mut links = String::new();
    if let (true, Some(url)) = (component.show_registry_link(), &component.registry_url) {
        links.push_str(&format!(
            "                        <a href=\"{}\">🔗 GitHub</a>\n",
            html_escape(url)
        ));
    }
    if let (true, Some(url)) = (component.show_package_link(), &component.package_url) {
        links.push_str(&format!(
            "                        <a href=\"{}\">📦 PyPI</a>\n",
            html_escape(url)
        ));
    }
    if !links.is_empty() {
        out.push_str("                    <div class=\"component-links\">\n");
        out.push_str(&links);
        out.push_str("                    </div>\n");
    }

    out.push_str("                </div>\n");
    out
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const SKELETON: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Code Copycat Defender - Component Status</title>
    <style>
        body { font-family: system-ui, sans-serif; max-width: 72em; margin: 2em auto; padding: 0 1em; color: #1a1a1a; }
        .stats { display: grid; grid-template-columns: repeat(4, 1fr); gap: 1em; }
        .stat-card { background: #f4f4f4; border-radius: 6px; padding: 1em; text-align: center; }
        .stat-number { font-size: 2em; font-weight: bold; }
        .component-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(20em, 1fr)); gap: 1em; }
        .component-card { border: 1px solid #ddd; border-radius: 6px; padding: 1em; }
        .component-header { display: flex; justify-content: space-between; align-items: center; }
        .component-name { font-weight: bold; }
        .component-status { font-size: 0.75em; padding: 0.1em 0.5em; border-radius: 3px; }
        .status-ready { background: #4eaa25; color: white; }
        .status-development { background: #f0ad4e; color: #1a1a1a; }
        .progress-bar { background: #eee; border-radius: 3px; height: 0.5em; margin: 0.5em 0; }
        .progress-fill { background: #4eaa25; border-radius: 3px; height: 100%; }
        .component-links a { margin-right: 1em; }
    </style>
</head>
<body>
    <header>
        <h1>Code Copycat Defender</h1>
        <p>Enterprise OSS Compliance Platform</p>
    </header>
    <main>
        <section class="stats">
            <div class="stat-card">
                <div class="stat-number">0%</div>
                <div class="stat-label">Overall Completion</div>
            </div>
            <div class="stat-card">
                <div class="stat-number">0</div>
                <div class="stat-label">Components</div>
            </div>
            <div class="stat-card">
                <div class="stat-number">0</div>
                <div class="stat-label">Ready</div>
            </div>
            <div class="stat-card">
                <div class="stat-number">0</div>
                <div class="stat-label">In Development</div>
            </div>
        </section>
        <section class="components">
            <h2>Component Status</h2>
            <div class="component-grid">
{{components}}
            </div>
        </section>
    </main>
    <footer>
        <p>Last updated: never</p>
    </footer>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::testing::{private_report, sample_report, unconfirmed};
    use chrono::TimeZone;

    const LEGACY: &str = r#"<html>
<body>
    <div class="stat-number">25%</div>
    <div class="stat-number">8</div>
    <div class="stat-number">2</div>
    <div class="stat-number">6</div>
    <div class="stat-number">700+</div>
    <section>
            <div class="component-grid">
                <div class="component-card">
                    <span class="component-name">Old</span>
                </div>
            </div>
        </section>
    <p class="footer">Last updated: 2024-01-01 00:00 UTC</p>
</body>
</html>
"#;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 4, 5, 6, 0).unwrap()
    }

    #[test]
    fn legacy_page_is_patched() {
        let out = HtmlRenderer.patch(LEGACY, &sample_report(), now()).unwrap();

        assert!(out.contains(r#"<div class="stat-number">67%</div>"#));
        assert!(out.contains(
            "<div class=\"stat-number\">3</div>\n    <div class=\"stat-number\">2</div>\n    <div class=\"stat-number\">1</div>"
        ));
        assert!(out.contains(r#"<div class="stat-number">700+</div>"#));
        assert!(!out.contains("Old"));
        assert!(out.contains("<span class=\"component-name\">Scanner</span>"));
        assert!(out.contains("Last updated: 2025-03-04 05:06 UTC</p>"));
        assert!(out.starts_with("<html>\n<body>\n"));
        assert!(out.ends_with("        </section>\n    <p class=\"footer\">Last updated: 2025-03-04 05:06 UTC</p>\n</body>\n</html>\n"));
    }

    #[test]
    fn patching_is_idempotent() {
        let report = sample_report();
        let once = HtmlRenderer.patch(LEGACY, &report, now()).unwrap();
        let twice = HtmlRenderer.patch(&once, &report, now()).unwrap();
        assert_eq!(once, twice);

        let skeleton = HtmlRenderer.skeleton();
        let once = HtmlRenderer.patch(&skeleton, &report, now()).unwrap();
        let twice = HtmlRenderer.patch(&once, &report, now()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn skeleton_uses_sentinels() {
        let out = HtmlRenderer.patch(&HtmlRenderer.skeleton(), &sample_report(), now()).unwrap();
        let begin = out.find("<!--BEGIN:COMPONENTS-->").unwrap();
        let end = out.find("<!--END:COMPONENTS-->").unwrap();
        let grid = &out[begin..end];
        assert_eq!(grid.matches("class=\"component-card\"").count(), 3);
        assert!(out.contains("<div class=\"stat-number\">3</div>\n                <div class=\"stat-label\">Components</div>"));
        assert!(out.contains("<div class=\"stat-number\">2</div>\n                <div class=\"stat-label\">Ready</div>"));
        assert!(out.contains("<div class=\"stat-number\">1</div>\n                <div class=\"stat-label\">In Development</div>"));
    }

    #[test]
    fn two_badges_are_ready_and_in_development() {
        let page = "<div class=\"stat-number\">9</div><div class=\"stat-number\">9</div>";
        let out = HtmlRenderer.patch(page, &sample_report(), now()).unwrap();
        assert_eq!(out, "<div class=\"stat-number\">2</div><div class=\"stat-number\">1</div>");
    }

    #[test]
    fn missing_anchors_leave_page_untouched() {
        let page = "<html><body><p>static</p></body></html>\n";
        assert_eq!(HtmlRenderer.patch(page, &sample_report(), now()).unwrap(), page);
    }

    #[test]
    fn card_links_follow_existence() {
        let report = sample_report();
        let core = render_card(&report.components[0]);
        assert!(core.contains("<a href=\"https://github.com/acme/core\">🔗 GitHub</a>"));
        assert!(!core.contains("PyPI"));

        let planned = render_card(&report.components[1]);
        assert!(!planned.contains("component-links"));
        assert!(planned.contains("status-development\">In Dev</span>"));
        assert!(planned.contains("Not started &lt;yet&gt;"));
        assert!(planned.contains("style=\"width: 0%\""));

        let scanner = render_card(&report.components[2]);
        assert!(scanner.contains("🔗 GitHub"));
        assert!(scanner.contains("<a href=\"https://pypi.org/project/acme-scanner/\">📦 PyPI</a>"));
        assert!(scanner.contains("style=\"width: 40%\""));
        assert!(scanner.contains("Version: 1.0.0 | License: MIT"));
    }

    #[test]
    fn private_component_has_no_links() {
        let card = render_card(&private_report().components[0]);
        assert!(!card.contains("<a href"));
        assert!(card.contains("status-ready\">Ready</span>"));
    }

    #[test]
    fn declared_complete_links_unconfirmed_repository() {
        let card = render_card(&unconfirmed(true));
        assert!(card.contains("<a href=\"https://github.com/acme/notices\">🔗 GitHub</a>"));

        let card = render_card(&unconfirmed(false));
        assert!(!card.contains("component-links"));
        assert!(!card.contains("<a href"));
    }
}
