//! JSON report — structured output for tooling integration.
//!
//! Unlike the document renderers this one owns the whole file: the previous
//! contents are replaced.

use crate::model::{AggregateStatus, ComponentStatus, Report};
use crate::render::Renderer;
use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

pub struct JsonRenderer;

#[derive(Serialize)]
struct Envelope<'a> {
    generated_at: String,
    totals: &'a AggregateStatus,
    components: &'a [ComponentStatus],
}

impl Renderer for JsonRenderer {
    fn patch(&self, _existing: &str, report: &Report, now: DateTime<Utc>) -> Result<String> {
        let envelope = Envelope {
            generated_at: now.to_rfc3339_opts(SecondsFormat::Secs, true),
            totals: &report.totals,
            components: &report.components,
        };
        let mut out = serde_json::to_string_pretty(&envelope).context("failed to serialize report")?;
        out.push('\n');
        Ok(out)
    }

    fn skeleton(&self) -> String {
        String::new()
    }

    fn file_name(&self) -> &str {
        "status.json"
    }
}
