//! Renderer module — trait-based format dispatch.

pub mod html;
pub mod json;
pub mod markdown;

use crate::model::Report;
use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};

/// Trait for writing a report into a specific dashboard document.
pub trait Renderer {
    /// Rewrite the marked regions of `existing` and return the new text.
    fn patch(&self, existing: &str, report: &Report, now: DateTime<Utc>) -> Result<String>;
    /// Document used when the target file does not exist yet.
    fn skeleton(&self) -> String;
    fn file_name(&self) -> &str;
}

/// Create a renderer for the given target name.
pub fn create_renderer(target: &str) -> Result<Box<dyn Renderer>> {
    match target {
        "readme" | "markdown" | "md" => Ok(Box::new(markdown::MarkdownRenderer)),
        "html" => Ok(Box::new(html::HtmlRenderer)),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(anyhow!(
            "unknown target: {}. Use readme, html, or json",
            target
        )),
    }
}

/// `66.67` → `67%`
pub fn percent(value: f64) -> String {
    format!("{:.0}%", value)
}

/// Text progress bar, `width` cells wide.
pub fn text_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64) as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
