//! Output formatting for shelldoc results.
//!
//! Supports two output formats:
//! - Pretty: colored terminal output, documentation rendered as plain text
//! - JSON: structured output for editor integrations, documentation kept as HTML

use colored::*;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::construct::ConstructKind;
use crate::inspections::Inspection;

lazy_static! {
    static ref TAG_PATTERN: Regex = Regex::new(r"(?s)<[^>]*>").unwrap();
    static ref BLANK_LINES: Regex = Regex::new(r"\n{3,}").unwrap();
}

/// Outcome of looking up one name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocResolution {
    pub name: String,
    pub kind: ConstructKind,
    /// Name of the source that answered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
}

impl DocResolution {
    pub fn is_found(&self) -> bool {
        self.documentation.is_some()
    }
}

/// JSON report for a `doc` run.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonDocReport {
    pub version: String,
    pub resolved: usize,
    pub missing: usize,
    pub results: Vec<DocResolution>,
}

/// JSON entry for one inspection.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonInspection {
    pub id: String,
    pub description: String,
}

/// JSON report for an `inspections` run.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonInspectionReport {
    pub version: String,
    pub context: String,
    pub count: usize,
    pub inspections: Vec<JsonInspection>,
}

/// Pages available under one source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceListing {
    pub source: String,
    pub prefix: String,
    pub keys: Vec<String>,
}

/// Render documentation HTML as terminal text.
///
/// Tags are dropped, a few common entities decoded and runs of blank lines
/// collapsed. This is for display only, not a general HTML renderer.
pub fn html_to_text(html: &str) -> String {
    let text = html
        .replace("<br>", "\n")
        .replace("<br/>", "\n")
        .replace("</p>", "</p>\n");
    let text = TAG_PATTERN.replace_all(&text, "");
    let text = text
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&");
    BLANK_LINES.replace_all(text.trim(), "\n\n").to_string()
}

/// Build the JSON text for a `doc` run.
pub fn doc_json(results: &[DocResolution]) -> anyhow::Result<String> {
    let resolved = results.iter().filter(|r| r.is_found()).count();
    let report = JsonDocReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        resolved,
        missing: results.len() - resolved,
        results: results.to_vec(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Write `doc` results in JSON format.
pub fn write_doc_json(results: &[DocResolution]) -> anyhow::Result<()> {
    println!("{}", doc_json(results)?);
    Ok(())
}

/// Write `doc` results in pretty format.
pub fn write_doc_pretty(results: &[DocResolution]) {
    for (i, result) in results.iter().enumerate() {
        if i > 0 {
            println!();
        }
        match (&result.documentation, &result.source) {
            (Some(doc), source) => {
                let from = source
                    .as_deref()
                    .map(|s| format!(" ({})", s))
                    .unwrap_or_default();
                println!("{}{}", result.name.bold().cyan(), from.dimmed());
                println!("{}", "─".repeat(40).dimmed());
                println!("{}", html_to_text(doc));
            }
            (None, _) => {
                println!(
                    "{} {}",
                    result.name.bold().yellow(),
                    format!("no documentation for {}", result.kind).dimmed()
                );
            }
        }
    }
}

/// Build the JSON text for an `inspections` run.
pub fn inspections_json(context: &str, inspections: &[Inspection]) -> anyhow::Result<String> {
    let report = JsonInspectionReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        context: context.to_string(),
        count: inspections.len(),
        inspections: inspections
            .iter()
            .map(|i| JsonInspection {
                id: i.as_str().to_string(),
                description: i.description().to_string(),
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Write inspections in JSON format.
pub fn write_inspections_json(context: &str, inspections: &[Inspection]) -> anyhow::Result<()> {
    println!("{}", inspections_json(context, inspections)?);
    Ok(())
}

/// Write inspections in pretty format.
pub fn write_inspections_pretty(context: &str, inspections: &[Inspection]) {
    println!(
        "{} {}",
        "Inspections".bold(),
        format!("({}, {} enabled)", context, inspections.len()).dimmed()
    );
    println!();
    let width = inspections
        .iter()
        .map(|i| i.as_str().len())
        .max()
        .unwrap_or(0);
    for inspection in inspections {
        let id = format!("{:<width$}", inspection.as_str(), width = width);
        println!("  {}  {}", id.green(), inspection.description());
    }
}

/// Write page listings in pretty format.
pub fn write_listing_pretty(listings: &[SourceListing]) {
    for listing in listings {
        println!(
            "{} {}",
            listing.source.bold().cyan(),
            format!("{} ({} pages)", listing.prefix, listing.keys.len()).dimmed()
        );
        if listing.keys.is_empty() {
            println!("  {}", "(none)".dimmed());
        } else {
            println!("  {}", listing.keys.join(" "));
        }
    }
}

/// Write page listings in JSON format.
pub fn write_listing_json(listings: &[SourceListing]) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(listings)?);
    Ok(())
}
