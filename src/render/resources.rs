//! Flat resource list: tabular, CSV and JSON

use crate::asset::record::ResourceRecord;
use anyhow::{Context, Result};
use serde::Serialize;

const TABLE_HEADERS: [&str; 3] = ["Name", "Project ID", "Location"];
const CSV_HEADER: &str = "Name,Project ID,Location,Scope";

/// Rendered when the fetched set is empty
pub const NO_RESOURCES: &str = "No resources found.";

/// Column-aligned table preceded by a `Scope:` line.
///
/// Rows are first ordered by (project, full name) and then re-ordered by
/// (project id, short name) for display. The project id column comes from
/// the parent resource name, not the `project` field. Embedded double quotes
/// are doubled before widths are measured.
pub fn render_table(resources: &[ResourceRecord], scope: &str) -> String {
    if resources.is_empty() {
        return NO_RESOURCES.to_string();
    }

    let mut sorted: Vec<&ResourceRecord> = resources.iter().collect();
    sorted.sort_by(|a, b| (&a.project, &a.name).cmp(&(&b.project, &b.name)));

    let mut rows: Vec<[String; 3]> = sorted
        .iter()
        .map(|r| {
            [r.short_name(), r.parent_project_id(), r.location.as_str()].map(double_quotes)
        })
        .collect();

    let mut widths = TABLE_HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header = format_row(&TABLE_HEADERS.map(str::to_string), &widths);
    let rule = "-".repeat(header.chars().count());
    let mut lines = vec![format!("Scope: {}", scope), header, rule];

    rows.sort_by(|a, b| (&a[1], &a[0]).cmp(&(&b[1], &b[0])));
    lines.extend(rows.iter().map(|row| format_row(row, &widths)));

    lines.join("\n")
}

fn double_quotes(cell: &str) -> String {
    cell.replace('"', "\"\"")
}

fn format_row(cells: &[String; 3], widths: &[usize; 3]) -> String {
    cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, &width)| format!("{:<width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Every field double-quoted, embedded quotes doubled, input order kept
pub fn render_csv(resources: &[ResourceRecord], scope: &str) -> Result<String> {
    if resources.is_empty() {
        return Ok(NO_RESOURCES.to_string());
    }

    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(Vec::new());

    for resource in resources {
        writer
            .write_record([
                resource.short_name(),
                resource.project.as_str(),
                resource.location.as_str(),
                scope,
            ])
            .with_context(|| format!("Failed to write CSV row for {}", resource.name))?;
    }

    let body = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV output: {}", e.error()))?;
    let body = String::from_utf8(body).context("CSV output is not valid UTF-8")?;

    Ok(format!("{}\n{}", CSV_HEADER, body.trim_end_matches('\n')))
}

#[derive(Serialize)]
struct ScopedResource<'a> {
    #[serde(flatten)]
    resource: &'a ResourceRecord,
    scope: &'a str,
}

/// JSON array of records, each with an added `scope` field, input order kept
pub fn render_json(resources: &[ResourceRecord], scope: &str) -> serde_json::Result<String> {
    let scoped: Vec<ScopedResource> = resources
        .iter()
        .map(|resource| ScopedResource { resource, scope })
        .collect();
    serde_json::to_string_pretty(&scoped)
}
