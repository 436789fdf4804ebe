//! JSON rendering
//!
//! The document is an array of string arrays: the header row first, then one
//! row per item with at least one resolved date. The link column holds a
//! browsable URL rather than the bare id.

use super::ExportReport;
use crate::domain::item::DATE_FORMAT;
use crate::domain::{AttributeSchema, CompletedItem, LinkId, Result, StageSchema};

/// URL of the item detail page for `link`
pub fn detail_url(domain: &str, link: &LinkId) -> String {
    format!(
        "{}/assetdetail.v1?oid=Story:{}",
        domain.trim_end_matches('/'),
        link
    )
}

pub fn render(
    items: &[CompletedItem],
    domain: &str,
    stages: &StageSchema,
    attributes: &AttributeSchema,
) -> Result<(String, ExportReport)> {
    let mut report = ExportReport::default();

    let header: Vec<String> = ["ID", "Link", "Name"]
        .into_iter()
        .map(str::to_string)
        .chain(stages.names().iter().cloned())
        .chain(attributes.iter().map(|a| a.column.clone()))
        .collect();

    let mut rows = vec![serde_json::to_string(&header)?];

    for item in items {
        if !report.count(item) {
            continue;
        }

        let mut row = Vec::with_capacity(header.len());
        row.push(item.id.as_str().trim().to_string());
        row.push(
            item.link
                .as_ref()
                .map(|link| detail_url(domain, link))
                .unwrap_or_default(),
        );
        row.push(item.name.trim().to_string());
        row.extend(
            item.stage_dates
                .iter()
                .map(|date| date.map(|d| d.format(DATE_FORMAT).to_string()).unwrap_or_default()),
        );
        row.extend(
            item.attributes
                .iter()
                .map(|value| value.as_deref().map(str::trim).unwrap_or_default().to_string()),
        );

        rows.push(serde_json::to_string(&row)?);
    }

    Ok((format!("[{}]\n", rows.join(",\n")), report))
}
