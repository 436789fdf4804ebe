//! CSV rendering
//!
//! Header `ID,Link,Name,<stages...>,<attribute columns...>`, then one line per
//! item with at least one resolved date. Names are always quoted; other cells
//! are quoted only when they contain a delimiter.

use super::ExportReport;
use crate::domain::item::DATE_FORMAT;
use crate::domain::{AttributeSchema, CompletedItem, StageSchema};

pub fn render(
    items: &[CompletedItem],
    stages: &StageSchema,
    attributes: &AttributeSchema,
) -> (String, ExportReport) {
    let mut out = String::new();
    let mut report = ExportReport::default();

    let header: Vec<String> = ["ID", "Link", "Name"]
        .into_iter()
        .map(str::to_string)
        .chain(stages.names().iter().cloned())
        .chain(attributes.iter().map(|a| a.column.clone()))
        .map(|cell| escape(&cell))
        .collect();
    out.push_str(&header.join(","));
    out.push('\n');

    for item in items {
        if !report.count(item) {
            continue;
        }

        let mut cells = Vec::with_capacity(3 + item.stage_dates.len() + item.attributes.len());
        cells.push(escape(item.id.as_str()));
        cells.push(item.link.as_ref().map(|l| escape(l.as_str())).unwrap_or_default());
        cells.push(format!("\"{}\"", item.name.replace('"', "\"\"")));
        cells.extend(
            item.stage_dates
                .iter()
                .map(|date| date.map(|d| d.format(DATE_FORMAT).to_string()).unwrap_or_default()),
        );
        cells.extend(
            item.attributes
                .iter()
                .map(|value| value.as_deref().map(escape).unwrap_or_default()),
        );

        out.push_str(&cells.join(","));
        out.push('\n');
    }

    (out, report)
}

fn escape(cell: &str) -> String {
    if cell.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AttributeField, ItemId, LinkId};
    use chrono::NaiveDate;

    fn schema() -> (StageSchema, AttributeSchema) {
        let stages = StageSchema::builder()
            .stage("Open", ["Future"])
            .unwrap()
            .stage("Done", ["Done"])
            .unwrap()
            .build()
            .unwrap();
        let attributes = [
            ("Project".to_string(), AttributeField::Scope),
            ("Epic".to_string(), AttributeField::Theme),
        ]
        .into_iter()
        .collect();
        (stages, attributes)
    }

    #[test]
    fn test_render_rows() {
        let (stages, attributes) = schema();
        let items = vec![
            CompletedItem {
                id: ItemId::new("S-01001").unwrap(),
                link: LinkId::from_oid("Story:1001:220"),
                name: "Login page".to_string(),
                stage_dates: vec![NaiveDate::from_ymd_opt(2024, 1, 1), None],
                attributes: vec![Some("Web, mobile".to_string()), None],
            },
            CompletedItem {
                id: ItemId::new("S-01002").unwrap(),
                link: None,
                name: "Nothing happened".to_string(),
                stage_dates: vec![None, None],
                attributes: vec![None, None],
            },
        ];

        let (out, report) = render(&items, &stages, &attributes);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "ID,Link,Name,Open,Done,Project,Epic");
        assert_eq!(lines[1], "S-01001,1001,\"Login page\",2024-01-01,,\"Web, mobile\",");
        assert_eq!(lines.len(), 2);
        assert_eq!(report, ExportReport { written: 1, skipped: 1 });
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("a,b"), "\"a,b\"");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
