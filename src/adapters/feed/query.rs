//! History query construction
//!
//! Turns filter criteria, the attribute schema and a page window into the
//! request URL for the story history endpoint.

use crate::config::CriteriaConfig;
use crate::domain::{AttributeField, AttributeSchema, Window};

/// Path of the story history endpoint, relative to the instance URL
pub const HISTORY_PATH: &str = "/rest-1.v1/Hist/Story";

/// Attributes every query selects, in order
pub const BASE_SELECT: [&str; 5] = [
    "Name",
    "Number",
    "Status.Name",
    "ChangeDate",
    "Parent.Now.ParentMeAndUp.Name",
];

/// Request descriptor for one page of history rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedQuery {
    select: Vec<String>,
    filter: Option<String>,
    window: Window,
}

impl FeedQuery {
    /// Builds the query for `window`
    ///
    /// Values inside one criteria list are OR-ed, lists are AND-ed. A
    /// multi-value group is parenthesized, and so is the whole expression when
    /// more than one list contributes.
    ///
    /// # Examples
    ///
    /// ```
    /// use cycletime::adapters::feed::FeedQuery;
    /// use cycletime::config::CriteriaConfig;
    /// use cycletime::domain::{AttributeSchema, Window};
    ///
    /// let criteria = CriteriaConfig {
    ///     scopes: vec!["A".to_string(), "B".to_string()],
    ///     timeboxes: vec!["Sprint 1".to_string()],
    ///     themes: vec![],
    /// };
    /// let query = FeedQuery::build(&criteria, &AttributeSchema::new(), Window::new(0, 100));
    /// assert_eq!(
    ///     query.filter(),
    ///     Some("((Scope.Name='A'|Scope.Name='B');Timebox.Name='Sprint 1')")
    /// );
    /// ```
    pub fn build(criteria: &CriteriaConfig, attributes: &AttributeSchema, window: Window) -> Self {
        let mut select: Vec<String> = BASE_SELECT.iter().map(|s| s.to_string()).collect();
        for attribute in attributes.iter() {
            let source = match &attribute.field {
                // Always selected
                AttributeField::Theme => continue,
                field => field.source_attribute(),
            };
            if !select.iter().any(|s| s == source) {
                select.push(source.to_string());
            }
        }

        let groups: Vec<String> = [
            or_group(&criteria.scopes, "Scope.Name"),
            or_group(&criteria.timeboxes, "Timebox.Name"),
            or_group(&criteria.themes, "Parent.Now.ParentMeAndUp.Name"),
        ]
        .into_iter()
        .flatten()
        .collect();

        let filter = match groups.len() {
            0 => None,
            1 => groups.into_iter().next(),
            _ => Some(format!("({})", groups.join(";"))),
        };

        Self {
            select,
            filter,
            window,
        }
    }

    pub fn select(&self) -> &[String] {
        &self.select
    }

    /// Filter expression, if any criteria were given
    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    pub fn window(&self) -> Window {
        self.window
    }

    /// Request URL with the filter form-encoded
    pub fn url(&self, domain: &str) -> String {
        self.render(domain, |filter| {
            url::form_urlencoded::byte_serialize(filter.as_bytes()).collect()
        })
    }

    /// Human-readable URL with the filter left as written
    pub fn display_url(&self, domain: &str) -> String {
        self.render(domain, str::to_string)
    }

    fn render(&self, domain: &str, encode: impl Fn(&str) -> String) -> String {
        let mut url = format!(
            "{}{}?sel={}",
            domain.trim_end_matches('/'),
            HISTORY_PATH,
            self.select.join(",")
        );
        if let Some(filter) = &self.filter {
            url.push_str("&where=");
            url.push_str(&encode(filter));
        }
        url.push_str(&format!("&page={},{}", self.window.size, self.window.offset));
        url
    }
}

fn or_group(values: &[String], attribute: &str) -> Option<String> {
    if values.is_empty() {
        return None;
    }
    let terms: Vec<String> = values
        .iter()
        .map(|value| format!("{attribute}='{value}'"))
        .collect();
    if terms.len() > 1 {
        Some(format!("({})", terms.join("|")))
    } else {
        Some(terms.join("|"))
    }
}
