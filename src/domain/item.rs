//! Work item records
//!
//! A [`RawEvent`] is one decoded history row; a [`CompletedItem`] is the
//! reconciled result for one work item once all its rows have been seen.

use super::ids::{ItemId, LinkId};
use super::workflow::{AttributeField, NO_STATUS_LABEL};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Date format used for every resolved stage date
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One status-change row from the history feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEvent {
    /// Item display number; the grouping key
    pub item_id: ItemId,

    /// Link id parsed from the asset oid, when it had the expected shape
    pub link: Option<LinkId>,

    /// Display name as it appeared on this row
    pub name: String,

    /// Raw status label; blank statuses are stored as `(None)`
    pub status: String,

    /// Calendar day of the change, when the timestamp could be parsed
    pub change_date: Option<NaiveDate>,

    pub scope: Option<String>,
    pub timebox: Option<String>,

    /// Last element of the parent hierarchy name list
    pub theme: Option<String>,

    /// Custom field values keyed by field name
    pub custom: HashMap<String, String>,
}

impl RawEvent {
    /// Creates an event with no optional fields set
    pub fn new(item_id: ItemId, status: impl Into<String>, change_date: Option<NaiveDate>) -> Self {
        let status = status.into();
        let status = if status.trim().is_empty() {
            NO_STATUS_LABEL.to_string()
        } else {
            status
        };

        Self {
            item_id,
            link: None,
            name: String::new(),
            status,
            change_date,
            scope: None,
            timebox: None,
            theme: None,
            custom: HashMap::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_link(mut self, link: Option<LinkId>) -> Self {
        self.link = link;
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn with_timebox(mut self, timebox: impl Into<String>) -> Self {
        self.timebox = Some(timebox.into());
        self
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    pub fn with_custom(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom.insert(field.into(), value.into());
        self
    }

    /// Value this row carries for an attribute field, if any
    pub fn value_for(&self, field: &AttributeField) -> Option<&str> {
        match field {
            AttributeField::Scope => self.scope.as_deref(),
            AttributeField::Timebox => self.timebox.as_deref(),
            AttributeField::Theme => self.theme.as_deref(),
            AttributeField::Custom(name) => self.custom.get(name).map(String::as_str),
        }
    }
}

/// Parses the calendar day out of a feed timestamp
///
/// Everything from the first `T` on is dropped, so both
/// `2024-01-05T13:22:11.120` and `2024-01-05` yield `2024-01-05`.
pub fn parse_change_date(timestamp: &str) -> Option<NaiveDate> {
    let day = timestamp.split('T').next()?.trim();
    NaiveDate::parse_from_str(day, DATE_FORMAT).ok()
}

/// Strips characters that corrupt CSV/JSON output from an item name
pub fn clean_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '"' | ',' | '\\'))
        .collect()
}

/// A fully assembled and reconciled work item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedItem {
    pub id: ItemId,
    pub link: Option<LinkId>,
    pub name: String,

    /// One resolved date per stage, in stage order
    pub stage_dates: Vec<Option<NaiveDate>>,

    /// One value per attribute column, in column order
    pub attributes: Vec<Option<String>>,
}

impl CompletedItem {
    /// Whether any stage resolved a date; only such items are exported
    pub fn has_date(&self) -> bool {
        self.stage_dates.iter().any(Option::is_some)
    }
}
