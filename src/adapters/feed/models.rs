//! History feed wire models
//!
//! The endpoint answers with an asset list whose attributes are keyed by their
//! selection path (`Status.Name`, `Parent.Now.ParentMeAndUp.Name`, ...). Each
//! attribute value is a scalar, `null`, or an array for multi-valued
//! relations. Unknown fields are ignored.

use crate::domain::item::parse_change_date;
use crate::domain::{AttributeField, AttributeSchema, FeedError, ItemId, LinkId, RawEvent};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// One page of history assets
#[derive(Debug, Deserialize)]
pub struct AssetList {
    /// Total rows for the whole query, constant across pages
    #[serde(rename = "total", alias = "Total")]
    pub total: usize,

    #[serde(rename = "Assets", alias = "assets", default)]
    pub assets: Vec<Asset>,
}

/// One history row
#[derive(Debug, Deserialize)]
pub struct Asset {
    /// Versioned oid, e.g. `Story:1051:20933`
    #[serde(rename = "id", alias = "Id", default)]
    pub id: String,

    #[serde(rename = "Attributes", alias = "attributes", default)]
    pub attributes: HashMap<String, AssetAttribute>,
}

/// Attribute envelope
#[derive(Debug, Deserialize)]
pub struct AssetAttribute {
    #[serde(rename = "value", alias = "Value", default)]
    pub value: Value,
}

impl Asset {
    /// Scalar value of an attribute; arrays resolve to their last element
    fn value(&self, key: &str) -> Option<String> {
        self.attributes.get(key).and_then(|a| scalar(&a.value))
    }

    /// Converts the row into a [`RawEvent`]
    ///
    /// # Errors
    ///
    /// A row without an item number is a malformed response; dropping it
    /// would shift every later row's position in the feed.
    pub fn into_event(self, attributes: &AttributeSchema) -> Result<RawEvent, FeedError> {
        let number = self.value("Number").unwrap_or_default();
        let item_id = ItemId::new(number).map_err(|e| {
            FeedError::InvalidResponse(format!("History row {} has no Number: {e}", self.id))
        })?;

        let status = self.value("Status.Name").unwrap_or_default();
        let change_date = self
            .value("ChangeDate")
            .as_deref()
            .and_then(parse_change_date);

        let mut event = RawEvent::new(item_id, status, change_date)
            .with_name(self.value("Name").unwrap_or_default())
            .with_link(LinkId::from_oid(&self.id));

        if let Some(scope) = self.value(AttributeField::Scope.source_attribute()) {
            event = event.with_scope(scope);
        }
        if let Some(timebox) = self.value(AttributeField::Timebox.source_attribute()) {
            event = event.with_timebox(timebox);
        }
        if let Some(theme) = self.value(AttributeField::Theme.source_attribute()) {
            event = event.with_theme(theme);
        }
        for attribute in attributes.iter() {
            if let AttributeField::Custom(name) = &attribute.field {
                if let Some(value) = self.value(name) {
                    event = event.with_custom(name.clone(), value);
                }
            }
        }

        Ok(event)
    }
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(values) => values.last().and_then(scalar),
        Value::Object(_) => None,
    }
}
