//! Workflow and attribute schemas
//!
//! [`StageSchema`] fixes the stage order that reconciliation treats as the
//! monotonic pipeline, and maps raw status labels onto stages.
//! [`AttributeSchema`] fixes the extra output columns and where their values
//! come from. Both are built once from configuration and shared read-only.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Pseudo-label that marks the first stage as entered at item creation
pub const CREATED_LABEL: &str = "(created)";

/// Label given to rows whose status is blank
pub const NO_STATUS_LABEL: &str = "(None)";

/// Ordered workflow stages plus the status label lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageSchema {
    names: Vec<String>,
    labels: HashMap<String, usize>,
    created_in_first_stage: bool,
}

impl StageSchema {
    /// Starts building a stage schema
    pub fn builder() -> StageSchemaBuilder {
        StageSchemaBuilder::default()
    }

    /// Stage names in pipeline order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of stages
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the schema has no stages
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Stage index for a raw status label, if the label is mapped
    pub fn stage_for(&self, label: &str) -> Option<usize> {
        self.labels.get(label).copied()
    }

    /// Whether the first stage is entered when the item is created
    pub fn created_in_first_stage(&self) -> bool {
        self.created_in_first_stage
    }
}

/// Builder for [`StageSchema`]
///
/// # Examples
///
/// ```
/// use cycletime::domain::StageSchema;
///
/// # fn example() -> Result<(), String> {
/// let stages = StageSchema::builder()
///     .stage("Backlog", ["(None)", "Future", "(Created)"])?
///     .stage("Done", ["Done", "Accepted"])?
///     .build()?;
///
/// assert_eq!(stages.stage_for("Accepted"), Some(1));
/// assert!(stages.created_in_first_stage());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct StageSchemaBuilder {
    names: Vec<String>,
    labels: HashMap<String, usize>,
    created_in_first_stage: bool,
}

impl StageSchemaBuilder {
    /// Appends a stage and the status labels that map onto it
    ///
    /// Blank labels are ignored. `(Created)` is accepted on the first stage
    /// only. A label already mapped to an earlier stage is rejected.
    pub fn stage<I, S>(mut self, name: impl Into<String>, labels: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("Stage name cannot be empty".to_string());
        }
        if self.names.contains(&name) {
            return Err(format!("Stage {name} is defined more than once"));
        }

        let index = self.names.len();
        for label in labels {
            let label = label.as_ref().trim();
            if label.is_empty() {
                continue;
            }
            if label.eq_ignore_ascii_case(CREATED_LABEL) {
                if index != 0 {
                    return Err(format!(
                        "(Created) cannot be used in non-first stage {name}"
                    ));
                }
                self.created_in_first_stage = true;
                continue;
            }
            if let Some(&existing) = self.labels.get(label) {
                if existing != index {
                    return Err(format!(
                        "Status {label} is mapped to both {} and {name}",
                        self.names[existing]
                    ));
                }
            }
            self.labels.insert(label.to_string(), index);
        }

        self.names.push(name);
        Ok(self)
    }

    /// Finishes the schema; at least one stage is required
    pub fn build(self) -> Result<StageSchema, String> {
        if self.names.is_empty() {
            return Err("Workflow must define at least one stage".to_string());
        }
        Ok(StageSchema {
            names: self.names,
            labels: self.labels,
            created_in_first_stage: self.created_in_first_stage,
        })
    }
}

/// Where an output attribute column takes its value from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeField {
    /// Project (scope) name
    Scope,
    /// Sprint (timebox) name
    Timebox,
    /// Nearest portfolio item in the parent hierarchy
    Theme,
    /// Opaque reference to a custom field (`Custom_*`)
    Custom(String),
}

impl AttributeField {
    /// Name of the feed attribute this field is read from
    pub fn source_attribute(&self) -> &str {
        match self {
            AttributeField::Scope => "Scope.Name",
            AttributeField::Timebox => "Timebox.Name",
            AttributeField::Theme => "Parent.Now.ParentMeAndUp.Name",
            AttributeField::Custom(name) => name,
        }
    }
}

impl FromStr for AttributeField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Scope" => Ok(Self::Scope),
            "Timebox" => Ok(Self::Timebox),
            "Theme" => Ok(Self::Theme),
            custom if custom.starts_with("Custom_") && custom.len() > "Custom_".len() => {
                Ok(Self::Custom(custom.to_string()))
            }
            other => Err(format!(
                "Unknown attribute {other}. Expected Scope, Timebox, Theme or Custom_<name>"
            )),
        }
    }
}

impl fmt::Display for AttributeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeField::Scope => write!(f, "Scope"),
            AttributeField::Timebox => write!(f, "Timebox"),
            AttributeField::Theme => write!(f, "Theme"),
            AttributeField::Custom(name) => write!(f, "{name}"),
        }
    }
}

/// One output column backed by a feed field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub column: String,
    pub field: AttributeField,
}

/// Ordered output attribute columns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSchema {
    attributes: Vec<Attribute>,
}

impl AttributeSchema {
    /// Creates an empty attribute schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column
    pub fn push(&mut self, column: impl Into<String>, field: AttributeField) {
        self.attributes.push(Attribute {
            column: column.into(),
            field,
        });
    }

    /// Columns in output order
    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.attributes.iter()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Whether any column reads the given field
    pub fn references(&self, field: &AttributeField) -> bool {
        self.attributes.iter().any(|a| &a.field == field)
    }
}

impl FromIterator<(String, AttributeField)> for AttributeSchema {
    fn from_iter<T: IntoIterator<Item = (String, AttributeField)>>(iter: T) -> Self {
        let mut schema = Self::new();
        for (column, field) in iter {
            schema.push(column, field);
        }
        schema
    }
}
