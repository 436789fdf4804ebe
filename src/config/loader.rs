//! Configuration loader
//!
//! Parses the section/key configuration grammar, substitutes `${VAR}`
//! placeholders from the environment, and applies `CYCLETIME_*` overrides.

use super::schema::{
    ConnectionConfig, ConnectionKey, CriteriaConfig, CriteriaKey, CycleTimeConfig, Section,
};
use super::secret::secret_string;
use crate::domain::errors::CycleTimeError;
use crate::domain::result::Result;
use crate::domain::{AttributeField, AttributeSchema, StageSchema};
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a file
///
/// This function:
/// 1. Reads the file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses sections and keys against the fixed vocabularies
/// 4. Applies environment variable overrides (CYCLETIME_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns a configuration error if the file is missing or unreadable, a
/// referenced environment variable is unset, a line does not fit the grammar,
/// or validation fails.
///
/// # Examples
///
/// ```no_run
/// use cycletime::config::loader::load_config;
///
/// let config = load_config("cycletime.yaml").expect("Failed to load config");
/// println!("{} stages", config.stages.len());
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<CycleTimeConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CycleTimeError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        CycleTimeError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses configuration text; see [`load_config`]
pub fn parse_config(contents: &str) -> Result<CycleTimeConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config = parse_lines(&contents).map_err(CycleTimeError::Configuration)?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        CycleTimeError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| CycleTimeError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        // Comment lines are copied verbatim
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(CycleTimeError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Walks the lines of the file, tracking the current section
fn parse_lines(contents: &str) -> std::result::Result<CycleTimeConfig, String> {
    let mut connection = ConnectionConfig::default();
    let mut criteria = CriteriaConfig::default();
    let mut stages = StageSchema::builder();
    let mut attributes = AttributeSchema::new();
    let mut section: Option<Section> = None;

    for (index, line) in contents.lines().enumerate() {
        let line_no = index + 1;
        let trimmed = line.trim();
        if line.starts_with("---") || trimmed.starts_with('#') || trimmed.is_empty() {
            continue;
        }

        let (key, value) = line
            .split_once(':')
            .map(|(k, v)| (k.trim(), v.trim()))
            .ok_or_else(|| format!("Expected \"key: value\" at line {line_no}"))?;
        if key.is_empty() {
            continue;
        }

        let indented = line.starts_with(' ') || line.starts_with('\t');
        if !indented {
            let parsed: Section = key.parse().map_err(|e| format!("{e} at line {line_no}"))?;
            section = Some(parsed);
            continue;
        }

        match section {
            Some(Section::Connection) => {
                let parsed: ConnectionKey =
                    key.parse().map_err(|e| format!("{e} at line {line_no}"))?;
                match parsed {
                    ConnectionKey::Domain => {
                        connection.domain = value.trim_end_matches('/').to_string()
                    }
                    ConnectionKey::Username => connection.username = value.to_string(),
                    ConnectionKey::Password => {
                        connection.password = Some(secret_string(value.to_string()))
                    }
                }
            }
            Some(Section::Criteria) => {
                let parsed: CriteriaKey =
                    key.parse().map_err(|e| format!("{e} at line {line_no}"))?;
                let list = parse_list(value);
                match parsed {
                    CriteriaKey::Scopes => criteria.scopes = list,
                    CriteriaKey::Timeboxes => criteria.timeboxes = list,
                    CriteriaKey::Themes => criteria.themes = list,
                }
            }
            Some(Section::Workflow) => {
                stages = stages
                    .stage(key, value.split(','))
                    .map_err(|e| format!("{e} at line {line_no}"))?;
            }
            Some(Section::Attributes) => {
                let field: AttributeField =
                    value.parse().map_err(|e| format!("{e} at line {line_no}"))?;
                attributes.push(key, field);
            }
            None => {
                return Err(format!(
                    "Can't parse config file at line {line_no} (extra indent?)"
                ));
            }
        }
    }

    let stages = stages.build()?;

    Ok(CycleTimeConfig {
        connection,
        criteria,
        stages,
        attributes,
    })
}

/// Splits a comma-delimited list, trimming entries and dropping blanks
fn parse_list(comma_delimited: &str) -> Vec<String> {
    comma_delimited
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Applies environment variable overrides using the CYCLETIME_* prefix
fn apply_env_overrides(config: &mut CycleTimeConfig) {
    if let Ok(val) = std::env::var("CYCLETIME_DOMAIN") {
        config.connection.domain = val.trim_end_matches('/').to_string();
    }
    if let Ok(val) = std::env::var("CYCLETIME_USERNAME") {
        config.connection.username = val;
    }
    if let Ok(val) = std::env::var("CYCLETIME_PASSWORD") {
        config.connection.password = Some(secret_string(val));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = "---
# sample
Connection:
    Domain: https://www7.v1host.com/Acme/
    Username: analyst
    Password: hunter2
Criteria:
    Scopes: Mobile App, Web Portal
    Themes: Checkout
Workflow:
    Backlog: (None), Future, (Created)
    In Progress: In Progress, Testing
    Done: Done, Accepted
Attributes:
    Project: Scope
    Sprint: Timebox
    Feature: Theme
    Risk: Custom_Risk
";

    #[test]
    fn test_parse_full_config() {
        let config = parse_lines(SAMPLE).unwrap();

        assert_eq!(config.connection.domain, "https://www7.v1host.com/Acme");
        assert_eq!(config.connection.username, "analyst");
        assert_eq!(
            config.connection.password.as_ref().unwrap().expose_secret(),
            "hunter2"
        );

        assert_eq!(config.criteria.scopes, vec!["Mobile App", "Web Portal"]);
        assert!(config.criteria.timeboxes.is_empty());
        assert_eq!(config.criteria.themes, vec!["Checkout"]);

        assert_eq!(config.stages.names(), ["Backlog", "In Progress", "Done"]);
        assert!(config.stages.created_in_first_stage());
        assert_eq!(config.stages.stage_for("(None)"), Some(0));
        assert_eq!(config.stages.stage_for("Testing"), Some(1));

        let columns: Vec<&str> = config.attributes.iter().map(|a| a.column.as_str()).collect();
        assert_eq!(columns, vec!["Project", "Sprint", "Feature", "Risk"]);
        assert!(config
            .attributes
            .references(&AttributeField::Custom("Custom_Risk".to_string())));
    }

    #[test]
    fn test_unknown_section_rejected() {
        let err = parse_lines("Options:\n    Debug: true\n").unwrap_err();
        assert_eq!(err, "Unexpected section Options at line 1");
    }

    #[test]
    fn test_unknown_property_rejected() {
        let err = parse_lines("Connection:\n    Token: abc\n").unwrap_err();
        assert_eq!(err, "Unexpected property Token at line 2");
    }

    #[test]
    fn test_unknown_attribute_rejected() {
        let text = "Workflow:\n    Done: Done\nAttributes:\n    Owner: Owners\n";
        let err = parse_lines(text).unwrap_err();
        assert!(err.contains("Unknown attribute Owners"));
        assert!(err.ends_with("at line 4"));
    }

    #[test]
    fn test_indent_before_section_rejected() {
        let err = parse_lines("    Domain: https://x\n").unwrap_err();
        assert!(err.contains("extra indent"));
    }

    #[test]
    fn test_missing_colon_rejected() {
        let err = parse_lines("Connection\n").unwrap_err();
        assert!(err.contains("line 1"));
    }

    #[test]
    fn test_created_in_later_stage_rejected() {
        let text = "Workflow:\n    Open: Future\n    Done: Done, (Created)\n";
        let err = parse_lines(text).unwrap_err();
        assert!(err.contains("(Created) cannot be used in non-first stage Done"));
    }

    #[test]
    fn test_missing_workflow_rejected() {
        let text = "Connection:\n    Domain: https://x.example.com\n    Username: u\n";
        let err = parse_lines(text).unwrap_err();
        assert!(err.contains("at least one stage"));
    }

    #[test]
    fn test_missing_domain_fails_validation() {
        let text = "Connection:\n    Username: u\nWorkflow:\n    Done: Done\n";
        let result = parse_config(text);
        assert!(matches!(result, Err(CycleTimeError::Configuration(_))));
    }

    #[test]
    fn test_parse_list_trims_and_drops_blanks() {
        assert_eq!(parse_list(" a , b,, c "), vec!["a", "b", "c"]);
        assert!(parse_list("").is_empty());
    }

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("CYCLETIME_TEST_SUBST", "s3cret");
        let result = substitute_env_vars("    Password: ${CYCLETIME_TEST_SUBST}").unwrap();
        assert_eq!(result, "    Password: s3cret\n");
        std::env::remove_var("CYCLETIME_TEST_SUBST");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("CYCLETIME_TEST_MISSING");
        let result = substitute_env_vars("    Password: ${CYCLETIME_TEST_MISSING}");
        assert!(result.is_err());
    }

    #[test]
    fn test_substitute_skips_comments() {
        std::env::remove_var("CYCLETIME_TEST_COMMENTED");
        let result = substitute_env_vars("# ${CYCLETIME_TEST_COMMENTED}").unwrap();
        assert_eq!(result, "# ${CYCLETIME_TEST_COMMENTED}\n");
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.yaml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(SAMPLE.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.stages.len(), 3);
        assert_eq!(config.attributes.len(), 4);
    }
}
