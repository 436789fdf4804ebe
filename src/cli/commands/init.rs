//! Init command implementation
//!
//! This module implements the `init` command for generating a starter
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "cycletime.yaml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your instance and workflow", self.output);
                println!("  2. Put the password in a .env file:");
                println!("     CYCLETIME_V1_PASSWORD=...");
                println!("  3. Validate configuration: cycletime validate-config");
                println!("  4. Preview the query: cycletime query");
                println!("  5. Run export: cycletime export -o data.csv");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }

    /// Starter configuration with every section present
    pub fn generate_config() -> String {
        r#"---
# cycletime configuration
#
# Unindented keys open a section, indented "key: value" lines belong to it.
# ${NAME} is replaced with the environment variable NAME (a .env file is read
# at startup). CYCLETIME_DOMAIN, CYCLETIME_USERNAME and CYCLETIME_PASSWORD
# override the Connection values.

Connection:
    Domain: https://www7.v1host.com/Acme
    Username: analyst
    Password: ${CYCLETIME_V1_PASSWORD}

# Optional filters, each a comma-separated list. Items must match one value
# of every list that is present.
Criteria:
    Scopes: Mobile App, Web Portal
#    Timeboxes: Sprint 1, Sprint 2
#    Themes: Checkout

# Stages in workflow order, each followed by the status labels that put an
# item into it. (None) matches items with no status. (Created) may only appear
# in the first stage and counts the creation date towards it.
Workflow:
    Backlog: (Created), (None), Future
    In Progress: In Progress
    Done: Done, Accepted

# Extra output columns. Kinds: Scope, Timebox, Theme or a Custom_ field.
Attributes:
    Project: Scope
    Sprint: Timebox
#    Feature: Theme
#    Risk: Custom_Risk
"#
        .to_string()
    }
}
