//! Validate config command implementation
//!
//! This module implements the `validate-config` command for checking a
//! configuration file without touching the network.

use super::exit_code;
use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates as part of parsing
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(exit_code(&e));
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Domain: {}", config.connection.domain);
        println!("  Username: {}", config.connection.username);
        println!(
            "  Password: {}",
            if config.connection.has_password() {
                "set"
            } else {
                "not set (required for export)"
            }
        );
        println!("  Scopes: {:?}", config.criteria.scopes);
        println!("  Timeboxes: {:?}", config.criteria.timeboxes);
        println!("  Themes: {:?}", config.criteria.themes);
        println!("  Stages: {}", config.stages.names().join(" -> "));
        if config.stages.created_in_first_stage() {
            println!("  Creation date counts towards: {}", config.stages.names()[0]);
        }
        for attribute in config.attributes.iter() {
            println!("  Column {}: {}", attribute.column, attribute.field);
        }
        println!();

        Ok(0)
    }
}
