//! Query command implementation
//!
//! Prints the first-page history query twice: form-encoded, ready to paste
//! into a browser, and raw, for reading.

use super::exit_code;
use crate::adapters::feed::FeedQuery;
use crate::config::load_config;
use crate::config::schema::default_batch_size;
use crate::domain::Window;
use clap::Args;

/// Arguments for the query command
#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Rows requested per page
    #[arg(long, env = "CYCLETIME_BATCH_SIZE", default_value_t = default_batch_size())]
    pub batch_size: usize,
}

impl QueryArgs {
    /// Execute the query command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(exit_code(&e));
            }
        };

        let query = FeedQuery::build(
            &config.criteria,
            &config.attributes,
            Window::new(0, self.batch_size.max(1)),
        );
        let domain = config.connection.domain.trim_end_matches('/');

        tracing::debug!(select = ?query.select(), filter = ?query.filter(), "Built query");

        println!("{}", query.url(domain));
        println!("{}", query.display_url(domain));

        Ok(0)
    }
}
