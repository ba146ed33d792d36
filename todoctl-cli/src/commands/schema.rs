//! Create the todo tables without starting the server

use anyhow::{Context, Result};
use clap::Parser;
use todoctl_server::db::schema;

use super::serve::pool_config;
use crate::config::AppConfig;

#[derive(Parser, Debug)]
pub struct SchemaArgs {
    /// Database URL (overrides config/environment)
    #[arg(long)]
    pub database_url: Option<String>,
}

pub async fn run_schema(args: SchemaArgs, config: AppConfig) -> Result<()> {
    let pool = pool_config(&config, args.database_url, Some(1))?
        .connect()
        .await
        .context("Failed to connect to database")?;

    schema::ensure(&pool)
        .await
        .context("Failed to create todo schema")?;

    pool.close().await;
    println!("Schema is up to date");
    Ok(())
}
