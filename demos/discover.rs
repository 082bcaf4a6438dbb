//! Lists the complete versions of a repository and optionally downloads one.
//!
//! ```text
//! cargo run --example discover -- quarry.toml [VERSION_FROM [VERSION_TO]]
//! ```

use color_eyre::{eyre::eyre, Result};
use comfy_table::Table;
use console::style;
use quarry::{complete_versions, QuarryBuilder, QuarryConfig};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let config_path = args
        .next()
        .map(PathBuf::from)
        .ok_or_else(|| eyre!("usage: discover <config.toml> [VERSION_FROM [VERSION_TO]]"))?;
    let version_from = args.next();
    let version_to = args.next();

    let config = QuarryConfig::from_file(&config_path)?;
    let quarry = QuarryBuilder::from_config(config).build()?;

    let sets = quarry.discover().await?;
    let required = quarry.config().artifacts.iter().cloned().collect();
    let complete: Vec<String> = complete_versions(&sets, &required).into_iter().collect();

    let mut table = Table::new();
    table.set_header(vec!["Artifact", "Versions"]);
    for set in &sets {
        let versions: Vec<&str> = set.versions.iter().map(String::as_str).collect();
        table.add_row(vec![set.artifact.to_string(), versions.join(", ")]);
    }
    println!("{table}");
    println!("Complete versions: {}", style(complete.join(", ")).green());

    let Some(version_from) = version_from else {
        return Ok(());
    };
    let version_to = version_to.unwrap_or_else(|| version_from.clone());

    let id = quarry.request_download(&version_from, &version_to).await?;
    println!("Job {} started", style(id).cyan());

    let mut printed = 0;
    loop {
        let job = quarry.job(id)?;
        for entry in &job.log[printed..] {
            println!("{entry}");
        }
        printed = job.log.len();
        if job.status.is_terminal() {
            println!("Job {} finished: {:?}", id, job.status);
            break;
        }
        tokio::time::sleep(Duration::from_millis(500)).await;
    }

    Ok(())
}
