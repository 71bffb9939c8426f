mod cli;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use serde_json::json;
use tokio::io::AsyncReadExt;

use cli::{Cli, Commands};
use reelgrid::config::Config;
use reelgrid::sample::DEFAULT_TABLE;
use reelgrid::{view, Gallery};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Parse { input } => {
            let text = read_input(input.as_deref()).await?;
            println!("{}", serde_json::to_string_pretty(&reelgrid::table::parse(&text))?);
        }
        Commands::Resolve { input, sample, keep_going } => {
            let text = read_input(input.as_deref()).await?;
            let gallery = open_gallery(&config, sample)?;
            if keep_going {
                let outcomes: Vec<_> = gallery.load_table_each(&text).await
                    .into_iter()
                    .enumerate()
                    .map(|(index, o)| match o {
                        Ok(item) => json!({ "index": index, "item": item }),
                        Err(e) => json!({ "index": index, "error": e.to_string() }),
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&outcomes)?);
            } else {
                let items = gallery.load_table(&text).await?;
                println!("{}", serde_json::to_string_pretty(&items)?);
            }
        }
        Commands::Gallery { input, sample } => {
            let text = read_input(input.as_deref()).await?;
            let items = open_gallery(&config, sample)?.load_table(&text).await?;
            if items.is_empty() {
                println!("No posts.");
            }
            for item in &items {
                println!("{}", view::render_card(item));
            }
        }
        Commands::Request { body, method, sample } => {
            let body = match body {
                Some(src) => read_input(Some(src.as_str())).await?,
                None => json!({ "rows": reelgrid::table::parse(DEFAULT_TABLE) }).to_string(),
            };
            let method = reqwest::Method::from_bytes(method.to_ascii_uppercase().as_bytes())
                .map_err(|_| anyhow!("invalid method: {}", method))?;
            let resp = open_gallery(&config, sample)?.service().handle(&method, body.as_bytes()).await;
            println!("{}", resp.status);
            println!("{}", serde_json::to_string_pretty(&resp.body)?);
        }
    }
    Ok(())
}

fn open_gallery(config: &Config, sample: bool) -> Result<Gallery> {
    if sample {
        return Ok(Gallery::sample(config));
    }
    Gallery::connect(config).context("set IG_APP_ID, IG_CLIENT_TOKEN and IG_ACCESS_TOKEN, or pass --sample")
}

async fn read_input(input: Option<&str>) -> Result<String> {
    match input {
        None => Ok(DEFAULT_TABLE.to_string()),
        Some("-") => {
            let mut text = String::new();
            tokio::io::stdin()
                .read_to_string(&mut text)
                .await
                .context("failed to read stdin")?;
            Ok(text)
        }
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn no_input_reads_demo_table() {
        assert_eq!(read_input(None).await.unwrap(), DEFAULT_TABLE);
    }

    #[tokio::test]
    async fn input_path_is_read_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.tsv");
        std::fs::write(&path, "Name\tVideo Link\nA\thttps://x/p/1/\n").unwrap();
        let text = read_input(path.to_str()).await.unwrap();
        assert_eq!(reelgrid::table::parse(&text).len(), 1);
    }

    #[tokio::test]
    async fn missing_input_path_is_an_error() {
        let err = read_input(Some("/nonexistent/table.tsv")).await.unwrap_err();
        assert!(err.to_string().contains("failed to read /nonexistent/table.tsv"));
    }
}
