/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::env::VarError;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use miette::{miette, IntoDiagnostic, Result, WrapErr};
use reqwest::Client;
use serde_json::Value;
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tracing_subscriber::EnvFilter;

use news_api::config::{Config, Secrets};
use news_api::news::TopHeadlines;
use news_api::placeholder::CreatePost;
use news_api::requests::{ApiClient, ApiManager, ApiRequest, Body, Method, Params};

#[derive(Parser)]
#[command(version)]
struct Args {
    /// Config file (default: ./news_api.config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Secrets file (default: ./news_api.secrets.toml)
    #[arg(short, long, value_name = "FILE")]
    secrets: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Send a GET request to the news API
    Get {
        /// Endpoint appended to the base URL, e.g. "top-headlines"
        endpoint: String,
        /// Query parameter; repeatable
        #[arg(short, long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,
    },
    /// Send a POST request to the placeholder API
    Post {
        /// Endpoint appended to the base URL, e.g. "posts"
        endpoint: String,
        /// Body field, parsed as JSON when possible; repeatable
        #[arg(short, long = "data", value_name = "KEY=VALUE")]
        data: Vec<String>,
    },
    /// Fetch the top headlines
    Headlines {
        #[arg(long)]
        country: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(short, long)]
        query: Option<String>,
        #[arg(long)]
        page_size: Option<u32>,
    },
    /// Create a post on the placeholder API
    CreatePost {
        #[arg(long)]
        user_id: u32,
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config_path = args.config.unwrap_or(PathBuf::from("news_api.config.toml"));
    let config: Config = if config_path.as_path().exists() {
        toml::from_str(read_file(&config_path).await?.as_str())
            .into_diagnostic()
            .wrap_err_with(|| format!("Could not parse config {}", config_path.display()))?
    } else {
        Config::default()
    };
    let secrets_path = args.secrets.unwrap_or(PathBuf::from("news_api.secrets.toml"));
    let secrets: Secrets = if secrets_path.as_path().exists() {
        toml::from_str(read_file(&secrets_path).await?.as_str()).into_diagnostic()?
    } else {
        Secrets {
            news_api_key: get_env("NEWS_API_KEY")?,
        }
    };

    let client = Client::builder()
        .user_agent("news-api")
        .build()
        .into_diagnostic()?;
    let manager = ApiManager::with_transport(client, config);

    let output: Value = match args.command {
        Command::Get { endpoint, params } => {
            let mut params = parse_pairs(&params)?.into_iter().collect::<Params>();
            if let Some(key) = &secrets.news_api_key {
                params
                    .entry("apiKey".to_string())
                    .or_insert_with(|| Value::String(key.clone()));
            }
            manager
                .call_api(&endpoint, Method::Get, Some(&params), None)
                .await?
        }
        Command::Post { endpoint, data } => {
            let body = parse_pairs(&data)?.into_iter().collect::<Body>();
            manager
                .call_api(&endpoint, Method::Post, None, Some(&body))
                .await?
        }
        Command::Headlines {
            country,
            category,
            query,
            page_size,
        } => {
            let headlines = TopHeadlines {
                country,
                category,
                query,
                page_size,
                api_key: secrets.news_api_key.clone(),
            }
            .request(&manager)
            .await?;
            serde_json::to_value(headlines).into_diagnostic()?
        }
        Command::CreatePost {
            user_id,
            title,
            body,
        } => {
            let post = CreatePost {
                user_id,
                title,
                body,
            }
            .request(&manager)
            .await?;
            serde_json::to_value(post).into_diagnostic()?
        }
    };

    println!(
        "{}",
        serde_json::to_string_pretty(&output).into_diagnostic()?
    );
    Ok(())
}

/// Parses `KEY=VALUE` arguments.
/// Values that are valid JSON keep their type, everything else is a string.
fn parse_pairs(pairs: &[String]) -> Result<Vec<(String, Value)>> {
    pairs
        .iter()
        .map(|pair| -> Result<(String, Value)> {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| miette!("Expected KEY=VALUE, found {}", pair))?;
            let value = serde_json::from_str(value)
                .unwrap_or_else(|_| Value::String(value.to_string()));
            Ok((key.to_string(), value))
        })
        .collect()
}

fn get_env(key: &str) -> Result<Option<String>> {
    let result = std::env::var(key);
    match result {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(_) => result
            .map(Some)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to get environment variable {}", key)),
    }
}

async fn read_file<P>(path: P) -> Result<String>
where
    P: AsRef<Path>,
{
    let mut file = File::open(path).await.into_diagnostic()?;
    let mut result = String::new();
    file.read_to_string(&mut result).await.into_diagnostic()?;
    Ok(result)
}
