//! Community Profile Example
//!
//! Fetches the GitHub "community profile" of a repository and prints a few
//! fields from it.
//!
//! ```bash
//! GITHUB_TOKEN=ghp_... cargo run --example community_profile -- rust-lang rust
//! ```
//!
//! The token is optional; unauthenticated requests work with a lower rate
//! limit. Never hard-code tokens in source files.

use std::collections::HashMap;

use json_fetch::observability::{TracingConfig, init_tracing};
use json_fetch::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing(&TracingConfig::development())?;

    let mut args = std::env::args().skip(1);
    let owner = args.next().unwrap_or_else(|| "rust-lang".to_string());
    let repo = args.next().unwrap_or_else(|| "rust".to_string());
    let url = format!("https://api.github.com/repos/{owner}/{repo}/community/profile");

    let mut builder = JsonFetcher::builder().header("Accept", "application/vnd.github+json");
    if let Ok(token) = std::env::var("GITHUB_TOKEN") {
        builder = builder.token_auth(token);
    }
    let fetcher = builder.build()?;

    // High-level path: fetch and parse in one call.
    match fetcher.fetch_json(&url, &HashMap::new()).await {
        Ok(profile) => {
            println!("health_percentage: {}", profile["health_percentage"]);
            println!("description: {}", profile["description"]);
        }
        Err(FetchError::HttpStatusError { status, .. }) if status == 401 || status == 403 => {
            eprintln!("GitHub rejected the request ({status}); check GITHUB_TOKEN");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    // Low-level path: keep the raw response, then decode and parse.
    let response = fetcher.fetch(&url, &HashMap::new()).await?;
    println!(
        "status {} ({} bytes, {})",
        response.status,
        response.body.len(),
        response.content_type().unwrap_or("no content type")
    );
    let text = response.text()?;
    let profile = response.json()?;
    println!("first 80 chars: {}", text.chars().take(80).collect::<String>());
    println!("files: {}", profile["files"]);

    Ok(())
}
