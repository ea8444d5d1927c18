//! Smoke-test client for a deployed data proxy.
//!
//! Fetches one file through the proxy with an `X-Api-Key` header (checked by
//! the gateway in front of the proxy, not by the proxy itself) and prints
//! what came back.

use clap::Parser;
use reqwest::header::{HeaderName, CACHE_CONTROL, CONTENT_TYPE};
use serde_json::Value;
use std::time::Instant;

const BODY_PREVIEW_CHARS: usize = 500;

#[derive(Parser)]
#[command(name = "proxy-cli")]
#[command(about = "Smoke-test client for the data proxy", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Key sent as X-Api-Key.
    #[arg(short = 'k', long, env = "API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// File path under /api/data.
    #[arg(default_value = "en/firstReadings.json")]
    path: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let api_key = match cli.api_key {
        Some(key) if !key.trim().is_empty() => key,
        _ => {
            eprintln!("Error: an API key is required (--api-key or API_KEY)");
            return Err("missing API key".into());
        }
    };

    let target = format!(
        "{}/api/data/{}",
        cli.url.trim_end_matches('/'),
        cli.path.trim_start_matches('/')
    );
    println!("Testing URL: {}", target);

    let client = reqwest::Client::new();
    let start = Instant::now();
    let res = client
        .get(&target)
        .header("X-Api-Key", api_key)
        .send()
        .await?;
    let elapsed = start.elapsed();

    let status = res.status();
    println!("Response received in {}ms", elapsed.as_millis());
    println!("HTTP Status: {}", status);

    let header = |name: HeaderName| {
        res.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("Not set")
            .to_string()
    };
    let cache_control = header(CACHE_CONTROL);
    let content_type = header(CONTENT_TYPE);
    println!("Cache-Control: {}", cache_control);
    println!("Content-Type:  {}", content_type);

    let text = res.text().await?;
    let json = if content_type.contains("application/json") {
        serde_json::from_str::<Value>(&text).ok()
    } else {
        None
    };

    match &json {
        Some(value) => println!("Body (JSON):\n{}", serde_json::to_string_pretty(value)?),
        None => println!("Body (text):\n{}", preview(&text)),
    }

    if status.is_success() {
        println!("Request successful");
        return Ok(());
    }

    eprintln!("Error: proxy returned status {}", status);
    if let Some(value) = &json {
        if let Some(error) = value.get("error").and_then(Value::as_str) {
            eprintln!("  error:   {}", error);
            eprintln!(
                "  details: {}",
                value.get("details").and_then(Value::as_str).unwrap_or("No details")
            );
        }
    }
    Err(format!("request failed with status {}", status).into())
}

fn preview(text: &str) -> String {
    match text.char_indices().nth(BODY_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
