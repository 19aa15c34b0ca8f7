// src/bin/browse.rs
// Terminal client for a running gateway: generate copy or page through photos.
use anyhow::{bail, Context, Result};
use dotenv::dotenv;
use postcraft_gateway::models::{
    GenerateRequest, GenerateResponse, ImageDescriptor, PaginationCursor, Platform, SearchPage,
};
use reqwest::Client;
use serde::Deserialize;
use std::env;
use std::process;
use std::time::Duration;

// --- ANSI colors ---
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

const DEFAULT_MAX_PAGES: u32 = 2;

#[derive(Deserialize, Debug, Default)]
struct ErrorBody {
    #[serde(default)]
    error: String,
}

enum Command {
    Generate { platform: String, prompt: String },
    Images { query: String, max_pages: u32 },
}

fn usage() -> ! {
    println!("{}Usage:{}", BOLD, RESET);
    println!("  browse generate <platform> <prompt...>");
    println!("  browse images <query> [max_pages]");
    println!(
        "\nPlatforms: {}",
        Platform::ALL.map(|p| p.key()).join(", ")
    );
    process::exit(2);
}

fn parse_args(args: &[String]) -> Option<Command> {
    match args.first().map(String::as_str) {
        Some("generate") if args.len() >= 3 => Some(Command::Generate {
            platform: args[1].clone(),
            prompt: args[2..].join(" "),
        }),
        Some("images") if args.len() >= 2 => Some(Command::Images {
            query: args[1].clone(),
            max_pages: args
                .get(2)
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(DEFAULT_MAX_PAGES),
        }),
        _ => None,
    }
}

struct GatewayBrowser {
    base_url: String,
    client: Client,
}

impl GatewayBrowser {
    fn new(base_url: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .context("failed to create HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn check_service_health(&self) -> bool {
        match self.client.get(format!("{}/health", self.base_url)).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    async fn generate(&self, platform: &str, prompt: &str) -> Result<GenerateResponse> {
        let payload = GenerateRequest {
            prompt: prompt.to_string(),
            platform: platform.to_string(),
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&payload)
            .send()
            .await
            .context("generate request failed")?;

        if response.status().is_success() {
            return response
                .json()
                .await
                .context("failed to parse generate response");
        }

        let status = response.status();
        let body: ErrorBody = response.json().await.unwrap_or_default();
        bail!("HTTP {} - {}", status, body.error)
    }

    async fn search_page(&self, query: &str, page: u32) -> Result<SearchPage> {
        let response = self
            .client
            .get(format!("{}/api/images/search", self.base_url))
            .query(&[("query", query.to_string()), ("page", page.to_string())])
            .send()
            .await
            .context("image search request failed")?;

        if response.status().is_success() {
            return response
                .json()
                .await
                .context("failed to parse image search response");
        }

        let status = response.status();
        let body: ErrorBody = response.json().await.unwrap_or_default();
        bail!("HTTP {} - {}", status, body.error)
    }

    /// Fetch pages with "load more" semantics until exhausted or `max_pages` reached
    async fn browse_images(&self, query: &str, max_pages: u32) -> PaginationCursor {
        let mut cursor = PaginationCursor::new(query);

        while let Some(page_number) = cursor.next_page() {
            if page_number > max_pages {
                break;
            }

            println!("{}Loading page {}...{}", CYAN, page_number, RESET);
            match self.search_page(cursor.query(), page_number).await {
                Ok(page) => {
                    let total_pages = page.total_pages;
                    let added = cursor.absorb(page);
                    println!(
                        "{}✅ Page {}/{}: {} new images{}",
                        GREEN, page_number, total_pages, added, RESET
                    );
                }
                Err(err) => {
                    // A failed page means "no results for this page", not "no results at all"
                    println!("{}❌ Page {} failed: {}{}", RED, page_number, err, RESET);
                    break;
                }
            }
        }

        cursor
    }
}

fn print_images(images: &[ImageDescriptor]) {
    println!("\n{}📷 {} images{}", BOLD, images.len(), RESET);
    println!("──────────────────────────────────────────────────────────────────────────────");
    for (idx, image) in images.iter().enumerate() {
        println!(
            "{:>3}. {} {}",
            idx + 1,
            image.alt_text.as_deref().unwrap_or("(no description)"),
            image.full_url
        );
        println!(
            "     Photo by {} ({})",
            image.attribution_name, image.attribution_url
        );
    }
    println!("──────────────────────────────────────────────────────────────────────────────");
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = parse_args(&args).unwrap_or_else(|| usage());

    let base_url = env::var("GATEWAY_URL").unwrap_or_else(|_| "http://localhost:3001".to_string());
    let browser = GatewayBrowser::new(base_url)?;

    if !browser.check_service_health().await {
        println!("{}❌ Gateway unavailable at {}.{}", RED, browser.base_url, RESET);
        println!("{}Please ensure the gateway is running (cargo run){}", YELLOW, RESET);
        process::exit(1);
    }

    match command {
        Command::Generate { platform, prompt } => {
            let response = browser.generate(&platform, &prompt).await?;
            println!("\n{}✨ {} copy ({} chars){}", BOLD, platform, response.content.chars().count(), RESET);
            println!("{}", response.content);
        }
        Command::Images { query, max_pages } => {
            let cursor = browser.browse_images(&query, max_pages).await;
            print_images(cursor.images());
            if cursor.has_more() {
                println!(
                    "{}More results available after page {}.{}",
                    YELLOW,
                    cursor.current_page(),
                    RESET
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_generate_joins_prompt() {
        match parse_args(&args(&["generate", "twitter", "a", "sunset"])) {
            Some(Command::Generate { platform, prompt }) => {
                assert_eq!(platform, "twitter");
                assert_eq!(prompt, "a sunset");
            }
            _ => panic!("expected generate command"),
        }
    }

    #[test]
    fn test_parse_images_default_pages() {
        match parse_args(&args(&["images", "cats"])) {
            Some(Command::Images { query, max_pages }) => {
                assert_eq!(query, "cats");
                assert_eq!(max_pages, DEFAULT_MAX_PAGES);
            }
            _ => panic!("expected images command"),
        }
    }

    #[test]
    fn test_parse_rejects_incomplete_commands() {
        assert!(parse_args(&args(&["generate", "twitter"])).is_none());
        assert!(parse_args(&args(&["images"])).is_none());
        assert!(parse_args(&args(&[])).is_none());
    }
}
