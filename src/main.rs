// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Build a SitemapResolver from the shared options
// 3. Resolve the entry URL and print URLs, a count, or a random sample
// 4. Exit with proper code (0 = clean run, 1 = run recorded errors, 2 = fatal)
//
// Diagnostics go through tracing to stderr (RUST_LOG, default "warn"), so
// stdout only ever carries the results.
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, ResolveArgs};
use serde::Serialize;
use sitemap_resolver::{Entry, Resolution, SitemapResolver, SitemapUrl, Traversal};
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use url::Url;

#[tokio::main]
async fn main() {
    init_tracing();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<i32> {
    // Parse command-line arguments
    // If parsing fails, clap prints help and exits
    let cli = Cli::parse();

    // Every subcommand resolves first, then differs only in what it prints
    match cli.command {
        Commands::Urls { resolve, json } => {
            let resolution = resolve_entry(&resolve).await?;
            print_urls(&resolve.url, &resolution, resolution.urls(), json)?;
            Ok(exit_code(&resolution))
        }
        Commands::Count { resolve } => {
            let resolution = resolve_entry(&resolve).await?;
            println!(
                "Sitemaps of {} contain {} URLs.",
                resolve.url,
                resolution.url_count()
            );
            print_error_summary(&resolution);
            Ok(exit_code(&resolution))
        }
        Commands::Random {
            resolve,
            count,
            json,
        } => {
            let resolution = resolve_entry(&resolve).await?;
            // Sampling never repeats a URL; fewer come back if fewer exist
            let sample = resolution.random_urls(count);
            print_urls(&resolve.url, &resolution, &sample, json)?;
            Ok(exit_code(&resolution))
        }
    }
}

// Builds the resolver from the shared options and runs it
async fn resolve_entry(args: &ResolveArgs) -> Result<Resolution> {
    // Validate the URL early so a typo fails before any request is made
    Url::parse(&args.url).with_context(|| format!("Invalid URL '{}'", args.url))?;

    // Chain the settings onto a fresh resolver
    let mut resolver = SitemapResolver::new()
        .fetch_timeout(Duration::from_secs(args.timeout))
        .traversal(if args.sequential {
            Traversal::Sequential
        } else {
            Traversal::Concurrent
        })
        .follow(args.follow.iter().cloned())
        .rules(args.rules.iter().cloned());

    // Keep the built-in User-Agent unless one was given
    if let Some(user_agent) = &args.user_agent {
        resolver = resolver.user_agent(user_agent.clone());
    }

    // --content-file: use a local copy of the entry document instead of fetching it
    let entry = match &args.content_file {
        Some(path) => {
            let content = tokio::fs::read(path)
                .await
                .with_context(|| format!("Could not read {}", path.display()))?;
            Entry::with_content(args.url.clone(), content)
        }
        None => Entry::new(args.url.clone()),
    };

    eprintln!("🔍 Resolving sitemaps of: {}", args.url);

    match resolver.resolve(entry).await {
        Ok(resolution) => Ok(resolution),
        Err(e) => {
            // Show which filter patterns were rejected, if that is why it failed
            for config_error in resolver.config_errors() {
                eprintln!("   {}", config_error);
            }
            Err(e.into())
        }
    }
}

// 0 when the run was clean, 1 when it completed with recorded errors
fn exit_code(resolution: &Resolution) -> i32 {
    if resolution.has_errors() {
        1
    } else {
        0
    }
}

#[derive(Serialize)]
struct Report<'a> {
    entry: &'a str,
    url_count: usize,
    urls: &'a [SitemapUrl],
    sitemaps: &'a [String],
    errors: Vec<String>,
}

fn print_urls(entry: &str, resolution: &Resolution, urls: &[SitemapUrl], json: bool) -> Result<()> {
    if json {
        // Errors are rendered as their messages for the JSON report
        let report = Report {
            entry,
            url_count: resolution.url_count(),
            urls,
            sitemaps: resolution.sitemap_locations(),
            errors: resolution.errors().iter().map(|e| e.to_string()).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_table(urls);
        print_error_summary(resolution);
    }
    Ok(())
}

// Prints URLs as a human-readable table in the terminal
fn print_table(urls: &[SitemapUrl]) {
    // Print header
    println!("{:<60} {:<26} {:<11} {:<8}", "URL", "LASTMOD", "CHANGEFREQ", "PRIORITY");
    println!("{}", "=".repeat(108));

    for url in urls {
        // Truncate long URLs for display (by chars, not bytes)
        let loc = if url.loc.chars().count() > 57 {
            format!("{}...", url.loc.chars().take(57).collect::<String>())
        } else {
            url.loc.clone()
        };
        // Missing optional fields print as blanks
        let lastmod = url
            .lastmod
            .map(|t| t.to_rfc3339())
            .unwrap_or_default();
        let changefreq = url.changefreq.map(|c| c.to_string()).unwrap_or_default();
        let priority = url.priority.map(|p| format!("{:.1}", p)).unwrap_or_default();

        println!("{:<60} {:<26} {:<11} {:<8}", loc, lastmod, changefreq, priority);
    }

    // Print summary
    println!();
    println!("📋 Listed: {}", urls.len());
}

// The errors themselves were already logged as they happened
fn print_error_summary(resolution: &Resolution) {
    if resolution.has_errors() {
        eprintln!(
            "⚠️  {} error(s) while resolving",
            resolution.error_count()
        );
    }
}
