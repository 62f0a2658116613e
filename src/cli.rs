// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Every subcommand takes the same entry URL and resolver options, so those
// live in one ResolveArgs struct that each subcommand flattens in.
//
// Rust concepts:
// - Derive macros: clap generates the parser from the struct definitions
// - #[command(flatten)]: reuse one group of arguments in several places
// =============================================================================

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "sitemap-resolver",
    version,
    about = "Resolve every URL a website lists in robots.txt and its sitemaps",
    long_about = "sitemap-resolver starts from a robots.txt, a sitemap index or a sitemap, \
                  follows every sitemap index down to the URL sets and prints the URLs it finds. \
                  Gzipped sitemaps are handled transparently."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print every URL found
    ///
    /// Example: sitemap-resolver urls https://www.sitemaps.org/robots.txt
    Urls {
        #[command(flatten)]
        resolve: ResolveArgs,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print how many URLs were found
    ///
    /// Example: sitemap-resolver count https://www.sitemaps.org/sitemap.xml
    Count {
        #[command(flatten)]
        resolve: ResolveArgs,
    },

    /// Print a random sample of the URLs found
    ///
    /// Example: sitemap-resolver random https://www.sitemaps.org/sitemap.xml -n 7
    Random {
        #[command(flatten)]
        resolve: ResolveArgs,

        /// How many URLs to pick (fewer are printed if fewer exist)
        #[arg(short = 'n', long = "count", default_value_t = 7)]
        count: usize,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Entry URL: a robots.txt, sitemap index or sitemap
    pub url: String,

    /// User-Agent header sent with every request
    #[arg(long, env = "SITEMAP_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "SITEMAP_TIMEOUT", default_value_t = 3)]
    pub timeout: u64,

    /// Walk the sitemap tree one sitemap at a time instead of concurrently
    #[arg(long)]
    pub sequential: bool,

    /// Only fetch child sitemaps matching this regex (repeatable)
    #[arg(long = "follow", value_name = "REGEX")]
    pub follow: Vec<String>,

    /// Only keep URLs matching this regex (repeatable)
    #[arg(long = "rule", value_name = "REGEX")]
    pub rules: Vec<String>,

    /// Read the entry document from this file instead of fetching it
    #[arg(long, value_name = "PATH")]
    pub content_file: Option<PathBuf>,
}
