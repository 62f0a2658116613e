// src/lib.rs
// =============================================================================
// sitemap-resolver: find every URL a website lists in its sitemaps.
//
// Start from robots.txt, a sitemap index or a plain sitemap; the resolver
// follows sitemap indexes down to the URL sets at the bottom and collects
// every URL, together with everything that went wrong on the way.
//
//   let resolution = SitemapResolver::new()
//       .rules(["/blog/"])
//       .resolve_url("https://example.com/robots.txt")
//       .await?;
//   println!("{} URLs", resolution.url_count());
//
// Modules:
// - config: resolver settings and their defaults
// - error: the error taxonomy
// - fetch: HTTP download and gzip handling
// - filter: follow/rules regex filters
// - sitemap: document types, XML decoding, classification, robots.txt
// - resolve: the tree walk and its result
// =============================================================================

pub mod config;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod resolve;
pub mod sitemap;

pub use config::{Config, Traversal};
pub use error::{DecodeError, Result, Schema, SitemapError};
pub use filter::{FilterPattern, FilterSet};
pub use resolve::{Entry, Resolution, SitemapResolver};
pub use sitemap::{ChangeFrequency, SitemapNode, SitemapUrl};
