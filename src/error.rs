// src/error.rs
// =============================================================================
// Error types for the sitemap resolver.
//
// Most errors are not fatal. A failing branch of the sitemap tree records its
// error in the Resolution and the walk carries on with its siblings. Only two
// situations abort a run:
// - the entry document cannot be obtained
// - a filter pattern failed to compile while configuring the resolver
//
// Rust concepts:
// - thiserror: derives std::error::Error and Display from attributes
// - #[source]: keeps the underlying error available through .source()
// =============================================================================

use std::fmt;
use thiserror::Error;

/// Result alias used across the library.
pub type Result<T> = std::result::Result<T, SitemapError>;

/// Which document shape a decode attempt was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schema {
    /// `<sitemapindex>` with `<sitemap>` children
    Index,
    /// `<urlset>` with `<url>` children
    UrlSet,
}

impl Schema {
    /// Name of the root element this schema expects.
    pub fn root_element(self) -> &'static str {
        match self {
            Schema::Index => "sitemapindex",
            Schema::UrlSet => "urlset",
        }
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.root_element())
    }
}

/// A failed attempt to read a document as one particular schema.
///
/// This carries no URL: the classifier only sees content. The resolution
/// engine attaches the URL when it records the error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{schema}: {message}")]
pub struct DecodeError {
    pub schema: Schema,
    pub message: String,
}

impl DecodeError {
    pub fn new(schema: Schema, message: impl Into<String>) -> Self {
        Self {
            schema,
            message: message.into(),
        }
    }
}

/// Everything that can go wrong while resolving a sitemap tree.
#[derive(Debug, Error)]
pub enum SitemapError {
    /// The server answered with a non-2xx status
    #[error("failed to fetch {url}: received HTTP status {status}")]
    HttpStatus { url: String, status: u16 },

    /// The request never produced a response (DNS, connect, timeout, bad URL)
    #[error("failed to fetch {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// A document had zero bytes at classification time
    #[error("{url}: sitemap content is empty")]
    EmptyContent { url: String },

    /// A document could not be read as the given schema
    #[error("{url}: could not decode as <{schema}>: {message}")]
    Decode {
        url: String,
        schema: Schema,
        message: String,
    },

    /// Payload looked gzipped but could not be inflated; raw bytes were used
    #[error("{url}: gzip decompression failed: {source}")]
    Compression {
        url: String,
        #[source]
        source: std::io::Error,
    },

    /// A follow/rules pattern is not a valid regular expression
    #[error("invalid filter pattern {pattern:?}: {source}")]
    FilterConfig {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Guard raised when configuration errors were recorded before a run
    #[error("{count} error(s) occurred before resolving, see config_errors() for details")]
    PriorErrors { count: usize },

    /// The HTTP client could not be constructed
    #[error("could not build HTTP client: {source}")]
    Client {
        #[source]
        source: reqwest::Error,
    },

    /// A spawned branch of the concurrent walk panicked or was cancelled
    #[error("sitemap task for {url} failed: {message}")]
    Task { url: String, message: String },
}

impl SitemapError {
    // Attaches a URL to a content-only decode failure
    pub fn decode(url: &str, error: DecodeError) -> Self {
        SitemapError::Decode {
            url: url.to_string(),
            schema: error.schema,
            message: error.message,
        }
    }

    /// True for the transport-level failures (status or network).
    pub fn is_fetch(&self) -> bool {
        matches!(
            self,
            SitemapError::HttpStatus { .. } | SitemapError::Network { .. }
        )
    }

    /// The URL this error is about, when it concerns a single document.
    pub fn url(&self) -> Option<&str> {
        match self {
            SitemapError::HttpStatus { url, .. }
            | SitemapError::Network { url, .. }
            | SitemapError::EmptyContent { url }
            | SitemapError::Decode { url, .. }
            | SitemapError::Compression { url, .. }
            | SitemapError::Task { url, .. } => Some(url),
            SitemapError::FilterConfig { .. }
            | SitemapError::PriorErrors { .. }
            | SitemapError::Client { .. } => None,
        }
    }
}
