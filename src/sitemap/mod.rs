// src/sitemap/mod.rs
// =============================================================================
// This module understands the documents a sitemap tree is made of.
//
// Submodules:
// - xml: reads <sitemapindex> and <urlset> documents with quick-xml
// - classify: decides which kind of document some content is
// - robots: pulls "Sitemap: " directives out of robots.txt
//
// The types defined here (SitemapUrl, ChangeFrequency) are what callers get
// back at the end of a resolution run.
// =============================================================================

mod classify;
mod robots;
mod xml;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use classify::{classify, ClassifyError, SitemapNode};
pub use robots::{is_robots_txt, sitemap_directives, SITEMAP_DIRECTIVE};
pub use xml::{decode_index, decode_urlset, parse_lastmod};

/// One `<url>` entry of a `<urlset>` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SitemapUrl {
    /// The page location
    pub loc: String,
    /// When the page last changed, normalized to UTC
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastmod: Option<DateTime<Utc>>,
    /// How often the page is expected to change
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changefreq: Option<ChangeFrequency>,
    /// Relative priority, kept exactly as written in the document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<f32>,
}

impl SitemapUrl {
    pub fn new(loc: impl Into<String>) -> Self {
        Self {
            loc: loc.into(),
            lastmod: None,
            changefreq: None,
            priority: None,
        }
    }
}

/// Value of a `<changefreq>` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFrequency::Always => "always",
            ChangeFrequency::Hourly => "hourly",
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Yearly => "yearly",
            ChangeFrequency::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeFrequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "always" => Ok(ChangeFrequency::Always),
            "hourly" => Ok(ChangeFrequency::Hourly),
            "daily" => Ok(ChangeFrequency::Daily),
            "weekly" => Ok(ChangeFrequency::Weekly),
            "monthly" => Ok(ChangeFrequency::Monthly),
            "yearly" => Ok(ChangeFrequency::Yearly),
            "never" => Ok(ChangeFrequency::Never),
            _ => Err(format!("invalid changefreq value: {s}")),
        }
    }
}
