// src/config.rs
// =============================================================================
// Settings for a resolver.
//
// Defaults:
// - user agent: "sitemap-resolver/<version> (+https://github.com/sitemap-resolver)"
// - fetch timeout: 3 seconds per request
// - traversal: concurrent
// - follow / rules: empty (everything passes)
//
// Settings are read-only once a run starts, so every task of a concurrent run
// can share them through an Arc without locking.
// =============================================================================

use crate::filter::FilterSet;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = concat!(
    "sitemap-resolver/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/sitemap-resolver)"
);

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(3);

/// How the sitemap tree is walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Traversal {
    /// Every child sitemap is fetched in its own task
    #[default]
    Concurrent,
    /// Depth-first, one branch fully resolved before the next
    Sequential,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub user_agent: String,
    pub fetch_timeout: Duration,
    pub traversal: Traversal,
    /// Gates which child sitemaps of an index are fetched
    pub follow: FilterSet,
    /// Gates which URLs of a URL set are kept
    pub rules: FilterSet,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            traversal: Traversal::default(),
            follow: FilterSet::default(),
            rules: FilterSet::default(),
        }
    }
}
