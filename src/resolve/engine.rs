// src/resolve/engine.rs
// =============================================================================
// The recursive sitemap tree walker.
//
// How it works:
// 1. Get the entry document (supplied by the caller or fetched)
// 2. robots.txt entry: its "Sitemap: " lines become the roots of the walk
//    Any other entry: classify it, and the children of an index become roots
// 3. For every root: fetch -> gunzip if needed -> classify
//    - index:   record it and its admitted children, then walk the children
//    - URL set: keep the URLs the rules filter admits
//    - anything else: record why, and stop this branch
// 4. Wait until every branch, however deep, has finished
//
// Only the entry document can abort a run. Every other failure is recorded
// in the Resolution and the rest of the tree is still walked.
//
// Concurrent walks spawn one tokio task per sitemap and join each level
// before returning to the level above. Sequential walks do the same
// depth-first with plain recursion.
// =============================================================================

use crate::config::{Config, Traversal};
use crate::error::{Result, SitemapError};
use crate::fetch::{gzip, Fetcher};
use crate::filter::FilterSet;
use crate::resolve::Resolution;
use crate::sitemap::{self, ClassifyError, SitemapNode};
use futures::future::BoxFuture;
use parking_lot::Mutex;
use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;

/// Where a resolution run starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    url: String,
    content: Option<Vec<u8>>,
}

impl Entry {
    // Entry whose document will be fetched
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            content: None,
        }
    }

    // Entry whose document is already known; it is not fetched
    pub fn with_content(url: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            url: url.into(),
            content: Some(content.into()),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn content(&self) -> Option<&[u8]> {
        self.content.as_deref()
    }
}

impl From<&str> for Entry {
    fn from(url: &str) -> Self {
        Entry::new(url)
    }
}

impl From<String> for Entry {
    fn from(url: String) -> Self {
        Entry::new(url)
    }
}

/// Resolves a robots.txt, sitemap index or sitemap into all of its URLs.
///
/// Configure with the chainable setters, then call [`SitemapResolver::resolve`].
/// A filter pattern that fails to compile is kept in
/// [`SitemapResolver::config_errors`] and makes every run fail with
/// [`SitemapError::PriorErrors`]; build a new resolver to start over.
#[derive(Debug, Default)]
pub struct SitemapResolver {
    config: Config,
    config_errors: Vec<SitemapError>,
}

impl SitemapResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    pub fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.config.fetch_timeout = timeout;
        self
    }

    pub fn traversal(mut self, traversal: Traversal) -> Self {
        self.config.traversal = traversal;
        self
    }

    pub fn sequential(self) -> Self {
        self.traversal(Traversal::Sequential)
    }

    // Regexes a child sitemap location must match to be fetched
    //
    // Calling it again adds to the patterns given before.
    pub fn follow<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let errors = self.config.follow.add(patterns);
        // Bad patterns are kept; every later resolve() refuses to run
        self.config_errors.extend(errors);
        self
    }

    // Regexes a page URL must match to be kept
    //
    // Calling it again adds to the patterns given before.
    pub fn rules<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let errors = self.config.rules.add(patterns);
        self.config_errors.extend(errors);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_errors(&self) -> &[SitemapError] {
        &self.config_errors
    }

    // Fetches and resolves a URL
    pub async fn resolve_url(&self, url: &str) -> Result<Resolution> {
        self.resolve(Entry::new(url)).await
    }

    // Runs one resolution from the entry to the last leaf
    //
    // Returns Err only when configuration errors were recorded earlier or the
    // entry document could not be obtained. Everything else ends up in
    // Resolution::errors().
    #[tracing::instrument(skip_all, fields(url = %entry.url))]
    pub async fn resolve(&self, entry: Entry) -> Result<Resolution> {
        if !self.config_errors.is_empty() {
            return Err(SitemapError::PriorErrors {
                count: self.config_errors.len(),
            });
        }

        // One HTTP client for the whole run
        let fetcher = Fetcher::new(&self.config)?;
        let Entry { url, content } = entry;

        // Supplied content wins; otherwise the entry must be fetchable
        let body = match content {
            Some(content) => content,
            None => fetcher.fetch(&url).await?,
        };

        let run = Arc::new(Run::new(fetcher, &self.config));

        // robots.txt is plain text: its directives are the roots.
        // Anything else goes through the same path as a fetched sitemap.
        let roots = if sitemap::is_robots_txt(&url) {
            let text = String::from_utf8_lossy(&body);
            run.apply(&url, SitemapNode::redirect(&text))
        } else {
            run.expand(&url, &body)
        };

        run.walk(roots).await;

        // Every task has finished, so the aggregate can be moved out
        let resolution = std::mem::take(&mut *run.state.lock());
        tracing::debug!(
            urls = resolution.url_count(),
            sitemaps = resolution.sitemap_locations().len(),
            errors = resolution.error_count(),
            "resolution finished"
        );

        Ok(resolution)
    }
}

// Everything one run shares between its tasks
struct Run {
    fetcher: Fetcher,
    follow: FilterSet,
    rules: FilterSet,
    traversal: Traversal,
    state: Mutex<Resolution>,
}

impl Run {
    fn new(fetcher: Fetcher, config: &Config) -> Self {
        Self {
            fetcher,
            follow: config.follow.clone(),
            rules: config.rules.clone(),
            traversal: config.traversal,
            state: Mutex::new(Resolution::default()),
        }
    }

    fn record_error(&self, error: SitemapError) {
        tracing::warn!(error = %error, "sitemap error");
        self.state.lock().errors.push(error);
    }

    fn walk(self: &Arc<Self>, locations: Vec<String>) -> BoxFuture<'static, ()> {
        match self.traversal {
            Traversal::Concurrent => Arc::clone(self).walk_concurrent(locations),
            Traversal::Sequential => Arc::clone(self).walk_sequential(locations),
        }
    }

    // One task per location; returns once every task and everything those
    // tasks spawned has finished
    fn walk_concurrent(self: Arc<Self>, locations: Vec<String>) -> BoxFuture<'static, ()> {
        // Recursive, so boxed
        Box::pin(async move {
            // Start every sibling before waiting on any of them
            let handles: Vec<_> = locations
                .into_iter()
                .map(|location| {
                    // Each task owns a handle to the shared run
                    let run = Arc::clone(&self);
                    let url = location.clone();
                    let handle = tokio::spawn(async move {
                        let children = run.visit(&location).await;
                        // An index: go one level down from inside this task
                        if !children.is_empty() {
                            run.walk_concurrent(children).await;
                        }
                    });
                    (url, handle)
                })
                .collect();

            // Join the level; a panicked task is recorded, not propagated
            for (url, handle) in handles {
                if let Err(e) = handle.await {
                    self.record_error(SitemapError::Task {
                        url,
                        message: e.to_string(),
                    });
                }
            }
        })
    }

    fn walk_sequential(self: Arc<Self>, locations: Vec<String>) -> BoxFuture<'static, ()> {
        Box::pin(async move {
            // Depth-first, in document order
            for location in locations {
                let children = self.visit(&location).await;
                if !children.is_empty() {
                    Arc::clone(&self).walk_sequential(children).await;
                }
            }
        })
    }

    // Fetches one sitemap and returns the children to walk next
    async fn visit(&self, url: &str) -> Vec<String> {
        match self.fetcher.fetch(url).await {
            Ok(body) => self.expand(url, &body),
            Err(e) => {
                self.record_error(e);
                Vec::new()
            }
        }
    }

    // Gunzips and classifies a fetched document, then applies the result
    fn expand(&self, url: &str, body: &[u8]) -> Vec<String> {
        let content = match gzip::maybe_decompress(body) {
            Ok(content) => content,
            // Record it, then try the raw bytes anyway
            Err(source) => {
                self.record_error(SitemapError::Compression {
                    url: url.to_string(),
                    source,
                });
                Cow::Borrowed(body)
            }
        };

        // Classify the raw bytes; the XML reader handles the charset
        match sitemap::classify(&content) {
            Ok(node) => self.apply(url, node),
            Err(ClassifyError::EmptyContent) => {
                self.record_error(SitemapError::EmptyContent {
                    url: url.to_string(),
                });
                Vec::new()
            }
        }
    }

    // Records what a node contributes and returns the locations to walk next
    //
    // An index records its own location as well as the children it admits;
    // a URL set does not record its own location.
    fn apply(&self, url: &str, node: SitemapNode) -> Vec<String> {
        match node {
            SitemapNode::Redirect(sitemaps) => {
                // Every listed sitemap is walked; follow does not apply here
                tracing::debug!(url, count = sitemaps.len(), "robots.txt sitemaps");
                self.state.lock().robots_sitemaps = sitemaps.clone();
                sitemaps
            }
            SitemapNode::Index(children) => {
                // Only children matching the follow patterns are fetched
                let admitted: Vec<String> = children
                    .into_iter()
                    .filter(|child| self.follow.admits(child))
                    .collect();
                tracing::debug!(url, children = admitted.len(), "sitemap index");

                // Hold the lock once so the index and its children stay together
                let mut state = self.state.lock();
                state.sitemap_locations.push(url.to_string());
                state.sitemap_locations.extend(admitted.iter().cloned());
                admitted
            }
            SitemapNode::UrlSet(urls) => {
                // Leaf: keep the URLs the rules admit, nothing more to walk
                let admitted: Vec<_> = urls
                    .into_iter()
                    .filter(|entry| self.rules.admits(&entry.loc))
                    .collect();
                tracing::debug!(url, urls = admitted.len(), "url set");

                self.state.lock().urls.extend(admitted);
                Vec::new()
            }
            SitemapNode::Unrecognized {
                index_error,
                urlset_error,
            } => {
                // One error per schema that failed to decode
                for error in index_error.into_iter().chain(urlset_error) {
                    self.record_error(SitemapError::decode(url, error));
                }
                Vec::new()
            }
        }
    }
}
