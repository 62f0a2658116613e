// src/resolve/state.rs
// =============================================================================
// The result of one resolution run.
//
// While a run is in progress every task appends to the same Resolution
// through a single lock (see engine.rs). Once the top-level walk has joined,
// the Resolution is handed to the caller and only read from then on.
//
// Collections:
// - robots_sitemaps: the sitemap locations a robots.txt entry pointed to
// - sitemap_locations: every sitemap index visited and each child it admitted
// - urls: every <url> entry that passed the rules filter
// - errors: everything that went wrong along the way
// =============================================================================

use crate::error::SitemapError;
use crate::sitemap::SitemapUrl;
use rand::Rng;

#[derive(Debug, Default)]
pub struct Resolution {
    pub(crate) robots_sitemaps: Vec<String>,
    pub(crate) sitemap_locations: Vec<String>,
    pub(crate) urls: Vec<SitemapUrl>,
    pub(crate) errors: Vec<SitemapError>,
}

impl Resolution {
    pub fn urls(&self) -> &[SitemapUrl] {
        &self.urls
    }

    pub fn url_count(&self) -> usize {
        self.urls.len()
    }

    pub fn sitemap_locations(&self) -> &[String] {
        &self.sitemap_locations
    }

    pub fn robots_sitemaps(&self) -> &[String] {
        &self.robots_sitemaps
    }

    pub fn errors(&self) -> &[SitemapError] {
        &self.errors
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    // Picks up to n distinct URLs uniformly at random
    //
    // Works on a copy: each pick swaps the chosen URL with the last one of the
    // copy and drops it, so nothing is picked twice and the stored URLs keep
    // their order. Asking for more than there are returns all of them.
    pub fn random_urls(&self, n: usize) -> Vec<SitemapUrl> {
        let mut rng = rand::thread_rng();
        let mut pool = self.urls.clone();
        let mut picked = Vec::with_capacity(n.min(pool.len()));

        while picked.len() < n && !pool.is_empty() {
            let index = rng.gen_range(0..pool.len());
            picked.push(pool.swap_remove(index));
        }

        picked
    }
}
