// src/fetch/mod.rs
// =============================================================================
// This module gets sitemap bytes off the network and into a readable form.
//
// Submodules:
// - http: downloads a document with the configured user agent and timeout
// - gzip: inflates sitemap.xml.gz payloads
// =============================================================================

pub mod gzip;
mod http;

pub use http::Fetcher;
