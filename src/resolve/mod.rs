// src/resolve/mod.rs
// =============================================================================
// This module turns one entry point into every URL behind it.
//
// Submodules:
// - engine: SitemapResolver and the concurrent/sequential tree walk
// - state: Resolution, the collections a run fills in
// =============================================================================

mod engine;
mod state;


pub use engine::{Entry, SitemapResolver};
pub use state::Resolution;
