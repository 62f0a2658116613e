// src/filter.rs
// =============================================================================
// Inclusion filters for sitemap locations and page URLs.
//
// Two independent sets are configured on the resolver:
// - follow: which child sitemaps of an index get fetched
// - rules:  which <url> entries of a URL set are kept
//
// An empty set lets everything through. A non-empty set lets a candidate
// through when at least one of its patterns matches somewhere in it.
// =============================================================================

use crate::error::SitemapError;
use regex::Regex;

/// One compiled pattern together with the text it was compiled from.
#[derive(Debug, Clone)]
pub struct FilterPattern {
    source: String,
    regex: Regex,
}

impl FilterPattern {
    // Compiles a pattern; an invalid regex is a configuration error
    pub fn new(source: impl Into<String>) -> Result<Self, SitemapError> {
        let source = source.into();
        let regex = Regex::new(&source).map_err(|e| SitemapError::FilterConfig {
            pattern: source.clone(),
            source: e,
        })?;
        Ok(Self { source, regex })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, candidate: &str) -> bool {
        self.regex.is_match(candidate)
    }
}

#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    patterns: Vec<FilterPattern>,
}

impl FilterSet {
    // Compiles every pattern, keeping the good ones and returning the errors
    // of the bad ones
    pub fn compile<I, S>(patterns: I) -> (Self, Vec<SitemapError>)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = FilterSet::default();
        let errors = set.add(patterns);
        (set, errors)
    }

    // Compiles more patterns into this set, after the ones already there,
    // and returns the errors of those that failed
    pub fn add<I, S>(&mut self, patterns: I) -> Vec<SitemapError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut errors = Vec::new();

        for pattern in patterns {
            match FilterPattern::new(pattern) {
                Ok(compiled) => self.patterns.push(compiled),
                Err(e) => errors.push(e),
            }
        }

        errors
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn patterns(&self) -> &[FilterPattern] {
        &self.patterns
    }

    // True when the candidate may pass
    pub fn admits(&self, candidate: &str) -> bool {
        self.patterns.is_empty() || self.patterns.iter().any(|p| p.is_match(candidate))
    }
}
