// src/sitemap/classify.rs
// =============================================================================
// Decides what kind of document a piece of content is.
//
// Both schemas are tried on the same content. The rules are:
// 1. If the <sitemapindex> attempt found at least one child, it is an index,
//    whatever the <urlset> attempt said.
// 2. Otherwise, if the <urlset> attempt found at least one URL, it is a
//    URL set.
// 3. Otherwise it is unrecognized, and every failed attempt is kept so the
//    caller can report it.
//
// Empty content never reaches the decoders; it is its own error. Content is
// handed over as raw bytes so the decoders can honour its declared encoding.
// =============================================================================

use crate::error::DecodeError;
use crate::sitemap::xml::{decode_index, decode_urlset};
use crate::sitemap::SitemapUrl;
use thiserror::Error;

/// What one fetched document turned out to be.
#[derive(Debug, Clone, PartialEq)]
pub enum SitemapNode {
    /// robots.txt: the sitemap locations it lists
    Redirect(Vec<String>),
    /// sitemap index: locations of the child sitemaps
    Index(Vec<String>),
    /// URL set: the leaf URLs
    UrlSet(Vec<SitemapUrl>),
    /// Neither schema produced any entries
    Unrecognized {
        index_error: Option<DecodeError>,
        urlset_error: Option<DecodeError>,
    },
}

impl SitemapNode {
    // The decode errors of an unrecognized node, index attempt first
    pub fn decode_errors(&self) -> Vec<&DecodeError> {
        match self {
            SitemapNode::Unrecognized {
                index_error,
                urlset_error,
            } => index_error.iter().chain(urlset_error.iter()).collect(),
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ClassifyError {
    #[error("sitemap content is empty")]
    EmptyContent,
}

// Classifies sitemap content (already gunzipped)
pub fn classify(content: &[u8]) -> Result<SitemapNode, ClassifyError> {
    if content.is_empty() {
        return Err(ClassifyError::EmptyContent);
    }

    let index = decode_index(content);
    let urlset = decode_urlset(content);

    let node = match (index, urlset) {
        (Ok(children), _) if !children.is_empty() => SitemapNode::Index(children),
        (_, Ok(urls)) if !urls.is_empty() => SitemapNode::UrlSet(urls),
        (index, urlset) => SitemapNode::Unrecognized {
            index_error: index.err(),
            urlset_error: urlset.err(),
        },
    };

    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Schema;

    #[test]
    fn test_index_wins() {
        let xml = b"<sitemapindex><sitemap><loc>https://example.com/a.xml</loc></sitemap></sitemapindex>";
        assert_eq!(
            classify(xml),
            Ok(SitemapNode::Index(vec!["https://example.com/a.xml".to_string()]))
        );
    }

    #[test]
    fn test_urlset() {
        let xml = b"<urlset><url><loc>https://example.com/</loc></url></urlset>";
        let node = classify(xml).unwrap();
        assert!(matches!(node, SitemapNode::UrlSet(ref urls) if urls.len() == 1));
        assert!(node.decode_errors().is_empty());
    }

    #[test]
    fn test_empty_content_is_distinct() {
        assert_eq!(classify(b""), Err(ClassifyError::EmptyContent));
    }

    #[test]
    fn test_empty_urlset_keeps_only_the_failed_attempt() {
        let node = classify(b"<urlset></urlset>").unwrap();
        let errors = node.decode_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].schema, Schema::Index);
    }

    #[test]
    fn test_empty_index_keeps_only_the_failed_attempt() {
        let node = classify(b"<sitemapindex></sitemapindex>").unwrap();
        let errors = node.decode_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].schema, Schema::UrlSet);
    }

    #[test]
    fn test_malformed_reports_both_attempts() {
        let node = classify(b"<urlset><url><loc>https://example.com/</loc>").unwrap();
        let errors = node.decode_errors();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].schema, Schema::Index);
        assert_eq!(errors[1].schema, Schema::UrlSet);
    }

    #[test]
    fn test_html_is_unrecognized() {
        let node = classify(b"<html><body>not a sitemap</body></html>").unwrap();
        assert_eq!(node.decode_errors().len(), 2);
    }

    #[test]
    fn test_classification_is_repeatable() {
        let xml = b"<urlset><url><loc>https://example.com/</loc><priority>0.3</priority></url></urlset>";
        assert_eq!(classify(xml), classify(xml));
    }

    #[test]
    fn test_declared_encoding_reaches_the_decoders() {
        let xml = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\
<urlset><url><loc>https://example.com/caf\xe9</loc></url></urlset>";
        match classify(xml).unwrap() {
            SitemapNode::UrlSet(urls) => assert_eq!(urls[0].loc, "https://example.com/caf\u{e9}"),
            other => panic!("unexpected node: {other:?}"),
        }
    }
}
