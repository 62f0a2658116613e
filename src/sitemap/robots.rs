// src/sitemap/robots.rs
// =============================================================================
// robots.txt as an entry point.
//
// A robots.txt does not contain URLs itself, it points at sitemaps:
//
//   User-agent: *
//   Disallow: /private/
//
//   Sitemap: https://example.com/sitemap-index.xml
//
// Only lines that start with exactly "Sitemap: " count. The rest of the line
// is taken as-is, so a "\r" from CRLF files stays on the location.
// =============================================================================

use crate::sitemap::SitemapNode;

/// Case-sensitive line prefix of a sitemap directive.
pub const SITEMAP_DIRECTIVE: &str = "Sitemap: ";

// True when the entry URL points at a robots.txt file
pub fn is_robots_txt(url: &str) -> bool {
    url.ends_with("/robots.txt")
}

// Extracts every sitemap location listed in robots.txt content
pub fn sitemap_directives(content: &str) -> Vec<String> {
    content
        .split('\n')
        .filter_map(|line| line.strip_prefix(SITEMAP_DIRECTIVE))
        .map(str::to_string)
        .collect()
}

impl SitemapNode {
    // Builds the node for a robots.txt document
    pub fn redirect(content: &str) -> SitemapNode {
        SitemapNode::Redirect(sitemap_directives(content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_robots_detection() {
        assert!(is_robots_txt("https://example.com/robots.txt"));
        assert!(!is_robots_txt("https://example.com/sitemap.xml"));
        assert!(!is_robots_txt("https://example.com/robots.txt?x=1"));
    }

    #[test]
    fn test_two_sitemap_lines() {
        let txt = "User-agent: *\nDisallow: /\n\nSitemap: https://example.com/a.xml\nSitemap: https://example.com/b.xml\n\n";
        assert_eq!(
            sitemap_directives(txt),
            vec!["https://example.com/a.xml", "https://example.com/b.xml"]
        );
    }

    #[test]
    fn test_prefix_is_case_sensitive() {
        let txt = "sitemap: https://example.com/a.xml\nSITEMAP: https://example.com/b.xml\n";
        assert!(sitemap_directives(txt).is_empty());
    }

    #[test]
    fn test_no_trimming_beyond_prefix() {
        let txt = "Sitemap: https://example.com/a.xml\r\n";
        assert_eq!(sitemap_directives(txt), vec!["https://example.com/a.xml\r"]);
    }

    #[test]
    fn test_no_directives() {
        assert_eq!(
            SitemapNode::redirect("User-agent: *\nDisallow: /\n"),
            SitemapNode::Redirect(Vec::new())
        );
        assert!(sitemap_directives("").is_empty());
    }
}
