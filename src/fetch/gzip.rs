// src/fetch/gzip.rs
// =============================================================================
// Gzip support for compressed sitemaps (sitemap.xml.gz).
//
// Servers often send .gz sitemaps as plain application/octet-stream, so the
// payload is sniffed for the gzip magic bytes instead of trusting headers.
// =============================================================================

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::borrow::Cow;
use std::io::{self, Read, Write};

/// ID1, ID2 and CM (deflate) of a gzip member header.
pub const GZIP_MAGIC: [u8; 3] = [0x1f, 0x8b, 0x08];

pub fn is_gzip(content: &[u8]) -> bool {
    content.starts_with(&GZIP_MAGIC)
}

// Inflates gzipped content, passing anything else through untouched
//
// A stream that ends early still yields what was inflated before the cut.
// On any other failure the caller gets the error and decides whether to keep
// the raw bytes.
pub fn maybe_decompress(content: &[u8]) -> io::Result<Cow<'_, [u8]>> {
    if !is_gzip(content) {
        return Ok(Cow::Borrowed(content));
    }

    let mut decoder = GzDecoder::new(content);
    let mut inflated = Vec::new();

    match decoder.read_to_end(&mut inflated) {
        Ok(_) => Ok(Cow::Owned(inflated)),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof && !inflated.is_empty() => {
            Ok(Cow::Owned(inflated))
        }
        Err(e) => Err(e),
    }
}

// Gzips content with the default compression level
pub fn compress(content: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(content)?;
    encoder.finish()
}
