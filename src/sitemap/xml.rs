// src/sitemap/xml.rs
// =============================================================================
// Reads the two sitemap XML schemas.
//
//   <sitemapindex>                 <urlset>
//     <sitemap>                      <url>
//       <loc>...</loc>                 <loc>...</loc>
//       <lastmod>...</lastmod>         <lastmod>...</lastmod>
//     </sitemap>                       <changefreq>...</changefreq>
//   </sitemapindex>                    <priority>...</priority>
//                                    </url>
//                                  </urlset>
//
// Each decode function is one independent attempt: it either returns the
// entries of its schema or a DecodeError saying why the content is not that
// schema. The classifier runs both attempts over the same content.
//
// Element names are compared by local name, so namespace prefixes and
// extension elements (image:image, news:news, ...) do not get in the way.
//
// Decoding works on raw bytes. The reader picks the character encoding from a
// BOM or from the XML declaration and transcodes text to UTF-8 as it goes.
// =============================================================================

use crate::error::{DecodeError, Schema};
use crate::sitemap::{ChangeFrequency, SitemapUrl};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::mem;

// Child elements of <sitemap>/<url> we care about
#[derive(Debug, Clone, Copy)]
enum Field {
    Loc,
    LastMod,
    ChangeFreq,
    Priority,
}

impl Field {
    fn from_name(name: &[u8]) -> Option<Field> {
        match name {
            b"loc" => Some(Field::Loc),
            b"lastmod" => Some(Field::LastMod),
            b"changefreq" => Some(Field::ChangeFreq),
            b"priority" => Some(Field::Priority),
            _ => None,
        }
    }
}

// Raw text of one entry before it is converted to its typed form
#[derive(Debug, Default)]
struct RawEntry {
    loc: Option<String>,
    lastmod: Option<String>,
    changefreq: Option<String>,
    priority: Option<String>,
}

impl RawEntry {
    fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Loc => &mut self.loc,
            Field::LastMod => &mut self.lastmod,
            Field::ChangeFreq => &mut self.changefreq,
            Field::Priority => &mut self.priority,
        };
        *slot = Some(value);
    }
}

// Decodes a <sitemapindex> document into the locations of its child sitemaps
pub fn decode_index(content: &[u8]) -> Result<Vec<String>, DecodeError> {
    let entries = read_entries(content, Schema::Index)?;

    Ok(entries
        .into_iter()
        .filter_map(|entry| {
            if entry.loc.is_none() {
                tracing::debug!("skipping <sitemap> entry without <loc>");
            }
            entry.loc
        })
        .collect())
}

// Decodes a <urlset> document into its URL entries
//
// An unparseable <lastmod> or <priority> makes the whole document fail to
// decode; an unknown <changefreq> value is dropped.
pub fn decode_urlset(content: &[u8]) -> Result<Vec<SitemapUrl>, DecodeError> {
    let entries = read_entries(content, Schema::UrlSet)?;
    let mut urls = Vec::with_capacity(entries.len());

    for entry in entries {
        let Some(loc) = entry.loc else {
            tracing::debug!("skipping <url> entry without <loc>");
            continue;
        };

        let lastmod = match entry.lastmod {
            Some(raw) => Some(parse_lastmod(&raw).ok_or_else(|| {
                DecodeError::new(
                    Schema::UrlSet,
                    format!("parsing time {raw:?}: unrecognized lastmod format"),
                )
            })?),
            None => None,
        };

        let changefreq = entry.changefreq.and_then(|raw| match raw.parse() {
            Ok(freq) => Some(freq),
            Err(e) => {
                tracing::debug!(loc = %loc, "{}", e);
                None
            }
        });

        let priority = match entry.priority {
            Some(raw) => Some(raw.parse::<f32>().map_err(|e| {
                DecodeError::new(Schema::UrlSet, format!("parsing priority {raw:?}: {e}"))
            })?),
            None => None,
        };

        urls.push(SitemapUrl {
            loc,
            lastmod,
            changefreq,
            priority,
        });
    }

    Ok(urls)
}

// Walks the document and collects the raw fields of every entry element
//
// Depth 1 is the root element, depth 2 the <sitemap>/<url> entries and
// depth 3 their fields. Anything nested deeper is ignored.
fn read_entries(content: &[u8], schema: Schema) -> Result<Vec<RawEntry>, DecodeError> {
    let entry_name: &[u8] = match schema {
        Schema::Index => b"sitemap",
        Schema::UrlSet => b"url",
    };

    // from_reader (not from_str) so the <?xml encoding="..."?> label is honoured
    let mut reader = Reader::from_reader(content);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut depth = 0usize;
    let mut entries = Vec::new();
    let mut current: Option<RawEntry> = None;
    let mut field: Option<Field> = None;
    let mut text = String::new();

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| DecodeError::new(schema, e.to_string()))?;

        match event {
            Event::Start(e) => {
                if depth == 0 {
                    check_root(&e, schema)?;
                } else if depth == 1 && e.local_name().as_ref() == entry_name {
                    current = Some(RawEntry::default());
                } else if depth == 2 && current.is_some() {
                    field = Field::from_name(e.local_name().as_ref());
                    text.clear();
                }
                depth += 1;
            }
            Event::Empty(e) => {
                if depth == 0 {
                    // <urlset/> is a complete, empty document
                    check_root(&e, schema)?;
                    return Ok(entries);
                } else if depth == 1 && e.local_name().as_ref() == entry_name {
                    entries.push(RawEntry::default());
                } else if depth == 2 {
                    if let (Some(entry), Some(f)) =
                        (current.as_mut(), Field::from_name(e.local_name().as_ref()))
                    {
                        entry.set(f, String::new());
                    }
                }
            }
            Event::Text(e) => {
                if field.is_some() && depth == 3 {
                    let unescaped = e
                        .unescape()
                        .map_err(|e| DecodeError::new(schema, e.to_string()))?;
                    text.push_str(&unescaped);
                }
            }
            Event::CData(e) => {
                if field.is_some() && depth == 3 {
                    let decoded = e
                        .decode()
                        .map_err(|e| DecodeError::new(schema, e.to_string()))?;
                    text.push_str(&decoded);
                }
            }
            Event::End(_) => {
                match depth {
                    3 => {
                        if let (Some(f), Some(entry)) = (field.take(), current.as_mut()) {
                            entry.set(f, mem::take(&mut text).trim().to_string());
                        }
                    }
                    2 => {
                        if let Some(entry) = current.take() {
                            entries.push(entry);
                        }
                    }
                    1 => return Ok(entries),
                    _ => {}
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => return Err(DecodeError::new(schema, "unexpected end of input")),
            _ => {}
        }

        buf.clear();
    }
}

fn check_root(start: &BytesStart<'_>, schema: Schema) -> Result<(), DecodeError> {
    let name = start.local_name();
    if name.as_ref() == schema.root_element().as_bytes() {
        return Ok(());
    }

    Err(DecodeError::new(
        schema,
        format!(
            "expected element type <{}> but have <{}>",
            schema.root_element(),
            String::from_utf8_lossy(name.as_ref())
        ),
    ))
}

// Parses a <lastmod> value into a UTC instant
//
// Accepted forms (W3C datetime as used by sitemaps):
//   2024                        year
//   2024-02                     year and month
//   2024-02-12                  date
//   2024-02-12T12:34+01:00      minutes with offset
//   2024-02-12T12:34Z           minutes in UTC
//   2024-02-12T12:34:56+01:00   RFC 3339, with or without fractional seconds
pub fn parse_lastmod(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M%:z") {
        return Some(dt.with_timezone(&Utc));
    }

    if let Some(naive) = raw.strip_suffix('Z') {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive, "%Y-%m-%dT%H:%M") {
            return Some(dt.and_utc());
        }
    }

    let padded = match raw.len() {
        4 if raw.bytes().all(|b| b.is_ascii_digit()) => format!("{raw}-01-01"),
        7 => format!("{raw}-01"),
        _ => raw.to_string(),
    };

    NaiveDate::parse_from_str(&padded, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
