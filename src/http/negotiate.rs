//! Content negotiation module
//!
//! Picks the response representation from a path extension or the `Accept` header.

use std::fmt;
use thiserror::Error;

/// Representations a definition can be rendered in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Html,
    Xml,
    Json,
}

impl Format {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "html" | "htm" => Some(Self::Html),
            "xml" => Some(Self::Xml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Map a single media type (parameters already stripped)
    pub fn from_media_type(media: &str) -> Option<Self> {
        match media.trim().to_ascii_lowercase().as_str() {
            "text/html" | "application/xhtml+xml" | "text/*" | "*/*" => Some(Self::Html),
            "application/xml" | "text/xml" => Some(Self::Xml),
            "application/json" | "application/*" => Some(Self::Json),
            _ => None,
        }
    }

    pub const fn extension(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Xml => "xml",
            Self::Json => "json",
        }
    }

    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Html => "text/html; charset=utf-8",
            Self::Xml => "application/xml; charset=utf-8",
            Self::Json => "application/json; charset=utf-8",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// No registered representation matches the request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Not Acceptable: {requested}")]
pub struct NotAcceptable {
    pub requested: String,
}

/// Resolve the response format
///
/// A path extension wins over `Accept`; with neither, HTML is served.
pub fn negotiate(extension: Option<&str>, accept: Option<&str>) -> Result<Format, NotAcceptable> {
    if let Some(ext) = extension {
        return Format::from_extension(ext).ok_or_else(|| NotAcceptable {
            requested: format!(".{ext}"),
        });
    }

    match accept.map(str::trim) {
        None | Some("") => Ok(Format::Html),
        Some(header) => from_accept(header).ok_or_else(|| NotAcceptable {
            requested: header.to_string(),
        }),
    }
}

/// Pick the best supported media range; ties keep header order
fn from_accept(header: &str) -> Option<Format> {
    let mut ranges: Vec<(f32, Format)> = header
        .split(',')
        .filter_map(|range| {
            let mut parts = range.split(';');
            let format = Format::from_media_type(parts.next()?)?;
            let quality = parts
                .filter_map(|p| p.trim().strip_prefix("q="))
                .find_map(|q| q.trim().parse::<f32>().ok())
                .unwrap_or(1.0);
            (quality > 0.0).then_some((quality, format))
        })
        .collect();

    ranges.sort_by(|a, b| b.0.total_cmp(&a.0));
    ranges.first().map(|(_, format)| *format)
}
