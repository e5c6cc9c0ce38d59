//! Listing document parsing.
//!
//! Object stores answer a bucket listing with a `ListBucketResult` XML document where every
//! object contributes one `<Key>` element. Shells may also hand over a JSON array of keys or a
//! plain newline-separated list.

use thiserror::Error;

const KEY_OPEN: &str = "<Key>";
const KEY_CLOSE: &str = "</Key>";

#[derive(Debug, Error)]
pub enum ListingError {
    #[error("unterminated <Key> element starting at byte {offset}")]
    UnterminatedKey { offset: usize },
    #[error("unknown XML entity `&{entity};` at byte {offset}")]
    InvalidEntity { entity: String, offset: usize },
    #[error("malformed JSON listing")]
    Json(#[from] serde_json::Error),
}

/// Shape of a listing document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingFormat {
    Xml,
    Json,
    Lines,
}

impl ListingFormat {
    /// Sniff the format from the first non-whitespace character.
    pub fn detect(text: &str) -> Self {
        match text.trim_start().chars().next() {
            Some('<') => ListingFormat::Xml,
            Some('[') => ListingFormat::Json,
            _ => ListingFormat::Lines,
        }
    }
}

/// Parse a listing document of any supported format, keeping document order.
pub fn parse_listing(text: &str) -> Result<Vec<String>, ListingError> {
    parse_as(ListingFormat::detect(text), text)
}

pub fn parse_as(format: ListingFormat, text: &str) -> Result<Vec<String>, ListingError> {
    match format {
        ListingFormat::Xml => xml_keys(text),
        ListingFormat::Json => Ok(serde_json::from_str(text)?),
        ListingFormat::Lines => Ok(text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.trim().is_empty())
            .map(str::to_owned)
            .collect()),
    }
}

/// Collect the text of every `<Key>` element.
fn xml_keys(text: &str) -> Result<Vec<String>, ListingError> {
    let mut keys = Vec::new();
    let mut cursor = 0;

    while let Some(found) = text[cursor..].find(KEY_OPEN) {
        let start = cursor + found + KEY_OPEN.len();
        let len = text[start..]
            .find(KEY_CLOSE)
            .ok_or(ListingError::UnterminatedKey { offset: start - KEY_OPEN.len() })?;
        keys.push(unescape(&text[start..start + len], start)?);
        cursor = start + len + KEY_CLOSE.len();
    }

    Ok(keys)
}

fn unescape(raw: &str, base_offset: usize) -> Result<String, ListingError> {
    if !raw.contains('&') {
        return Ok(raw.to_string());
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let offset = base_offset + (raw.len() - rest.len()) + amp;
        let tail = &rest[amp + 1..];
        let semi = tail.find(';').ok_or_else(|| ListingError::InvalidEntity {
            entity: tail.chars().take(8).collect(),
            offset,
        })?;
        let entity = &tail[..semi];
        let ch = decode_entity(entity)
            .ok_or_else(|| ListingError::InvalidEntity { entity: entity.to_string(), offset })?;
        out.push(ch);
        rest = &tail[semi + 1..];
    }
    out.push_str(rest);

    Ok(out)
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = if let Some(hex) =
                entity.strip_prefix("#x").or_else(|| entity.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                entity.strip_prefix('#')?.parse().ok()?
            };
            char::from_u32(code)
        }
    }
}
