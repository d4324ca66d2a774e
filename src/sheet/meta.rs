//! Optional YAML frontmatter on stored chord sheets.

use serde::Deserialize;

use crate::error::CifraError;

/// Header fields a sheet can carry in its frontmatter block.
///
/// All fields are optional; the setlist record is the authoritative source
/// for header data, and frontmatter is the fallback when a sheet is handled
/// standalone (the CLI reads the origin key from `tom`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SheetMeta {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub tom: Option<String>,
    pub bpm: Option<u16>,
}

impl SheetMeta {
    pub fn parse(yaml: &str) -> Result<SheetMeta, CifraError> {
        serde_yaml::from_str(yaml).map_err(|e| CifraError::Metadata(e.to_string()))
    }
}

/// Split a leading frontmatter block from the body.
///
/// The block is delimited by a `---` line at the very start of the document
/// and the next `---` line. Returns the raw YAML between the fences and the
/// body below the closing fence. A document that does not open with a fence,
/// or whose opening fence is never closed, is all body.
pub fn split_frontmatter(text: &str) -> (Option<&str>, &str) {
    let mut lines = text.split_inclusive('\n');
    let first = match lines.next() {
        Some(line) => line,
        None => return (None, text),
    };
    if first.trim_end() != "---" {
        return (None, text);
    }
    let meta_start = first.len();
    let mut offset = meta_start;
    for line in lines {
        if line.trim_end() == "---" {
            let meta = &text[meta_start..offset];
            let body = &text[offset + line.len()..];
            return (Some(meta), body);
        }
        offset += line.len();
    }
    (None, text)
}

/// Split and parse in one step. Invalid YAML inside a well-formed fence pair
/// is a metadata error; the absence of frontmatter is not.
pub fn document_meta(text: &str) -> Result<(Option<SheetMeta>, &str), CifraError> {
    match split_frontmatter(text) {
        (Some(yaml), body) => Ok((Some(SheetMeta::parse(yaml)?), body)),
        (None, body) => Ok((None, body)),
    }
}
