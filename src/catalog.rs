//! The song bank.
//!
//! The catalog arrives as CSV exported from the band's spreadsheet. Column
//! headers are matched against candidate names because the sheet has gone
//! through several spellings over time (`Título`, `Titulo`, `Title`, ...);
//! rows without a usable title are discarded and counted, and spreadsheet
//! artifacts like `nan`/`none` cells are treated as empty.

use tracing::debug;

use crate::error::CifraError;
use crate::key::Key;
use crate::records::split_record;

/// One song of the bank: `Title, Artist, OriginalKey, BPM, ChordRef,
/// SimplifiedChordRef`.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSong {
    pub title: String,
    pub artist: String,
    pub tom: Key,
    pub bpm: Option<u16>,
    pub chord_ref: Option<String>,
    pub simplified_chord_ref: Option<String>,
}

impl CatalogSong {
    /// The picker label: `"Title – Artist (Tom)"`, omitting missing parts.
    pub fn label(&self) -> String {
        let mut label = self.title.clone();
        if !self.artist.is_empty() {
            label.push_str(" – ");
            label.push_str(&self.artist);
        }
        let tom = self.tom.to_string();
        if !tom.is_empty() {
            label.push_str(" (");
            label.push_str(&tom);
            label.push(')');
        }
        label
    }
}

/// The loaded song bank.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub songs: Vec<CatalogSong>,
}

const TITLE_COLUMNS: [&str; 6] = ["Título", "Titulo", "title", "Title", "song", "SongTitle"];
const ARTIST_COLUMNS: [&str; 3] = ["Artista", "Artist", "artist"];
const TOM_COLUMNS: [&str; 6] = ["Tom_Original", "TomOriginal", "Tom", "Key", "key", "OriginalKey"];
const BPM_COLUMNS: [&str; 2] = ["BPM", "bpm"];
const CHORD_REF_COLUMNS: [&str; 3] = ["ChordRef", "Cifra", "cifra"];
const SIMPLIFIED_COLUMNS: [&str; 3] = ["SimplifiedChordRef", "CifraSimplificada", "Simplificada"];

impl Catalog {
    /// Parse a CSV export of the song bank.
    ///
    /// Requires a header line with a recognizable title column; everything
    /// else is optional. Rows whose title cell is empty (or a spreadsheet
    /// `nan`/`none` artifact) are skipped.
    pub fn parse_csv(text: &str) -> Result<Catalog, CifraError> {
        let mut lines = text.lines();
        let header = lines.next().ok_or_else(|| CifraError::Record {
            line: 1,
            message: "empty catalog".to_string(),
        })?;
        let columns = split_record(header);

        let title_col = pick_column(&columns, &TITLE_COLUMNS).ok_or_else(|| {
            CifraError::Record {
                line: 1,
                message: "no title column found in catalog header".to_string(),
            }
        })?;
        let artist_col = pick_column(&columns, &ARTIST_COLUMNS);
        let tom_col = pick_column(&columns, &TOM_COLUMNS);
        let bpm_col = pick_column(&columns, &BPM_COLUMNS);
        let chord_col = pick_column(&columns, &CHORD_REF_COLUMNS);
        let simplified_col = pick_column(&columns, &SIMPLIFIED_COLUMNS);

        let mut songs = Vec::new();
        let mut skipped = 0usize;
        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            let fields = split_record(line);
            let title = clean(cell(&fields, Some(title_col)));
            if title.is_empty() {
                skipped += 1;
                continue;
            }
            let bpm = clean(cell(&fields, bpm_col)).parse::<u16>().ok();
            songs.push(CatalogSong {
                title: title.to_string(),
                artist: clean(cell(&fields, artist_col)).to_string(),
                tom: Key::parse(clean(cell(&fields, tom_col))),
                bpm,
                chord_ref: optional(clean(cell(&fields, chord_col))),
                simplified_chord_ref: optional(clean(cell(&fields, simplified_col))),
            });
        }
        if skipped > 0 {
            debug!(skipped, "discarded catalog rows without a title");
        }
        Ok(Catalog { songs })
    }

    /// Find a song by its exact title.
    pub fn find(&self, title: &str) -> Option<&CatalogSong> {
        self.songs.iter().find(|song| song.title == title)
    }
}

fn pick_column(columns: &[String], candidates: &[&str]) -> Option<usize> {
    for candidate in candidates {
        if let Some(index) = columns.iter().position(|col| col.trim() == *candidate) {
            return Some(index);
        }
    }
    None
}

fn cell<'a>(fields: &'a [String], index: Option<usize>) -> &'a str {
    index
        .and_then(|i| fields.get(i))
        .map(String::as_str)
        .unwrap_or("")
}

/// Trim a cell and blank out spreadsheet artifacts.
fn clean(value: &str) -> &str {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("nan") || trimmed.eq_ignore_ascii_case("none") {
        ""
    } else {
        trimmed
    }
}

fn optional(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
