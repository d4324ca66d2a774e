//! Tabular setlist persistence.
//!
//! The durable form of a setlist is a flat table, one row per item:
//!
//! `BlockIndex, BlockName, ItemIndex, ItemType(music|pause), SongTitle,
//! Artist, Tom, BPM, ChordRef, SimplifiedChordRef, UseSimplified(0|1),
//! PauseLabel`
//!
//! Reconstruction groups rows by `(BlockIndex, BlockName)` in ascending
//! order, then orders items by `ItemIndex` within each group. The `Tom`
//! column stores the performing key, so a reloaded song starts with
//! `original_key == current_key` - retuning history is not persisted.
//!
//! The encode/parse pair speaks the CSV shape the spreadsheet side of the
//! app exports: a header line, comma-separated fields, double quotes around
//! fields containing commas, quotes, or newlines.

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use crate::error::CifraError;
use crate::key::Key;
use crate::setlist::{Block, Item, Music, Pause, Setlist};

/// Column order of the record table.
pub const SETLIST_HEADER: [&str; 12] = [
    "BlockIndex",
    "BlockName",
    "ItemIndex",
    "ItemType",
    "SongTitle",
    "Artist",
    "Tom",
    "BPM",
    "ChordRef",
    "SimplifiedChordRef",
    "UseSimplified",
    "PauseLabel",
];

/// Discriminator column value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemType {
    Music,
    Pause,
}

impl ItemType {
    fn parse(s: &str) -> Option<ItemType> {
        match s {
            "music" => Some(ItemType::Music),
            "pause" => Some(ItemType::Pause),
            _ => None,
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemType::Music => write!(f, "music"),
            ItemType::Pause => write!(f, "pause"),
        }
    }
}

/// One row of the record table.
#[derive(Debug, Clone, PartialEq)]
pub struct SetlistRow {
    pub block_index: usize,
    pub block_name: String,
    pub item_index: usize,
    pub item_type: ItemType,
    pub song_title: String,
    pub artist: String,
    pub tom: String,
    pub bpm: Option<u16>,
    pub chord_ref: String,
    pub simplified_chord_ref: String,
    pub use_simplified: bool,
    pub pause_label: String,
}

impl SetlistRow {
    fn to_item(&self) -> Item {
        match self.item_type {
            ItemType::Pause => Item::Pause(Pause {
                label: self.pause_label.clone(),
            }),
            ItemType::Music => {
                let key = Key::parse(&self.tom);
                Item::Music(Music {
                    title: self.song_title.clone(),
                    artist: self.artist.clone(),
                    original_key: key.clone(),
                    current_key: key,
                    bpm: self.bpm,
                    chord_ref: none_if_empty(&self.chord_ref),
                    simplified_chord_ref: none_if_empty(&self.simplified_chord_ref),
                    use_simplified: self.use_simplified,
                    inline_text: None,
                })
            }
        }
    }
}

fn none_if_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Flatten a setlist into rows, in block then item order.
pub fn setlist_to_rows(setlist: &Setlist) -> Vec<SetlistRow> {
    let mut rows = Vec::new();
    for (block_index, block) in setlist.blocks.iter().enumerate() {
        for (item_index, item) in block.items.iter().enumerate() {
            let row = match item {
                Item::Music(music) => SetlistRow {
                    block_index,
                    block_name: block.name.clone(),
                    item_index,
                    item_type: ItemType::Music,
                    song_title: music.title.clone(),
                    artist: music.artist.clone(),
                    tom: music.current_key.to_string(),
                    bpm: music.bpm,
                    chord_ref: music.chord_ref.clone().unwrap_or_default(),
                    simplified_chord_ref: music.simplified_chord_ref.clone().unwrap_or_default(),
                    use_simplified: music.use_simplified,
                    pause_label: String::new(),
                },
                Item::Pause(pause) => SetlistRow {
                    block_index,
                    block_name: block.name.clone(),
                    item_index,
                    item_type: ItemType::Pause,
                    song_title: String::new(),
                    artist: String::new(),
                    tom: String::new(),
                    bpm: None,
                    chord_ref: String::new(),
                    simplified_chord_ref: String::new(),
                    use_simplified: false,
                    pause_label: pause.label.clone(),
                },
            };
            rows.push(row);
        }
    }
    rows
}

/// Rebuild a setlist from rows.
///
/// Rows may arrive in any order; grouping is by `(BlockIndex, BlockName)`
/// ascending with items ordered by `ItemIndex` inside each group. Zero rows
/// still yield a valid one-block setlist.
pub fn setlist_from_rows(name: &str, rows: &[SetlistRow]) -> Setlist {
    let mut groups: BTreeMap<(usize, &str), Vec<&SetlistRow>> = BTreeMap::new();
    for row in rows {
        groups
            .entry((row.block_index, row.block_name.as_str()))
            .or_default()
            .push(row);
    }

    let mut blocks = Vec::new();
    for ((_, block_name), mut group) in groups {
        group.sort_by_key(|row| row.item_index);
        blocks.push(Block {
            name: block_name.to_string(),
            items: group.iter().map(|row| row.to_item()).collect(),
        });
    }

    if blocks.is_empty() {
        return Setlist::new(name);
    }
    Setlist {
        name: name.to_string(),
        blocks,
    }
}

/// Encode rows as record text with a header line.
pub fn rows_to_csv(rows: &[SetlistRow]) -> String {
    let mut out = String::new();
    out.push_str(&SETLIST_HEADER.join(","));
    out.push('\n');
    for row in rows {
        let fields = [
            row.block_index.to_string(),
            escape_field(&row.block_name),
            row.item_index.to_string(),
            row.item_type.to_string(),
            escape_field(&row.song_title),
            escape_field(&row.artist),
            escape_field(&row.tom),
            row.bpm.map(|bpm| bpm.to_string()).unwrap_or_default(),
            escape_field(&row.chord_ref),
            escape_field(&row.simplified_chord_ref),
            if row.use_simplified { "1" } else { "0" }.to_string(),
            escape_field(&row.pause_label),
        ];
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

/// Parse record text back into rows.
///
/// Structural problems - wrong field count, unreadable indices, an unknown
/// item type - are errors carrying the offending 1-indexed line. A BPM that
/// does not parse degrades to none.
pub fn rows_from_csv(text: &str) -> Result<Vec<SetlistRow>, CifraError> {
    let mut rows = Vec::new();
    for (number, line) in text.lines().enumerate() {
        if number == 0 || line.trim().is_empty() {
            continue;
        }
        let line_no = number + 1;
        let fields = split_record(line);
        if fields.len() != SETLIST_HEADER.len() {
            return Err(CifraError::Record {
                line: line_no,
                message: format!(
                    "expected {} fields, found {}",
                    SETLIST_HEADER.len(),
                    fields.len()
                ),
            });
        }

        let block_index = parse_index(&fields[0], "BlockIndex", line_no)?;
        let item_index = parse_index(&fields[2], "ItemIndex", line_no)?;
        let item_type = ItemType::parse(&fields[3]).ok_or_else(|| CifraError::Record {
            line: line_no,
            message: format!("unknown item type '{}'", fields[3]),
        })?;
        let bpm = match fields[7].as_str() {
            "" => None,
            value => {
                let parsed = value.parse::<u16>().ok();
                if parsed.is_none() {
                    debug!(line = line_no, value, "ignoring unreadable BPM");
                }
                parsed
            }
        };
        let use_simplified = match fields[10].as_str() {
            "1" => true,
            "0" | "" => false,
            value => {
                return Err(CifraError::Record {
                    line: line_no,
                    message: format!("UseSimplified must be 0 or 1, found '{}'", value),
                })
            }
        };

        rows.push(SetlistRow {
            block_index,
            block_name: fields[1].clone(),
            item_index,
            item_type,
            song_title: fields[4].clone(),
            artist: fields[5].clone(),
            tom: fields[6].clone(),
            bpm,
            chord_ref: fields[8].clone(),
            simplified_chord_ref: fields[9].clone(),
            use_simplified,
            pause_label: fields[11].clone(),
        });
    }
    Ok(rows)
}

fn parse_index(value: &str, column: &str, line: usize) -> Result<usize, CifraError> {
    value.parse::<usize>().map_err(|_| CifraError::Record {
        line,
        message: format!("{} must be a number, found '{}'", column, value),
    })
}

/// Split one record line into fields, honoring double-quoted fields with
/// `""` escapes.
pub(crate) fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => fields.push(std::mem::take(&mut field)),
                _ => field.push(c),
            }
        }
    }
    fields.push(field);
    fields
}

pub(crate) fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
