//! Cifra: a setlist and chord-sheet engine for band performance pages.
//!
//! The crate covers the logic between stored chord sheets and the printed
//! page: key transposition over the marker text format, the editable
//! setlist of blocks and items, next-item navigation for page footers, and
//! the storage/record contracts at the boundary.

pub mod catalog;
pub mod error;
pub mod key;
pub mod navigator;
pub mod page;
pub mod records;
pub mod setlist;
pub mod sheet;
pub mod storage;

pub use catalog::{Catalog, CatalogSong};
pub use error::CifraError;
pub use key::{semitone_diff, Key};
pub use navigator::{page_descriptor, Cursor, Footer, PageDescriptor};
pub use page::{footer_line, render_page};
pub use records::{rows_from_csv, rows_to_csv, setlist_from_rows, setlist_to_rows, SetlistRow};
pub use setlist::{Block, Direction, Item, Music, Pause, Setlist};
pub use sheet::{render_display_text, SheetMeta};
pub use storage::{ChordStore, DirStore, MemoryStore};

/// Transpose a chord-sheet body between two spelled keys and return the
/// performer-facing display text.
///
/// This is the string-keyed convenience over
/// [`sheet::render_display_text`]; an unparseable key degrades to the
/// identity transform.
///
/// # Example
/// ```
/// let display = cifra::transpose_sheet("|C   G\n You  and I\n", "C", "D");
/// assert_eq!(display, "D   A\nYou  and I\n");
/// ```
pub fn transpose_sheet(raw: &str, origin: &str, target: &str) -> String {
    sheet::render_display_text(raw, &Key::parse(origin), &Key::parse(target))
}

/// Like [`transpose_sheet`], but reading the origin key from the document's
/// frontmatter `tom` field (identity when absent) and stripping the
/// frontmatter block from the output.
pub fn transpose_sheet_auto(raw: &str, target: &str) -> Result<String, CifraError> {
    let (meta, body) = sheet::document_meta(raw)?;
    let origin = meta.and_then(|m| m.tom).unwrap_or_default();
    Ok(sheet::render_display_text(
        body,
        &Key::parse(&origin),
        &Key::parse(target),
    ))
}
