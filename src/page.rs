//! Printable page assembly.
//!
//! One page is plain monospace text: a header with the song's fields, the
//! display body from the transform pipeline, and the footer hint from the
//! navigator. Visual styling belongs to whatever prints the page.

use crate::error::CifraError;
use crate::navigator::{page_descriptor, Cursor, Footer};
use crate::setlist::{Item, Setlist};
use crate::sheet::{render_display_text, split_frontmatter};
use crate::storage::ChordStore;

/// Body shown for a pause page.
pub const PAUSE_BODY: &str = "PAUSA";

/// The one-line navigation hint at the bottom of a page.
pub fn footer_line(footer: &Footer) -> String {
    match footer {
        Footer::NextMusic(music) => {
            format!("Próxima: {} ({})", music.title, music.current_key)
        }
        Footer::NextPause(pause) if pause.label.is_empty() => "Próxima: PAUSA".to_string(),
        Footer::NextPause(pause) => format!("Próxima: PAUSA – {}", pause.label),
        Footer::EndOfBlock => "Fim do bloco".to_string(),
        Footer::EndOfSet => "Fim do show".to_string(),
    }
}

/// Render the full page for a cursor position.
///
/// An out-of-bounds cursor renders an empty page; only a storage failure is
/// an error.
pub fn render_page(
    setlist: &Setlist,
    cursor: Cursor,
    store: &dyn ChordStore,
) -> Result<String, CifraError> {
    let descriptor = match page_descriptor(setlist, cursor) {
        Some(descriptor) => descriptor,
        None => return Ok(String::new()),
    };

    let mut page = String::new();
    match descriptor.item {
        Item::Music(music) => {
            page.push_str(&music.title);
            page.push('\n');
            if !music.artist.is_empty() {
                page.push_str(&music.artist);
                page.push('\n');
            }
            page.push_str(&format!("Tom: {}", music.current_key));
            if let Some(bpm) = music.bpm {
                page.push_str(&format!("   BPM: {}", bpm));
            }
            page.push('\n');
            page.push_str(&format!("Bloco: {}\n\n", descriptor.block_name));

            let raw = music.load_chord_text(store)?;
            let (_, body) = split_frontmatter(&raw);
            page.push_str(&render_display_text(
                body,
                &music.original_key,
                &music.current_key,
            ));
        }
        Item::Pause(pause) => {
            if pause.label.is_empty() {
                page.push_str(PAUSE_BODY);
            } else {
                page.push_str(&pause.label);
            }
            page.push('\n');
            page.push_str(&format!("Bloco: {}\n\n", descriptor.block_name));
            page.push_str(PAUSE_BODY);
            page.push('\n');
        }
    }

    page.push('\n');
    page.push_str(&footer_line(&descriptor.footer));
    page.push('\n');
    Ok(page)
}
