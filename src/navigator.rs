//! # Page navigation
//!
//! Computes what the performer sees at the bottom of the current sheet: the
//! next song, the next pause, a block boundary, or the end of the whole set.
//!
//! This is a pure function of the setlist and a cursor - there is no state
//! carried between pages. Every page render re-evaluates the footer from
//! scratch, so edits to the setlist are always reflected on the next page.
//!
//! ## Footer rules
//! - The next item in the same block wins: [`Footer::NextPause`] if it is a
//!   pause, else [`Footer::NextMusic`], carrying the item itself.
//! - At the last item of a block, later blocks are scanned in order; the
//!   first one with any items yields [`Footer::EndOfBlock`]. Only the
//!   boundary is announced - the next block's first item is not revealed.
//! - With nothing left anywhere, [`Footer::EndOfSet`].

use serde::Serialize;

use crate::setlist::{Item, Music, Pause, Setlist};

/// A `(block, item)` position on the setlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cursor {
    pub block: usize,
    pub item: usize,
}

impl Cursor {
    pub fn new(block: usize, item: usize) -> Cursor {
        Cursor { block, item }
    }
}

/// The navigation hint shown at the bottom of a page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", content = "item", rename_all = "camelCase")]
pub enum Footer<'a> {
    /// The next entry in this block is a song.
    NextMusic(&'a Music),
    /// The next entry in this block is a pause.
    NextPause(&'a Pause),
    /// This block is done; a later block still has entries.
    EndOfBlock,
    /// Nothing follows anywhere: end of the whole set.
    EndOfSet,
}

/// Everything the presentation layer needs to render one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDescriptor<'a> {
    pub item: &'a Item,
    pub block_name: &'a str,
    pub footer: Footer<'a>,
}

/// Compute the page descriptor for a cursor.
///
/// Returns `None` only when the cursor does not address an item; navigation
/// itself never fails.
pub fn page_descriptor(setlist: &Setlist, cursor: Cursor) -> Option<PageDescriptor<'_>> {
    let block = setlist.blocks.get(cursor.block)?;
    let item = block.items.get(cursor.item)?;

    let footer = if let Some(next) = block.items.get(cursor.item + 1) {
        match next {
            Item::Pause(pause) => Footer::NextPause(pause),
            Item::Music(music) => Footer::NextMusic(music),
        }
    } else if setlist.blocks[cursor.block + 1..]
        .iter()
        .any(|later| !later.items.is_empty())
    {
        Footer::EndOfBlock
    } else {
        Footer::EndOfSet
    };

    Some(PageDescriptor {
        item,
        block_name: &block.name,
        footer,
    })
}
