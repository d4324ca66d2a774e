//! The in-memory setlist: ordered blocks of songs and pauses.
//!
//! All editor mutations are index-addressed and panic-free: an out-of-bounds
//! index or a forbidden structural change (removing the last block) is a
//! no-op, never an error. Indices come from rendering the same structure
//! that is being mutated, so `(block, item)` pairs are the stable way to
//! address an entry; there is no reliance on object identity.

use serde::Serialize;

use crate::catalog::CatalogSong;
use crate::error::CifraError;
use crate::key::Key;
use crate::storage::ChordStore;

/// A song entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Music {
    pub title: String,
    pub artist: String,
    pub original_key: Key,
    pub current_key: Key,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bpm: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chord_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simplified_chord_ref: Option<String>,
    pub use_simplified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_text: Option<String>,
}

impl Music {
    /// Build a setlist entry from a catalog song. The performing key starts
    /// at the original key.
    pub fn from_catalog(song: &CatalogSong) -> Music {
        Music {
            title: song.title.clone(),
            artist: song.artist.clone(),
            original_key: song.tom.clone(),
            current_key: song.tom.clone(),
            bpm: song.bpm,
            chord_ref: song.chord_ref.clone(),
            simplified_chord_ref: song.simplified_chord_ref.clone(),
            use_simplified: false,
            inline_text: None,
        }
    }

    /// The reference chord text should be read from, honoring the simplified
    /// variant when selected and available.
    pub fn active_ref(&self) -> Option<&str> {
        if self.use_simplified {
            if let Some(simplified) = self.simplified_chord_ref.as_deref() {
                return Some(simplified);
            }
        }
        self.chord_ref.as_deref()
    }

    /// Load the raw stored chord text behind this song.
    ///
    /// Falls back to the inline text (then an empty body) when no reference
    /// is set. A storage failure stays a typed error - it is never handed
    /// back as if it were body text.
    pub fn load_chord_text(&self, store: &dyn ChordStore) -> Result<String, CifraError> {
        match self.active_ref() {
            Some(reference) => store.read(reference),
            None => Ok(self.inline_text.clone().unwrap_or_default()),
        }
    }
}

/// A pause between songs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pause {
    pub label: String,
}

/// One entry of a block.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Item {
    Music(Music),
    Pause(Pause),
}

/// A named, ordered run of items.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub name: String,
    pub items: Vec<Item>,
}

impl Block {
    pub fn new(name: &str) -> Block {
        Block {
            name: name.to_string(),
            items: Vec::new(),
        }
    }
}

/// Direction of a reorder swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    fn offset(self) -> isize {
        match self {
            Direction::Up => -1,
            Direction::Down => 1,
        }
    }
}

/// The whole setlist. Always holds at least one block.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Setlist {
    pub name: String,
    pub blocks: Vec<Block>,
}

impl Setlist {
    /// A fresh setlist with one empty starting block.
    pub fn new(name: &str) -> Setlist {
        Setlist {
            name: name.to_string(),
            blocks: vec![Block::new("Bloco 1")],
        }
    }

    pub fn add_block(&mut self, name: &str) {
        self.blocks.push(Block::new(name));
    }

    pub fn rename_block(&mut self, block_idx: usize, name: &str) {
        if let Some(block) = self.blocks.get_mut(block_idx) {
            block.name = name.to_string();
        }
    }

    /// Swap a block with its neighbor. No-op past either end.
    pub fn move_block(&mut self, block_idx: usize, direction: Direction) {
        let target = block_idx as isize + direction.offset();
        if block_idx >= self.blocks.len() || target < 0 || target as usize >= self.blocks.len() {
            return;
        }
        self.blocks.swap(block_idx, target as usize);
    }

    /// Remove a block. Refuses (no-op) when it is the last one left.
    pub fn delete_block(&mut self, block_idx: usize) {
        if self.blocks.len() > 1 && block_idx < self.blocks.len() {
            self.blocks.remove(block_idx);
        }
    }

    /// Swap an item with its neighbor inside its block. No-op past either
    /// end.
    pub fn move_item(&mut self, block_idx: usize, item_idx: usize, direction: Direction) {
        if let Some(block) = self.blocks.get_mut(block_idx) {
            let target = item_idx as isize + direction.offset();
            if item_idx >= block.items.len() || target < 0 || target as usize >= block.items.len()
            {
                return;
            }
            block.items.swap(item_idx, target as usize);
        }
    }

    pub fn delete_item(&mut self, block_idx: usize, item_idx: usize) {
        if let Some(block) = self.blocks.get_mut(block_idx) {
            if item_idx < block.items.len() {
                block.items.remove(item_idx);
            }
        }
    }

    /// Append a song from the catalog to a block.
    pub fn add_music_from_catalog(&mut self, block_idx: usize, song: &CatalogSong) {
        if let Some(block) = self.blocks.get_mut(block_idx) {
            block.items.push(Item::Music(Music::from_catalog(song)));
        }
    }

    /// Append a pause to a block.
    pub fn add_pause(&mut self, block_idx: usize, label: &str) {
        if let Some(block) = self.blocks.get_mut(block_idx) {
            block.items.push(Item::Pause(Pause {
                label: label.to_string(),
            }));
        }
    }

    /// Change the performing key of a song. The only field retuning touches
    /// is `current_key`; a pause or a bad index is a no-op.
    pub fn retune(&mut self, block_idx: usize, item_idx: usize, key: Key) {
        if let Some(Item::Music(music)) = self
            .blocks
            .get_mut(block_idx)
            .and_then(|block| block.items.get_mut(item_idx))
        {
            music.current_key = key;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(title: &str, tom: &str) -> CatalogSong {
        CatalogSong {
            title: title.to_string(),
            artist: "PDL".to_string(),
            tom: Key::parse(tom),
            bpm: Some(120),
            chord_ref: Some(format!("cifras/{}.txt", title)),
            simplified_chord_ref: None,
        }
    }

    fn two_block_setlist() -> Setlist {
        let mut setlist = Setlist::new("Ensaio");
        setlist.add_music_from_catalog(0, &song("Primeira", "C"));
        setlist.add_pause(0, "Troca de violão");
        setlist.add_block("Bloco 2");
        setlist.add_music_from_catalog(1, &song("Segunda", "G"));
        setlist
    }

    #[test]
    fn test_new_setlist_has_one_block() {
        let setlist = Setlist::new("Ensaio");
        assert_eq!(setlist.blocks.len(), 1);
        assert!(setlist.blocks[0].items.is_empty());
    }

    #[test]
    fn test_add_music_starts_at_original_key() {
        let setlist = two_block_setlist();
        match &setlist.blocks[0].items[0] {
            Item::Music(music) => {
                assert_eq!(music.original_key, music.current_key);
                assert_eq!(music.current_key.to_string(), "C");
                assert!(!music.use_simplified);
            }
            Item::Pause(_) => panic!("expected a music item"),
        }
    }

    #[test]
    fn test_move_item_swaps_neighbors() {
        let mut setlist = two_block_setlist();
        setlist.move_item(0, 0, Direction::Down);
        assert!(matches!(setlist.blocks[0].items[0], Item::Pause(_)));
        assert!(matches!(setlist.blocks[0].items[1], Item::Music(_)));

        setlist.move_item(0, 1, Direction::Up);
        assert!(matches!(setlist.blocks[0].items[0], Item::Music(_)));
    }

    #[test]
    fn test_move_item_out_of_bounds_is_noop() {
        let mut setlist = two_block_setlist();
        let before = setlist.clone();
        setlist.move_item(0, 0, Direction::Up);
        setlist.move_item(0, 1, Direction::Down);
        setlist.move_item(0, 9, Direction::Up);
        setlist.move_item(7, 0, Direction::Down);
        assert_eq!(setlist, before);
    }

    #[test]
    fn test_delete_item() {
        let mut setlist = two_block_setlist();
        setlist.delete_item(0, 0);
        assert_eq!(setlist.blocks[0].items.len(), 1);
        assert!(matches!(setlist.blocks[0].items[0], Item::Pause(_)));

        let before = setlist.clone();
        setlist.delete_item(0, 5);
        assert_eq!(setlist, before);
    }

    #[test]
    fn test_move_block() {
        let mut setlist = two_block_setlist();
        setlist.move_block(0, Direction::Down);
        assert_eq!(setlist.blocks[0].name, "Bloco 2");

        let before = setlist.clone();
        setlist.move_block(1, Direction::Down);
        assert_eq!(setlist, before);
    }

    #[test]
    fn test_delete_block_refuses_last() {
        let mut setlist = Setlist::new("Ensaio");
        setlist.delete_block(0);
        assert_eq!(setlist.blocks.len(), 1);

        setlist.add_block("Bloco 2");
        setlist.delete_block(0);
        assert_eq!(setlist.blocks.len(), 1);
        assert_eq!(setlist.blocks[0].name, "Bloco 2");
    }

    #[test]
    fn test_rename_block() {
        let mut setlist = Setlist::new("Ensaio");
        setlist.rename_block(0, "Acústico");
        assert_eq!(setlist.blocks[0].name, "Acústico");
        setlist.rename_block(4, "nope");
        assert_eq!(setlist.blocks.len(), 1);
    }

    #[test]
    fn test_retune_changes_only_current_key() {
        let mut setlist = two_block_setlist();
        setlist.retune(0, 0, Key::parse("D"));
        match &setlist.blocks[0].items[0] {
            Item::Music(music) => {
                assert_eq!(music.current_key.to_string(), "D");
                assert_eq!(music.original_key.to_string(), "C");
            }
            Item::Pause(_) => panic!("expected a music item"),
        }

        // retuning a pause is a no-op
        let before = setlist.clone();
        setlist.retune(0, 1, Key::parse("E"));
        assert_eq!(setlist, before);
    }

    #[test]
    fn test_active_ref_prefers_simplified_when_selected() {
        let mut music = Music::from_catalog(&song("Primeira", "C"));
        music.simplified_chord_ref = Some("cifras/primeira_s.txt".to_string());
        assert_eq!(music.active_ref(), Some("cifras/Primeira.txt"));

        music.use_simplified = true;
        assert_eq!(music.active_ref(), Some("cifras/primeira_s.txt"));

        // selected but missing falls back to the plain ref
        music.simplified_chord_ref = None;
        assert_eq!(music.active_ref(), Some("cifras/Primeira.txt"));
    }
}
