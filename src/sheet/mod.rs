//! # Chord-sheet documents
//!
//! A stored chord sheet is plain line-oriented text in the marker format:
//!
//! | Line prefix | Kind | Content after prefix |
//! |---|---|---|
//! | `\|` (pipe) | chord line | chord tokens, column-aligned to the lyric line below |
//! | one space | lyric line | lyric text, column-aligned to the chord line above |
//! | anything else | plain line | passed through verbatim |
//!
//! The display pipeline turns one stored document into the performer-facing
//! text, in a fixed order of pure stages:
//!
//! 1. [`transpose_body`] - re-root every chord token on chord lines
//! 2. [`normalize_indent`] - drop the single-space marker from lyric lines
//! 3. [`strip_markers`] - drop the `|` marker from chord lines
//!
//! Because both markers are exactly one character wide, stripping them keeps
//! the monospace column alignment between a chord and the syllable under it.
//! Transposition that grows a token (`C` to `C#`) shifts that alignment; the
//! stored sheets rely on the uncompensated behavior, so no compensation is
//! applied.
//!
//! A document may additionally open with a YAML frontmatter block between
//! `---` fences (see [`meta`]); the block is split off before any line
//! classification happens.
//!
//! ## Entry point
//! [`render_display_text`] composes the three stages.

mod line;
mod meta;
mod transform;


pub use line::{LineKind, CHORD_MARKER, LYRIC_MARKER};
pub use meta::{document_meta, split_frontmatter, SheetMeta};
pub use transform::{normalize_indent, render_display_text, strip_markers, transpose_body};
