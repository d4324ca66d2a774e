//! The display pipeline: transpose, normalize indentation, strip markers.

use super::line::{LineKind, CHORD_MARKER};
use crate::key::{semitone_diff, Accidental, Key, NoteName, Root};

/// Transpose every chord line of `raw` from `origin` to `target`.
///
/// When the two keys are the same pitch class (or either fails to parse) the
/// text comes back unchanged. Otherwise each chord line is scanned, after its
/// leading `|`, for pitch letters A-G with an optional `#`/`b`, and each
/// matched root is substituted in place. Everything around the roots - chord
/// qualities like `m7` or `sus4`, spacing, slashes - is copied through, and
/// lyric and plain lines are never touched.
pub fn transpose_body(raw: &str, origin: &Key, target: &Key) -> String {
    let steps = semitone_diff(origin, target);
    if steps == 0 {
        return raw.to_string();
    }
    let mut out = String::with_capacity(raw.len() + 16);
    for line in raw.split_inclusive('\n') {
        if LineKind::of(line) == LineKind::Chord {
            out.push(CHORD_MARKER);
            transpose_chord_text(&line[1..], steps as i32, &mut out);
        } else {
            out.push_str(line);
        }
    }
    out
}

/// Scan chord text and replace each root with its transposed spelling.
/// Only the matched root substring changes, so any trailing chord quality
/// stays attached to the new root.
fn transpose_chord_text(content: &str, steps: i32, out: &mut String) {
    let mut chars = content.chars().peekable();
    while let Some(c) = chars.next() {
        if let Some(name) = NoteName::from_char(c) {
            let accidental = match chars.peek() {
                Some('#') => {
                    chars.next();
                    Accidental::Sharp
                }
                Some('b') => {
                    chars.next();
                    Accidental::Flat
                }
                _ => Accidental::Natural,
            };
            let root = Root { name, accidental }.transposed(steps);
            out.push_str(&root.to_string());
        } else {
            out.push(c);
        }
    }
}

/// Strip exactly one leading space from every lyric line.
///
/// Idempotent on normalized text: a stripped lyric line no longer starts
/// with a space, so a second pass classifies it as plain and leaves it
/// alone.
pub fn normalize_indent(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        match LineKind::of(line) {
            LineKind::Lyric => out.push_str(&line[1..]),
            _ => out.push_str(line),
        }
    }
    out
}

/// Strip exactly the leading `|` from every chord line, exposing the chord
/// text for display.
pub fn strip_markers(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        match LineKind::of(line) {
            LineKind::Chord => out.push_str(&line[1..]),
            _ => out.push_str(line),
        }
    }
    out
}

/// Produce the performer-facing display text for one stored document body.
///
/// # Example
/// ```
/// use cifra::key::Key;
/// use cifra::sheet::render_display_text;
///
/// let raw = "|C   G\n You  and I\n";
/// let display = render_display_text(raw, &Key::parse("C"), &Key::parse("D"));
/// assert_eq!(display, "D   A\nYou  and I\n");
/// ```
pub fn render_display_text(raw: &str, origin: &Key, target: &Key) -> String {
    strip_markers(&normalize_indent(&transpose_body(raw, origin, target)))
}
