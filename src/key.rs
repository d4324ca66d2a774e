//! Musical key parsing and semitone arithmetic.
//!
//! A [`Key`] is the spelled key of a song ("C", "Bb", "F#m"). Spelling is part
//! of the value: `C#` and `Db` are distinct keys even though they share a
//! pitch class. Transposition works on pitch classes modulo 12 and re-spells
//! the result from the input root's sharp/flat preference.

use std::fmt;

use serde::{Serialize, Serializer};

/// The seven note letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteName {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl NoteName {
    /// Match an uppercase pitch letter A-G.
    pub fn from_char(c: char) -> Option<NoteName> {
        match c {
            'A' => Some(NoteName::A),
            'B' => Some(NoteName::B),
            'C' => Some(NoteName::C),
            'D' => Some(NoteName::D),
            'E' => Some(NoteName::E),
            'F' => Some(NoteName::F),
            'G' => Some(NoteName::G),
            _ => None,
        }
    }

    fn as_char(self) -> char {
        match self {
            NoteName::A => 'A',
            NoteName::B => 'B',
            NoteName::C => 'C',
            NoteName::D => 'D',
            NoteName::E => 'E',
            NoteName::F => 'F',
            NoteName::G => 'G',
        }
    }

    /// Semitone offset from C.
    fn semitone(self) -> i8 {
        match self {
            NoteName::C => 0,
            NoteName::D => 2,
            NoteName::E => 4,
            NoteName::F => 5,
            NoteName::G => 7,
            NoteName::A => 9,
            NoteName::B => 11,
        }
    }
}

/// Accidental attached to a root letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Accidental {
    #[default]
    Natural,
    Sharp,
    Flat,
}

/// A spelled root: note letter plus accidental.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Root {
    pub name: NoteName,
    pub accidental: Accidental,
}

impl Root {
    /// Pitch class in 0..=11. Sharp and flat spellings of the same pitch
    /// collapse to one class: `C#` and `Db` are both 1.
    pub fn pitch_class(self) -> u8 {
        let alter: i8 = match self.accidental {
            Accidental::Sharp => 1,
            Accidental::Flat => -1,
            Accidental::Natural => 0,
        };
        (self.name.semitone() + alter).rem_euclid(12) as u8
    }

    /// Transpose by `steps` semitones (may be negative) and re-spell.
    ///
    /// The re-spelling scale follows the input: a root spelled with a flat
    /// comes back in flat spelling, everything else in sharp spelling. The
    /// target key's conventional spelling is deliberately not consulted, so
    /// existing rendered output stays stable.
    pub fn transposed(self, steps: i32) -> Root {
        let class = (self.pitch_class() as i32 + steps).rem_euclid(12) as u8;
        Root::spelled(class, self.accidental == Accidental::Flat)
    }

    /// Spell a pitch class from the sharp or the flat scale.
    fn spelled(pitch_class: u8, prefer_flat: bool) -> Root {
        // 0=C, 1=C#/Db, 2=D, 3=D#/Eb, 4=E, 5=F, 6=F#/Gb, 7=G, 8=G#/Ab, 9=A, 10=A#/Bb, 11=B
        let (name, accidental) = match pitch_class {
            0 => (NoteName::C, Accidental::Natural),
            1 => {
                if prefer_flat {
                    (NoteName::D, Accidental::Flat)
                } else {
                    (NoteName::C, Accidental::Sharp)
                }
            }
            2 => (NoteName::D, Accidental::Natural),
            3 => {
                if prefer_flat {
                    (NoteName::E, Accidental::Flat)
                } else {
                    (NoteName::D, Accidental::Sharp)
                }
            }
            4 => (NoteName::E, Accidental::Natural),
            5 => (NoteName::F, Accidental::Natural),
            6 => {
                if prefer_flat {
                    (NoteName::G, Accidental::Flat)
                } else {
                    (NoteName::F, Accidental::Sharp)
                }
            }
            7 => (NoteName::G, Accidental::Natural),
            8 => {
                if prefer_flat {
                    (NoteName::A, Accidental::Flat)
                } else {
                    (NoteName::G, Accidental::Sharp)
                }
            }
            9 => (NoteName::A, Accidental::Natural),
            10 => {
                if prefer_flat {
                    (NoteName::B, Accidental::Flat)
                } else {
                    (NoteName::A, Accidental::Sharp)
                }
            }
            11 => (NoteName::B, Accidental::Natural),
            _ => unreachable!(),
        };
        Root { name, accidental }
    }
}

impl fmt::Display for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name.as_char())?;
        match self.accidental {
            Accidental::Sharp => write!(f, "#"),
            Accidental::Flat => write!(f, "b"),
            Accidental::Natural => Ok(()),
        }
    }
}

/// The spelled key of a song.
///
/// `quality` is the suffix after the root: empty for major, `"m"` for minor,
/// anything else carried through opaquely (`"m7"`, `"sus4"`). A key whose
/// input could not be parsed keeps `root: None` with the raw text preserved
/// in `quality`, so [`Display`](fmt::Display) round-trips and every
/// transposition on it is an identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    pub root: Option<Root>,
    pub quality: String,
}

impl Key {
    /// Parse a spelled key.
    ///
    /// The first character is the root letter (case-normalized to
    /// uppercase); a following `#` or `b` extends the root; the remainder is
    /// the quality. Fails soft: empty or unparseable input yields a rootless
    /// key instead of an error.
    ///
    /// # Example
    /// ```
    /// use cifra::key::Key;
    ///
    /// let key = Key::parse("F#m");
    /// assert_eq!(key.to_string(), "F#m");
    /// assert_eq!(key.quality, "m");
    ///
    /// // Unparseable input transposes as identity and displays as-is
    /// let junk = Key::parse("??");
    /// assert!(junk.root.is_none());
    /// assert_eq!(junk.transposed(3).to_string(), "??");
    /// ```
    pub fn parse(s: &str) -> Key {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let letter = chars.next().map(|c| c.to_ascii_uppercase());
        match letter.and_then(NoteName::from_char) {
            None => Key {
                root: None,
                quality: trimmed.to_string(),
            },
            Some(name) => {
                let rest = chars.as_str();
                let (accidental, quality) = match rest.chars().next() {
                    Some('#') => (Accidental::Sharp, &rest[1..]),
                    Some('b') => (Accidental::Flat, &rest[1..]),
                    _ => (Accidental::Natural, rest),
                };
                Key {
                    root: Some(Root { name, accidental }),
                    quality: quality.to_string(),
                }
            }
        }
    }

    /// Transpose the root by `steps` semitones; quality is unchanged.
    /// Identity when the root is absent.
    pub fn transposed(&self, steps: i32) -> Key {
        match self.root {
            Some(root) => Key {
                root: Some(root.transposed(steps)),
                quality: self.quality.clone(),
            },
            None => self.clone(),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(root) = self.root {
            write!(f, "{}", root)?;
        }
        write!(f, "{}", self.quality)
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Semitones up from `origin` to `target`, in 0..=11.
///
/// Returns 0 when either root failed to parse, so a bad key can never break
/// a transposition: the caller just gets the identity transform.
pub fn semitone_diff(origin: &Key, target: &Key) -> u8 {
    match (origin.root, target.root) {
        (Some(from), Some(to)) => {
            (to.pitch_class() as i8 - from.pitch_class() as i8).rem_euclid(12) as u8
        }
        _ => 0,
    }
}
