//! Script detection for foreign display names
//!
//! Classification follows the East_Asian_Width property. Ambiguous comes
//! from the property table itself, since several Ambiguous characters
//! (accented Latin, combining marks, variation selectors) render narrow.
//! Fullwidth and Wide are the characters `unicode-width` renders double.

use std::cmp::Ordering;
use unicode_width::UnicodeWidthChar;

mod tables;

pub const MALE_SIGN: char = '♂';
pub const FEMALE_SIGN: char = '♀';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidthClass {
    /// Narrow, halfwidth, neutral, or zero width.
    Narrow,
    Ambiguous,
    /// Fullwidth or Wide.
    Wide,
}

pub fn classify(c: char) -> WidthClass {
    if is_ambiguous(c) {
        WidthClass::Ambiguous
    } else if c.width() == Some(2) {
        WidthClass::Wide
    } else {
        WidthClass::Narrow
    }
}

fn is_ambiguous(c: char) -> bool {
    let cp = c as u32;
    tables::AMBIGUOUS
        .binary_search_by(|&(start, end)| {
            if end < cp {
                Ordering::Less
            } else if start > cp {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        })
        .is_ok()
}

pub fn is_foreign_char(c: char) -> bool {
    classify(c) != WidthClass::Narrow
}

/// First character that marks `name` as a foreign display name.
pub fn first_foreign_char(name: &str) -> Option<char> {
    name.chars().find(|&c| is_foreign_char(c))
}

pub fn is_foreign(name: &str) -> bool {
    first_foreign_char(name).is_some()
}

/// Canonical name for a display name carrying a gender sign.
///
/// The two nidoran lines are spelled with the sign glyph in every script, so
/// they resolve without the translation table.
pub fn gender_sign_name(name: &str) -> Option<&'static str> {
    if name.contains(MALE_SIGN) {
        Some("nidoran-m")
    } else if name.contains(FEMALE_SIGN) {
        Some("nidoran-f")
    } else {
        None
    }
}
