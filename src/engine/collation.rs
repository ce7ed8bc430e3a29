//! Locale-aware string ordering for choice lists
//!
//! Strings are compared in three passes, each only breaking ties of the
//! previous one: base letters (accents stripped, case folded), then accents,
//! then case.

use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Coarse character class: separators and symbols, then digits, then letters
fn class(c: char) -> u8 {
    if c.is_alphabetic() {
        2
    } else if c.is_numeric() {
        1
    } else {
        0
    }
}

/// One collation element: a case-folded base character and what decorated it
struct Unit {
    class: u8,
    base: char,
    marks: Vec<char>,
    upper: bool,
}

fn units(s: &str) -> Vec<Unit> {
    let mut out: Vec<Unit> = Vec::new();
    for c in s.nfd() {
        if is_combining_mark(c) {
            if let Some(last) = out.last_mut() {
                last.marks.push(c);
            }
            continue;
        }
        let upper = c.is_uppercase();
        for lower in c.to_lowercase() {
            if lower == 'ß' {
                // Expands to "ss"; the marker sorts it after a plain "ss"
                out.push(Unit { class: 2, base: 's', marks: vec!['ß'], upper });
                out.push(Unit { class: 2, base: 's', marks: Vec::new(), upper });
            } else {
                out.push(Unit { class: class(lower), base: lower, marks: Vec::new(), upper });
            }
        }
    }
    out
}

/// Compare two strings the way a human-facing sorted list expects.
///
/// `é` and `ñ` sort next to `e` and `n`, `ß` next to `ss`. Among strings equal
/// up to accents, unaccented sorts first; among strings equal up to case,
/// lowercase sorts first.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let (ua, ub) = (units(a), units(b));
    ua.iter()
        .map(|u| (u.class, u.base))
        .cmp(ub.iter().map(|u| (u.class, u.base)))
        .then_with(|| ua.iter().map(|u| &u.marks).cmp(ub.iter().map(|u| &u.marks)))
        .then_with(|| ua.iter().map(|u| u.upper).cmp(ub.iter().map(|u| u.upper)))
        .then_with(|| a.cmp(b))
}

/// Stable in-place sort by [`locale_cmp`]
pub fn sort_locale(values: &mut [String]) {
    values.sort_by(|a, b| locale_cmp(a, b));
}
