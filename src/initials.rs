//! # Initials
//!
//! Derives the short avatar text from a free-form name.
//!
//! ```
//! use monogram::initials::extract_initials;
//!
//! assert_eq!(extract_initials("John Smith"), "JS");
//! assert_eq!(extract_initials("  ada   lovelace king "), "AK");
//! assert_eq!(extract_initials("Madonna"), "M");
//! assert_eq!(extract_initials("   "), "");
//! ```
//!
//! Operates on grapheme clusters, so a flag emoji or an accented letter
//! written with a combining mark is taken whole.

use unicode_segmentation::UnicodeSegmentation;

/// Extract up to two uppercase initials from a name.
///
/// - no words → `""`
/// - one word → its first grapheme
/// - two or more → first grapheme of the first and of the last word
pub fn extract_initials(name: &str) -> String {
    let mut words = name.split_whitespace();

    let Some(first) = words.next() else {
        return String::new();
    };

    let mut initials = first_grapheme(first).to_uppercase();
    if let Some(last) = words.last() {
        initials.push_str(&first_grapheme(last).to_uppercase());
    }
    initials
}

/// True when `text` already looks like initials: one or two graphemes,
/// each carrying an uppercase letter and no lowercase one.
///
/// Caseless scripts and digits never qualify, so `"李明"` still goes through
/// [`extract_initials`].
pub fn is_initials(text: &str) -> bool {
    let count = text.graphemes(true).count();
    (1..=2).contains(&count)
        && text.graphemes(true).all(|g| {
            g.chars().any(char::is_uppercase) && !g.chars().any(char::is_lowercase)
        })
}

fn first_grapheme(word: &str) -> &str {
    word.graphemes(true).next().unwrap_or("")
}
