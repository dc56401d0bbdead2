//! Text transforms applied to selected cells

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextTransform {
    Uppercase,
    Lowercase,
    Trim,
    /// First letter of every word upper-cased, the rest lower-cased
    Capitalize,
}

impl TextTransform {
    pub fn apply(&self, text: &str) -> String {
        match self {
            TextTransform::Uppercase => text.to_uppercase(),
            TextTransform::Lowercase => text.to_lowercase(),
            TextTransform::Trim => text.trim().to_string(),
            TextTransform::Capitalize => capitalize_words(text),
        }
    }
}

fn capitalize_words(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if ch.is_whitespace() {
            at_word_start = true;
            out.push(ch);
        } else if at_word_start {
            out.extend(ch.to_uppercase());
            at_word_start = false;
        } else {
            out.extend(ch.to_lowercase());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transforms() {
        assert_eq!(TextTransform::Uppercase.apply("abc Déf"), "ABC DÉF");
        assert_eq!(TextTransform::Lowercase.apply("ABC"), "abc");
        assert_eq!(TextTransform::Trim.apply("  pad \t"), "pad");
        assert_eq!(
            TextTransform::Capitalize.apply("hello WORLD  again"),
            "Hello World  Again"
        );
    }
}
