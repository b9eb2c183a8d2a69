/// True for code points in the CJK Unified Ideographs block (U+4E00..=U+9FFF).
pub fn is_han(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
}

/// Returns true as soon as any cell contains a Han character.
///
/// An empty batch has no Han characters.
pub fn has_han<I, S>(cells: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    cells
        .into_iter()
        .any(|cell| cell.as_ref().chars().any(is_han))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_chinese() {
        assert!(has_han(["翻译"]));
        assert!(has_han(["plain text", "mixed 翻译 text"]));
    }

    #[test]
    fn test_latin_only_is_not_han() {
        assert!(!has_han(["translation"]));
        assert!(!has_han(["café", "naïve", "Ελληνικά"]));
    }

    #[test]
    fn test_empty_batch() {
        assert!(!has_han(Vec::<String>::new()));
        assert!(!has_han([""]));
    }

    #[test]
    fn test_block_bounds() {
        assert!(is_han('\u{4E00}'));
        assert!(is_han('\u{9FFF}'));
        assert!(!is_han('\u{4DFF}'));
        assert!(!is_han('\u{A000}'));
        // Kana and full-width punctuation are outside the block.
        assert!(!has_han(["ひらがな", "。"]));
    }
}
