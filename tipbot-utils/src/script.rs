//! Writing-system checks applied before text-to-speech.
//!
//! Whitespace, ASCII digits and ASCII punctuation are neutral and accepted by
//! every check.

fn is_neutral(ch: char) -> bool {
    ch.is_whitespace() || ch.is_ascii_digit() || ch.is_ascii_punctuation()
}

/// English input is plain ASCII.
pub fn is_english(text: &str) -> bool {
    !text.trim().is_empty() && text.is_ascii()
}

fn is_khmer_char(ch: char) -> bool {
    matches!(ch, '\u{1780}'..='\u{17FF}' | '\u{19E0}'..='\u{19FF}')
}

fn is_chinese_char(ch: char) -> bool {
    matches!(
        ch,
        '\u{4E00}'..='\u{9FFF}'
            | '\u{3400}'..='\u{4DBF}'
            | '\u{20000}'..='\u{2A6DF}'
            | '\u{F900}'..='\u{FAFF}'
            | '\u{3000}'..='\u{303F}'
            | '\u{FF00}'..='\u{FFEF}'
    )
}

fn is_script(text: &str, in_script: fn(char) -> bool) -> bool {
    text.chars().any(in_script) && text.chars().all(|ch| in_script(ch) || is_neutral(ch))
}

pub fn is_khmer(text: &str) -> bool {
    is_script(text, is_khmer_char)
}

pub fn is_chinese(text: &str) -> bool {
    is_script(text, is_chinese_char)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_is_ascii() {
        assert!(is_english("Hello, world!"));
        assert!(!is_english("héllo"));
        assert!(!is_english("  "));
    }

    #[test]
    fn khmer_detection() {
        assert!(is_khmer("សួស្តី ពិភពលោក"));
        assert!(!is_khmer("សួស្តី hello"));
        assert!(!is_khmer("123"));
    }

    #[test]
    fn chinese_detection() {
        assert!(is_chinese("你好，世界"));
        assert!(is_chinese("你好 2024!"));
        assert!(!is_chinese("你好 world"));
        assert!(!is_chinese("សួស្តី"));
    }
}
