//! Token escaping
//!
//! The bracketed notation uses `(`, `)` and the whitespace the tokenizer skips (space,
//! tab, CR, LF) as structure, so token text can carry none of them literally. Before a surface or tag is embedded each of those
//! characters is swapped for a private sentinel, and the finished tree is decoded back.
//! The sentinels live in the Unicode private use area, which TreeTagger never prints.

const OPEN_PAREN_SENTINEL: &str = "\u{E000}LRB\u{E001}";
const CLOSE_PAREN_SENTINEL: &str = "\u{E000}RRB\u{E001}";
const SPACE_SENTINEL: &str = "\u{E000}SP\u{E001}";
const TAB_SENTINEL: &str = "\u{E000}HT\u{E001}";
const CR_SENTINEL: &str = "\u{E000}CR\u{E001}";
const LF_SENTINEL: &str = "\u{E000}LF\u{E001}";

/// Replace structural characters with their sentinels.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' => escaped.push_str(OPEN_PAREN_SENTINEL),
            ')' => escaped.push_str(CLOSE_PAREN_SENTINEL),
            ' ' => escaped.push_str(SPACE_SENTINEL),
            '\t' => escaped.push_str(TAB_SENTINEL),
            '\r' => escaped.push_str(CR_SENTINEL),
            '\n' => escaped.push_str(LF_SENTINEL),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Reverse [`escape`].
pub fn unescape(text: &str) -> String {
    if !text.contains('\u{E000}') {
        return text.to_string();
    }
    text.replace(OPEN_PAREN_SENTINEL, "(")
        .replace(CLOSE_PAREN_SENTINEL, ")")
        .replace(SPACE_SENTINEL, " ")
        .replace(TAB_SENTINEL, "\t")
        .replace(CR_SENTINEL, "\r")
        .replace(LF_SENTINEL, "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_removes_structural_characters() {
        let escaped = escape("(laughs) out\tloud\r\n");
        assert!(!escaped.contains(['(', ')', ' ', '\t', '\r', '\n']));
    }

    #[test]
    fn test_unescape_restores_text() {
        for text in ["(laughs)", ")(", "plain", "", "a (b) c", ":-)", "a\tb", "x\r\ny"] {
            assert_eq!(unescape(&escape(text)), text);
        }
    }

    #[test]
    fn test_plain_text_is_untouched() {
        assert_eq!(escape("airspeed"), "airspeed");
        assert_eq!(unescape("airspeed"), "airspeed");
    }
}
