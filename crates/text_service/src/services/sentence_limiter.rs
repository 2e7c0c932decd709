//! Sentence-bounded truncation of generated text.
//!
//! A sentence is everything up to and including the next `.`, trimmed of
//! surrounding whitespace. The rule is intentionally naive: abbreviations,
//! decimals and quotes are not special-cased.

pub const SENTENCE_DELIMITER: char = '.';

/// Lazily yields each delimiter-terminated sentence of `text`, trimmed.
///
/// Text after the last delimiter is never yielded.
pub fn sentences(text: &str) -> Sentences<'_> {
    Sentences { rest: text }
}

pub struct Sentences<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Sentences<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let end = self.rest.find(SENTENCE_DELIMITER)? + SENTENCE_DELIMITER.len_utf8();
        let (sentence, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(sentence.trim())
    }
}

/// Keeps at most `max_sentences` leading sentences of `text`, joined by a
/// single space.
///
/// When no sentence is completed (no delimiter, or `max_sentences == 0`) the
/// input comes back unchanged.
pub fn limit_sentences(text: &str, max_sentences: usize) -> String {
    let kept: Vec<&str> = sentences(text).take(max_sentences).collect();

    if kept.is_empty() {
        return text.to_string();
    }

    kept.join(" ")
}
