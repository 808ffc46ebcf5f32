//! Text segmentation: sentences, clauses, and word/punctuation tokens.
//!
//! Boundaries never fall inside a token, so the tokens of a text are
//! exactly the concatenated tokens of its sentences, and those of a
//! sentence the concatenated tokens of its clauses.

use std::sync::LazyLock;

use regex::Regex;

/// Maximal word-character runs, or single non-word non-space characters.
static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+|[^\w\s]").expect("token pattern is valid"));

/// Split text into sentences at whitespace following a terminator.
///
/// The terminator stays with its sentence, surrounding whitespace is
/// trimmed and empty pieces are dropped.
pub fn split_sentences<'a>(text: &'a str, terminators: &[char]) -> Vec<&'a str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut prev: Option<char> = None;

    for (i, ch) in text.char_indices() {
        if ch.is_whitespace() && prev.is_some_and(|p| terminators.contains(&p)) {
            push_trimmed(&mut sentences, &text[start..i]);
            start = i;
        }
        prev = Some(ch);
    }
    push_trimmed(&mut sentences, &text[start..]);

    sentences
}

/// Split a sentence into clauses after each separator.
pub fn split_clauses<'a>(sentence: &'a str, separators: &[char]) -> Vec<&'a str> {
    let mut clauses = Vec::new();
    let mut start = 0;

    for (i, ch) in sentence.char_indices() {
        if separators.contains(&ch) {
            let end = i + ch.len_utf8();
            push_trimmed(&mut clauses, &sentence[start..end]);
            start = end;
        }
    }
    push_trimmed(&mut clauses, &sentence[start..]);

    clauses
}

/// Tokenize a phrase into word runs and single punctuation characters.
/// Whitespace is dropped.
pub fn phrase_tokens(text: &str) -> Vec<&str> {
    TOKEN_RE.find_iter(text).map(|m| m.as_str()).collect()
}

/// Whether a token is stored as a word (every char alphanumeric) rather
/// than as a single character entry.
pub fn is_word_token(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphanumeric)
}

fn push_trimmed<'a>(out: &mut Vec<&'a str>, piece: &'a str) {
    let trimmed = piece.trim();
    if !trimmed.is_empty() {
        out.push(trimmed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TERMS: &[char] = &['.', '!', '?'];
    const SEPS: &[char] = &[',', ';'];

    #[test]
    fn split_sentences_basic() {
        let sentences = split_sentences("Hello world. How are you? I am fine!", TERMS);
        assert_eq!(sentences, vec!["Hello world.", "How are you?", "I am fine!"]);
    }

    #[test]
    fn split_sentences_needs_whitespace_after_terminator() {
        // "3.14" and "e.g" have no whitespace after the dot
        let sentences = split_sentences("Pi is 3.14 roughly. Next", TERMS);
        assert_eq!(sentences, vec!["Pi is 3.14 roughly.", "Next"]);
    }

    #[test]
    fn split_sentences_no_breaks() {
        let sentences = split_sentences("Single continuous text", TERMS);
        assert_eq!(sentences, vec!["Single continuous text"]);
    }

    #[test]
    fn split_sentences_empty() {
        assert!(split_sentences("", TERMS).is_empty());
        assert!(split_sentences("   \n ", TERMS).is_empty());
    }

    #[test]
    fn split_sentences_repeated_terminators() {
        let sentences = split_sentences("Wait...  What?!\nOk", TERMS);
        assert_eq!(sentences, vec!["Wait...", "What?!", "Ok"]);
    }

    #[test]
    fn split_clauses_keeps_separator() {
        let clauses = split_clauses("first, second; third.", SEPS);
        assert_eq!(clauses, vec!["first,", "second;", "third."]);
    }

    #[test]
    fn split_clauses_single() {
        assert_eq!(split_clauses("Hi.", SEPS), vec!["Hi."]);
        assert_eq!(split_clauses("trailing,", SEPS), vec!["trailing,"]);
    }

    #[test]
    fn phrase_tokens_splits_punctuation() {
        assert_eq!(phrase_tokens("hello, world!"), vec!["hello", ",", "world", "!"]);
        assert_eq!(phrase_tokens("  "), Vec::<&str>::new());
        assert_eq!(phrase_tokens("it's"), vec!["it", "'", "s"]);
        assert_eq!(phrase_tokens("snake_case x2"), vec!["snake_case", "x2"]);
    }

    #[test]
    fn phrase_tokens_unicode() {
        assert_eq!(phrase_tokens("café—ok"), vec!["café", "—", "ok"]);
    }

    #[test]
    fn clause_tokens_partition_sentence_tokens() {
        let sentence = "alpha, beta; gamma, delta!";
        let from_clauses: Vec<&str> = split_clauses(sentence, SEPS)
            .into_iter()
            .flat_map(phrase_tokens)
            .collect();
        assert_eq!(from_clauses, phrase_tokens(sentence));
    }

    #[test]
    fn word_token_classification() {
        assert!(is_word_token("hello"));
        assert!(is_word_token("42"));
        assert!(is_word_token("héllo"));
        assert!(!is_word_token(","));
        assert!(!is_word_token("snake_case"));
        assert!(!is_word_token(""));
    }
}
