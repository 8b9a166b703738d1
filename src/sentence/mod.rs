//! Sentence boundary detection.
//!
//! Splits a line of input into sentences before tokenization. Rule-based:
//! a terminator (`.`, `!`, `?`, `…`) ends a sentence when it is followed by
//! whitespace and a plausible sentence opener, with trailing closing quotes
//! and brackets kept attached to the sentence they close.

/// Words whose trailing period does not end a sentence.
const ABBREVIATIONS: &[&str] = &[
    "Mr", "Mrs", "Ms", "Dr", "Prof", "St", "Mt", "Jr", "Sr", "vs", "etc", "e.g", "i.e", "cf",
    "approx", "Fig", "No",
];

/// Splits `text` into an ordered batch of sentences.
///
/// Empty or whitespace-only input yields an empty batch. Non-empty input
/// with no detectable boundary yields a single-sentence batch; the caller
/// never has to distinguish "no boundary found" from "one sentence".
pub fn split_sentences(text: &str) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let chars: Vec<char> = trimmed.chars().collect();
    let n = chars.len();
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < n {
        if is_terminator(chars[i]) {
            if chars[i] == '.' && (is_decimal_point(&chars, i) || ends_abbreviation(&chars, start, i)) {
                i += 1;
                continue;
            }

            // Keep closing quotes and brackets attached to this sentence.
            let mut end = i;
            while end + 1 < n && is_closer(chars[end + 1]) {
                end += 1;
            }

            if boundary_follows(&chars, end) {
                push_trimmed(&mut sentences, &chars[start..=end]);
                let mut next = end + 1;
                while next < n && chars[next].is_whitespace() {
                    next += 1;
                }
                start = next;
                i = next;
                continue;
            }
        }
        i += 1;
    }

    if start < n {
        push_trimmed(&mut sentences, &chars[start..]);
    }

    sentences
}

fn push_trimmed(sentences: &mut Vec<String>, chars: &[char]) {
    let sentence: String = chars.iter().collect();
    let sentence = sentence.trim();
    if !sentence.is_empty() {
        sentences.push(sentence.to_string());
    }
}

const fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '…')
}

const fn is_closer(c: char) -> bool {
    matches!(c, '"' | '\'' | ')' | ']' | '»' | '”' | '’')
}

/// A terminator ends a sentence only at end of input, or before whitespace
/// followed by something that can open a sentence.
fn boundary_follows(chars: &[char], end: usize) -> bool {
    let mut j = end + 1;
    if j >= chars.len() {
        return true;
    }
    if !chars[j].is_whitespace() {
        return false;
    }
    while j < chars.len() && chars[j].is_whitespace() {
        j += 1;
    }
    if j >= chars.len() {
        return true;
    }
    let next = chars[j];
    next.is_uppercase() || next.is_numeric() || matches!(next, '"' | '\'' | '«' | '“' | '‘' | '(' | '[')
}

/// `3.14` — a period between digits is not a boundary.
fn is_decimal_point(chars: &[char], i: usize) -> bool {
    i > 0
        && i + 1 < chars.len()
        && chars[i - 1].is_ascii_digit()
        && chars[i + 1].is_ascii_digit()
}

/// Checks the word preceding the period against the abbreviation list, and
/// treats single uppercase letters as initials ("J. Smith").
fn ends_abbreviation(chars: &[char], start: usize, i: usize) -> bool {
    let mut w = i;
    while w > start && (chars[w - 1].is_alphanumeric() || chars[w - 1] == '.') {
        w -= 1;
    }
    let word: String = chars[w..i].iter().collect();
    if word.is_empty() {
        return false;
    }
    if word.chars().count() == 1 && word.chars().all(char::is_uppercase) {
        return true;
    }
    ABBREVIATIONS.iter().any(|a| word.eq_ignore_ascii_case(a))
}
