//! Tokenizing tweet text and counting word frequencies.

use super::stopwords::is_stopword;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::LazyLock;

/// A word character followed by at least one word character or apostrophe.
pub static TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w[\w']+").expect("Invalid token regex pattern"));

/// A counted word.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordFrequency {
    /// Most common spelling of the word.
    pub word: String,
    /// Occurrences across all casings.
    pub count: u64,
    /// `count` relative to the most frequent word, in `(0, 1]`.
    pub weight: f64,
}

/// Yields the countable tokens of `text`.
///
/// A trailing `'s` is dropped; numbers and stopwords are skipped.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    TOKEN_REGEX
        .find_iter(text)
        .map(|m| {
            let token = m.as_str();
            let possessive = token.len() >= 2
                && token.is_char_boundary(token.len() - 2)
                && token[token.len() - 2..].eq_ignore_ascii_case("'s");
            if possessive {
                &token[..token.len() - 2]
            } else {
                token
            }
        })
        .filter(|token| !token.is_empty())
        .filter(|token| !token.chars().all(char::is_numeric))
        .filter(|token| !is_stopword(token))
}

/// Counts words across `texts`, case-insensitively, and keeps the
/// `max_words` most frequent.
///
/// Each word is shown in its most common casing. A plural ending in a
/// single `s` is folded into its singular when both occur.
#[allow(clippy::cast_precision_loss)]
pub fn word_frequencies<'a, I>(texts: I, max_words: usize) -> Vec<WordFrequency>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut by_key: HashMap<String, HashMap<String, u64>> = HashMap::new();
    for text in texts {
        for token in tokenize(text) {
            *by_key
                .entry(token.to_lowercase())
                .or_default()
                .entry(token.to_string())
                .or_insert(0) += 1;
        }
    }

    fold_plurals(&mut by_key);

    let mut counted: Vec<(String, u64)> = by_key
        .into_values()
        .map(|spellings| {
            let total = spellings.values().sum();
            let word = spellings
                .into_iter()
                .max_by(|(a_word, a), (b_word, b)| a.cmp(b).then_with(|| b_word.cmp(a_word)))
                .map(|(word, _)| word)
                .unwrap_or_default();
            (word, total)
        })
        .collect();
    counted.sort_by(|(a_word, a), (b_word, b)| b.cmp(a).then_with(|| a_word.cmp(b_word)));
    counted.truncate(max_words);

    let top = counted.first().map_or(1, |(_, c)| *c).max(1) as f64;
    counted
        .into_iter()
        .map(|(word, count)| WordFrequency {
            word,
            count,
            weight: count as f64 / top,
        })
        .collect()
}

fn fold_plurals(by_key: &mut HashMap<String, HashMap<String, u64>>) {
    let plurals: Vec<String> = by_key
        .keys()
        .filter(|key| key.ends_with('s') && !key.ends_with("ss"))
        .filter(|key| by_key.contains_key(&key[..key.len() - 1]))
        .cloned()
        .collect();

    for plural in plurals {
        let Some(spellings) = by_key.remove(&plural) else {
            continue;
        };
        let singular = by_key.entry(plural[..plural.len() - 1].to_string()).or_default();
        for (spelling, count) in spellings {
            let trimmed = spelling
                .strip_suffix('s')
                .or_else(|| spelling.strip_suffix('S'))
                .unwrap_or(&spelling)
                .to_string();
            *singular.entry(trimmed).or_insert(0) += count;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_skips_noise() {
        let tokens: Vec<&str> =
            tokenize("RT @united the flight's 2nd delay 2015 http://t.co/abc I").collect();
        assert_eq!(tokens, vec!["united", "flight", "2nd", "delay", "abc"]);
    }

    #[test]
    fn test_counts_across_casing() {
        let freqs = word_frequencies(["Delay delay DELAY delay", "crew"], 10);
        assert_eq!(freqs[0].word, "delay");
        assert_eq!(freqs[0].count, 4);
        assert!((freqs[0].weight - 1.0).abs() < f64::EPSILON);
        assert_eq!(freqs[1].word, "crew");
        assert!((freqs[1].weight - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_plural_folding() {
        let freqs = word_frequencies(["flight flights flights bags class"], 10);
        let flight = freqs.iter().find(|f| f.word == "flight").unwrap();
        assert_eq!(flight.count, 3);
        assert!(freqs.iter().all(|f| f.word != "flights"));
        // No singular present, so the plural stays; "ss" is never folded.
        assert!(freqs.iter().any(|f| f.word == "bags"));
        assert!(freqs.iter().any(|f| f.word == "class"));
    }

    #[test]
    fn test_max_words_and_order() {
        let freqs = word_frequencies(["b b b a a c d"], 2);
        let words: Vec<&str> = freqs.iter().map(|f| f.word.as_str()).collect();
        // Single letters are below the two-character token minimum.
        assert!(words.is_empty());

        let freqs = word_frequencies(["bb bb bb aa aa cc dd"], 3);
        let words: Vec<&str> = freqs.iter().map(|f| f.word.as_str()).collect();
        assert_eq!(words, vec!["bb", "aa", "cc"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(word_frequencies(std::iter::empty::<&str>(), 150).is_empty());
        assert!(word_frequencies(["the and of"], 150).is_empty());
    }
}
