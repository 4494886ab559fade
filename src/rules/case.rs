// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Case styles and case detection.
//!
//! A text "is" a case when converting it to that case leaves it unchanged.
//! Quoted and backticked spans are ignored, since they often hold proper
//! names (``refactor: `Eslint` config``).

use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

lazy_static! {
    static ref QUOTED_REGEX: Regex = Regex::new(r#"`.*?`|".*?"|'.*?'"#).unwrap();
}

/// A named letter-case style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Case {
    Lower,
    Upper,
    Camel,
    Kebab,
    Pascal,
    Sentence,
    Snake,
    Start,
}

impl Case {
    pub fn as_str(self) -> &'static str {
        match self {
            Case::Lower => "lower-case",
            Case::Upper => "upper-case",
            Case::Camel => "camel-case",
            Case::Kebab => "kebab-case",
            Case::Pascal => "pascal-case",
            Case::Sentence => "sentence-case",
            Case::Snake => "snake-case",
            Case::Start => "start-case",
        }
    }

    pub fn all() -> &'static [Case] {
        &[
            Case::Lower,
            Case::Upper,
            Case::Camel,
            Case::Kebab,
            Case::Pascal,
            Case::Sentence,
            Case::Snake,
            Case::Start,
        ]
    }

    /// Convert text to this case.
    pub fn convert(self, input: &str) -> String {
        match self {
            Case::Lower => input.to_lowercase(),
            Case::Upper => input.to_uppercase(),
            Case::Camel => camel_case(input),
            Case::Pascal => upper_first(&camel_case(input)),
            Case::Kebab => join_lower(input, "-"),
            Case::Snake => join_lower(input, "_"),
            Case::Start => words(input)
                .iter()
                .map(|w| upper_first(w))
                .collect::<Vec<_>>()
                .join(" "),
            Case::Sentence => sentence_case(input),
        }
    }

    /// Whether the text already is in this case.
    ///
    /// Text that converts to nothing, or to something starting with a
    /// digit, matches every case.
    pub fn matches(self, raw: &str) -> bool {
        let stripped = QUOTED_REGEX.replace_all(raw, "");
        let input = stripped.trim();
        let transformed = self.convert(input);

        if transformed.is_empty() || transformed.starts_with(|c: char| c.is_ascii_digit()) {
            return true;
        }
        transformed == input
    }
}

impl FromStr for Case {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lower-case" | "lowercase" => Ok(Case::Lower),
            "upper-case" | "uppercase" => Ok(Case::Upper),
            "camel-case" => Ok(Case::Camel),
            "kebab-case" => Ok(Case::Kebab),
            "pascal-case" => Ok(Case::Pascal),
            "sentence-case" | "sentencecase" => Ok(Case::Sentence),
            "snake-case" => Ok(Case::Snake),
            "start-case" => Ok(Case::Start),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split text into words on non-alphanumeric characters and case humps.
///
/// `fooBar` splits into `foo`, `Bar`; `XMLParser` into `XML`, `Parser`.
pub fn words(input: &str) -> Vec<String> {
    let mut result = Vec::new();

    for chunk in input.split(|c: char| !c.is_alphanumeric()) {
        let chars: Vec<char> = chunk.chars().collect();
        let mut current = String::new();

        for (i, &c) in chars.iter().enumerate() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1).copied();

            let hump = match prev {
                Some(p) if c.is_uppercase() => {
                    p.is_lowercase()
                        || p.is_numeric()
                        || (p.is_uppercase() && next.is_some_and(|n| n.is_lowercase()))
                }
                _ => false,
            };

            if hump && !current.is_empty() {
                result.push(std::mem::take(&mut current));
            }
            current.push(c);
        }

        if !current.is_empty() {
            result.push(current);
        }
    }

    result
}

fn camel_case(input: &str) -> String {
    words(input)
        .iter()
        .enumerate()
        .map(|(i, w)| {
            let lower = w.to_lowercase();
            if i == 0 {
                lower
            } else {
                upper_first(&lower)
            }
        })
        .collect()
}

fn join_lower(input: &str, separator: &str) -> String {
    words(input)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(separator)
}

fn upper_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Upper-case the first letter of the first word and lower-case the rest of
/// that word; everything after the first word is left as is.
fn sentence_case(input: &str) -> String {
    let first_word_len = input.find(' ').unwrap_or(input.len());
    let (word, rest) = input.split_at(first_word_len);
    let mut chars = word.chars();

    match chars.next() {
        Some(first) => {
            let mut out: String = first.to_uppercase().collect();
            out.push_str(&chars.as_str().to_lowercase());
            out.push_str(rest);
            out
        }
        None => rest.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words() {
        assert_eq!(words("fooBar baz"), vec!["foo", "Bar", "baz"]);
        assert_eq!(words("XMLParser"), vec!["XML", "Parser"]);
        assert_eq!(words("add-thing_now"), vec!["add", "thing", "now"]);
    }

    #[test]
    fn test_convert() {
        assert_eq!(Case::Camel.convert("add new thing"), "addNewThing");
        assert_eq!(Case::Pascal.convert("add new thing"), "AddNewThing");
        assert_eq!(Case::Kebab.convert("Add New Thing"), "add-new-thing");
        assert_eq!(Case::Snake.convert("addNewThing"), "add_new_thing");
        assert_eq!(Case::Start.convert("add new thing"), "Add New Thing");
        assert_eq!(Case::Sentence.convert("aDD new Thing"), "Add new Thing");
    }

    #[test]
    fn test_matches() {
        assert!(Case::Lower.matches("add thing"));
        assert!(!Case::Lower.matches("Add thing"));
        assert!(Case::Upper.matches("ADD THING"));
        assert!(Case::Start.matches("Add Thing"));
        assert!(!Case::Start.matches("add thing."));
        assert!(Case::Sentence.matches("Add thing"));
        assert!(Case::Sentence.matches("Add Thing"));
        assert!(!Case::Sentence.matches("add thing"));
        assert!(Case::Pascal.matches("AddThing"));
        assert!(Case::Kebab.matches("add-thing"));
    }

    #[test]
    fn test_matches_ignores_quotes_and_digits() {
        assert!(Case::Lower.matches("bump `Serde` version"));
        assert!(Case::Upper.matches("123"));
        assert!(Case::Lower.matches(""));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("lower-case".parse::<Case>(), Ok(Case::Lower));
        assert_eq!("start-case".parse::<Case>(), Ok(Case::Start));
        assert!("shouty-case".parse::<Case>().is_err());
        for case in Case::all() {
            assert_eq!(case.as_str().parse::<Case>(), Ok(*case));
        }
    }
}
