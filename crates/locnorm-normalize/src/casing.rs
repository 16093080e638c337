//! Case repair for city names.

use locnorm_reference::CuratedLists;
use once_cell::sync::Lazy;
use regex::Regex;

/// Lower-case words that stay lower-case inside a name.
const CONNECTORS: &[&str] = &[
    "of", "the", "and", "in", "on", "by", "upon", "du", "de", "la", "le", "des", "au", "aux",
    "sur", "en", "y",
];

static MC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bMc([a-z])").unwrap());
static LA_LE_DE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(La|Le|De) ([a-z])").unwrap());

/// Title-case one word: first letter, letters after `-`, and the letter
/// after a one-letter `O'`/`D'` prefix become upper-case.
fn title_word(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut out = String::with_capacity(lower.len());
    let mut upper_next = true;
    for (i, c) in lower.chars().enumerate() {
        if upper_next && c.is_alphabetic() {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
        if c == '-' || (c == '\'' && i == 1) {
            upper_next = true;
        }
    }
    out
}

pub fn title_case(city: &str) -> String {
    city.split_whitespace()
        .map(title_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn is_connector(word: &str) -> bool {
    let lower = word.to_lowercase();
    CONNECTORS.contains(&lower.as_str()) || lower.starts_with("d'")
}

/// Repair casing.
///
/// All-upper or all-lower input is title-cased. Otherwise words that slipped
/// to lower-case are re-capitalized, except connector words after the first
/// word. `Mc` names, joined La/Le/De names and `La crosse`-style splits are
/// fixed last.
pub fn repair_case(city: &str, lists: &CuratedLists) -> String {
    let letters: Vec<char> = city.chars().filter(|c| c.is_alphabetic()).collect();
    let single_case = !letters.is_empty()
        && (letters.iter().all(|c| c.is_uppercase()) || letters.iter().all(|c| c.is_lowercase()));

    let words: Vec<String> = if single_case {
        title_case(city).split(' ').map(str::to_string).collect()
    } else {
        city.split_whitespace()
            .enumerate()
            .map(|(i, w)| {
                let starts_lower = w.chars().next().is_some_and(char::is_lowercase);
                if starts_lower && (i == 0 || !is_connector(w)) {
                    capitalize_first(w)
                } else {
                    w.to_string()
                }
            })
            .collect()
    };

    let joined = words
        .iter()
        .map(|w| lists.joined_name(w).map_or_else(|| w.clone(), str::to_string))
        .collect::<Vec<_>>()
        .join(" ");

    let mc = MC_RE.replace_all(&joined, |caps: &regex::Captures| {
        format!("Mc{}", caps[1].to_uppercase())
    });
    LA_LE_DE_RE
        .replace_all(&mc, |caps: &regex::Captures| {
            format!("{} {}", &caps[1], caps[2].to_uppercase())
        })
        .into_owned()
}
