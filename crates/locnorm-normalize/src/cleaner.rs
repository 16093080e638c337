//! Structural noise removal for extracted city strings.
//!
//! Rules, in order:
//! 1. collapse an exact duplicated city (`Boston Boston`), except allow-listed
//!    repeated-word names (`Walla Walla`);
//! 2. strip a trailing county name, optionally followed by `County`;
//! 3. strip a trailing jurisdiction code with a postal code, or a bare postal code;
//! 4. strip a trailing bare upper-case jurisdiction code;
//! 5. strip noise suffixes (`Mass`, `USA`, `US`);
//! 6. trim whitespace and stray punctuation.
//!
//! The sequence is repeated until nothing changes, so `clean` is idempotent.

use locnorm_core::jurisdiction;
use locnorm_reference::CuratedLists;
use once_cell::sync::Lazy;
use regex::Regex;

const MAX_PASSES: usize = 4;

/// Words that end a prefix like `Hastings on` and make county stripping unsafe.
const CONNECTORS: &[&str] = &["on", "of", "upon", "in", "the", "by", "de", "la", "du"];

static CODE_POSTAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:[,\s]+(?P<code>[A-Za-z]{2}))?[,\s]+\d{5}(?:-?\d{4})?$").unwrap()
});

static BARE_CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,\s]+(?P<code>[A-Z]{2})$").unwrap());

static SPACES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

fn collapse_duplicate(city: &str, lists: &CuratedLists) -> String {
    let words: Vec<&str> = city.split_whitespace().collect();
    let n = words.len();
    if n >= 2 && n % 2 == 0 && !lists.is_repeated_word_city(city) {
        let (first, second) = words.split_at(n / 2);
        let same = first
            .iter()
            .zip(second)
            .all(|(a, b)| a.eq_ignore_ascii_case(b));
        if same {
            return first.join(" ");
        }
    }
    city.to_string()
}

/// `prefix` left after removing a county is a real city name.
fn usable_prefix(prefix: &str, lists: &CuratedLists) -> bool {
    let last_word = prefix.split_whitespace().last().unwrap_or("");
    prefix.chars().count() >= 4
        && !lists.is_bare_prefix(prefix)
        && !CONNECTORS.contains(&last_word.to_lowercase().as_str())
}

/// Strip `suffix` from the end of `city` when it is a whole trailing word run.
fn strip_word_suffix<'a>(city: &'a str, suffix: &str) -> Option<&'a str> {
    let cut = city.len().checked_sub(suffix.len())?;
    if cut == 0 || !city.is_char_boundary(cut) || !city[cut..].eq_ignore_ascii_case(suffix) {
        return None;
    }
    let head = &city[..cut];
    head.ends_with(|c: char| c.is_whitespace() || c == ',')
        .then(|| head.trim_end_matches(|c: char| c.is_whitespace() || c == ','))
}

fn strip_county(city: &str, lists: &CuratedLists) -> String {
    let base = strip_word_suffix(city, "county").unwrap_or(city);
    if lists.is_protected_compound(base) {
        return base.to_string();
    }

    for county in &lists.county_names {
        if let Some(prefix) = strip_word_suffix(base, county) {
            if usable_prefix(prefix, lists) {
                return prefix.to_string();
            }
        }
    }
    city.to_string()
}

fn strip_code_postal(city: &str) -> String {
    if let Some(caps) = CODE_POSTAL_RE.captures(city) {
        let whole = caps.get(0).map_or(city.len(), |m| m.start());
        let code_ok = caps
            .name("code")
            .map_or(true, |c| jurisdiction::is_known_code(&c.as_str().to_ascii_uppercase()));
        if whole > 0 && code_ok {
            return city[..whole].to_string();
        }
        // Unknown two letters before the postal code belong to the city.
        if let Some(code) = caps.name("code") {
            return city[..code.end()].to_string();
        }
    }
    city.to_string()
}

fn strip_bare_code(city: &str) -> String {
    match BARE_CODE_RE.captures(city) {
        Some(caps) => {
            let start = caps.get(0).map_or(city.len(), |m| m.start());
            let known = caps
                .name("code")
                .is_some_and(|c| jurisdiction::is_known_code(c.as_str()));
            if start > 0 && known {
                city[..start].to_string()
            } else {
                city.to_string()
            }
        }
        None => city.to_string(),
    }
}

fn strip_noise_suffix(city: &str, lists: &CuratedLists) -> String {
    for suffix in &lists.noise_suffixes {
        if let Some(prefix) = strip_word_suffix(city, suffix) {
            if !prefix.is_empty() {
                return prefix.to_string();
            }
        }
    }
    city.to_string()
}

fn tidy(city: &str) -> String {
    let collapsed = SPACES_RE.replace_all(city.trim(), " ");
    collapsed
        .trim_matches(|c: char| {
            c.is_whitespace() || matches!(c, ',' | ';' | ':' | '/' | '-' | '(' | ')' | '|')
        })
        .to_string()
}

fn clean_once(city: &str, lists: &CuratedLists) -> String {
    let city = tidy(city);
    let city = collapse_duplicate(&city, lists);
    let city = strip_county(&city, lists);
    let city = strip_code_postal(&city);
    let city = strip_bare_code(&city);
    let city = strip_noise_suffix(&city, lists);
    tidy(&city)
}

/// Clean a raw city string. The result may be empty.
pub fn clean(raw: &str, lists: &CuratedLists) -> String {
    let mut current = clean_once(raw, lists);
    for _ in 1..MAX_PASSES {
        let next = clean_once(&current, lists);
        if next == current {
            break;
        }
        current = next;
    }
    current
}
