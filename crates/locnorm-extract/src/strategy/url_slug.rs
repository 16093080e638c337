//! Location page slugs: `/<brand>-of-<city>-<st>/` and `/location(s)/<city>-<st>/`.

use crate::extractor::{FieldStrategy, PartialFields};
use crate::text::capitalize;
use locnorm_core::{jurisdiction, RawRecord};
use locnorm_reference::ReferenceDataStore;
use once_cell::sync::Lazy;
use regex::Regex;

pub const URL_KEYS: &[&str] = &["website", "url", "source_url", "@source_uri", "ref:url"];

static OF_SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)/[a-z0-9]+(?:-[a-z0-9]+)*?-of-([a-z0-9-]+)(?:[/?#]|$)").unwrap());
static LOCATIONS_SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)/locations?/([a-z0-9-]+)(?:[/?#]|$)").unwrap());

/// Parse the city/state out of a slug like `fort-lee-nj`.
pub fn parse_slug(slug: &str, refs: &ReferenceDataStore) -> Option<(String, String)> {
    let mut tokens: Vec<&str> = slug.split('-').filter(|t| !t.is_empty()).collect();
    let state = tokens.pop()?.to_ascii_uppercase();
    if !jurisdiction::is_known_code(&state) {
        return None;
    }

    let words: Vec<String> = tokens
        .into_iter()
        .filter(|t| !t.chars().all(|c| c.is_ascii_digit()))
        .filter(|t| !refs.curated.is_url_filler(t))
        .map(capitalize)
        .collect();
    if words.is_empty() || words.len() > 4 {
        return None;
    }
    Some((words.join(" "), state))
}

pub fn parse_url(url: &str, refs: &ReferenceDataStore) -> Option<(String, String)> {
    [&OF_SLUG_RE, &LOCATIONS_SLUG_RE]
        .iter()
        .filter_map(|re| re.captures(url))
        .filter_map(|caps| caps.get(1))
        .find_map(|slug| parse_slug(slug.as_str(), refs))
}

pub struct UrlSlug;

impl FieldStrategy for UrlSlug {
    fn name(&self) -> &'static str {
        "url_slug"
    }

    fn apply(&self, record: &RawRecord, _: &PartialFields, refs: &ReferenceDataStore) -> PartialFields {
        URL_KEYS
            .iter()
            .filter_map(|k| record.tag(k))
            .find_map(|url| parse_url(url, refs))
            .map(|(city, state)| PartialFields {
                city: Some(city),
                state: Some(state),
                address: None,
            })
            .unwrap_or_default()
    }
}
