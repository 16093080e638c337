//! The extraction chain.
//!
//! An [`Extractor`] holds an ordered list of [`FieldStrategy`] objects. Each
//! strategy looks at the raw record and proposes values; a proposal only
//! fills a field that every earlier strategy left empty. Extraction never
//! fails: unrecoverable fields come back as empty strings.

use crate::strategy::{
    DirectTags, DisplayName, FullAddress, PostalCode, StateNameScan, UrlSlug,
};
use crate::text::is_lodging_candidate;
use locnorm_core::RawRecord;
use locnorm_reference::ReferenceDataStore;
use serde::Serialize;
use tracing::debug;

/// Values a strategy managed to recover. `None` means "no opinion".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialFields {
    pub city: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
}

impl PartialFields {
    pub fn is_complete(&self) -> bool {
        self.city.is_some() && self.state.is_some() && self.address.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.city.is_none() && self.state.is_none() && self.address.is_none()
    }
}

/// One link of the extraction chain.
pub trait FieldStrategy: Send + Sync {
    /// Short label recorded in [`FieldSources`].
    fn name(&self) -> &'static str;

    /// Propose values for `record`. `known` holds what earlier strategies
    /// already filled.
    fn apply(
        &self,
        record: &RawRecord,
        known: &PartialFields,
        refs: &ReferenceDataStore,
    ) -> PartialFields;
}

/// Which strategy filled each field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldSources {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<&'static str>,
}

/// Best-effort extraction result. Empty string = unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub city: String,
    pub state: String,
    pub address: String,
    pub sources: FieldSources,
}

impl Extraction {
    /// True for curated scraper test fixtures (`Anytown, US`, ...).
    pub fn is_placeholder(&self, refs: &ReferenceDataStore) -> bool {
        refs.curated.is_placeholder(&self.city, &self.state)
    }
}

fn fill(
    slot: &mut Option<String>,
    source: &mut Option<&'static str>,
    value: Option<String>,
    strategy: &'static str,
) {
    if slot.is_some() {
        return;
    }
    if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
        *slot = Some(value.trim().to_string());
        *source = Some(strategy);
    }
}

/// Ordered chain of strategies.
pub struct Extractor {
    strategies: Vec<Box<dyn FieldStrategy>>,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::standard()
    }
}

impl Extractor {
    pub fn new(strategies: Vec<Box<dyn FieldStrategy>>) -> Self {
        Self { strategies }
    }

    /// Direct tags, full address, display name, state-name scan, postal
    /// code, URL slug.
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(DirectTags),
            Box::new(FullAddress),
            Box::new(DisplayName),
            Box::new(StateNameScan),
            Box::new(PostalCode),
            Box::new(UrlSlug),
        ])
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    pub fn extract(&self, record: &RawRecord, refs: &ReferenceDataStore) -> Extraction {
        let mut known = PartialFields::default();
        let mut sources = FieldSources::default();

        for strategy in &self.strategies {
            if known.is_complete() {
                break;
            }
            let mut found = strategy.apply(record, &known, refs);
            if found.is_empty() {
                continue;
            }

            if let Some(city) = &found.city {
                if is_lodging_candidate(city, refs) {
                    debug!("{}: rejected venue-like city {:?}", strategy.name(), city);
                    found.city = None;
                }
            }

            let name = strategy.name();
            fill(&mut known.city, &mut sources.city, found.city, name);
            fill(&mut known.state, &mut sources.state, found.state, name);
            fill(&mut known.address, &mut sources.address, found.address, name);
        }

        debug!(
            "Extracted city={:?} state={:?} via {:?}",
            known.city, known.state, sources
        );

        Extraction {
            city: known.city.unwrap_or_default(),
            state: known.state.unwrap_or_default(),
            address: known.address.unwrap_or_default(),
            sources,
        }
    }
}
