//! US states, DC, US territories and Canadian provinces.

use serde::Serialize;

/// Country a jurisdiction belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Country {
    #[serde(rename = "US")]
    UnitedStates,
    #[serde(rename = "CA")]
    Canada,
}

/// A jurisdiction identified by a fixed two-letter code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Jurisdiction {
    pub code: &'static str,
    pub name: &'static str,
    pub country: Country,
}

const fn us(code: &'static str, name: &'static str) -> Jurisdiction {
    Jurisdiction { code, name, country: Country::UnitedStates }
}

const fn ca(code: &'static str, name: &'static str) -> Jurisdiction {
    Jurisdiction { code, name, country: Country::Canada }
}

/// Every jurisdiction the pipeline understands.
pub const ALL: &[Jurisdiction] = &[
    us("AL", "Alabama"),
    us("AK", "Alaska"),
    us("AZ", "Arizona"),
    us("AR", "Arkansas"),
    us("CA", "California"),
    us("CO", "Colorado"),
    us("CT", "Connecticut"),
    us("DE", "Delaware"),
    us("DC", "District of Columbia"),
    us("FL", "Florida"),
    us("GA", "Georgia"),
    us("HI", "Hawaii"),
    us("ID", "Idaho"),
    us("IL", "Illinois"),
    us("IN", "Indiana"),
    us("IA", "Iowa"),
    us("KS", "Kansas"),
    us("KY", "Kentucky"),
    us("LA", "Louisiana"),
    us("ME", "Maine"),
    us("MD", "Maryland"),
    us("MA", "Massachusetts"),
    us("MI", "Michigan"),
    us("MN", "Minnesota"),
    us("MS", "Mississippi"),
    us("MO", "Missouri"),
    us("MT", "Montana"),
    us("NE", "Nebraska"),
    us("NV", "Nevada"),
    us("NH", "New Hampshire"),
    us("NJ", "New Jersey"),
    us("NM", "New Mexico"),
    us("NY", "New York"),
    us("NC", "North Carolina"),
    us("ND", "North Dakota"),
    us("OH", "Ohio"),
    us("OK", "Oklahoma"),
    us("OR", "Oregon"),
    us("PA", "Pennsylvania"),
    us("RI", "Rhode Island"),
    us("SC", "South Carolina"),
    us("SD", "South Dakota"),
    us("TN", "Tennessee"),
    us("TX", "Texas"),
    us("UT", "Utah"),
    us("VT", "Vermont"),
    us("VA", "Virginia"),
    us("WA", "Washington"),
    us("WV", "West Virginia"),
    us("WI", "Wisconsin"),
    us("WY", "Wyoming"),
    us("PR", "Puerto Rico"),
    us("GU", "Guam"),
    us("VI", "U.S. Virgin Islands"),
    us("AS", "American Samoa"),
    us("MP", "Northern Mariana Islands"),
    ca("AB", "Alberta"),
    ca("BC", "British Columbia"),
    ca("MB", "Manitoba"),
    ca("NB", "New Brunswick"),
    ca("NL", "Newfoundland and Labrador"),
    ca("NS", "Nova Scotia"),
    ca("NT", "Northwest Territories"),
    ca("NU", "Nunavut"),
    ca("ON", "Ontario"),
    ca("PE", "Prince Edward Island"),
    ca("QC", "Quebec"),
    ca("SK", "Saskatchewan"),
    ca("YT", "Yukon"),
];

/// Alternate spellings seen in scraped full addresses.
const NAME_ALIASES: &[(&str, &str)] = &[
    ("washington dc", "DC"),
    ("washington d.c.", "DC"),
    ("d.c.", "DC"),
    ("virgin islands", "VI"),
    ("newfoundland", "NL"),
    ("québec", "QC"),
    ("yukon territory", "YT"),
];

impl Jurisdiction {
    /// Look up by two-letter code (case-insensitive).
    pub fn from_code(code: &str) -> Option<&'static Jurisdiction> {
        let code = code.trim();
        if code.len() != 2 {
            return None;
        }
        ALL.iter().find(|j| j.code.eq_ignore_ascii_case(code))
    }

    /// Look up by full name (case-insensitive, surrounding whitespace ignored).
    pub fn from_name(name: &str) -> Option<&'static Jurisdiction> {
        let name = name.trim();
        if let Some(j) = ALL.iter().find(|j| j.name.eq_ignore_ascii_case(name)) {
            return Some(j);
        }
        let lower = name.to_lowercase();
        NAME_ALIASES
            .iter()
            .find(|(alias, _)| *alias == lower)
            .and_then(|(_, code)| Self::from_code(code))
    }

    /// Resolve either a code or a full name.
    pub fn resolve(value: &str) -> Option<&'static Jurisdiction> {
        Self::from_code(value).or_else(|| Self::from_name(value))
    }

    pub fn is_canadian(&self) -> bool {
        self.country == Country::Canada
    }
}

/// True if `code` is a known US or Canadian jurisdiction code (exact, upper-case).
pub fn is_known_code(code: &str) -> bool {
    ALL.iter().any(|j| j.code == code)
}

/// True if `code` is a Canadian province or territory.
pub fn is_canadian_code(code: &str) -> bool {
    Jurisdiction::from_code(code).is_some_and(|j| j.is_canadian())
}

/// Full names ordered longest first, for building regex alternations where
/// `West Virginia` must win over `Virginia`.
pub fn names_longest_first() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = ALL.iter().map(|j| j.name).collect();
    names.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(Jurisdiction::from_code("ma").unwrap().name, "Massachusetts");
        assert_eq!(Jurisdiction::from_code("ON").unwrap().country, Country::Canada);
        assert!(Jurisdiction::from_code("XX").is_none());
        assert!(Jurisdiction::from_code("Mass").is_none());
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Jurisdiction::from_name("new jersey").unwrap().code, "NJ");
        assert_eq!(Jurisdiction::from_name(" Washington DC ").unwrap().code, "DC");
        assert!(Jurisdiction::from_name("Narnia").is_none());
    }

    #[test]
    fn test_names_longest_first() {
        let names = names_longest_first();
        let wv = names.iter().position(|n| *n == "West Virginia").unwrap();
        let va = names.iter().position(|n| *n == "Virginia").unwrap();
        assert!(wv < va);
    }

    #[test]
    fn test_known_codes() {
        assert!(is_known_code("NJ"));
        assert!(!is_known_code("nj"));
        assert!(is_canadian_code("qc"));
        assert!(!is_canadian_code("NY"));
    }
}
