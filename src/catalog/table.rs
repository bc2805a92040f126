//! Country lookup table.
//!
//! The `CountryCatalog` holds every country a round can be built from.
//! It provides lookup by code or name and seeded random selection.

use rustc_hash::FxHashMap;

use super::country::{normalize_name, Country};
use crate::core::{QuizError, QuizRng, Result};

/// Immutable catalog of countries.
///
/// ## Example
///
/// ```
/// use flag_quiz::catalog::CountryCatalog;
///
/// let catalog = CountryCatalog::from_json_str(r#"{"FR": "France", "TD": "Chad"}"#).unwrap();
///
/// assert_eq!(catalog.len(), 2);
/// assert_eq!(catalog.by_code("fr").unwrap().name, "France");
/// assert_eq!(catalog.by_name("CHAD").unwrap().code, "td");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CountryCatalog {
    /// Lower-case code → display name.
    names: FxHashMap<String, String>,
    /// Normalized name → code.
    codes_by_name: FxHashMap<String, String>,
    /// Codes in sorted order. Random selection indexes into this so a
    /// given seed always yields the same countries.
    sorted_codes: Vec<String>,
}

impl CountryCatalog {
    /// Build a catalog from code/name pairs.
    ///
    /// Codes are matched case-insensitively; a repeated code keeps the
    /// last name given. Blank codes or names are rejected.
    pub fn from_pairs<I, C, N>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (C, N)>,
        C: AsRef<str>,
        N: Into<String>,
    {
        let mut names = FxHashMap::default();
        for (code, name) in pairs {
            let country = Country::new(code, name);
            if country.code.is_empty() {
                return Err(QuizError::InvalidConfig("country code must not be blank".to_string()));
            }
            if country.name.trim().is_empty() {
                return Err(QuizError::InvalidConfig(format!(
                    "country `{}` has a blank name",
                    country.code
                )));
            }
            names.insert(country.code, country.name);
        }

        let mut sorted_codes: Vec<String> = names.keys().cloned().collect();
        sorted_codes.sort_unstable();

        // Names shared by several codes resolve to the smallest code.
        let mut codes_by_name = FxHashMap::default();
        for code in &sorted_codes {
            if let Some(name) = names.get(code) {
                codes_by_name
                    .entry(normalize_name(name))
                    .or_insert_with(|| code.clone());
            }
        }

        Ok(Self {
            names,
            codes_by_name,
            sorted_codes,
        })
    }

    /// Load a catalog from a flat JSON object such as `{"FR": "France"}`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: FxHashMap<String, String> = serde_json::from_str(json)?;
        let catalog = Self::from_pairs(raw)?;
        tracing::debug!(countries = catalog.len(), "loaded country catalog");
        Ok(catalog)
    }

    /// Number of distinct countries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sorted_codes.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sorted_codes.is_empty()
    }

    /// Look up a country by code (case-insensitive).
    pub fn by_code(&self, code: &str) -> Result<Country> {
        let code = code.trim().to_lowercase();
        match self.names.get(&code) {
            Some(name) => Ok(Country {
                code,
                name: name.clone(),
            }),
            None => Err(QuizError::UnknownCountry(code)),
        }
    }

    /// Check if a code is in the catalog.
    #[must_use]
    pub fn contains_code(&self, code: &str) -> bool {
        self.names.contains_key(&code.trim().to_lowercase())
    }

    /// Look up a country by name (case-insensitive, trimmed).
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<Country> {
        let code = self.codes_by_name.get(&normalize_name(name))?;
        self.names.get(code).map(|name| Country {
            code: code.clone(),
            name: name.clone(),
        })
    }

    /// Pick one country at random. `None` only when the catalog is empty.
    pub fn random_entry(&self, rng: &mut QuizRng) -> Option<Country> {
        let code = rng.choose(&self.sorted_codes)?;
        self.country_at(code)
    }

    /// Pick `count` distinct countries at random.
    ///
    /// Fails with `InvalidConfig` if the catalog holds fewer than `count`
    /// countries. Strategies check capacity up front and report
    /// `ContentExhaustion` instead.
    pub fn distinct_entries(&self, count: usize, rng: &mut QuizRng) -> Result<Vec<Country>> {
        let indices = rng.sample_indices(self.len(), count).ok_or_else(|| {
            QuizError::InvalidConfig(format!(
                "requested {} distinct countries from a catalog of {}",
                count,
                self.len()
            ))
        })?;

        Ok(indices
            .into_iter()
            .filter_map(|i| self.country_at(&self.sorted_codes[i]))
            .collect())
    }

    /// Iterate over all countries, sorted by code.
    pub fn iter(&self) -> impl Iterator<Item = Country> + '_ {
        self.sorted_codes.iter().filter_map(|code| self.country_at(code))
    }

    /// Countries whose name starts with `prefix` (case-insensitive), sorted by name.
    ///
    /// Used to narrow the selection list in type-the-country.
    #[must_use]
    pub fn names_matching(&self, prefix: &str) -> Vec<Country> {
        let prefix = normalize_name(prefix);
        let mut matches: Vec<Country> = self
            .iter()
            .filter(|c| normalize_name(&c.name).starts_with(&prefix))
            .collect();
        matches.sort_by(|a, b| a.name.cmp(&b.name));
        matches
    }

    fn country_at(&self, code: &str) -> Option<Country> {
        self.names.get(code).map(|name| Country {
            code: code.to_string(),
            name: name.clone(),
        })
    }
}
