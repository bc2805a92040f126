//! Shared helpers for integration tests.

#![allow(dead_code)]

pub mod logging;

use std::sync::Arc;

use flag_quiz::CountryCatalog;

/// Catalog loaded from `tests/fixtures/countries.json`.
pub fn fixture_catalog() -> Arc<CountryCatalog> {
    let json = include_str!("../fixtures/countries.json");
    Arc::new(CountryCatalog::from_json_str(json).expect("fixture catalog parses"))
}

/// Catalog built from explicit pairs.
pub fn catalog_of(pairs: &[(&str, &str)]) -> Arc<CountryCatalog> {
    Arc::new(CountryCatalog::from_pairs(pairs.iter().copied()).expect("valid pairs"))
}
