//! Country records.

use serde::{Deserialize, Serialize};

/// A country as served by the catalog.
///
/// `code` is always lower-case (it doubles as the flag asset key);
/// `name` keeps the casing of the dataset.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Country {
    pub code: String,
    pub name: String,
}

impl Country {
    /// Create a country, lower-casing the code.
    pub fn new(code: impl AsRef<str>, name: impl Into<String>) -> Self {
        Self {
            code: code.as_ref().trim().to_lowercase(),
            name: name.into(),
        }
    }

    /// Does `answer` name this country? Case and surrounding whitespace are ignored.
    #[must_use]
    pub fn matches_name(&self, answer: &str) -> bool {
        normalize_name(answer) == normalize_name(&self.name)
    }
}

impl std::fmt::Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

/// Canonical form used to compare typed answers: trimmed and lower-cased.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
