//! Country catalog: the read-only code → name lookup table.
//!
//! ## Key Types
//!
//! - `Country`: an immutable code/name pair
//! - `CountryCatalog`: lookup by code or name, random selection
//!
//! The catalog is loaded once and shared as `Arc<CountryCatalog>` by every
//! round. It is never mutated after construction, so no locking is needed.

pub mod table;
pub mod country;

pub use table::CountryCatalog;
pub use country::{normalize_name, Country};
