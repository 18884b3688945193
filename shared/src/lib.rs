//! Shared types for the inclusion insights system
//!
//! Record schemas, the portable query description, store errors and logging
//! helpers used by every insights component.

pub mod errors;
pub mod logging;
pub mod query;
pub mod types;

pub use errors::*;
pub use query::{Collection, FieldValue, Filter, OrderBy, RecordQuery, SortDirection};
pub use types::*;
