//! Service implementations
//!
//! Production implementations of the store and clock seams, plus the
//! in-memory store used for offline reports and tests.

pub mod clock;
pub mod memory_store;
pub mod rest_store;

#[cfg(test)]
mod tests;

// Re-export all service implementations
pub use clock::TokioClock;
pub use memory_store::{InMemoryRecordStore, StoreSnapshot};
pub use rest_store::RestRecordStore;
