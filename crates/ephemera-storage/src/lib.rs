//! # Ephemera Storage
//!
//! Bounded in-memory storage backend for Ephemera.
//!
//! This crate provides a ring buffer store that keeps the most recent N
//! events of a feed with a fixed memory footprint. It implements the
//! [`EventStore`] trait from `ephemera-core`, so it can be swapped with any
//! other backend.
//!
//! ## Features
//!
//! - **RingStore**: Fixed-capacity circular store with FIFO eviction
//! - **RingConfig**: Capacity and scan order, loadable with serde
//! - **RingStats**: Occupancy and eviction counters
//!
//! ## Example
//!
//! ```rust
//! use ephemera_core::{EventStore, Predicate};
//! use ephemera_storage::RingStore;
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = RingStore::new(1000).unwrap();
//!
//!     store.save("kind:1 hello".to_string()).await.unwrap();
//!     store.save("kind:7 +".to_string()).await.unwrap();
//!
//!     let notes = Predicate::new(|e: &String| e.starts_with("kind:1"));
//!     let found = store.query(&notes).await.unwrap();
//!     assert_eq!(found, vec!["kind:1 hello".to_string()]);
//!     assert_eq!(store.size(), 2);
//! }
//! ```

pub mod config;
pub mod ring;

// Re-exports
pub use config::{DEFAULT_CAPACITY, RingConfig, RingConfigBuilder, ScanOrder};
pub use ring::{RingStats, RingStore};

// Re-export the store contracts from ephemera-core for convenience
pub use ephemera_core::{EventFilter, EventStore, MatchAll, Predicate, StoreError};
