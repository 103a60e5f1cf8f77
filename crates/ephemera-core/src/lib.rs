//! # Ephemera Core
//!
//! Core traits, filters, and errors shared by Ephemera event store backends.
//!
//! Every backend stores opaque events and answers queries through a
//! caller-supplied predicate. This crate holds the contracts between the
//! backends and the code that feeds them, so a ring buffer, a database, or a
//! test double can be swapped behind the same interface.
//!
//! ## Key Traits
//!
//! - [`EventStore`]: Save events, query them with a filter, report occupancy
//! - [`EventFilter`]: Predicate over an event plus an optional result cap
//!
//! ## Key Types
//!
//! - [`MatchAll`]: Filter accepting every event
//! - [`Predicate`]: Filter built from a closure
//! - [`StoreError`]: Errors reported by store backends

pub mod error;
pub mod filter;
pub mod store;

// Re-export main types
pub use error::*;
pub use filter::*;
pub use store::*;
