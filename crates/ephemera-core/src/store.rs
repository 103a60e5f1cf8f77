//! Store backend trait
//!
//! [`EventStore`] is the interface every backend implements. Callers hold a
//! `dyn EventStore<E>` and never learn whether events live in a ring buffer,
//! a database, or a test double.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::filter::EventFilter;

/// Pluggable storage backend for events
///
/// Backends own the events handed to [`save`](EventStore::save) and answer
/// [`query`](EventStore::query) with a snapshot: later saves never change a
/// result that has already been returned.
///
/// Cancellation follows the usual future semantics. Dropping the future
/// returned by `save` or `query` abandons the call; backends that complete
/// without awaiting are unaffected.
#[async_trait]
pub trait EventStore<E>: Send + Sync {
    /// Store an event
    ///
    /// # Errors
    ///
    /// Returns an error only if the backend cannot accept the event, for
    /// example after an I/O failure. In-memory backends always succeed.
    async fn save(&self, event: E) -> Result<(), StoreError>;

    /// Get the events accepted by a filter
    ///
    /// At most `filter.limit()` events are returned when the limit is
    /// positive. An empty result is not an error.
    async fn query(&self, filter: &(dyn EventFilter<E> + Sync)) -> Result<Vec<E>, StoreError>;

    /// Get the number of events currently held
    fn size(&self) -> usize;
}
