//! Fixed-capacity ring buffer store
//!
//! [`RingStore`] keeps the most recent `capacity` events in a circular slot
//! array. Slots fill from index 0; once every slot is taken each save
//! overwrites the oldest event, which is dropped without notice.
//!
//! All mutable state lives in a single struct behind one reader-writer lock,
//! so a query never sees a slot write without the matching cursor and length
//! update.

use std::fmt;

use async_trait::async_trait;
use ephemera_core::{EventFilter, EventStore, StoreError, effective_limit};
use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::config::{RingConfig, ScanOrder};

/// Point-in-time counters for a ring store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingStats {
    /// Number of slots
    pub capacity: usize,
    /// Number of populated slots
    pub len: usize,
    /// Saves made since the store was created
    pub total_saved: u64,
    /// Events overwritten and no longer retrievable
    pub evicted: u64,
}

/// Slot array and cursors, always updated together
struct RingState<E> {
    slots: Box<[Option<E>]>,
    /// Next slot to write
    write: usize,
    /// Populated slots, saturating at capacity
    len: usize,
    total_saved: u64,
}

impl<E> RingState<E> {
    fn new(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            write: 0,
            len: 0,
            total_saved: 0,
        }
    }

    fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Write an event at the cursor, returning the slot it landed in
    fn push(&mut self, event: E) -> usize {
        let capacity = self.capacity();
        let slot = self.write;

        self.slots[slot] = Some(event);
        self.write = (slot + 1) % capacity;
        self.len = (self.len + 1).min(capacity);
        self.total_saved = self.total_saved.saturating_add(1);

        slot
    }

    /// Populated slots in the requested order
    fn iter(&self, order: ScanOrder) -> impl Iterator<Item = &E> + '_ {
        let capacity = self.capacity();

        // While filling, write == len and slot order is already save order
        let (head, tail) = match order {
            ScanOrder::Chronological if self.len == capacity => {
                (self.write..capacity, 0..self.write)
            }
            _ => (0..self.len, 0..0),
        };

        head.chain(tail).filter_map(move |i| self.slots[i].as_ref())
    }
}

/// Bounded in-memory event store backed by a ring buffer
///
/// Holds at most `capacity` events. When full, each save overwrites the
/// oldest retained event (FIFO eviction). Queries return clones of matching
/// events, so results stay valid however many saves follow.
///
/// Saves take the write lock; queries and size checks share the read lock.
/// The lock is never held across an `.await`.
///
/// # Example
///
/// ```
/// use ephemera_core::{MatchAll, Predicate};
/// use ephemera_storage::RingStore;
///
/// let store = RingStore::new(3).unwrap();
/// for n in 1..=4 {
///     store.push(n);
/// }
///
/// assert_eq!(store.len(), 3);
/// assert_eq!(store.scan(&MatchAll::new()), vec![2, 3, 4]);
/// assert_eq!(store.scan(&Predicate::new(|n: &i32| *n > 2)), vec![3, 4]);
/// ```
pub struct RingStore<E> {
    state: RwLock<RingState<E>>,
    capacity: usize,
    scan_order: ScanOrder,
}

impl<E> RingStore<E> {
    /// Create a store with the given capacity and the default scan order
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidCapacity`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, StoreError> {
        Self::with_config(RingConfig::new(capacity))
    }

    /// Create a store from a configuration
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidCapacity`] if the configured capacity is zero.
    pub fn with_config(config: RingConfig) -> Result<Self, StoreError> {
        config.validate()?;

        debug!(
            capacity = config.capacity,
            scan_order = ?config.scan_order,
            "Created ring store"
        );

        Ok(Self {
            state: RwLock::new(RingState::new(config.capacity)),
            capacity: config.capacity,
            scan_order: config.scan_order,
        })
    }

    /// Get the number of slots
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get the query scan order
    pub fn scan_order(&self) -> ScanOrder {
        self.scan_order
    }

    /// Get the number of events currently held
    pub fn len(&self) -> usize {
        self.state.read().len
    }

    /// Check if no event has been saved yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if every slot is populated, so the next save evicts
    pub fn is_saturated(&self) -> bool {
        self.len() == self.capacity
    }

    /// Get a consistent snapshot of the store counters
    pub fn stats(&self) -> RingStats {
        let state = self.state.read();
        RingStats {
            capacity: self.capacity,
            len: state.len,
            total_saved: state.total_saved,
            evicted: state.total_saved - state.len as u64,
        }
    }

    /// Store an event, overwriting the oldest one if the store is full
    pub fn push(&self, event: E) {
        let (slot, len) = {
            let mut state = self.state.write();
            let was_saturated = state.len == self.capacity;
            let slot = state.push(event);
            if !was_saturated && state.len == self.capacity {
                debug!(
                    capacity = self.capacity,
                    "Ring store saturated, further saves evict the oldest event"
                );
            }
            (slot, state.len)
        };

        trace!(slot, len, "Saved event");
    }
}

impl<E: Clone> RingStore<E> {
    /// Get clones of the events accepted by a filter
    ///
    /// Events are visited in the store's [`ScanOrder`] and collection stops
    /// once `filter.limit()` events have matched (when the limit is positive).
    pub fn scan<F>(&self, filter: &F) -> Vec<E>
    where
        F: EventFilter<E> + ?Sized,
    {
        let result = {
            let state = self.state.read();
            let limit = effective_limit(filter.limit(), state.len);

            let mut result = Vec::with_capacity(limit);
            for event in state.iter(self.scan_order) {
                if result.len() >= limit {
                    break;
                }
                if filter.matches(event) {
                    result.push(event.clone());
                }
            }
            result
        };

        trace!(matched = result.len(), limit = filter.limit(), "Scanned ring store");
        result
    }
}

impl<E> fmt::Debug for RingStore<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingStore")
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .field("scan_order", &self.scan_order)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<E> EventStore<E> for RingStore<E>
where
    E: Clone + Send + Sync + 'static,
{
    async fn save(&self, event: E) -> Result<(), StoreError> {
        self.push(event);
        Ok(())
    }

    async fn query(&self, filter: &(dyn EventFilter<E> + Sync)) -> Result<Vec<E>, StoreError> {
        Ok(self.scan(filter))
    }

    fn size(&self) -> usize {
        self.len()
    }
}
