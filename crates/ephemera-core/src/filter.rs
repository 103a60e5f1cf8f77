//! Event filters
//!
//! A filter is the only view a store has into the events it holds: it asks
//! the filter whether an event is wanted and how many results the caller is
//! prepared to take. What an event contains, and how a filter decides, is
//! left entirely to the caller.

use std::sync::Arc;

/// Predicate over stored events with an optional result cap
///
/// Implementations decide which events a query returns. Stores call
/// [`matches`](EventFilter::matches) once per candidate event and stop
/// collecting once [`limit`](EventFilter::limit) results have been gathered.
pub trait EventFilter<E> {
    /// Returns true if the filter accepts the event
    fn matches(&self, event: &E) -> bool;

    /// Maximum number of events a query should return
    ///
    /// Zero means no cap: the result is bounded only by how many events the
    /// store currently holds.
    fn limit(&self) -> usize {
        0
    }
}

impl<E, F: EventFilter<E> + ?Sized> EventFilter<E> for &F {
    fn matches(&self, event: &E) -> bool {
        (**self).matches(event)
    }

    fn limit(&self) -> usize {
        (**self).limit()
    }
}

impl<E, F: EventFilter<E> + ?Sized> EventFilter<E> for Box<F> {
    fn matches(&self, event: &E) -> bool {
        (**self).matches(event)
    }

    fn limit(&self) -> usize {
        (**self).limit()
    }
}

impl<E, F: EventFilter<E> + ?Sized> EventFilter<E> for Arc<F> {
    fn matches(&self, event: &E) -> bool {
        (**self).matches(event)
    }

    fn limit(&self) -> usize {
        (**self).limit()
    }
}

/// Filter that accepts every event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchAll {
    limit: usize,
}

impl MatchAll {
    /// Create an uncapped match-all filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the number of returned events (0 removes the cap)
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

impl<E> EventFilter<E> for MatchAll {
    fn matches(&self, _event: &E) -> bool {
        true
    }

    fn limit(&self) -> usize {
        self.limit
    }
}

/// Filter built from a closure
///
/// ```
/// use ephemera_core::{EventFilter, Predicate};
///
/// let even = Predicate::new(|n: &u64| n % 2 == 0).with_limit(10);
/// assert!(even.matches(&4));
/// assert!(!even.matches(&5));
/// assert_eq!(even.limit(), 10);
/// ```
#[derive(Clone)]
pub struct Predicate<F> {
    predicate: F,
    limit: usize,
}

impl<F> Predicate<F> {
    /// Wrap a closure as an uncapped filter
    pub fn new(predicate: F) -> Self {
        Self {
            predicate,
            limit: 0,
        }
    }

    /// Cap the number of returned events (0 removes the cap)
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

impl<F> std::fmt::Debug for Predicate<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Predicate")
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}

impl<E, F> EventFilter<E> for Predicate<F>
where
    F: Fn(&E) -> bool,
{
    fn matches(&self, event: &E) -> bool {
        (self.predicate)(event)
    }

    fn limit(&self) -> usize {
        self.limit
    }
}

/// Number of results a query may return
///
/// A positive `filter_limit` caps the result at `min(filter_limit, available)`;
/// zero leaves it bounded only by `available`.
pub fn effective_limit(filter_limit: usize, available: usize) -> usize {
    if filter_limit > 0 {
        filter_limit.min(available)
    } else {
        available
    }
}
