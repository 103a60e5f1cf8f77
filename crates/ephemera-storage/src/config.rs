//! Ring store configuration
//!
//! This module holds the capacity and scan order settings for a
//! [`RingStore`](crate::RingStore), loadable from any serde format.

use ephemera_core::StoreError;
use serde::{Deserialize, Serialize};

/// Capacity used when none is configured
pub const DEFAULT_CAPACITY: usize = 1024;

/// Order in which a query visits stored events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanOrder {
    /// Oldest to newest retained event (default)
    ///
    /// Once the buffer has wrapped, the scan starts at the slot that will be
    /// overwritten next.
    #[default]
    Chronological,
    /// Physical slot order `0..len`
    ///
    /// Matches save order only until the buffer first wraps.
    Slot,
}

/// Settings for a ring store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingConfig {
    /// Number of slots, fixed for the lifetime of the store
    pub capacity: usize,
    /// Query scan order
    pub scan_order: ScanOrder,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            scan_order: ScanOrder::default(),
        }
    }
}

impl RingConfig {
    /// Create a config with the given capacity and the default scan order
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    /// Set the scan order
    pub fn with_scan_order(mut self, scan_order: ScanOrder) -> Self {
        self.scan_order = scan_order;
        self
    }

    /// Check that a store can be built from this config
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidCapacity`] if `capacity` is zero.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.capacity == 0 {
            return Err(StoreError::invalid_capacity(self.capacity));
        }
        Ok(())
    }
}

/// Builder for RingConfig
#[derive(Debug, Default)]
pub struct RingConfigBuilder {
    capacity: Option<usize>,
    scan_order: Option<ScanOrder>,
}

impl RingConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of slots
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Set the scan order
    pub fn scan_order(mut self, scan_order: ScanOrder) -> Self {
        self.scan_order = Some(scan_order);
        self
    }

    /// Build and validate the RingConfig
    pub fn build(self) -> Result<RingConfig, StoreError> {
        let mut config = RingConfig::default();

        if let Some(capacity) = self.capacity {
            config.capacity = capacity;
        }
        if let Some(scan_order) = self.scan_order {
            config.scan_order = scan_order;
        }

        config.validate()?;
        Ok(config)
    }
}
