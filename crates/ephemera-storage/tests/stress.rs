//! Stress tests for ephemera-storage
//!
//! These tests verify ring store behavior under high load, sustained
//! eviction, and concurrent access from tasks and threads.

use std::sync::Arc;
use std::thread;
use std::time::Instant;

use ephemera_logging::init_testing;
use ephemera_storage::{
    EventStore, MatchAll, Predicate, RingConfigBuilder, RingStore, ScanOrder,
};

/// Event with enough structure to detect torn or mixed writes
#[derive(Debug, Clone, PartialEq, Eq)]
struct TestEvent {
    writer: u64,
    seq: u64,
    /// Always `writer * 1_000_000 + seq`
    checksum: u64,
}

impl TestEvent {
    fn new(writer: u64, seq: u64) -> Self {
        Self {
            writer,
            seq,
            checksum: writer * 1_000_000 + seq,
        }
    }

    fn is_whole(&self) -> bool {
        self.checksum == self.writer * 1_000_000 + self.seq
    }
}

// ============================================================================
// Throughput Tests
// ============================================================================

/// Test saving 100,000 events into a small store
///
/// Verifies sustained eviction keeps exactly the newest `capacity` events.
#[tokio::test]
async fn test_save_throughput_with_eviction() {
    init_testing();
    let capacity = 1_000;
    let store = RingStore::new(capacity).unwrap();
    let event_count: u64 = 100_000;

    let start = Instant::now();

    for seq in 1..=event_count {
        store
            .save(TestEvent::new(0, seq))
            .await
            .expect("Failed to save event");
    }

    let duration = start.elapsed();
    println!(
        "Saved {} events in {:?} ({:.2} events/sec)",
        event_count,
        duration,
        event_count as f64 / duration.as_secs_f64()
    );

    assert_eq!(store.size(), capacity);

    let stats = store.stats();
    assert_eq!(stats.total_saved, event_count);
    assert_eq!(stats.evicted, event_count - capacity as u64);

    // Newest 1,000 remain, in save order
    let all = store.query(&MatchAll::new()).await.unwrap();
    let expected: Vec<u64> = (event_count - capacity as u64 + 1..=event_count).collect();
    let actual: Vec<u64> = all.iter().map(|e| e.seq).collect();
    assert_eq!(actual, expected);
}

/// Test query throughput over a saturated store
#[tokio::test]
async fn test_query_throughput() {
    init_testing();
    let store = RingStore::new(10_000).unwrap();
    for seq in 1..=25_000 {
        store.push(TestEvent::new(0, seq));
    }

    let every_tenth = Predicate::new(|e: &TestEvent| e.seq % 10 == 0);
    let start = Instant::now();

    for _ in 0..100 {
        let found = store.query(&every_tenth).await.unwrap();
        assert_eq!(found.len(), 1_000);
    }

    println!("Ran 100 queries over 10,000 events in {:?}", start.elapsed());
}

// ============================================================================
// Eviction Tests
// ============================================================================

/// Test that evicted events never resurface
#[tokio::test]
async fn test_evicted_events_unrecoverable() {
    init_testing();
    let store = RingStore::new(100).unwrap();

    for seq in 1..=1_000 {
        store.save(TestEvent::new(0, seq)).await.unwrap();
    }

    let all = store.query(&MatchAll::new()).await.unwrap();
    assert_eq!(all.len(), 100);

    // The last 100 should remain
    for seq in 901..=1_000 {
        assert!(
            all.iter().any(|e| e.seq == seq),
            "Event {} should be present",
            seq
        );
    }

    // The first 900 should be gone
    let early = Predicate::new(|e: &TestEvent| e.seq <= 900);
    assert!(store.query(&early).await.unwrap().is_empty());
}

/// Test both scan orders hold the same set after many wraparounds
#[tokio::test]
async fn test_scan_orders_agree_on_contents() {
    init_testing();
    let chronological = RingStore::new(7).unwrap();
    let slot = RingStore::with_config(
        RingConfigBuilder::new()
            .capacity(7)
            .scan_order(ScanOrder::Slot)
            .build()
            .unwrap(),
    )
    .unwrap();

    for seq in 1..=53 {
        chronological.save(TestEvent::new(0, seq)).await.unwrap();
        slot.save(TestEvent::new(0, seq)).await.unwrap();
    }

    let mut in_time: Vec<u64> = chronological
        .query(&MatchAll::new())
        .await
        .unwrap()
        .iter()
        .map(|e| e.seq)
        .collect();
    let mut in_slots: Vec<u64> = slot
        .query(&MatchAll::new())
        .await
        .unwrap()
        .iter()
        .map(|e| e.seq)
        .collect();

    assert_eq!(in_time, (47..=53).collect::<Vec<_>>());

    in_time.sort_unstable();
    in_slots.sort_unstable();
    assert_eq!(in_time, in_slots);
}

// ============================================================================
// Concurrent Access Tests
// ============================================================================

/// Test concurrent saves from multiple tasks
///
/// Size must equal min(saves, capacity) and every retained event must be whole.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_saves() {
    init_testing();
    for (capacity, writers, per_writer) in [(64, 8, 4), (64, 8, 100), (1_000, 10, 50)] {
        let store = Arc::new(RingStore::new(capacity).unwrap());
        let mut handles = vec![];

        for writer in 0..writers {
            let store_clone = Arc::clone(&store);
            let handle = tokio::spawn(async move {
                for seq in 1..=per_writer {
                    store_clone
                        .save(TestEvent::new(writer, seq))
                        .await
                        .expect("Failed to save");
                }
            });
            handles.push(handle);
        }

        for handle in handles {
            handle.await.expect("Task panicked");
        }

        let total = (writers * per_writer) as usize;
        assert_eq!(store.size(), total.min(capacity));

        let all = store.query(&MatchAll::new()).await.unwrap();
        assert_eq!(all.len(), total.min(capacity));
        assert!(all.iter().all(TestEvent::is_whole));
    }
}

/// Test queries running alongside saves on OS threads
///
/// Readers must only ever see whole events, a length that never shrinks,
/// and per-writer sequences in increasing order.
#[test]
fn test_concurrent_readers_and_writers() {
    init_testing();
    let capacity = 256;
    let store = Arc::new(RingStore::new(capacity).unwrap());
    let writers: u64 = 4;
    let per_writer: u64 = 5_000;

    let mut writer_handles = vec![];
    for writer in 0..writers {
        let store = Arc::clone(&store);
        writer_handles.push(thread::spawn(move || {
            for seq in 1..=per_writer {
                store.push(TestEvent::new(writer, seq));
            }
        }));
    }

    let mut reader_handles = vec![];
    for _ in 0..4 {
        let store = Arc::clone(&store);
        reader_handles.push(thread::spawn(move || {
            let mut last_len = 0;
            for _ in 0..500 {
                let snapshot = store.scan(&MatchAll::new());

                assert!(snapshot.len() >= last_len, "Length went backwards");
                assert!(snapshot.len() <= capacity);
                assert!(snapshot.iter().all(TestEvent::is_whole));

                for writer in 0..writers {
                    let from_writer: Vec<u64> = snapshot
                        .iter()
                        .filter(|e| e.writer == writer)
                        .map(|e| e.seq)
                        .collect();
                    assert!(
                        from_writer.windows(2).all(|w| w[0] < w[1]),
                        "Writer {} out of order",
                        writer
                    );
                }

                last_len = snapshot.len();
            }
        }));
    }

    for handle in writer_handles {
        handle.join().expect("Writer panicked");
    }
    for handle in reader_handles {
        handle.join().expect("Reader panicked");
    }

    let stats = store.stats();
    assert_eq!(stats.len, capacity);
    assert_eq!(stats.total_saved, writers * per_writer);
}

/// Test limited queries under concurrent load
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_limited_queries() {
    init_testing();
    let store = Arc::new(RingStore::new(500).unwrap());
    for seq in 1..=500 {
        store.push(TestEvent::new(0, seq));
    }

    let mut handles = vec![];

    // Writers keep the buffer wrapping
    for writer in 1..=2 {
        let store_clone = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            for seq in 1..=2_000 {
                store_clone.save(TestEvent::new(writer, seq)).await.unwrap();
            }
        }));
    }

    // Readers ask for capped slices
    for limit in [1, 10, 100] {
        let store_clone = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            let filter = MatchAll::new().with_limit(limit);
            for _ in 0..200 {
                let found = store_clone.query(&filter).await.unwrap();
                assert_eq!(found.len(), limit);
            }
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(store.size(), 500);
}
