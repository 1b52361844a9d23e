use std::sync::Arc;
use std::thread;

use crate::bytes::pool::{BytePool, RegionPool};
use crate::constants::{keys, SettingsBuilder};

// Test: pool hands out regions of its fixed size.
#[test]
fn test_pool_acquire() {
    let pool = BytePool::new(100, 0, 10);
    let region = pool.acquire();
    assert_eq!(region.len(), 100);
    assert_eq!(pool.region_size(), 100);
}

// Test: released region is handed out again.
#[test]
fn test_pool_reuse() {
    let pool = BytePool::new(100, 0, 10);

    let region = pool.acquire();
    let ptr1 = region.as_ptr();
    pool.release(region);
    assert_eq!(pool.pooled(), 1);

    let region = pool.acquire();
    assert_eq!(ptr1, region.as_ptr(), "Region should be reused from pool");
    assert_eq!(pool.pooled(), 0);
}

// Test: pool preallocates specified number of regions.
#[test]
fn test_pool_preallocated() {
    let pool = BytePool::new(64, 5, 10);
    assert_eq!(pool.pooled(), 5);
    assert_eq!(pool.max_pooled(), 10);

    let regions: Vec<_> = (0..5).map(|_| pool.acquire()).collect();
    assert_eq!(pool.pooled(), 0);
    assert!(regions.iter().all(|region| region.len() == 64));
}

// Test: initial count wins over a smaller max.
#[test]
fn test_pool_initial_above_max() {
    let pool = BytePool::new(64, 3, 1);
    assert_eq!(pool.pooled(), 3);
    assert_eq!(pool.max_pooled(), 3);
}

// Test: pool respects max pooled limit.
#[test]
fn test_pool_max_size() {
    let pool = BytePool::new(100, 0, 2);

    let regions: Vec<_> = (0..3).map(|_| pool.acquire()).collect();
    for region in regions {
        pool.release(region);
    }

    assert_eq!(pool.pooled(), 2);
}

// Test: zero max still yields a usable pool.
#[test]
fn test_pool_zero_max() {
    let pool = BytePool::new(16, 0, 0);
    pool.release(pool.acquire());
    assert_eq!(pool.pooled(), 1);
}

// Test: regions of a foreign size are not pooled.
#[test]
fn test_pool_rejects_foreign_region() {
    let pool = BytePool::new(100, 0, 10);
    pool.release(vec![0u8; 50].into_boxed_slice());
    assert_eq!(pool.pooled(), 0);
}

// Test: pool sizing follows settings.
#[test]
fn test_pool_from_settings() {
    let settings = SettingsBuilder::default()
        .update(keys::RECBUF_BUFFER_SIZE, 256)
        .update(keys::RECBUF_POOL_INITIAL, 2)
        .update(keys::RECBUF_POOL_MAX, 8)
        .build();
    let pool = BytePool::from_settings(&settings);
    assert_eq!(pool.region_size(), 256);
    assert_eq!(pool.pooled(), 2);
    assert_eq!(pool.max_pooled(), 8);
}

// Test: global pool is shared.
#[test]
fn test_global_pool_shared() {
    let first = BytePool::global();
    let second = BytePool::global();
    assert!(Arc::ptr_eq(&first, &second));
}

// Test: pool is thread-safe for concurrent acquire and release.
#[test]
fn test_pool_thread_safety() {
    let pool = Arc::new(BytePool::new(100, 0, 10));
    let mut handles = vec![];

    for _ in 0..4 {
        let pool = Arc::clone(&pool);
        handles.push(thread::spawn(move || {
            for _ in 0..100 {
                let mut region = pool.acquire();
                region[0] = 42;
                assert_eq!(region[0], 42);
                pool.release(region);
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    assert!(pool.pooled() <= 4);
}
