#[cfg(test)]
#[path = "../../tests/bytes/pool.rs"]
mod tests;

use std::sync::Arc;

use crossbeam::queue::ArrayQueue;
use lazy_static::lazy_static;
use log::{trace, warn};

use crate::bytes::utils::allocate_region;
use crate::constants::Settings;

/// Source of fixed-size byte regions shared by many buffers at once.
///
/// Implementations must be thread-safe. Every region handed out by `acquire`
/// is exactly `region_size()` bytes long, and buffers return each region at
/// most once through `release`.
pub trait RegionPool: Send + Sync {
    fn region_size(&self) -> usize;

    fn acquire(&self) -> Box<[u8]>;

    fn release(&self, region: Box<[u8]>);
}

pub type PoolReturn = Arc<dyn RegionPool>;

lazy_static! {
    static ref GLOBAL_POOL: PoolReturn = Arc::new(BytePool::from_settings(&Settings::default()));
}

/// Lock-free pool of reusable fixed-size regions.
pub struct BytePool {
    regions: ArrayQueue<Box<[u8]>>,
    region_size: usize,
}

impl BytePool {
    /// Create a new pool.
    /// - `region_size`: length of every region handed out
    /// - `initial`: pre-allocated region count
    /// - `max_pooled`: maximum idle regions to keep in pool
    pub fn new(region_size: usize, initial: usize, max_pooled: usize) -> Self {
        let actual_max = max_pooled.max(initial).max(1);

        let regions = ArrayQueue::new(actual_max);
        for _ in 0..initial {
            if regions.push(allocate_region(region_size)).is_err() {
                break;
            }
        }

        BytePool {
            regions,
            region_size,
        }
    }

    #[inline]
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.buffer_size(), settings.pool_initial(), settings.pool_max())
    }

    /// Process-wide pool, sized by `Settings::default()` on first use.
    #[inline]
    pub fn global() -> PoolReturn {
        Arc::clone(&GLOBAL_POOL)
    }

    /// Number of idle regions currently held.
    #[inline]
    pub fn pooled(&self) -> usize {
        self.regions.len()
    }

    #[inline]
    pub fn max_pooled(&self) -> usize {
        self.regions.capacity()
    }
}

impl RegionPool for BytePool {
    #[inline]
    fn region_size(&self) -> usize {
        self.region_size
    }

    fn acquire(&self) -> Box<[u8]> {
        self.regions.pop().unwrap_or_else(|| allocate_region(self.region_size))
    }

    fn release(&self, region: Box<[u8]>) {
        if region.len() != self.region_size {
            warn!("region of {} bytes returned to pool of {} byte regions, discarding", region.len(), self.region_size);
            return;
        }
        if self.regions.push(region).is_err() {
            trace!("pool already holds {} regions, dropping returned region", self.regions.capacity());
        }
    }
}
