use std::mem::take;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use crate::bytes::pool::PoolReturn;

/// Owns backing memory; a pooled region goes back to its pool when dropped.
pub(super) struct Region {
    data: Box<[u8]>,
    home: Option<PoolReturn>,
}

impl Region {
    #[inline]
    pub(super) fn pooled(pool: &PoolReturn) -> Self {
        Self {
            data: pool.acquire(),
            home: Some(Arc::clone(pool)),
        }
    }

    #[inline]
    pub(super) fn owned(data: Box<[u8]>) -> Self {
        Self {
            data,
            home: None,
        }
    }

    #[inline]
    pub(super) fn is_pooled(&self) -> bool {
        self.home.is_some()
    }

    /// Detach the memory, the pool never sees it again.
    #[inline]
    pub(super) fn into_data(mut self) -> Box<[u8]> {
        self.home = None;
        take(&mut self.data)
    }
}

impl Deref for Region {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &[u8] {
        &self.data
    }
}

impl DerefMut for Region {
    #[inline]
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl Drop for Region {
    fn drop(&mut self) {
        if let Some(pool) = self.home.take() {
            pool.release(take(&mut self.data));
        }
    }
}
