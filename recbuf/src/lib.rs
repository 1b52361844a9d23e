//! Recyclable byte buffers for network data paths.
//!
//! A [`bytes::Buffer`] is a `[start, end)` window over a backing region. Regions come
//! from a shared fixed-size [`bytes::RegionPool`] and go back to it exactly once on
//! release; buffers that outgrow the pool continue on a dedicated heap allocation.

pub mod bytes;
pub mod constants;
pub mod error;
pub mod net;
