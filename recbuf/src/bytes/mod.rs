mod buffer;
mod pool;
mod region;
mod utils;

pub use buffer::{Buffer, BufferReader};
pub use pool::{BytePool, PoolReturn, RegionPool};
