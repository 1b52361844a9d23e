#[cfg(test)]
#[path = "../../tests/bytes/buffer.rs"]
mod tests;

use std::borrow::Cow;
use std::fmt::{self, Debug, Formatter};
use std::io::{self, ErrorKind, Read, Write};

use log::debug;

use crate::bytes::pool::{BytePool, PoolReturn};
use crate::bytes::region::Region;
use crate::bytes::utils::{allocate_region, normalize_index, regrow_region};
use crate::error::{BufferError, BufferResult};
use crate::net::Destination;

/// A growable `[start, end)` window over a backing region.
///
/// The region either comes from a `RegionPool` (recyclable) or is a dedicated
/// allocation. A recyclable buffer that has to grow past the pool's region size
/// hands its region back and continues on an exactly sized heap copy; it never
/// becomes recyclable again. Single owner, no internal locking.
pub struct Buffer {
    region: Option<Region>,
    start: usize,
    end: usize,
    endpoint: Option<Destination>,
}

impl Buffer {
    #[inline]
    fn with_region(region: Region) -> Self {
        Buffer {
            region: Some(region),
            start: 0,
            end: 0,
            endpoint: None,
        }
    }

    /// Empty buffer backed by a region from `pool`.
    #[inline]
    pub fn new_in(pool: &PoolReturn) -> Self {
        Self::with_region(Region::pooled(pool))
    }

    /// Empty buffer backed by the global pool.
    #[inline]
    pub fn new() -> Self {
        Self::new_in(&BytePool::global())
    }

    /// Empty buffer able to hold `size` bytes without growing.
    /// Requests above the pool's region size get a dedicated, non-recyclable allocation.
    pub fn with_capacity_in(size: usize, pool: &PoolReturn) -> Self {
        if size <= pool.region_size() {
            Self::new_in(pool)
        } else {
            Self::with_region(Region::owned(allocate_region(size)))
        }
    }

    #[inline]
    pub fn with_capacity(size: usize) -> Self {
        Self::with_capacity_in(size, &BytePool::global())
    }

    /// Buffer holding a copy of `data`.
    pub fn from_slice_in(data: &[u8], pool: &PoolReturn) -> Self {
        let mut buffer = Self::with_capacity_in(data.len(), pool);
        buffer.write(data);
        buffer
    }

    #[inline]
    pub fn from_slice(data: &[u8]) -> Self {
        Self::from_slice_in(data, &BytePool::global())
    }

    /// Use caller memory as the backing region. The window starts empty and the
    /// buffer is never recyclable, the memory was not obtained from a pool.
    #[inline]
    pub fn wrap(data: Vec<u8>) -> Self {
        Self::with_region(Region::owned(data.into_boxed_slice()))
    }

    /// Run `body` on a fresh pooled buffer that is released as soon as it returns.
    pub fn scoped_in<R>(pool: &PoolReturn, body: impl FnOnce(&mut Buffer) -> R) -> R {
        let mut buffer = Self::new_in(pool);
        let result = body(&mut buffer);
        buffer.release();
        result
    }

    #[inline]
    pub fn scoped<R>(body: impl FnOnce(&mut Buffer) -> R) -> R {
        Self::scoped_in(&BytePool::global(), body)
    }

    /// Return a pooled region to its pool and forget it.
    /// Non-recyclable buffers only get their cursors reset. Safe to call repeatedly.
    pub fn release(&mut self) {
        self.clear();
        if self.is_recyclable() {
            let region = self.region.take();
            drop(region);
        }
    }

    /// Copy of the window content, without copying when the memory is caller owned.
    pub fn into_vec(mut self) -> Vec<u8> {
        match self.region.take() {
            Some(region) if !region.is_pooled() && self.start == 0 => {
                let mut data = region.into_data().into_vec();
                data.truncate(self.end);
                data
            }
            Some(region) => region[self.start..self.end].to_vec(),
            None => Vec::new(),
        }
    }
}

impl Buffer {
    /// Returns the length of the window in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }

    /// Returns true if there is no room left after the window.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.end == self.capacity()
    }

    /// Size of the backing region, zero once released.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.region.as_deref().map_or(0, <[u8]>::len)
    }

    /// Whether the backing region goes back to a pool on release.
    #[inline]
    pub fn is_recyclable(&self) -> bool {
        self.region.as_ref().is_some_and(Region::is_pooled)
    }

    #[inline]
    pub fn is_released(&self) -> bool {
        self.region.is_none()
    }

    #[inline]
    pub fn endpoint(&self) -> Option<&Destination> {
        self.endpoint.as_ref()
    }

    #[inline]
    pub fn set_endpoint(&mut self, endpoint: Option<Destination>) {
        self.endpoint = endpoint;
    }

    #[inline]
    pub fn take_endpoint(&mut self) -> Option<Destination> {
        self.endpoint.take()
    }

    #[inline]
    fn region(&self) -> &[u8] {
        self.region.as_deref().unwrap_or_default()
    }

    #[inline]
    fn region_mut(&mut self) -> &mut [u8] {
        self.region.as_deref_mut().unwrap_or_default()
    }
}

impl Buffer {
    /// Get byte at `index` within the window. Panics if out of bounds.
    #[inline]
    pub fn byte_at(&self, index: usize) -> u8 {
        assert!(index < self.len(), "index out of bounds: {} >= {}", index, self.len());
        self.region()[self.start + index]
    }

    /// Set byte at `index` within the window. Panics if out of bounds.
    #[inline]
    pub fn set_byte_at(&mut self, index: usize, value: u8) {
        assert!(index < self.len(), "index out of bounds: {} >= {}", index, self.len());
        let at = self.start + index;
        self.region_mut()[at] = value;
    }

    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.region()[self.start..self.end]
    }

    #[inline]
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        let (start, end) = (self.start, self.end);
        &mut self.region_mut()[start..end]
    }

    /// Window bytes between `from` and `to`, negative indices count from the end.
    pub fn bytes_range(&self, from: isize, to: isize) -> BufferResult<&[u8]> {
        let (from, to) = self.normalize_range(from, to)?;
        assert!(to <= self.len(), "range end out of bounds: {} > {}", to, self.len());
        Ok(&self.region()[self.start + from..self.start + to])
    }

    /// Window bytes from `from` to the end, negative index counts from the end.
    pub fn bytes_from(&self, from: isize) -> &[u8] {
        let from = normalize_index(from, self.len());
        assert!(from <= self.len(), "range start out of bounds: {} > {}", from, self.len());
        &self.region()[self.start + from..self.end]
    }

    /// Window bytes from the start up to `to`, negative index counts from the end.
    pub fn bytes_to(&self, to: isize) -> &[u8] {
        let to = normalize_index(to, self.len());
        assert!(to <= self.len(), "range end out of bounds: {} > {}", to, self.len());
        &self.region()[self.start..self.start + to]
    }

    /// Cut the window to `[from, to)` relative to its current start.
    /// `to` may reach past the current end as long as it stays inside the region.
    pub fn resize(&mut self, from: isize, to: isize) -> BufferResult<()> {
        let (from, to) = self.normalize_range(from, to)?;
        let new_end = self.start + to;
        assert!(new_end <= self.capacity(), "Buffer exceeded its capacity ({new_end} > {})!", self.capacity());
        self.end = new_end;
        self.start += from;
        Ok(())
    }

    /// Drop `from` bytes off the front of the window.
    pub fn advance(&mut self, from: isize) {
        let from = normalize_index(from, self.len());
        assert!(from <= self.len(), "Buffer advanced past its end ({from} > {})!", self.len());
        self.start += from;
    }

    /// Empty the window, keeping the backing region.
    #[inline]
    pub fn clear(&mut self) {
        self.start = 0;
        self.end = 0;
    }

    #[inline]
    fn normalize_range(&self, from: isize, to: isize) -> BufferResult<(usize, usize)> {
        let from = normalize_index(from, self.len());
        let to = normalize_index(to, self.len());
        if to < from {
            return Err(BufferError::InvalidRange { from, to });
        }
        Ok((from, to))
    }
}

impl Buffer {
    /// Make sure the backing region holds at least `required` bytes.
    ///
    /// Growth always reallocates to exactly `required` bytes and keeps the window at the
    /// same offsets. A pooled region is handed back and the buffer stops being recyclable.
    pub fn require(&mut self, required: usize) {
        let capacity = self.capacity();
        if capacity >= required {
            return;
        }
        let grown = regrow_region(self.region(), self.start, self.end, required);
        if let Some(previous) = self.region.replace(Region::owned(grown)) {
            if previous.is_pooled() {
                debug!("buffer out of pool: required {required} bytes, pooled region holds {capacity}");
            }
        }
    }

    /// Append `data`, growing as needed. Returns bytes written.
    pub fn write(&mut self, data: &[u8]) -> usize {
        let end = self.end + data.len();
        self.require(end);
        let start = self.end;
        self.region_mut()[start..end].copy_from_slice(data);
        self.end = end;
        data.len()
    }

    /// Append a single byte. Never grows: fails once the region is full.
    pub fn write_byte(&mut self, value: u8) -> BufferResult<()> {
        if self.is_full() {
            return Err(BufferError::BufferFull {
                capacity: self.capacity(),
            });
        }
        let at = self.end;
        self.region_mut()[at] = value;
        self.end += 1;
        Ok(())
    }

    /// Move window bytes into `dst`. A fully drained buffer is cleared.
    pub fn read(&mut self, dst: &mut [u8]) -> BufferResult<usize> {
        if self.is_empty() {
            return Err(BufferError::EndOfStream);
        }
        let count = dst.len().min(self.len());
        dst[..count].copy_from_slice(&self.region()[self.start..self.start + count]);
        if count == self.len() {
            self.clear();
        } else {
            self.start += count;
        }
        Ok(count)
    }

    /// One read from `source` into the free tail of the region, without growing.
    pub fn read_from<R: Read + ?Sized>(&mut self, source: &mut R) -> BufferResult<usize> {
        let end = self.end;
        let count = source.read(&mut self.region_mut()[end..])?;
        self.end += count;
        Ok(count)
    }

    /// Read exactly `size` bytes from `source`, growing as needed.
    /// Whatever arrived before the source ended stays in the window.
    pub fn read_full_from<R: Read + ?Sized>(&mut self, source: &mut R, size: usize) -> BufferResult<usize> {
        let end = self.end + size;
        self.require(end);
        let mut actual = 0;
        while actual < size {
            let from = self.end + actual;
            match source.read(&mut self.region_mut()[from..end]) {
                Ok(0) => break,
                Ok(count) => actual += count,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => {
                    self.end += actual;
                    return Err(BufferError::short_read(size, actual, Some(err)));
                }
            }
        }
        self.end += actual;
        if actual < size {
            return Err(BufferError::short_read(size, actual, None));
        }
        Ok(actual)
    }

    /// Grow the window by `size` bytes and return them for the caller to fill.
    pub fn extend(&mut self, size: usize) -> &mut [u8] {
        let start = self.end;
        let end = start + size;
        self.require(end);
        self.end = end;
        &mut self.region_mut()[start..end]
    }

    /// Borrow the buffer as a `std::io::Read` source.
    #[inline]
    pub fn reader(&mut self) -> BufferReader<'_> {
        BufferReader {
            buffer: self,
        }
    }

    #[inline]
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.bytes())
    }
}

impl Default for Buffer {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// `std::io::Read` view that drains a buffer's window.
/// An empty window reads as end of stream (`Ok(0)`).
pub struct BufferReader<'a> {
    buffer: &'a mut Buffer,
}

impl Read for BufferReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.buffer.read(buf) {
            Ok(count) => Ok(count),
            Err(BufferError::EndOfStream) => Ok(0),
            Err(err) => Err(err.into()),
        }
    }
}

impl Write for Buffer {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(Buffer::write(self, buf))
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl fmt::Write for Buffer {
    #[inline]
    fn write_str(&mut self, s: &str) -> fmt::Result {
        Buffer::write(self, s.as_bytes());
        Ok(())
    }
}

impl AsRef<[u8]> for Buffer {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.bytes()
    }
}

impl AsMut<[u8]> for Buffer {
    #[inline]
    fn as_mut(&mut self) -> &mut [u8] {
        self.bytes_mut()
    }
}

impl Debug for Buffer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("capacity", &self.capacity())
            .field("recyclable", &self.is_recyclable())
            .field("endpoint", &self.endpoint)
            .finish()
    }
}
