//! Basic usage example for recyclable buffers.
//!
//! This example demonstrates:
//! 1. Window operations on a pooled buffer
//! 2. Growing past the pool region size
//! 3. Stream adapters over `std::io` sources
//! 4. Scoped buffers and explicit release

use std::io::Cursor;
use std::sync::Arc;

use recbuf::bytes::{Buffer, BytePool, PoolReturn};
use recbuf::error::{BufferError, BufferResult};
use recbuf::net::{Address, Destination};

// ============================================================================
// WINDOW EXAMPLE
// ============================================================================

fn window_example(pool: &PoolReturn) -> BufferResult<()> {
    println!("--- Window Operations ---\n");

    let mut buffer = Buffer::new_in(pool);
    buffer.write(&[1, 2, 3, 4, 5]);
    println!("written: {:?}", buffer.bytes());

    buffer.advance(1);
    println!("after advance(1): {:?}", buffer.bytes());

    println!("last two bytes: {:?}", buffer.bytes_from(-2));
    println!("bytes_range(-3, -1): {:?}", buffer.bytes_range(-3, -1)?);

    buffer.resize(0, 2)?;
    println!("after resize(0, 2): {:?}", buffer.bytes());

    match buffer.resize(2, 1) {
        Err(BufferError::InvalidRange { from, to }) => println!("resize({from}, {to}) rejected"),
        other => println!("unexpected: {other:?}"),
    }

    buffer.release();
    println!("released, length = {}\n", buffer.len());
    Ok(())
}

// ============================================================================
// GROWTH EXAMPLE
// ============================================================================

fn growth_example(pool: &PoolReturn) {
    println!("--- Growth Past The Pool ---\n");

    let mut buffer = Buffer::new_in(pool);
    buffer.write(&vec![0xAB; pool.region_size()]);
    println!("full region: capacity={} recyclable={} full={}", buffer.capacity(), buffer.is_recyclable(), buffer.is_full());

    match buffer.write_byte(0xCD) {
        Err(err) => println!("write_byte on a full buffer: {err}"),
        Ok(()) => println!("write_byte unexpectedly succeeded"),
    }

    buffer.write(&[0xCD]);
    println!("after write: capacity={} recyclable={}\n", buffer.capacity(), buffer.is_recyclable());

    let big = Buffer::with_capacity_in(pool.region_size() * 2, pool);
    println!("sized above region: capacity={} recyclable={}\n", big.capacity(), big.is_recyclable());
}

// ============================================================================
// STREAM EXAMPLE
// ============================================================================

fn stream_example(pool: &PoolReturn) -> BufferResult<()> {
    println!("--- Stream Adapters ---\n");

    let mut source = Cursor::new(b"GET / HTTP/1.1\r\nHost: example.org\r\n\r\n".to_vec());
    let mut buffer = Buffer::new_in(pool);
    buffer.set_endpoint(Some(Destination::tcp(Address::Domain("example.org".to_string()), 80)));

    let header = buffer.read_full_from(&mut source, 14)?;
    println!("request line ({header} bytes): {}", buffer.to_string_lossy());

    let rest = buffer.read_from(&mut source)?;
    println!("read {rest} more bytes from {}", buffer.endpoint().map(ToString::to_string).unwrap_or_default());

    let mut chunk = [0u8; 16];
    while let Ok(count) = buffer.read(&mut chunk) {
        println!("drained {count} bytes: {:?}", String::from_utf8_lossy(&chunk[..count]));
    }

    match buffer.read_full_from(&mut source, 8) {
        Err(BufferError::ShortRead { expected, actual, .. }) => println!("short read: {actual}/{expected}\n"),
        other => println!("unexpected: {other:?}\n"),
    }
    Ok(())
}

// ============================================================================
// SCOPED EXAMPLE
// ============================================================================

fn scoped_example() {
    println!("--- Scoped Buffer ---\n");

    let length = Buffer::scoped(|buffer| {
        buffer.extend(4).copy_from_slice(b"ping");
        buffer.len()
    });
    println!("scoped buffer held {length} bytes and is already back in the global pool");
}

fn main() -> BufferResult<()> {
    let pool: PoolReturn = Arc::new(BytePool::new(64, 4, 16));

    window_example(&pool)?;
    growth_example(&pool);
    stream_example(&pool)?;
    scoped_example();
    Ok(())
}
