#[cfg(test)]
#[path = "../../tests/bytes/utils.rs"]
mod tests;

/// Resolve a possibly negative index against `length`: `-1` is the last byte.
#[inline]
pub fn normalize_index(index: isize, length: usize) -> usize {
    if index >= 0 {
        return index as usize;
    }
    let back = index.unsigned_abs();
    assert!(back <= length, "index out of bounds: {index} from the end of {length} bytes");
    length - back
}

#[inline]
pub fn allocate_region(size: usize) -> Box<[u8]> {
    vec![0u8; size].into_boxed_slice()
}

/// Allocate exactly `size` bytes and copy `region[start..end]` to the same offsets.
pub fn regrow_region(region: &[u8], start: usize, end: usize, size: usize) -> Box<[u8]> {
    assert!(end <= size, "regrown region too small ({end} > {size})!");
    let mut grown = allocate_region(size);
    grown[start..end].copy_from_slice(&region[start..end]);
    grown
}
