use crate::bytes::utils::*;

#[test]
fn test_normalize_positive() {
    assert_eq!(normalize_index(0, 5), 0);
    assert_eq!(normalize_index(3, 5), 3);
    assert_eq!(normalize_index(7, 5), 7);
}

#[test]
fn test_normalize_negative() {
    assert_eq!(normalize_index(-1, 5), 4);
    assert_eq!(normalize_index(-5, 5), 0);
}

#[test]
#[should_panic(expected = "index out of bounds")]
fn test_normalize_before_start() {
    normalize_index(-6, 5);
}

#[test]
fn test_allocate_region() {
    let region = allocate_region(100);
    assert_eq!(region.len(), 100);
    assert!(region.iter().all(|&byte| byte == 0));
}

#[test]
fn test_regrow_region_keeps_offsets() {
    let region: Vec<u8> = (0..10).collect();
    let grown = regrow_region(&region, 2, 6, 16);
    assert_eq!(grown.len(), 16);
    assert_eq!(&grown[2..6], &[2, 3, 4, 5]);
    assert_eq!(&grown[..2], &[0, 0]);
    assert!(grown[6..].iter().all(|&byte| byte == 0));
}

#[test]
fn test_regrow_empty_region() {
    let grown = regrow_region(&[], 0, 0, 8);
    assert_eq!(grown.len(), 8);
}
