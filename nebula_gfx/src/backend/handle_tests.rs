use super::*;

// ============================================================================
// Handle newtype tests
// ============================================================================

#[test]
fn test_handle_roundtrips_index() {
    let h = TextureHandle::new(42);
    assert_eq!(h.index(), 42);
    assert!(h.is_valid());
}

#[test]
fn test_invalid_handle() {
    let h = IndexBufferHandle::invalid();
    assert!(!h.is_valid());
    assert_eq!(h.index(), INVALID_HANDLE_INDEX);
}

#[test]
fn test_handles_of_same_kind_compare_by_index() {
    assert_eq!(ShaderHandle::new(3), ShaderHandle::new(3));
    assert_ne!(ShaderHandle::new(3), ShaderHandle::new(4));
}

#[test]
fn test_resource_handle_distinguishes_kinds() {
    let a = ResourceHandle::Texture(TextureHandle::new(0));
    let b = ResourceHandle::Shader(ShaderHandle::new(0));
    assert_ne!(a, b);
}

// ============================================================================
// Allocator: basic allocation
// ============================================================================

#[test]
fn test_sequential_alloc() {
    let mut alloc = HandleAllocator::new(16);
    assert_eq!(alloc.alloc(), Some(0));
    assert_eq!(alloc.alloc(), Some(1));
    assert_eq!(alloc.alloc(), Some(2));
}

#[test]
fn test_new_is_empty() {
    let alloc = HandleAllocator::new(16);
    assert!(alloc.is_empty());
    assert_eq!(alloc.len(), 0);
    assert_eq!(alloc.high_water_mark(), 0);
    assert_eq!(alloc.capacity(), 16);
}

// ============================================================================
// Allocator: free and recycle
// ============================================================================

#[test]
fn test_free_and_recycle() {
    let mut alloc = HandleAllocator::new(16);
    let a = alloc.alloc().unwrap(); // 0
    let b = alloc.alloc().unwrap(); // 1
    alloc.free(a);                   // 0 goes to free list
    let c = alloc.alloc().unwrap(); // 0 (recycled)
    assert_eq!(c, 0);
    assert_eq!(b, 1);
}

#[test]
fn test_free_multiple_recycle_lifo() {
    // Free list is a stack (LIFO): last freed = first recycled
    let mut alloc = HandleAllocator::new(16);
    let a = alloc.alloc().unwrap(); // 0
    let _b = alloc.alloc().unwrap(); // 1
    let c = alloc.alloc().unwrap(); // 2
    alloc.free(a); // free list: [0]
    alloc.free(c); // free list: [0, 2]

    assert_eq!(alloc.alloc(), Some(2));
    assert_eq!(alloc.alloc(), Some(0));
    assert_eq!(alloc.alloc(), Some(3));
}

// ============================================================================
// Allocator: capacity
// ============================================================================

#[test]
fn test_alloc_exhaustion_returns_none() {
    let mut alloc = HandleAllocator::new(2);
    assert!(alloc.alloc().is_some());
    assert!(alloc.alloc().is_some());
    assert_eq!(alloc.alloc(), None);

    // Freeing opens a slot again
    alloc.free(0);
    assert_eq!(alloc.alloc(), Some(0));
}

#[test]
fn test_high_water_mark_never_decreases() {
    let mut alloc = HandleAllocator::new(16);
    alloc.alloc(); // 0
    alloc.alloc(); // 1
    assert_eq!(alloc.high_water_mark(), 2);

    alloc.free(0);
    alloc.free(1);
    assert_eq!(alloc.high_water_mark(), 2);

    // Recycled allocs don't increase it; fresh ones do
    alloc.alloc();
    alloc.alloc();
    assert_eq!(alloc.high_water_mark(), 2);
    alloc.alloc();
    assert_eq!(alloc.high_water_mark(), 3);
}

#[test]
fn test_indices_are_unique_across_recycling() {
    let mut alloc = HandleAllocator::new(64);
    let mut seen = std::collections::HashSet::new();

    for _ in 0..50 {
        seen.insert(alloc.alloc().unwrap());
    }
    for index in 0..10 {
        alloc.free(index);
        seen.remove(&index);
    }
    for _ in 0..10 {
        let index = alloc.alloc().unwrap();
        assert!(seen.insert(index), "duplicate handle index: {}", index);
    }
    assert_eq!(seen.len(), 50);
}
