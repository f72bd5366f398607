//! Integration tests for the front-end side of the backend contract
//!
//! These tests drive handle issuance, payload packaging, and the tracked
//! allocator together, the way the engine front end does before calls
//! reach a backend. No GPU required.
//!
//! Run with: cargo test --test contract_integration_tests

use nebula_gfx::nebula::alloc::{AllocScope, TrackingAllocator};
use nebula_gfx::nebula::gfx::{
    Attrib, AttribType, HandleAllocator, Memory, VertexBufferHandle, VertexLayout,
    VertexLayoutHandle,
};

// ============================================================================
// HANDLE ISSUANCE
// ============================================================================

#[test]
fn test_integration_handles_issue_per_kind_tables() {
    // One allocator per resource kind; indices are independent streams
    let mut layouts = HandleAllocator::new(64);
    let mut buffers = HandleAllocator::new(4096);

    let layout = VertexLayoutHandle::new(layouts.alloc().unwrap());
    let vb = VertexBufferHandle::new(buffers.alloc().unwrap());

    assert_eq!(layout.index(), 0);
    assert_eq!(vb.index(), 0);
    assert!(layout.is_valid() && vb.is_valid());

    // Front end frees in destroy order; indices become reusable
    buffers.free(vb.index());
    layouts.free(layout.index());
    assert!(layouts.is_empty());
    assert!(buffers.is_empty());
}

#[test]
fn test_integration_handle_reuse_after_destroy_cycle() {
    let mut buffers = HandleAllocator::new(16);

    let first = buffers.alloc().unwrap();
    buffers.free(first);
    let second = buffers.alloc().unwrap();

    // The front end may reuse an index only after destroy; the allocator
    // recycles exactly then
    assert_eq!(first, second);
}

// ============================================================================
// PAYLOAD PACKAGING
// ============================================================================

#[test]
fn test_integration_vertex_payload_matches_layout_stride() {
    #[repr(C)]
    #[derive(Clone, Copy, bytemuck::NoUninit)]
    struct Vertex {
        position: [f32; 3],
        color: u32,
    }

    let mut layout = VertexLayout::new();
    layout
        .add(Attrib::Position, 3, AttribType::Float, false)
        .add(Attrib::Color0, 4, AttribType::Uint8, true);
    assert_eq!(layout.stride() as usize, std::mem::size_of::<Vertex>());

    let vertices = [
        Vertex { position: [0.0, 0.0, 0.0], color: 0xff0000ff },
        Vertex { position: [1.0, 0.0, 0.0], color: 0xff00ff00 },
        Vertex { position: [0.0, 1.0, 0.0], color: 0xffff0000 },
    ];
    let mem = Memory::of_slice(&vertices);
    assert_eq!(mem.len(), 3 * layout.stride() as usize);
    assert_eq!(mem.len() % layout.stride() as usize, 0);
}

// ============================================================================
// TRACKED ALLOCATIONS
// ============================================================================

#[test]
fn test_integration_scoped_allocations_balance_to_zero() {
    let allocator = TrackingAllocator::new();

    // Simulate a backend servicing native allocation requests across
    // scopes during a resource's life, then releasing everything
    unsafe {
        let instance = allocator.alloc(AllocScope::Instance, 256, 8);
        let device = allocator.alloc(AllocScope::Device, 1024, 64);
        let object_a = allocator.alloc(AllocScope::Object, 128, 16);
        let object_b = allocator.alloc(AllocScope::Object, 128, 16);

        assert_eq!(allocator.outstanding_in(AllocScope::Object), 2);
        assert_eq!(allocator.outstanding(), 4);

        allocator.free(object_b);
        allocator.free(object_a);
        allocator.free(device);
        allocator.free(instance);
    }

    assert_eq!(allocator.outstanding(), 0);
    assert_eq!(allocator.outstanding_bytes(), 0);
}
