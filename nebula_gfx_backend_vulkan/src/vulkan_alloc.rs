//! Host allocation callback shim
//!
//! Adapts the engine's [`TrackingAllocator`] to the callback shape Vulkan
//! demands (`VkAllocationCallbacks`): allocate/reallocate/free entry points
//! plus the two informational internal-allocation notification hooks. The
//! allocation scope maps 1:1 onto the engine's [`AllocScope`] and is used
//! purely as a tracking label.
//!
//! The two notification hooks are informational only: the driver reports
//! allocations it performed itself, and nothing here may influence control
//! flow in response.

use std::ffi::c_void;
use std::sync::Arc;

use ash::vk;

use nebula_gfx::nebula::alloc::{AllocScope, TrackingAllocator};

/// Owns the `user_data` target for a `VkAllocationCallbacks` table.
///
/// Boxed so the allocator pointer handed to the driver stays stable for
/// the life of the backend. The callbacks table borrows from `self`; keep
/// this alive as long as any device object created with it.
pub struct HostAllocationCallbacks {
    allocator: Arc<TrackingAllocator>,
}

impl HostAllocationCallbacks {
    /// Wrap the engine allocator for use as Vulkan host allocation callbacks
    pub fn new(allocator: Arc<TrackingAllocator>) -> Box<Self> {
        Box::new(Self { allocator })
    }

    /// The callbacks table to pass to Vulkan entry points
    pub fn callbacks(&self) -> vk::AllocationCallbacks<'_> {
        vk::AllocationCallbacks::default()
            .user_data(Arc::as_ptr(&self.allocator) as *mut c_void)
            .pfn_allocation(Some(allocation_fn))
            .pfn_reallocation(Some(reallocation_fn))
            .pfn_free(Some(free_fn))
            .pfn_internal_allocation(Some(internal_allocation_notification))
            .pfn_internal_free(Some(internal_free_notification))
    }

    /// The wrapped engine allocator
    pub fn allocator(&self) -> &TrackingAllocator {
        &self.allocator
    }
}

/// Map a Vulkan allocation scope onto the engine's scope label
pub fn scope_from_vk(scope: vk::SystemAllocationScope) -> AllocScope {
    if scope == vk::SystemAllocationScope::COMMAND {
        AllocScope::Command
    } else if scope == vk::SystemAllocationScope::OBJECT {
        AllocScope::Object
    } else if scope == vk::SystemAllocationScope::CACHE {
        AllocScope::Cache
    } else if scope == vk::SystemAllocationScope::DEVICE {
        AllocScope::Device
    } else {
        AllocScope::Instance
    }
}

unsafe extern "system" fn allocation_fn(
    user_data: *mut c_void,
    size: usize,
    alignment: usize,
    scope: vk::SystemAllocationScope,
) -> *mut c_void {
    let allocator = &*(user_data as *const TrackingAllocator);
    allocator.alloc(scope_from_vk(scope), size, alignment) as *mut c_void
}

unsafe extern "system" fn reallocation_fn(
    user_data: *mut c_void,
    original: *mut c_void,
    size: usize,
    alignment: usize,
    scope: vk::SystemAllocationScope,
) -> *mut c_void {
    let allocator = &*(user_data as *const TrackingAllocator);
    allocator.realloc(scope_from_vk(scope), original as *mut u8, size, alignment) as *mut c_void
}

unsafe extern "system" fn free_fn(user_data: *mut c_void, memory: *mut c_void) {
    // Null is a no-op, never an error
    if memory.is_null() {
        return;
    }
    let allocator = &*(user_data as *const TrackingAllocator);
    allocator.free(memory as *mut u8);
}

unsafe extern "system" fn internal_allocation_notification(
    _user_data: *mut c_void,
    _size: usize,
    _allocation_type: vk::InternalAllocationType,
    _scope: vk::SystemAllocationScope,
) {
}

unsafe extern "system" fn internal_free_notification(
    _user_data: *mut c_void,
    _size: usize,
    _allocation_type: vk::InternalAllocationType,
    _scope: vk::SystemAllocationScope,
) {
}

// ============================================================================
// Tests
// ============================================================================
