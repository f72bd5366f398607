//! Tracked host allocator
//!
//! All backend-owned host memory flows through [`TrackingAllocator`], which
//! wraps the global allocator with per-scope outstanding allocation and byte
//! counters. Backends hand this allocator to their native API's
//! allocation-callback mechanism so driver-side host allocations are counted
//! too.
//!
//! Rust's allocator requires the matching layout on deallocation, so every
//! allocation carries a private header recording its size, alignment and
//! scope. `free` recovers the layout from the header; callers never supply
//! it. A null pointer passed to `free` is a no-op, never an error.

use std::alloc::Layout;
use std::sync::atomic::{AtomicIsize, Ordering};

/// Memory scope a native graphics API may request an allocation for.
///
/// The scope is a debug/tracking label only; it carries no effect on
/// allocation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocScope {
    /// Tied to a command buffer / command recording
    Command = 0,
    /// Tied to a device object (image, buffer, pipeline, ...)
    Object = 1,
    /// Pipeline/validation cache storage
    Cache = 2,
    /// Tied to the logical device
    Device = 3,
    /// Tied to the API instance
    Instance = 4,
}

impl AllocScope {
    /// Number of scopes (fixed by the native allocation-callback contract)
    pub const COUNT: usize = 5;

    /// All scopes, in declaration order
    pub const ALL: [AllocScope; Self::COUNT] = [
        AllocScope::Command,
        AllocScope::Object,
        AllocScope::Cache,
        AllocScope::Device,
        AllocScope::Instance,
    ];

    /// Tracking label passed through to diagnostics
    pub fn label(self) -> &'static str {
        match self {
            AllocScope::Command => "vkCommand",
            AllocScope::Object => "vkObject",
            AllocScope::Cache => "vkCache",
            AllocScope::Device => "vkDevice",
            AllocScope::Instance => "vkInstance",
        }
    }

    /// Index into per-scope counter arrays
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Header stored immediately before every user pointer.
///
/// `base_offset` is the distance from the start of the underlying
/// allocation to the user pointer, needed to rebuild the layout on free.
#[repr(C)]
struct AllocHeader {
    base_offset: usize,
    size: usize,
    align: usize,
    scope: AllocScope,
}

/// Host allocator with per-scope outstanding allocation/byte tracking.
///
/// The counters make leak checks cheap: after every `create*` has been
/// paired with its `destroy*`, [`TrackingAllocator::outstanding`] must be
/// zero.
pub struct TrackingAllocator {
    counts: [AtomicIsize; AllocScope::COUNT],
    bytes: [AtomicIsize; AllocScope::COUNT],
}

impl TrackingAllocator {
    /// Create a new allocator with all counters at zero
    pub fn new() -> Self {
        Self {
            counts: std::array::from_fn(|_| AtomicIsize::new(0)),
            bytes: std::array::from_fn(|_| AtomicIsize::new(0)),
        }
    }

    /// Allocate `size` bytes aligned to `align`, tracked under `scope`.
    ///
    /// Returns null when `size` is zero or the underlying allocator fails;
    /// host-memory exhaustion has no dedicated error channel in the backend
    /// contract, so callers treat null as fatal.
    ///
    /// # Safety
    ///
    /// `align` must be a power of two. The returned pointer must be released
    /// with [`TrackingAllocator::free`] on this same allocator.
    pub unsafe fn alloc(&self, scope: AllocScope, size: usize, align: usize) -> *mut u8 {
        debug_assert!(align.is_power_of_two(), "alignment must be a power of two");
        if size == 0 {
            return std::ptr::null_mut();
        }

        let align = align.max(std::mem::align_of::<AllocHeader>());
        let offset = std::mem::size_of::<AllocHeader>().next_multiple_of(align);
        let layout = match Layout::from_size_align(offset + size, align) {
            Ok(layout) => layout,
            Err(_) => return std::ptr::null_mut(),
        };

        let base = std::alloc::alloc(layout);
        if base.is_null() {
            return std::ptr::null_mut();
        }

        let user = base.add(offset);
        let header = user.sub(std::mem::size_of::<AllocHeader>()) as *mut AllocHeader;
        header.write(AllocHeader {
            base_offset: offset,
            size,
            align,
            scope,
        });

        self.counts[scope.index()].fetch_add(1, Ordering::Relaxed);
        self.bytes[scope.index()].fetch_add(size as isize, Ordering::Relaxed);
        user
    }

    /// Resize an allocation, preserving its leading contents.
    ///
    /// A null `ptr` behaves like `alloc`; a zero `new_size` behaves like
    /// `free` and returns null.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or come from this allocator; `align` must be a
    /// power of two.
    pub unsafe fn realloc(
        &self,
        scope: AllocScope,
        ptr: *mut u8,
        new_size: usize,
        align: usize,
    ) -> *mut u8 {
        if ptr.is_null() {
            return self.alloc(scope, new_size, align);
        }
        if new_size == 0 {
            self.free(ptr);
            return std::ptr::null_mut();
        }

        let header = &*(ptr.sub(std::mem::size_of::<AllocHeader>()) as *const AllocHeader);
        let old_size = header.size;

        let new_ptr = self.alloc(scope, new_size, align);
        if new_ptr.is_null() {
            // Original allocation stays valid on failure
            return std::ptr::null_mut();
        }
        std::ptr::copy_nonoverlapping(ptr, new_ptr, old_size.min(new_size));
        self.free(ptr);
        new_ptr
    }

    /// Release an allocation. Null is a no-op.
    ///
    /// The layout is recovered from the allocation header, so the alignment
    /// used at allocation time does not need to be remembered by the caller.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or a live pointer returned by this allocator.
    pub unsafe fn free(&self, ptr: *mut u8) {
        if ptr.is_null() {
            return;
        }

        let header = ptr.sub(std::mem::size_of::<AllocHeader>()) as *const AllocHeader;
        let AllocHeader {
            base_offset,
            size,
            align,
            scope,
        } = header.read();

        self.counts[scope.index()].fetch_sub(1, Ordering::Relaxed);
        self.bytes[scope.index()].fetch_sub(size as isize, Ordering::Relaxed);

        let base = ptr.sub(base_offset);
        // Layout parameters were validated at allocation time
        let layout = Layout::from_size_align_unchecked(base_offset + size, align);
        std::alloc::dealloc(base, layout);
    }

    /// Number of live allocations across all scopes
    pub fn outstanding(&self) -> isize {
        self.counts.iter().map(|c| c.load(Ordering::Relaxed)).sum()
    }

    /// Number of live allocations in one scope
    pub fn outstanding_in(&self, scope: AllocScope) -> isize {
        self.counts[scope.index()].load(Ordering::Relaxed)
    }

    /// Live bytes across all scopes
    pub fn outstanding_bytes(&self) -> isize {
        self.bytes.iter().map(|b| b.load(Ordering::Relaxed)).sum()
    }

    /// Live bytes in one scope
    pub fn outstanding_bytes_in(&self, scope: AllocScope) -> isize {
        self.bytes[scope.index()].load(Ordering::Relaxed)
    }
}

impl Default for TrackingAllocator {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "alloc_tests.rs"]
mod tests;
