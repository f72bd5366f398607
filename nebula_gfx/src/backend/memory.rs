//! Reference-counted immutable byte payloads
//!
//! Resource-creation and update operations receive their data as a
//! [`Memory`] block: an immutable, reference-counted byte buffer owning the
//! encoded payload (vertex/index data, shader bytecode, texture texels).
//! A backend never mutates the payload and never retains it past the call
//! that receives it; cloning is a cheap reference-count bump on the shared
//! buffer.

use std::sync::Arc;

/// Immutable, reference-counted byte buffer
#[derive(Debug, Clone)]
pub struct Memory {
    data: Arc<[u8]>,
}

impl Memory {
    /// Take ownership of a byte vector
    pub fn from_vec(data: Vec<u8>) -> Self {
        Self { data: data.into() }
    }

    /// Copy a byte slice into a new payload
    pub fn copy(data: &[u8]) -> Self {
        Self { data: data.into() }
    }

    /// Copy a typed slice into a new payload.
    ///
    /// Useful for vertex/index data expressed as `#[repr(C)]` structs.
    pub fn of_slice<T: bytemuck::NoUninit>(items: &[T]) -> Self {
        Self::copy(bytemuck::cast_slice(items))
    }

    /// Payload size in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the payload is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The payload bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl AsRef<[u8]> for Memory {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
