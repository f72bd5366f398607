//! Buffer - Vulkan-side record for index and vertex buffers
//!
//! One record type serves both registries; index and vertex buffers differ
//! only in their usage translation and the optional layout reference
//! carried by vertex buffers. The record keeps a host shadow of the
//! contents so dynamic updates are bounds-checked against real storage and
//! never write outside the allocated region.

use ash::vk;

use nebula_gfx::nebula::gfx::{BufferFlags, Memory, VertexLayoutHandle};
use nebula_gfx::{GfxError, GfxResult};

/// Translate engine buffer flags into Vulkan usage flags
pub(crate) fn buffer_usage(flags: BufferFlags, index: bool) -> vk::BufferUsageFlags {
    let mut usage = if index {
        vk::BufferUsageFlags::INDEX_BUFFER
    } else {
        vk::BufferUsageFlags::VERTEX_BUFFER
    };
    usage |= vk::BufferUsageFlags::TRANSFER_DST;
    if flags.intersects(BufferFlags::COMPUTE_READ | BufferFlags::COMPUTE_WRITE) {
        usage |= vk::BufferUsageFlags::STORAGE_BUFFER;
    }
    if flags.contains(BufferFlags::DRAW_INDIRECT) {
        usage |= vk::BufferUsageFlags::INDIRECT_BUFFER;
    }
    usage
}

/// Backend-side state of one index or vertex buffer
pub(crate) struct Buffer {
    size: u32,
    usage: vk::BufferUsageFlags,
    layout: Option<VertexLayoutHandle>,
    dynamic: bool,
    shadow: Vec<u8>,
}

impl Buffer {
    /// Static buffer created from an immutable payload
    pub fn with_payload(
        mem: &Memory,
        layout: Option<VertexLayoutHandle>,
        flags: BufferFlags,
        index: bool,
    ) -> Self {
        Self {
            size: mem.len() as u32,
            usage: buffer_usage(flags, index),
            layout,
            dynamic: false,
            shadow: mem.data().to_vec(),
        }
    }

    /// Dynamic buffer with `size` bytes reserved and zero-filled
    pub fn dynamic(
        size: u32,
        layout: Option<VertexLayoutHandle>,
        flags: BufferFlags,
        index: bool,
    ) -> Self {
        Self {
            size,
            usage: buffer_usage(flags, index),
            layout,
            dynamic: true,
            shadow: vec![0; size as usize],
        }
    }

    /// Partially update a dynamic buffer.
    ///
    /// `offset + data.len()` past the allocated size is a caller contract
    /// breach: the update fails loudly and writes nothing.
    pub fn update(&mut self, offset: u32, data: &[u8]) -> GfxResult<()> {
        if !self.dynamic {
            return Err(GfxError::InvalidArgument(
                "update on a static buffer".to_string(),
            ));
        }
        let end = u64::from(offset) + data.len() as u64;
        if end > u64::from(self.size) {
            return Err(GfxError::InvalidArgument(format!(
                "update range {}..{} exceeds buffer size {}",
                offset, end, self.size
            )));
        }
        let offset = offset as usize;
        self.shadow[offset..offset + data.len()].copy_from_slice(data);
        Ok(())
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn usage(&self) -> vk::BufferUsageFlags {
        self.usage
    }

    pub fn layout(&self) -> Option<VertexLayoutHandle> {
        self.layout
    }

    /// Current contents (shadow storage)
    pub fn contents(&self) -> &[u8] {
        &self.shadow
    }
}

// ============================================================================
// Tests
// ============================================================================
