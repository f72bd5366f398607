//! Texture descriptors and update regions
//!
//! Texture creation takes an explicit [`TextureInfo`] descriptor plus an
//! optional initial payload. Partial content updates go through the
//! streaming protocol (`update_texture_begin` / `update_texture` /
//! `update_texture_end`) with a [`TextureRegion`] scoping each update.

use bitflags::bitflags;

use super::format::TextureFormat;

bitflags! {
    /// Texture creation flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct TextureFlags: u32 {
        /// Usable as a frame-buffer attachment
        const RENDER_TARGET = 1 << 0;
        /// Writable from compute shaders (image store)
        const COMPUTE_WRITE = 1 << 1;
        /// Sample with sRGB decoding
        const SRGB          = 1 << 2;
        /// Usable as a blit destination
        const BLIT_DST      = 1 << 3;
        /// Contents may be read back to the CPU
        const READ_BACK     = 1 << 4;
    }
}

/// Immutable description of a texture's shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureInfo {
    /// Pixel format
    pub format: TextureFormat,
    /// Width of mip 0 in texels
    pub width: u16,
    /// Height of mip 0 in texels
    pub height: u16,
    /// Depth of mip 0 (1 for 2D textures)
    pub depth: u16,
    /// Array layers (1 for non-array textures)
    pub num_layers: u16,
    /// Mip level count (at least 1)
    pub num_mips: u8,
    /// Whether this is a cube map (6 sides per layer)
    pub cube_map: bool,
}

impl TextureInfo {
    /// Extent of one mip level, clamped to 1 texel per axis
    pub fn mip_extent(&self, mip: u8) -> (u16, u16, u16) {
        (
            (self.width >> mip).max(1),
            (self.height >> mip).max(1),
            (self.depth >> mip).max(1),
        )
    }

    /// Storage size in bytes of one mip level of one layer/side
    pub fn mip_size_bytes(&self, mip: u8) -> u32 {
        let (w, h, d) = self.mip_extent(mip);
        let (w, h, d) = (w as u32, h as u32, d as u32);
        match self.format.block_bytes() {
            // Compressed formats store 4x4 blocks
            Some(block) => w.div_ceil(4) * h.div_ceil(4) * d * block,
            None => w * h * d * self.format.bits_per_pixel() / 8,
        }
    }

    /// Total storage size in bytes across all mips, layers, and cube sides
    pub fn storage_size_bytes(&self) -> u32 {
        let sides = if self.cube_map { 6 } else { 1 };
        let per_layer: u32 = (0..self.num_mips).map(|mip| self.mip_size_bytes(mip)).sum();
        per_layer * sides * self.num_layers as u32
    }
}

/// Region of one mip level targeted by a streaming update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureRegion {
    pub x: u16,
    pub y: u16,
    pub z: u16,
    pub width: u16,
    pub height: u16,
    pub depth: u16,
}

impl TextureRegion {
    /// Whether the region fits within the given mip extent
    pub fn fits_within(&self, extent: (u16, u16, u16)) -> bool {
        let (w, h, d) = extent;
        self.width > 0
            && self.height > 0
            && self.depth > 0
            && u32::from(self.x) + u32::from(self.width) <= u32::from(w)
            && u32::from(self.y) + u32::from(self.height) <= u32::from(h)
            && u32::from(self.z) + u32::from(self.depth) <= u32::from(d)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "texture_tests.rs"]
mod tests;
