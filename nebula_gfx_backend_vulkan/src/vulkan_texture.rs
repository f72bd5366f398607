//! Texture record and streaming-update storage
//!
//! Each texture keeps its descriptor, translated Vulkan format, and a host
//! shadow of its full subresource chain. Streaming updates and readback
//! operate on the shadow with exact bounds validation, so a rejected call
//! can never touch another subresource's bytes. `override_internal`
//! replaces the native handle for external interop and may arrive in any
//! order relative to normal lifecycle calls.

use ash::vk;

use nebula_gfx::nebula::gfx::{Memory, TextureFlags, TextureInfo, TextureRegion};
use nebula_gfx::{GfxError, GfxResult};

use crate::vulkan_format::to_vk_format;

/// The streaming session target: one side/mip of one texture.
///
/// At most one session exists backend-wide at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TextureStream {
    pub handle: u16,
    pub side: u8,
    pub mip: u8,
}

/// Backend-side state of one texture
pub(crate) struct Texture {
    info: TextureInfo,
    flags: TextureFlags,
    vk_format: vk::Format,
    override_ptr: Option<usize>,
    shadow: Vec<u8>,
}

impl Texture {
    /// Create a texture, optionally with initial contents covering the
    /// full subresource chain
    pub fn new(info: TextureInfo, flags: TextureFlags, mem: Option<&Memory>) -> GfxResult<Self> {
        let storage = info.storage_size_bytes() as usize;
        let shadow = match mem {
            Some(mem) => {
                if mem.len() != storage {
                    return Err(GfxError::InvalidArgument(format!(
                        "texture payload is {} bytes, descriptor requires {}",
                        mem.len(),
                        storage
                    )));
                }
                mem.data().to_vec()
            }
            None => vec![0; storage],
        };
        Ok(Self {
            info,
            flags,
            vk_format: to_vk_format(info.format),
            override_ptr: None,
            shadow,
        })
    }

    /// Placeholder record for a texture first seen through
    /// `override_internal` (external interop owns the storage)
    pub fn from_override(ptr: usize) -> Self {
        Self {
            info: TextureInfo {
                format: nebula_gfx::nebula::gfx::TextureFormat::R8G8B8A8_UNORM,
                width: 0,
                height: 0,
                depth: 1,
                num_layers: 1,
                num_mips: 1,
                cube_map: false,
            },
            flags: TextureFlags::empty(),
            vk_format: vk::Format::R8G8B8A8_UNORM,
            override_ptr: Some(ptr),
            shadow: Vec::new(),
        }
    }

    pub fn info(&self) -> &TextureInfo {
        &self.info
    }

    pub fn flags(&self) -> TextureFlags {
        self.flags
    }

    pub fn vk_format(&self) -> vk::Format {
        self.vk_format
    }

    pub fn set_override(&mut self, ptr: usize) {
        self.override_ptr = Some(ptr);
    }

    pub fn internal(&self) -> Option<usize> {
        self.override_ptr
    }

    fn side_count(&self) -> u8 {
        if self.info.cube_map { 6 } else { 1 }
    }

    /// Byte offset of one side/mip within the shadow (layer 0)
    fn subresource_offset(&self, side: u8, mip: u8) -> usize {
        let per_side: usize = (0..self.info.num_mips)
            .map(|m| self.info.mip_size_bytes(m) as usize)
            .sum();
        let mips_before: usize = (0..mip)
            .map(|m| self.info.mip_size_bytes(m) as usize)
            .sum();
        side as usize * per_side + mips_before
    }

    /// Copy one region into the shadow, validating every bound first
    pub fn write_region(
        &mut self,
        side: u8,
        mip: u8,
        region: &TextureRegion,
        mem: &Memory,
    ) -> GfxResult<()> {
        if self.info.format.is_compressed() {
            return Err(GfxError::Unsupported(
                "partial updates of block-compressed textures".to_string(),
            ));
        }
        if mip >= self.info.num_mips || side >= self.side_count() {
            return Err(GfxError::InvalidArgument(format!(
                "subresource side {} mip {} out of range",
                side, mip
            )));
        }
        let extent = self.info.mip_extent(mip);
        if !region.fits_within(extent) {
            return Err(GfxError::InvalidArgument(format!(
                "region {:?} exceeds mip extent {:?}",
                region, extent
            )));
        }

        let bpp = (self.info.format.bits_per_pixel() / 8) as usize;
        let region_bytes =
            region.width as usize * region.height as usize * region.depth as usize * bpp;
        if mem.len() < region_bytes {
            return Err(GfxError::InvalidArgument(format!(
                "payload is {} bytes, region requires {}",
                mem.len(),
                region_bytes
            )));
        }

        let (mw, mh, _) = extent;
        let (mw, mh) = (mw as usize, mh as usize);
        let base = self.subresource_offset(side, mip);
        let src = mem.data();
        let row_bytes = region.width as usize * bpp;

        for z in 0..region.depth as usize {
            for y in 0..region.height as usize {
                let dst_texel = (region.z as usize + z) * mw * mh
                    + (region.y as usize + y) * mw
                    + region.x as usize;
                let dst_off = base + dst_texel * bpp;
                let src_off = (z * region.height as usize + y) * row_bytes;
                self.shadow[dst_off..dst_off + row_bytes]
                    .copy_from_slice(&src[src_off..src_off + row_bytes]);
            }
        }
        Ok(())
    }

    /// Copy one mip level (side 0) into a caller buffer
    pub fn read_mip(&self, mip: u8, dst: &mut [u8]) -> GfxResult<()> {
        if mip >= self.info.num_mips {
            return Err(GfxError::InvalidArgument(format!(
                "mip {} out of range ({} levels)",
                mip, self.info.num_mips
            )));
        }
        let size = self.info.mip_size_bytes(mip) as usize;
        if dst.len() < size {
            return Err(GfxError::InvalidArgument(format!(
                "destination is {} bytes, mip {} requires {}",
                dst.len(),
                mip,
                size
            )));
        }
        let base = self.subresource_offset(0, mip);
        dst[..size].copy_from_slice(&self.shadow[base..base + size]);
        Ok(())
    }

    /// Replace backing storage with new dimensions; handle identity is the
    /// caller's and unchanged
    pub fn resize(&mut self, width: u16, height: u16, num_mips: u8, num_layers: u16) {
        self.info.width = width;
        self.info.height = height;
        self.info.num_mips = num_mips.max(1);
        self.info.num_layers = num_layers.max(1);
        self.shadow = vec![0; self.info.storage_size_bytes() as usize];
    }
}

// ============================================================================
// Tests
// ============================================================================
