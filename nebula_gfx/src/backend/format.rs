//! Texture format enumeration
//!
//! The format set is closed: order and count are fixed engine-wide, and the
//! per-format capability table in [`Caps`](super::Caps) is indexed by
//! [`TextureFormat::index`]. Backends translate these to their native
//! format enums.

/// Pixel/texel formats supported by the engine
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFormat {
    // Block-compressed formats
    BC1_UNORM,
    BC2_UNORM,
    BC3_UNORM,

    // 8-bit channel color formats
    R8_UNORM,
    R8G8_UNORM,
    R8G8B8A8_UNORM,
    R8G8B8A8_SRGB,
    B8G8R8A8_UNORM,
    B8G8R8A8_SRGB,

    // Float color formats
    R16_SFLOAT,
    R16G16_SFLOAT,
    R16G16B16A16_SFLOAT,
    R32_SFLOAT,
    R32G32_SFLOAT,
    R32G32B32A32_SFLOAT,

    // Packed color formats
    R10G10B10A2_UNORM,
    B10G11R11_UFLOAT,

    // Depth/stencil formats
    D16_UNORM,
    D24_UNORM_S8_UINT,
    D32_SFLOAT,
}

impl TextureFormat {
    /// Number of formats in the closed set
    pub const COUNT: usize = 20;

    /// All formats, in declaration order
    pub const ALL: [TextureFormat; Self::COUNT] = [
        TextureFormat::BC1_UNORM,
        TextureFormat::BC2_UNORM,
        TextureFormat::BC3_UNORM,
        TextureFormat::R8_UNORM,
        TextureFormat::R8G8_UNORM,
        TextureFormat::R8G8B8A8_UNORM,
        TextureFormat::R8G8B8A8_SRGB,
        TextureFormat::B8G8R8A8_UNORM,
        TextureFormat::B8G8R8A8_SRGB,
        TextureFormat::R16_SFLOAT,
        TextureFormat::R16G16_SFLOAT,
        TextureFormat::R16G16B16A16_SFLOAT,
        TextureFormat::R32_SFLOAT,
        TextureFormat::R32G32_SFLOAT,
        TextureFormat::R32G32B32A32_SFLOAT,
        TextureFormat::R10G10B10A2_UNORM,
        TextureFormat::B10G11R11_UFLOAT,
        TextureFormat::D16_UNORM,
        TextureFormat::D24_UNORM_S8_UINT,
        TextureFormat::D32_SFLOAT,
    ];

    /// Index into per-format capability tables
    pub fn index(self) -> usize {
        self as usize
    }

    /// Storage cost in bits per pixel (averaged for block-compressed formats)
    pub fn bits_per_pixel(self) -> u32 {
        match self {
            TextureFormat::BC1_UNORM => 4,
            TextureFormat::BC2_UNORM | TextureFormat::BC3_UNORM => 8,
            TextureFormat::R8_UNORM => 8,
            TextureFormat::R8G8_UNORM | TextureFormat::R16_SFLOAT | TextureFormat::D16_UNORM => 16,
            TextureFormat::R8G8B8A8_UNORM
            | TextureFormat::R8G8B8A8_SRGB
            | TextureFormat::B8G8R8A8_UNORM
            | TextureFormat::B8G8R8A8_SRGB
            | TextureFormat::R16G16_SFLOAT
            | TextureFormat::R32_SFLOAT
            | TextureFormat::R10G10B10A2_UNORM
            | TextureFormat::B10G11R11_UFLOAT
            | TextureFormat::D24_UNORM_S8_UINT
            | TextureFormat::D32_SFLOAT => 32,
            TextureFormat::R16G16B16A16_SFLOAT | TextureFormat::R32G32_SFLOAT => 64,
            TextureFormat::R32G32B32A32_SFLOAT => 128,
        }
    }

    /// Whether this is a 4x4 block-compressed format
    pub fn is_compressed(self) -> bool {
        matches!(
            self,
            TextureFormat::BC1_UNORM | TextureFormat::BC2_UNORM | TextureFormat::BC3_UNORM
        )
    }

    /// Bytes per 4x4 block for compressed formats, `None` otherwise
    pub fn block_bytes(self) -> Option<u32> {
        match self {
            TextureFormat::BC1_UNORM => Some(8),
            TextureFormat::BC2_UNORM | TextureFormat::BC3_UNORM => Some(16),
            _ => None,
        }
    }

    /// Whether this is a depth (or depth/stencil) format
    pub fn is_depth(self) -> bool {
        matches!(
            self,
            TextureFormat::D16_UNORM | TextureFormat::D24_UNORM_S8_UINT | TextureFormat::D32_SFLOAT
        )
    }

    /// Whether this format carries a stencil aspect
    pub fn has_stencil(self) -> bool {
        matches!(self, TextureFormat::D24_UNORM_S8_UINT)
    }

    /// Whether this is an sRGB-encoded variant
    pub fn is_srgb(self) -> bool {
        matches!(self, TextureFormat::R8G8B8A8_SRGB | TextureFormat::B8G8R8A8_SRGB)
    }

    /// The sRGB-encoded variant of this format, if one exists
    pub fn srgb_variant(self) -> Option<TextureFormat> {
        match self {
            TextureFormat::R8G8B8A8_UNORM => Some(TextureFormat::R8G8B8A8_SRGB),
            TextureFormat::B8G8R8A8_UNORM => Some(TextureFormat::B8G8R8A8_SRGB),
            _ => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "format_tests.rs"]
mod tests;
