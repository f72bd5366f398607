//! Texture format translation and per-format capability derivation
//!
//! Maps the engine's closed format set onto `VkFormat` and derives the
//! per-format usage capability table declared at backend construction.
//! The table is pure data computed from format properties, so repeated
//! constructions always produce an identical table.

use ash::vk;

use nebula_gfx::nebula::gfx::{FormatCaps, TextureFormat};

/// Translate an engine format to the corresponding Vulkan format
pub fn to_vk_format(format: TextureFormat) -> vk::Format {
    match format {
        TextureFormat::BC1_UNORM => vk::Format::BC1_RGBA_UNORM_BLOCK,
        TextureFormat::BC2_UNORM => vk::Format::BC2_UNORM_BLOCK,
        TextureFormat::BC3_UNORM => vk::Format::BC3_UNORM_BLOCK,
        TextureFormat::R8_UNORM => vk::Format::R8_UNORM,
        TextureFormat::R8G8_UNORM => vk::Format::R8G8_UNORM,
        TextureFormat::R8G8B8A8_UNORM => vk::Format::R8G8B8A8_UNORM,
        TextureFormat::R8G8B8A8_SRGB => vk::Format::R8G8B8A8_SRGB,
        TextureFormat::B8G8R8A8_UNORM => vk::Format::B8G8R8A8_UNORM,
        TextureFormat::B8G8R8A8_SRGB => vk::Format::B8G8R8A8_SRGB,
        TextureFormat::R16_SFLOAT => vk::Format::R16_SFLOAT,
        TextureFormat::R16G16_SFLOAT => vk::Format::R16G16_SFLOAT,
        TextureFormat::R16G16B16A16_SFLOAT => vk::Format::R16G16B16A16_SFLOAT,
        TextureFormat::R32_SFLOAT => vk::Format::R32_SFLOAT,
        TextureFormat::R32G32_SFLOAT => vk::Format::R32G32_SFLOAT,
        TextureFormat::R32G32B32A32_SFLOAT => vk::Format::R32G32B32A32_SFLOAT,
        TextureFormat::R10G10B10A2_UNORM => vk::Format::A2B10G10R10_UNORM_PACK32,
        TextureFormat::B10G11R11_UFLOAT => vk::Format::B10G11R11_UFLOAT_PACK32,
        TextureFormat::D16_UNORM => vk::Format::D16_UNORM,
        TextureFormat::D24_UNORM_S8_UINT => vk::Format::D24_UNORM_S8_UINT,
        TextureFormat::D32_SFLOAT => vk::Format::D32_SFLOAT,
    }
}

/// Whether a format is usable for vertex fetch
fn vertex_fetchable(format: TextureFormat) -> bool {
    matches!(
        format,
        TextureFormat::R8G8B8A8_UNORM
            | TextureFormat::R10G10B10A2_UNORM
            | TextureFormat::R16_SFLOAT
            | TextureFormat::R16G16_SFLOAT
            | TextureFormat::R16G16B16A16_SFLOAT
            | TextureFormat::R32_SFLOAT
            | TextureFormat::R32G32_SFLOAT
            | TextureFormat::R32G32B32A32_SFLOAT
    )
}

/// Whether a format is usable for image load/store
fn image_storable(format: TextureFormat) -> bool {
    matches!(
        format,
        TextureFormat::R8G8B8A8_UNORM
            | TextureFormat::R16G16B16A16_SFLOAT
            | TextureFormat::R32_SFLOAT
            | TextureFormat::R32G32_SFLOAT
            | TextureFormat::R32G32B32A32_SFLOAT
    )
}

/// Usage capabilities of one format on this backend
pub fn format_caps(format: TextureFormat) -> FormatCaps {
    if format.is_depth() {
        // Depth formats attach and resolve but are never fetched as
        // vertex data or written as storage images
        return FormatCaps::TEXTURE_2D
            | FormatCaps::FRAMEBUFFER
            | FormatCaps::FRAMEBUFFER_MSAA
            | FormatCaps::MSAA;
    }

    if format.is_compressed() {
        // Block formats are sample-only
        return FormatCaps::TEXTURE_2D | FormatCaps::TEXTURE_CUBE;
    }

    let mut caps = FormatCaps::TEXTURE_2D
        | FormatCaps::TEXTURE_3D
        | FormatCaps::TEXTURE_CUBE
        | FormatCaps::FRAMEBUFFER
        | FormatCaps::FRAMEBUFFER_MSAA
        | FormatCaps::MSAA
        | FormatCaps::MIP_AUTOGEN;

    if format.is_srgb() {
        caps |= FormatCaps::TEXTURE_2D_SRGB
            | FormatCaps::TEXTURE_3D_SRGB
            | FormatCaps::TEXTURE_CUBE_SRGB;
    }
    if vertex_fetchable(format) {
        caps |= FormatCaps::VERTEX;
    }
    if image_storable(format) {
        caps |= FormatCaps::IMAGE;
    }
    caps
}

/// Build the full per-format capability table, indexed by
/// [`TextureFormat::index`]
pub fn build_format_table() -> [FormatCaps; TextureFormat::COUNT] {
    let mut table = [FormatCaps::empty(); TextureFormat::COUNT];
    for format in TextureFormat::ALL {
        table[format.index()] = format_caps(format);
    }
    table
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "vulkan_format_tests.rs"]
mod tests;
