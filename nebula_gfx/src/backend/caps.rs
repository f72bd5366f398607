//! Capability and limit reporting
//!
//! A backend declares its capabilities exactly once, at construction: an
//! engine-wide feature bitmask, a per-texture-format usage bitmask array,
//! and a fixed record of device limits. The front end reads these to gate
//! feature use before issuing resource-creation calls; they never change
//! for the life of the backend instance.

use bitflags::bitflags;

use super::format::TextureFormat;

/// Maximum simultaneous frame-buffer attachments the engine encodes for
pub const MAX_FRAME_BUFFER_ATTACHMENTS: u32 = 8;

/// Maximum vertex input streams the engine encodes for
pub const MAX_VERTEX_STREAMS: u32 = 4;

bitflags! {
    /// Engine-wide feature support flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CapsFlags: u32 {
        const ALPHA_TO_COVERAGE      = 1 << 0;
        const BLEND_INDEPENDENT      = 1 << 1;
        const COMPUTE                = 1 << 2;
        const CONSERVATIVE_RASTER    = 1 << 3;
        const DRAW_INDIRECT          = 1 << 4;
        const FRAGMENT_DEPTH         = 1 << 5;
        const FRAGMENT_ORDERING      = 1 << 6;
        const GRAPHICS_DEBUGGER      = 1 << 7;
        const HIDPI                  = 1 << 8;
        const INDEX32                = 1 << 9;
        const INSTANCING             = 1 << 10;
        const OCCLUSION_QUERY        = 1 << 11;
        /// Front-end encoding may run on multiple threads; this says nothing
        /// about concurrent calls into the backend itself
        const RENDERER_MULTITHREADED = 1 << 12;
        const SWAP_CHAIN             = 1 << 13;
        const TEXTURE_2D_ARRAY       = 1 << 14;
        const TEXTURE_3D             = 1 << 15;
        const TEXTURE_BLIT           = 1 << 16;
        const TEXTURE_COMPARE_ALL    = 1 << 17;
        const TEXTURE_COMPARE_LEQUAL = 1 << 18;
        const TEXTURE_CUBE_ARRAY     = 1 << 19;
        const TEXTURE_READ_BACK      = 1 << 20;
        const VERTEX_ATTRIB_HALF     = 1 << 21;
        const VERTEX_ATTRIB_UINT10   = 1 << 22;
    }
}

bitflags! {
    /// Per-texture-format usage support flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FormatCaps: u16 {
        const TEXTURE_2D       = 1 << 0;
        const TEXTURE_2D_SRGB  = 1 << 1;
        const TEXTURE_3D       = 1 << 2;
        const TEXTURE_3D_SRGB  = 1 << 3;
        const TEXTURE_CUBE     = 1 << 4;
        const TEXTURE_CUBE_SRGB = 1 << 5;
        /// Usable for vertex fetch
        const VERTEX           = 1 << 6;
        /// Usable for image load/store
        const IMAGE            = 1 << 7;
        const FRAMEBUFFER      = 1 << 8;
        const FRAMEBUFFER_MSAA = 1 << 9;
        const MSAA             = 1 << 10;
        const MIP_AUTOGEN      = 1 << 11;
    }
}

/// Device limits, fixed at backend construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum single-dimension texture size in texels
    pub max_texture_size: u32,
    /// Maximum texture array layers
    pub max_texture_layers: u32,
    /// Maximum texture sampler bindings
    pub max_texture_samplers: u32,
    /// Maximum compute bindings (derived from sampler count)
    pub max_compute_bindings: u32,
    /// Maximum simultaneous frame-buffer attachments
    pub max_fb_attachments: u32,
    /// Maximum vertex input streams
    pub max_vertex_streams: u32,
}

/// Full capability description of one backend instance.
///
/// Built once at construction, immutable thereafter, and deterministic:
/// repeated constructions with the same configuration must produce an
/// identical table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caps {
    /// Engine-wide feature flags
    pub supported: CapsFlags,
    /// Per-format usage flags, indexed by [`TextureFormat::index`]
    pub formats: [FormatCaps; TextureFormat::COUNT],
    /// Device limits
    pub limits: Limits,
}

impl Caps {
    /// Whether every flag in `flags` is supported
    pub fn supports(&self, flags: CapsFlags) -> bool {
        self.supported.contains(flags)
    }

    /// Usage flags for one format
    pub fn format_caps(&self, format: TextureFormat) -> FormatCaps {
        self.formats[format.index()]
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "caps_tests.rs"]
mod tests;
