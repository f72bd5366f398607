//! Frame description and submission statistics
//!
//! A [`Frame`] is a fully encoded, read-only description of one rendered
//! frame's work, produced by the front end's command encoder. The backend
//! consumes it in `submit` and writes back only the embedded
//! [`FrameStats`]; it never owns or retains the frame past the call.

use super::handle::{IndexBufferHandle, ProgramHandle, TextureHandle, VertexBufferHandle};
use super::texture::TextureInfo;

/// View identifier within a frame (draw ordering bucket)
pub type ViewId = u16;

/// Primitive topology of a draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    Triangles = 0,
    TriangleStrip = 1,
    Lines = 2,
    LineStrip = 3,
    Points = 4,
}

impl Topology {
    /// Number of topologies (fixes the size of per-topology stat arrays)
    pub const COUNT: usize = 5;

    /// All topologies, in declaration order
    pub const ALL: [Topology; Self::COUNT] = [
        Topology::Triangles,
        Topology::TriangleStrip,
        Topology::Lines,
        Topology::LineStrip,
        Topology::Points,
    ];

    /// Index into per-topology stat arrays
    pub fn index(self) -> usize {
        self as usize
    }

    /// Primitives produced by `num_indices` indices under this topology
    pub fn prim_count(self, num_indices: u32) -> u32 {
        match self {
            Topology::Triangles => num_indices / 3,
            Topology::TriangleStrip => num_indices.saturating_sub(2),
            Topology::Lines => num_indices / 2,
            Topology::LineStrip => num_indices.saturating_sub(1),
            Topology::Points => num_indices,
        }
    }
}

/// GPU timestamp pair plus the frequency needed to interpret it.
///
/// Present only when the backend supports GPU timing; absence means
/// "unsupported", never "zero duration".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpuTiming {
    pub begin: i64,
    pub end: i64,
    /// Ticks per second; always positive
    pub frequency: i64,
}

/// GPU memory usage snapshot.
///
/// Present only when the backend can measure it; absence means
/// "unavailable", never "zero bytes".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpuMemoryUsage {
    /// Bytes currently allocated on the device
    pub used: i64,
    /// Peak bytes allocated over the backend's life
    pub max: i64,
}

/// Performance statistics written back by `submit`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    /// CPU timestamp at submit entry, in `cpu_timer_freq` ticks
    pub cpu_time_begin: i64,
    /// CPU timestamp at submit exit
    pub cpu_time_end: i64,
    /// CPU timer ticks per second; always positive
    pub cpu_timer_freq: i64,
    /// GPU timing, when supported
    pub gpu: Option<GpuTiming>,
    /// Primitives submitted this frame, per topology
    pub num_prims: [u32; Topology::COUNT],
    /// GPU memory usage, when measurable
    pub gpu_memory: Option<GpuMemoryUsage>,
}

impl FrameStats {
    /// Clear all counters ahead of a new submission
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self {
            cpu_time_begin: 0,
            cpu_time_end: 0,
            // Nanosecond ticks; never zero so durations are always computable
            cpu_timer_freq: 1_000_000_000,
            gpu: None,
            num_prims: [0; Topology::COUNT],
            gpu_memory: None,
        }
    }
}

/// One encoded draw within a frame
#[derive(Debug, Clone, Copy)]
pub struct RenderItem {
    /// Ordering bucket this draw belongs to
    pub view: ViewId,
    /// Linked program
    pub program: ProgramHandle,
    /// Vertex stream
    pub vertex_buffer: VertexBufferHandle,
    /// Index stream; invalid handle means non-indexed draw
    pub index_buffer: IndexBufferHandle,
    /// Vertices fetched for non-indexed draws
    pub num_vertices: u32,
    /// Indices fetched for indexed draws
    pub num_indices: u32,
    /// Instance count (1 for non-instanced draws)
    pub num_instances: u32,
    /// Primitive topology
    pub topology: Topology,
}

impl RenderItem {
    /// Element count feeding primitive assembly
    pub fn element_count(&self) -> u32 {
        if self.index_buffer.is_valid() {
            self.num_indices
        } else {
            self.num_vertices
        }
    }
}

/// Fully encoded description of one frame's work
#[derive(Debug, Default)]
pub struct Frame {
    /// Backbuffer resolution this frame was encoded for
    pub resolution: (u32, u32),
    /// Encoded draws, in submission order
    pub items: Vec<RenderItem>,
    /// Statistics written back by the backend during `submit`
    pub stats: FrameStats,
}

impl Frame {
    /// Create an empty frame at the given resolution
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            resolution: (width, height),
            ..Self::default()
        }
    }
}

/// Engine-provided geometry for clearing render targets with a fullscreen
/// quad on backends without a native clear path
#[derive(Debug, Clone, Copy)]
pub struct ClearQuad {
    /// Clear color, RGBA
    pub color: [f32; 4],
    /// Clear depth
    pub depth: f32,
    /// Clear stencil
    pub stencil: u8,
}

impl Default for ClearQuad {
    fn default() -> Self {
        Self {
            color: [0.0, 0.0, 0.0, 1.0],
            depth: 1.0,
            stencil: 0,
        }
    }
}

/// Engine-provided resources for the fallback text/video overlay path.
///
/// `blit_setup` prepares this state after primary frame content;
/// `blit_render` draws with the engine-provided index geometry.
#[derive(Debug, Clone, Copy)]
pub struct TextBlitter {
    /// Glyph atlas texture
    pub texture: TextureHandle,
    /// Overlay program
    pub program: ProgramHandle,
    /// Quad vertices
    pub vertex_buffer: VertexBufferHandle,
    /// Quad indices
    pub index_buffer: IndexBufferHandle,
}

/// One frame-buffer attachment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attachment {
    /// Attached texture
    pub texture: TextureHandle,
    /// Mip level to render into
    pub mip: u8,
    /// Array layer (or cube side) to render into
    pub layer: u16,
}

/// Shape of a swap-chain-backed frame buffer created from a native window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowTarget {
    pub width: u32,
    pub height: u32,
    pub format: super::format::TextureFormat,
    pub depth_format: Option<super::format::TextureFormat>,
}

/// Validates that an attachment addresses an existing subresource
pub fn attachment_in_range(attachment: &Attachment, info: &TextureInfo) -> bool {
    attachment.mip < info.num_mips && attachment.layer < info.num_layers
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "frame_tests.rs"]
mod tests;
