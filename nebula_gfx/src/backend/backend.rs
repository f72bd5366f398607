//! Backend trait - the resource-lifecycle and frame-submission contract
//!
//! This is the seam between the engine's stateless, declarative
//! resource-description API and a stateful, asynchronous native device.
//! Every backend (Vulkan, other native APIs) implements this operation set
//! identically so the front end stays backend-agnostic.
//!
//! Calling conventions shared by all operations:
//!
//! - Handles are issued by the front end and arrive pre-validated; a
//!   backend checks them only as far as needed to fail loudly instead of
//!   corrupting state.
//! - Every `create*` is paired with exactly one later `destroy*` for the
//!   same handle value before the front end reuses that value. No ordering
//!   is guaranteed between unrelated handles' lifecycles.
//! - A single submission thread drives all operations serially; the front
//!   end performs any cross-thread synchronization before calls get here.
//! - Operations may block on device synchronization, but only boundedly.
//!   There is no cancellation: once `submit` is called the backend owns the
//!   commands until it reports them complete through the next frame's
//!   timing stats.
//! - Device loss is surfaced by polling [`Backend::is_device_removed`]; on
//!   `true` every handle is invalid and the front end rebuilds the backend.

use std::path::Path;
use std::sync::Arc;

use raw_window_handle::RawWindowHandle;

use crate::alloc::TrackingAllocator;
use crate::error::GfxResult;

use super::buffer::BufferFlags;
use super::caps::Caps;
use super::format::TextureFormat;
use super::frame::{Attachment, ClearQuad, Frame, TextBlitter, ViewId};
use super::handle::{
    FrameBufferHandle, IndexBufferHandle, OcclusionQueryHandle, ProgramHandle, ResourceHandle,
    ShaderHandle, TextureHandle, UniformHandle, VertexBufferHandle, VertexLayoutHandle,
};
use super::memory::Memory;
use super::texture::{TextureFlags, TextureInfo, TextureRegion};
use super::uniform::UniformType;
use super::vertex_layout::VertexLayout;

/// Native graphics API a backend drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// No-op backend (headless tooling, tests)
    Noop,
    /// Vulkan
    Vulkan,
    /// Direct3D 12
    Direct3D12,
    /// Metal
    Metal,
}

/// Backend construction configuration, passed once at creation
#[derive(Clone)]
pub struct Init {
    /// Preferred backend kind; `None` lets the context pick
    pub backend: Option<BackendKind>,
    /// Initial backbuffer resolution
    pub resolution: (u32, u32),
    /// Enable native validation/debug layers
    pub enable_validation: bool,
    /// Application name reported to the native API
    pub app_name: String,
    /// Tracked allocator for all backend-owned host memory
    pub allocator: Arc<TrackingAllocator>,
}

impl Default for Init {
    fn default() -> Self {
        Self {
            backend: None,
            resolution: (1280, 720),
            enable_validation: cfg!(debug_assertions),
            app_name: "Nebula Application".to_string(),
            allocator: Arc::new(TrackingAllocator::new()),
        }
    }
}

impl std::fmt::Debug for Init {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Init")
            .field("backend", &self.backend)
            .field("resolution", &self.resolution)
            .field("enable_validation", &self.enable_validation)
            .field("app_name", &self.app_name)
            .finish_non_exhaustive()
    }
}

/// The backend contract.
///
/// Most operations report failure through [`GfxResult`] (device-lost,
/// out-of-memory, invalid-argument) while staying fire-and-forget on the
/// success path. The exceptions are diagnostic-only operations
/// (markers, names, screenshots), which never fail the caller and report
/// problems through the logging channel instead.
pub trait Backend: Send {
    // ===== IDENTITY AND CAPABILITIES =====

    /// Which native API this backend drives
    fn kind(&self) -> BackendKind;

    /// Human-readable backend name
    fn name(&self) -> &'static str;

    /// Capability table, fixed at construction
    fn caps(&self) -> &Caps;

    /// Whether the native device has been lost or removed.
    ///
    /// Polled by the front end once per frame. When this returns `true`
    /// every handle is invalid and the backend must be torn down and
    /// rebuilt; no retry happens at this layer.
    fn is_device_removed(&self) -> bool;

    // ===== INDEX BUFFERS =====

    /// Create a static index buffer from an immutable payload
    fn create_index_buffer(
        &mut self,
        handle: IndexBufferHandle,
        mem: &Memory,
        flags: BufferFlags,
    ) -> GfxResult<()>;

    fn destroy_index_buffer(&mut self, handle: IndexBufferHandle) -> GfxResult<()>;

    /// Reserve a dynamic index buffer of `size` bytes
    fn create_dynamic_index_buffer(
        &mut self,
        handle: IndexBufferHandle,
        size: u32,
        flags: BufferFlags,
    ) -> GfxResult<()>;

    /// Partially update a dynamic index buffer.
    ///
    /// `offset + mem.len()` must not exceed the buffer's allocated size;
    /// violations fail with `InvalidArgument` and write nothing.
    fn update_dynamic_index_buffer(
        &mut self,
        handle: IndexBufferHandle,
        offset: u32,
        mem: &Memory,
    ) -> GfxResult<()>;

    fn destroy_dynamic_index_buffer(&mut self, handle: IndexBufferHandle) -> GfxResult<()>;

    // ===== VERTEX LAYOUTS =====

    /// Register a vertex layout, referenced by handle from buffer creation
    fn create_vertex_layout(
        &mut self,
        handle: VertexLayoutHandle,
        layout: &VertexLayout,
    ) -> GfxResult<()>;

    fn destroy_vertex_layout(&mut self, handle: VertexLayoutHandle) -> GfxResult<()>;

    // ===== VERTEX BUFFERS =====

    /// Create a static vertex buffer from an immutable payload
    fn create_vertex_buffer(
        &mut self,
        handle: VertexBufferHandle,
        mem: &Memory,
        layout: VertexLayoutHandle,
        flags: BufferFlags,
    ) -> GfxResult<()>;

    fn destroy_vertex_buffer(&mut self, handle: VertexBufferHandle) -> GfxResult<()>;

    /// Reserve a dynamic vertex buffer of `size` bytes
    fn create_dynamic_vertex_buffer(
        &mut self,
        handle: VertexBufferHandle,
        size: u32,
        flags: BufferFlags,
    ) -> GfxResult<()>;

    /// Partially update a dynamic vertex buffer (same bounds rule as
    /// [`Backend::update_dynamic_index_buffer`])
    fn update_dynamic_vertex_buffer(
        &mut self,
        handle: VertexBufferHandle,
        offset: u32,
        mem: &Memory,
    ) -> GfxResult<()>;

    fn destroy_dynamic_vertex_buffer(&mut self, handle: VertexBufferHandle) -> GfxResult<()>;

    // ===== SHADERS AND PROGRAMS =====

    /// Create a shader from compiled/intermediate code
    fn create_shader(&mut self, handle: ShaderHandle, mem: &Memory) -> GfxResult<()>;

    /// Destroy a shader.
    ///
    /// Destroying a shader still linked into a live program is a caller
    /// error the backend is not required to detect but must not crash on.
    fn destroy_shader(&mut self, handle: ShaderHandle) -> GfxResult<()>;

    /// Link exactly one vertex shader and one fragment shader
    fn create_program(
        &mut self,
        handle: ProgramHandle,
        vsh: ShaderHandle,
        fsh: ShaderHandle,
    ) -> GfxResult<()>;

    fn destroy_program(&mut self, handle: ProgramHandle) -> GfxResult<()>;

    // ===== TEXTURES =====

    /// Create a texture, optionally with initial contents.
    ///
    /// Returns the backend-internal pointer for zero-copy interop when the
    /// backend exposes one.
    fn create_texture(
        &mut self,
        handle: TextureHandle,
        info: &TextureInfo,
        mem: Option<&Memory>,
        flags: TextureFlags,
    ) -> GfxResult<Option<usize>>;

    /// Open a streaming session targeting one side/mip of a texture.
    ///
    /// State machine: `Idle -> Streaming -> Idle`. Exactly one session may
    /// be open at a time; beginning while already streaming is rejected.
    fn update_texture_begin(&mut self, handle: TextureHandle, side: u8, mip: u8) -> GfxResult<()>;

    /// Stream one region into the open session.
    ///
    /// Rejected when no session is open or the session targets a different
    /// subresource; a rejected update never touches any other handle's
    /// data.
    fn update_texture(
        &mut self,
        handle: TextureHandle,
        side: u8,
        mip: u8,
        region: &TextureRegion,
        mem: &Memory,
    ) -> GfxResult<()>;

    /// Close the streaming session, finalizing the updated subresource
    /// (may trigger mip generation or layout transitions)
    fn update_texture_end(&mut self) -> GfxResult<()>;

    /// Copy one mip level's contents to a caller buffer, out-of-band
    fn read_texture(&mut self, handle: TextureHandle, dst: &mut [u8], mip: u8) -> GfxResult<()>;

    /// Replace backing storage with new dimensions, preserving handle
    /// identity
    fn resize_texture(
        &mut self,
        handle: TextureHandle,
        width: u16,
        height: u16,
        num_mips: u8,
        num_layers: u16,
    ) -> GfxResult<()>;

    /// Substitute the native handle directly, bypassing normal lifecycle.
    ///
    /// Used for external interop; once override is used, the backend
    /// tolerates calls in any order relative to normal create/destroy.
    fn override_internal(&mut self, handle: TextureHandle, ptr: usize) -> GfxResult<()>;

    /// Retrieve the native handle, if the texture exposes one
    fn internal(&self, handle: TextureHandle) -> Option<usize>;

    fn destroy_texture(&mut self, handle: TextureHandle) -> GfxResult<()>;

    // ===== FRAME BUFFERS =====

    /// Create a frame buffer from existing texture attachments
    fn create_frame_buffer(
        &mut self,
        handle: FrameBufferHandle,
        attachments: &[Attachment],
    ) -> GfxResult<()>;

    /// Create a swap-chain-backed frame buffer from a native window handle
    fn create_frame_buffer_from_window(
        &mut self,
        handle: FrameBufferHandle,
        window: RawWindowHandle,
        width: u32,
        height: u32,
        format: TextureFormat,
        depth_format: Option<TextureFormat>,
    ) -> GfxResult<()>;

    /// Destroy a frame buffer of either creation form
    fn destroy_frame_buffer(&mut self, handle: FrameBufferHandle) -> GfxResult<()>;

    // ===== UNIFORMS =====

    /// Register a named, typed, possibly array-valued shader constant
    fn create_uniform(
        &mut self,
        handle: UniformHandle,
        kind: UniformType,
        num: u16,
        name: &str,
    ) -> GfxResult<()>;

    fn destroy_uniform(&mut self, handle: UniformHandle) -> GfxResult<()>;

    /// Push raw bytes to a registered uniform location.
    ///
    /// Validated by size only; a type mismatch of matching size is
    /// undetectable here and remains a caller error.
    fn update_uniform(&mut self, loc: u16, data: &[u8]) -> GfxResult<()>;

    // ===== OCCLUSION QUERIES =====

    /// Mark a query's result unavailable (e.g. on device loss) without
    /// destroying the handle slot
    fn invalidate_occlusion_query(&mut self, handle: OcclusionQueryHandle) -> GfxResult<()>;

    // ===== DIAGNOSTICS =====

    /// Capture a frame buffer's contents to a file path.
    ///
    /// Fire-and-forget: failures (missing frame buffer, bad path,
    /// unsupported format) are reported through the logging channel, and
    /// no file is written.
    fn request_screen_shot(&mut self, handle: FrameBufferHandle, file_path: &Path);

    /// Attach a debug name to a view (observability only)
    fn update_view_name(&mut self, view: ViewId, name: &str);

    /// Insert a debug marker into the command stream (observability only)
    fn set_marker(&mut self, marker: &str);

    /// Attach a debug name to a resource (observability only)
    fn set_name(&mut self, handle: ResourceHandle, name: &str);

    // ===== FRAME SUBMISSION =====

    /// Submit one fully encoded frame; the single synchronization point
    /// per rendered frame.
    ///
    /// Writes CPU (and, when supported, GPU) timing, per-topology primitive
    /// counts, and GPU memory usage into `frame.stats`. The frame itself is
    /// read-only and not retained past the call.
    fn submit(
        &mut self,
        frame: &mut Frame,
        clear_quad: &ClearQuad,
        blitter: &mut TextBlitter,
    ) -> GfxResult<()>;

    /// Present the completed frame
    fn flip(&mut self) -> GfxResult<()>;

    /// Prepare the fallback text/video overlay path.
    ///
    /// Runs after primary frame content; must not alter resources still
    /// needed by in-flight rendering.
    fn blit_setup(&mut self, blitter: &mut TextBlitter) -> GfxResult<()>;

    /// Draw the overlay with engine-provided index geometry
    fn blit_render(&mut self, blitter: &mut TextBlitter, num_indices: u32) -> GfxResult<()>;
}
