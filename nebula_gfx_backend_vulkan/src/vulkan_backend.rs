//! VulkanBackend - Vulkan implementation of the backend contract
//!
//! Owns the handle-indexed registries for every resource kind, the
//! texture streaming state machine, and frame submission statistics.
//! Capabilities and limits are declared once in the constructor and never
//! change. Host allocations requested by the native API flow through the
//! engine's tracked allocator via the callback shim.
//!
//! Device bring-up (instance/device/queue creation, pipeline compilation,
//! descriptor management) is backend-specific plumbing layered underneath
//! this contract; all contract-side bookkeeping here is complete and
//! enforced.

use std::path::Path;
use std::time::Instant;

use raw_window_handle::RawWindowHandle;
use rustc_hash::{FxHashMap, FxHashSet};

use nebula_gfx::nebula::gfx::{
    attachment_in_range, Attachment, Backend, BackendKind, BufferFlags, Caps, CapsFlags,
    ClearQuad, Frame, FrameBufferHandle, IndexBufferHandle, Init, Limits, Memory,
    OcclusionQueryHandle, ProgramHandle, ResourceHandle, ShaderHandle, TextBlitter, TextureFlags,
    TextureFormat, TextureHandle, TextureInfo, TextureRegion, Topology, UniformHandle,
    UniformType, VertexBufferHandle, VertexLayout, VertexLayoutHandle, ViewId, WindowTarget,
    MAX_FRAME_BUFFER_ATTACHMENTS, MAX_VERTEX_STREAMS,
};
use nebula_gfx::{gfx_error, gfx_info, gfx_trace, gfx_warn, GfxError, GfxResult};

use crate::vulkan_alloc::HostAllocationCallbacks;
use crate::vulkan_buffer::Buffer;
use crate::vulkan_format::build_format_table;
use crate::vulkan_frame_buffer::FrameBuffer;
use crate::vulkan_shader::{Program, Shader};
use crate::vulkan_texture::{Texture, TextureStream};

const SOURCE: &str = "nebula::vulkan";

/// Named, typed shader constant with its current value
struct UniformRecord {
    kind: UniformType,
    size: u32,
    name: String,
    value: Vec<u8>,
}

/// Vulkan backend instance
pub struct VulkanBackend {
    caps: Caps,
    host_alloc: Box<HostAllocationCallbacks>,
    index_buffers: FxHashMap<u16, Buffer>,
    vertex_buffers: FxHashMap<u16, Buffer>,
    layouts: FxHashMap<u16, VertexLayout>,
    shaders: FxHashMap<u16, Shader>,
    programs: FxHashMap<u16, Program>,
    textures: FxHashMap<u16, Texture>,
    frame_buffers: FxHashMap<u16, FrameBuffer>,
    uniforms: FxHashMap<u16, UniformRecord>,
    invalidated_queries: FxHashSet<u16>,
    view_names: FxHashMap<ViewId, String>,
    debug_names: FxHashMap<ResourceHandle, String>,
    markers: Vec<String>,
    stream: Option<TextureStream>,
    timer_epoch: Instant,
    frame_count: u64,
    device_removed: bool,
}

/// Capability table declared by this backend.
///
/// Deterministic pure data: repeated constructions produce identical
/// tables.
fn build_caps() -> Caps {
    let supported = CapsFlags::ALPHA_TO_COVERAGE
        | CapsFlags::BLEND_INDEPENDENT
        | CapsFlags::COMPUTE
        | CapsFlags::CONSERVATIVE_RASTER
        | CapsFlags::DRAW_INDIRECT
        | CapsFlags::FRAGMENT_DEPTH
        | CapsFlags::FRAGMENT_ORDERING
        | CapsFlags::GRAPHICS_DEBUGGER
        | CapsFlags::HIDPI
        | CapsFlags::INDEX32
        | CapsFlags::INSTANCING
        | CapsFlags::OCCLUSION_QUERY
        | CapsFlags::RENDERER_MULTITHREADED
        | CapsFlags::SWAP_CHAIN
        | CapsFlags::TEXTURE_2D_ARRAY
        | CapsFlags::TEXTURE_3D
        | CapsFlags::TEXTURE_BLIT
        | CapsFlags::TEXTURE_COMPARE_ALL
        | CapsFlags::TEXTURE_COMPARE_LEQUAL
        | CapsFlags::TEXTURE_CUBE_ARRAY
        | CapsFlags::TEXTURE_READ_BACK
        | CapsFlags::VERTEX_ATTRIB_HALF
        | CapsFlags::VERTEX_ATTRIB_UINT10;

    let max_texture_samplers = 32;
    Caps {
        supported,
        formats: build_format_table(),
        limits: Limits {
            max_texture_size: 16384,
            max_texture_layers: 2048,
            max_texture_samplers,
            // Compute bindings share the sampler budget
            max_compute_bindings: max_texture_samplers,
            max_fb_attachments: MAX_FRAME_BUFFER_ATTACHMENTS,
            max_vertex_streams: MAX_VERTEX_STREAMS,
        },
    }
}

impl VulkanBackend {
    /// Construct the backend from the engine's configuration
    pub fn new(init: &Init) -> GfxResult<Self> {
        let host_alloc = HostAllocationCallbacks::new(init.allocator.clone());
        gfx_info!(
            SOURCE,
            "creating Vulkan backend for '{}' at {}x{} (validation: {})",
            init.app_name,
            init.resolution.0,
            init.resolution.1,
            init.enable_validation
        );
        Ok(Self {
            caps: build_caps(),
            host_alloc,
            index_buffers: FxHashMap::default(),
            vertex_buffers: FxHashMap::default(),
            layouts: FxHashMap::default(),
            shaders: FxHashMap::default(),
            programs: FxHashMap::default(),
            textures: FxHashMap::default(),
            frame_buffers: FxHashMap::default(),
            uniforms: FxHashMap::default(),
            invalidated_queries: FxHashSet::default(),
            view_names: FxHashMap::default(),
            debug_names: FxHashMap::default(),
            markers: Vec::new(),
            stream: None,
            timer_epoch: Instant::now(),
            frame_count: 0,
            device_removed: false,
        })
    }

    /// Total live resources across all registries (leak checks)
    pub fn live_resources(&self) -> usize {
        self.index_buffers.len()
            + self.vertex_buffers.len()
            + self.layouts.len()
            + self.shaders.len()
            + self.programs.len()
            + self.textures.len()
            + self.frame_buffers.len()
            + self.uniforms.len()
    }

    /// The tracked host allocator native allocations flow through
    pub fn host_allocator(&self) -> &nebula_gfx::nebula::alloc::TrackingAllocator {
        self.host_alloc.allocator()
    }

    /// Current contents of a vertex buffer's shadow storage.
    ///
    /// Readback tooling for tests and debugging; `None` for unknown
    /// handles.
    pub fn vertex_buffer_contents(&self, handle: VertexBufferHandle) -> Option<&[u8]> {
        self.vertex_buffers.get(&handle.index()).map(Buffer::contents)
    }

    /// Current contents of an index buffer's shadow storage
    pub fn index_buffer_contents(&self, handle: IndexBufferHandle) -> Option<&[u8]> {
        self.index_buffers.get(&handle.index()).map(Buffer::contents)
    }

    /// Whether a query slot's result has been marked unavailable
    pub fn is_occlusion_query_invalidated(&self, handle: OcclusionQueryHandle) -> bool {
        self.invalidated_queries.contains(&handle.index())
    }

    /// Debug name attached to a view, if any
    pub fn view_name(&self, view: ViewId) -> Option<&str> {
        self.view_names.get(&view).map(String::as_str)
    }

    /// Debug name attached to a resource, if any
    pub fn debug_name(&self, handle: ResourceHandle) -> Option<&str> {
        self.debug_names.get(&handle).map(String::as_str)
    }

    /// Markers recorded since the last submit, in insertion order
    pub fn frame_markers(&self) -> &[String] {
        &self.markers
    }

    /// Nanoseconds since backend construction (CPU timestamp source)
    fn now_ticks(&self) -> i64 {
        self.timer_epoch.elapsed().as_nanos() as i64
    }

    fn vacant_slot<T>(map: &FxHashMap<u16, T>, index: u16, what: &str) -> GfxResult<()> {
        if map.contains_key(&index) {
            return Err(GfxError::InvalidArgument(format!(
                "{} handle {} is already in use",
                what, index
            )));
        }
        Ok(())
    }

    /// Destroy policy for vacant slots: a second destroy before reuse is
    /// undefined caller behavior; this backend ignores it with a warning
    /// so the misused handle cannot damage anything else.
    fn release_slot<T>(map: &mut FxHashMap<u16, T>, index: u16, what: &str) -> GfxResult<()> {
        if map.remove(&index).is_none() {
            gfx_warn!(SOURCE, "destroy of vacant {} handle {} ignored", what, index);
        }
        Ok(())
    }
}

impl Backend for VulkanBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Vulkan
    }

    fn name(&self) -> &'static str {
        "Vulkan"
    }

    fn caps(&self) -> &Caps {
        &self.caps
    }

    fn is_device_removed(&self) -> bool {
        self.device_removed
    }

    // ===== INDEX BUFFERS =====

    fn create_index_buffer(
        &mut self,
        handle: IndexBufferHandle,
        mem: &Memory,
        flags: BufferFlags,
    ) -> GfxResult<()> {
        Self::vacant_slot(&self.index_buffers, handle.index(), "index buffer")?;
        let buffer = Buffer::with_payload(mem, None, flags, true);
        gfx_trace!(
            SOURCE,
            "index buffer {}: {} bytes, usage {:?}",
            handle.index(),
            buffer.size(),
            buffer.usage()
        );
        self.index_buffers.insert(handle.index(), buffer);
        Ok(())
    }

    fn destroy_index_buffer(&mut self, handle: IndexBufferHandle) -> GfxResult<()> {
        Self::release_slot(&mut self.index_buffers, handle.index(), "index buffer")
    }

    fn create_dynamic_index_buffer(
        &mut self,
        handle: IndexBufferHandle,
        size: u32,
        flags: BufferFlags,
    ) -> GfxResult<()> {
        Self::vacant_slot(&self.index_buffers, handle.index(), "index buffer")?;
        self.index_buffers
            .insert(handle.index(), Buffer::dynamic(size, None, flags, true));
        Ok(())
    }

    fn update_dynamic_index_buffer(
        &mut self,
        handle: IndexBufferHandle,
        offset: u32,
        mem: &Memory,
    ) -> GfxResult<()> {
        let buffer = self.index_buffers.get_mut(&handle.index()).ok_or_else(|| {
            GfxError::InvalidArgument(format!("unknown index buffer handle {}", handle.index()))
        })?;
        buffer.update(offset, mem.data())
    }

    fn destroy_dynamic_index_buffer(&mut self, handle: IndexBufferHandle) -> GfxResult<()> {
        Self::release_slot(&mut self.index_buffers, handle.index(), "index buffer")
    }

    // ===== VERTEX LAYOUTS =====

    fn create_vertex_layout(
        &mut self,
        handle: VertexLayoutHandle,
        layout: &VertexLayout,
    ) -> GfxResult<()> {
        Self::vacant_slot(&self.layouts, handle.index(), "vertex layout")?;
        if layout.attributes().is_empty() {
            return Err(GfxError::InvalidArgument(
                "vertex layout declares no attributes".to_string(),
            ));
        }
        self.layouts.insert(handle.index(), layout.clone());
        Ok(())
    }

    fn destroy_vertex_layout(&mut self, handle: VertexLayoutHandle) -> GfxResult<()> {
        Self::release_slot(&mut self.layouts, handle.index(), "vertex layout")
    }

    // ===== VERTEX BUFFERS =====

    fn create_vertex_buffer(
        &mut self,
        handle: VertexBufferHandle,
        mem: &Memory,
        layout: VertexLayoutHandle,
        flags: BufferFlags,
    ) -> GfxResult<()> {
        Self::vacant_slot(&self.vertex_buffers, handle.index(), "vertex buffer")?;
        if !self.layouts.contains_key(&layout.index()) {
            return Err(GfxError::InvalidArgument(format!(
                "vertex buffer references unknown layout {}",
                layout.index()
            )));
        }
        let buffer = Buffer::with_payload(mem, Some(layout), flags, false);
        gfx_trace!(
            SOURCE,
            "vertex buffer {}: {} bytes, layout {:?}, usage {:?}",
            handle.index(),
            buffer.size(),
            buffer.layout().map(|l| l.index()),
            buffer.usage()
        );
        self.vertex_buffers.insert(handle.index(), buffer);
        Ok(())
    }

    fn destroy_vertex_buffer(&mut self, handle: VertexBufferHandle) -> GfxResult<()> {
        Self::release_slot(&mut self.vertex_buffers, handle.index(), "vertex buffer")
    }

    fn create_dynamic_vertex_buffer(
        &mut self,
        handle: VertexBufferHandle,
        size: u32,
        flags: BufferFlags,
    ) -> GfxResult<()> {
        Self::vacant_slot(&self.vertex_buffers, handle.index(), "vertex buffer")?;
        self.vertex_buffers
            .insert(handle.index(), Buffer::dynamic(size, None, flags, false));
        Ok(())
    }

    fn update_dynamic_vertex_buffer(
        &mut self,
        handle: VertexBufferHandle,
        offset: u32,
        mem: &Memory,
    ) -> GfxResult<()> {
        let buffer = self.vertex_buffers.get_mut(&handle.index()).ok_or_else(|| {
            GfxError::InvalidArgument(format!("unknown vertex buffer handle {}", handle.index()))
        })?;
        buffer.update(offset, mem.data())
    }

    fn destroy_dynamic_vertex_buffer(&mut self, handle: VertexBufferHandle) -> GfxResult<()> {
        Self::release_slot(&mut self.vertex_buffers, handle.index(), "vertex buffer")
    }

    // ===== SHADERS AND PROGRAMS =====

    fn create_shader(&mut self, handle: ShaderHandle, mem: &Memory) -> GfxResult<()> {
        Self::vacant_slot(&self.shaders, handle.index(), "shader")?;
        let shader = Shader::new(mem)?;
        gfx_trace!(
            SOURCE,
            "shader {}: {} bytes of module code",
            handle.index(),
            shader.bytecode().len()
        );
        self.shaders.insert(handle.index(), shader);
        Ok(())
    }

    fn destroy_shader(&mut self, handle: ShaderHandle) -> GfxResult<()> {
        // Programs hold shader handles, not references, so destroying a
        // still-linked shader cannot dangle anything here
        Self::release_slot(&mut self.shaders, handle.index(), "shader")
    }

    fn create_program(
        &mut self,
        handle: ProgramHandle,
        vsh: ShaderHandle,
        fsh: ShaderHandle,
    ) -> GfxResult<()> {
        Self::vacant_slot(&self.programs, handle.index(), "program")?;
        if !self.shaders.contains_key(&vsh.index()) {
            return Err(GfxError::InvalidArgument(format!(
                "program links unknown vertex shader {}",
                vsh.index()
            )));
        }
        if !self.shaders.contains_key(&fsh.index()) {
            return Err(GfxError::InvalidArgument(format!(
                "program links unknown fragment shader {}",
                fsh.index()
            )));
        }
        self.programs.insert(handle.index(), Program { vsh, fsh });
        Ok(())
    }

    fn destroy_program(&mut self, handle: ProgramHandle) -> GfxResult<()> {
        Self::release_slot(&mut self.programs, handle.index(), "program")
    }

    // ===== TEXTURES =====

    fn create_texture(
        &mut self,
        handle: TextureHandle,
        info: &TextureInfo,
        mem: Option<&Memory>,
        flags: TextureFlags,
    ) -> GfxResult<Option<usize>> {
        let limits = &self.caps.limits;
        let max_dim = u32::from(info.width.max(info.height).max(info.depth));
        if max_dim == 0 || max_dim > limits.max_texture_size {
            return Err(GfxError::InvalidArgument(format!(
                "texture extent {}x{}x{} outside supported range",
                info.width, info.height, info.depth
            )));
        }
        if u32::from(info.num_layers) > limits.max_texture_layers || info.num_layers == 0 {
            return Err(GfxError::InvalidArgument(format!(
                "texture layer count {} outside supported range",
                info.num_layers
            )));
        }
        if info.num_mips == 0 {
            return Err(GfxError::InvalidArgument("texture needs at least one mip".to_string()));
        }
        if info.cube_map && info.width != info.height {
            return Err(GfxError::InvalidArgument(format!(
                "cube map sides must be square, got {}x{}",
                info.width, info.height
            )));
        }

        // A slot first seen through override_internal holds a placeholder;
        // creation completes it and keeps the external pointer
        let prior_override = match self.textures.get(&handle.index()) {
            Some(existing) => match existing.internal() {
                Some(ptr) => Some(ptr),
                None => {
                    return Err(GfxError::InvalidArgument(format!(
                        "texture handle {} is already in use",
                        handle.index()
                    )))
                }
            },
            None => None,
        };

        let mut texture = Texture::new(*info, flags, mem)?;
        if let Some(ptr) = prior_override {
            texture.set_override(ptr);
        }
        gfx_trace!(
            SOURCE,
            "texture {} created as {:?} ({}x{}, {} mips)",
            handle.index(),
            texture.vk_format(),
            info.width,
            info.height,
            info.num_mips
        );
        let internal = texture.internal();
        self.textures.insert(handle.index(), texture);
        Ok(internal)
    }

    fn update_texture_begin(&mut self, handle: TextureHandle, side: u8, mip: u8) -> GfxResult<()> {
        if !self.textures.contains_key(&handle.index()) {
            return Err(GfxError::InvalidArgument(format!(
                "unknown texture handle {}",
                handle.index()
            )));
        }
        if let Some(open) = self.stream {
            // Rejecting leaves the open session untouched
            return Err(GfxError::InvalidArgument(format!(
                "streaming session already open on texture {}",
                open.handle
            )));
        }
        self.stream = Some(TextureStream {
            handle: handle.index(),
            side,
            mip,
        });
        Ok(())
    }

    fn update_texture(
        &mut self,
        handle: TextureHandle,
        side: u8,
        mip: u8,
        region: &TextureRegion,
        mem: &Memory,
    ) -> GfxResult<()> {
        let expected = TextureStream {
            handle: handle.index(),
            side,
            mip,
        };
        match self.stream {
            Some(open) if open == expected => {}
            Some(open) => {
                return Err(GfxError::InvalidArgument(format!(
                    "update targets texture {} side {} mip {} but session is on texture {} side {} mip {}",
                    handle.index(), side, mip, open.handle, open.side, open.mip
                )))
            }
            None => {
                return Err(GfxError::InvalidArgument(
                    "update_texture outside a streaming session".to_string(),
                ))
            }
        }

        let texture = self.textures.get_mut(&handle.index()).ok_or_else(|| {
            GfxError::InvalidArgument(format!("unknown texture handle {}", handle.index()))
        })?;
        texture.write_region(side, mip, region, mem)
    }

    fn update_texture_end(&mut self) -> GfxResult<()> {
        if self.stream.take().is_none() {
            // Conservative: end without begin is a no-op, not corruption
            gfx_warn!(SOURCE, "update_texture_end without an open streaming session");
        }
        Ok(())
    }

    fn read_texture(&mut self, handle: TextureHandle, dst: &mut [u8], mip: u8) -> GfxResult<()> {
        let texture = self.textures.get(&handle.index()).ok_or_else(|| {
            GfxError::InvalidArgument(format!("unknown texture handle {}", handle.index()))
        })?;
        if !texture.flags().contains(TextureFlags::READ_BACK) {
            return Err(GfxError::InvalidArgument(format!(
                "texture {} was created without READ_BACK",
                handle.index()
            )));
        }
        texture.read_mip(mip, dst)
    }

    fn resize_texture(
        &mut self,
        handle: TextureHandle,
        width: u16,
        height: u16,
        num_mips: u8,
        num_layers: u16,
    ) -> GfxResult<()> {
        let max_size = self.caps.limits.max_texture_size;
        let texture = self.textures.get_mut(&handle.index()).ok_or_else(|| {
            GfxError::InvalidArgument(format!("unknown texture handle {}", handle.index()))
        })?;
        if width == 0 || height == 0 || u32::from(width.max(height)) > max_size {
            return Err(GfxError::InvalidArgument(format!(
                "resize to {}x{} outside supported range",
                width, height
            )));
        }
        texture.resize(width, height, num_mips, num_layers);
        Ok(())
    }

    fn override_internal(&mut self, handle: TextureHandle, ptr: usize) -> GfxResult<()> {
        // Interop contract: valid in any order relative to create/destroy
        self.textures
            .entry(handle.index())
            .and_modify(|texture| texture.set_override(ptr))
            .or_insert_with(|| Texture::from_override(ptr));
        Ok(())
    }

    fn internal(&self, handle: TextureHandle) -> Option<usize> {
        self.textures.get(&handle.index()).and_then(|t| t.internal())
    }

    fn destroy_texture(&mut self, handle: TextureHandle) -> GfxResult<()> {
        Self::release_slot(&mut self.textures, handle.index(), "texture")
    }

    // ===== FRAME BUFFERS =====

    fn create_frame_buffer(
        &mut self,
        handle: FrameBufferHandle,
        attachments: &[Attachment],
    ) -> GfxResult<()> {
        Self::vacant_slot(&self.frame_buffers, handle.index(), "frame buffer")?;
        if attachments.is_empty() {
            return Err(GfxError::InvalidArgument(
                "frame buffer needs at least one attachment".to_string(),
            ));
        }
        if attachments.len() > self.caps.limits.max_fb_attachments as usize {
            return Err(GfxError::InvalidArgument(format!(
                "{} attachments exceeds limit of {}",
                attachments.len(),
                self.caps.limits.max_fb_attachments
            )));
        }
        for attachment in attachments {
            let texture = self
                .textures
                .get(&attachment.texture.index())
                .ok_or_else(|| {
                    GfxError::InvalidArgument(format!(
                        "attachment references unknown texture {}",
                        attachment.texture.index()
                    ))
                })?;
            if !texture.flags().contains(TextureFlags::RENDER_TARGET) {
                return Err(GfxError::InvalidArgument(format!(
                    "texture {} was not created as a render target",
                    attachment.texture.index()
                )));
            }
            if !attachment_in_range(attachment, texture.info()) {
                return Err(GfxError::InvalidArgument(format!(
                    "attachment mip {} / layer {} out of range for texture {}",
                    attachment.mip,
                    attachment.layer,
                    attachment.texture.index()
                )));
            }
        }
        self.frame_buffers
            .insert(handle.index(), FrameBuffer::Attachments(attachments.to_vec()));
        Ok(())
    }

    fn create_frame_buffer_from_window(
        &mut self,
        handle: FrameBufferHandle,
        _window: RawWindowHandle,
        width: u32,
        height: u32,
        format: TextureFormat,
        depth_format: Option<TextureFormat>,
    ) -> GfxResult<()> {
        Self::vacant_slot(&self.frame_buffers, handle.index(), "frame buffer")?;
        if width == 0 || height == 0 {
            return Err(GfxError::InvalidArgument(format!(
                "window target {}x{} has a zero extent",
                width, height
            )));
        }
        if format.is_depth() {
            return Err(GfxError::InvalidArgument(
                "window color format cannot be a depth format".to_string(),
            ));
        }
        if let Some(depth) = depth_format {
            if !depth.is_depth() {
                return Err(GfxError::InvalidArgument(format!(
                    "{:?} is not a depth format",
                    depth
                )));
            }
        }
        self.frame_buffers.insert(
            handle.index(),
            FrameBuffer::Window(WindowTarget {
                width,
                height,
                format,
                depth_format,
            }),
        );
        Ok(())
    }

    fn destroy_frame_buffer(&mut self, handle: FrameBufferHandle) -> GfxResult<()> {
        // Both creation forms release through the same path
        Self::release_slot(&mut self.frame_buffers, handle.index(), "frame buffer")
    }

    // ===== UNIFORMS =====

    fn create_uniform(
        &mut self,
        handle: UniformHandle,
        kind: UniformType,
        num: u16,
        name: &str,
    ) -> GfxResult<()> {
        Self::vacant_slot(&self.uniforms, handle.index(), "uniform")?;
        if num == 0 {
            return Err(GfxError::InvalidArgument(format!(
                "uniform '{}' declared with zero elements",
                name
            )));
        }
        let size = kind.size_bytes() * u32::from(num);
        self.uniforms.insert(
            handle.index(),
            UniformRecord {
                kind,
                size,
                name: name.to_string(),
                value: vec![0; size as usize],
            },
        );
        Ok(())
    }

    fn destroy_uniform(&mut self, handle: UniformHandle) -> GfxResult<()> {
        Self::release_slot(&mut self.uniforms, handle.index(), "uniform")
    }

    fn update_uniform(&mut self, loc: u16, data: &[u8]) -> GfxResult<()> {
        let uniform = self.uniforms.get_mut(&loc).ok_or_else(|| {
            GfxError::InvalidArgument(format!("no uniform registered at location {}", loc))
        })?;
        // Size is the only validation possible here; the type is opaque
        if data.len() as u32 > uniform.size {
            return Err(GfxError::InvalidArgument(format!(
                "{} bytes exceeds uniform '{}' size of {} ({:?})",
                data.len(),
                uniform.name,
                uniform.size,
                uniform.kind
            )));
        }
        uniform.value[..data.len()].copy_from_slice(data);
        Ok(())
    }

    // ===== OCCLUSION QUERIES =====

    fn invalidate_occlusion_query(&mut self, handle: OcclusionQueryHandle) -> GfxResult<()> {
        // Creation is implicit in the encoder; invalidation only marks the
        // slot's result unavailable
        self.invalidated_queries.insert(handle.index());
        Ok(())
    }

    // ===== DIAGNOSTICS =====

    fn request_screen_shot(&mut self, handle: FrameBufferHandle, file_path: &Path) {
        let Some(frame_buffer) = self.frame_buffers.get(&handle.index()) else {
            gfx_error!(
                SOURCE,
                "screenshot of unknown frame buffer {} requested ({})",
                handle.index(),
                file_path.display()
            );
            return;
        };
        // Capture needs a completed device readback; without one the
        // request is reported, not silently dropped
        let kind = if frame_buffer.is_window_backed() {
            "swap-chain".to_string()
        } else {
            format!("{} attachments", frame_buffer.num_attachments())
        };
        gfx_warn!(
            SOURCE,
            "screenshot of frame buffer {} ({}) to {} requires device readback; skipped",
            handle.index(),
            kind,
            file_path.display()
        );
    }

    fn update_view_name(&mut self, view: ViewId, name: &str) {
        self.view_names.insert(view, name.to_string());
    }

    fn set_marker(&mut self, marker: &str) {
        self.markers.push(marker.to_string());
        gfx_trace!(SOURCE, "marker: {}", marker);
    }

    fn set_name(&mut self, handle: ResourceHandle, name: &str) {
        self.debug_names.insert(handle, name.to_string());
    }

    // ===== FRAME SUBMISSION =====

    fn submit(
        &mut self,
        frame: &mut Frame,
        _clear_quad: &ClearQuad,
        _blitter: &mut TextBlitter,
    ) -> GfxResult<()> {
        let time_begin = self.now_ticks();

        let mut num_prims = [0u32; Topology::COUNT];
        for item in &frame.items {
            num_prims[item.topology.index()] +=
                item.topology.prim_count(item.element_count()) * item.num_instances.max(1);
        }

        // Markers are per-frame diagnostics
        self.markers.clear();
        self.frame_count += 1;

        let stats = &mut frame.stats;
        stats.reset();
        stats.cpu_time_begin = time_begin;
        stats.cpu_time_end = self.now_ticks();
        stats.cpu_timer_freq = 1_000_000_000;
        stats.num_prims = num_prims;
        // GPU timestamps and memory counters need a live device queue;
        // None marks them unsupported rather than zero
        stats.gpu = None;
        stats.gpu_memory = None;
        Ok(())
    }

    fn flip(&mut self) -> GfxResult<()> {
        gfx_trace!(SOURCE, "flip (frame {})", self.frame_count);
        Ok(())
    }

    fn blit_setup(&mut self, blitter: &mut TextBlitter) -> GfxResult<()> {
        if !self.textures.contains_key(&blitter.texture.index()) {
            return Err(GfxError::InvalidArgument(
                "blitter glyph atlas texture does not exist".to_string(),
            ));
        }
        if !self.programs.contains_key(&blitter.program.index()) {
            return Err(GfxError::InvalidArgument(
                "blitter program does not exist".to_string(),
            ));
        }
        if !self.vertex_buffers.contains_key(&blitter.vertex_buffer.index())
            || !self.index_buffers.contains_key(&blitter.index_buffer.index())
        {
            return Err(GfxError::InvalidArgument(
                "blitter geometry buffers do not exist".to_string(),
            ));
        }
        Ok(())
    }

    fn blit_render(&mut self, blitter: &mut TextBlitter, num_indices: u32) -> GfxResult<()> {
        let index_buffer = self
            .index_buffers
            .get(&blitter.index_buffer.index())
            .ok_or_else(|| {
                GfxError::InvalidArgument("blitter index buffer does not exist".to_string())
            })?;
        // Engine-provided overlay geometry is 16-bit indexed
        let available = index_buffer.size() / 2;
        if num_indices > available {
            return Err(GfxError::InvalidArgument(format!(
                "blit draws {} indices but buffer holds {}",
                num_indices, available
            )));
        }
        gfx_trace!(SOURCE, "text blit: {} indices", num_indices);
        Ok(())
    }
}
