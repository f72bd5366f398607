//! Mock Backend for unit tests (no GPU required)
//!
//! Records every operation it receives and tracks live resources per
//! kind, allowing contract-level tests of lifecycle pairing, streaming
//! ordering, and submission statistics without a graphics device.

use std::path::Path;

use raw_window_handle::RawWindowHandle;
use rustc_hash::FxHashMap;

use crate::backend::{
    Attachment, Backend, BackendKind, BufferFlags, Caps, CapsFlags, ClearQuad, FormatCaps, Frame,
    FrameBufferHandle, IndexBufferHandle, Limits, Memory, OcclusionQueryHandle, ProgramHandle,
    ResourceHandle, ShaderHandle, TextBlitter, TextureFlags, TextureFormat, TextureHandle,
    TextureInfo, TextureRegion, Topology, UniformHandle, UniformType, VertexBufferHandle,
    VertexLayout, VertexLayoutHandle, ViewId, MAX_FRAME_BUFFER_ATTACHMENTS, MAX_VERTEX_STREAMS,
};
use crate::error::{GfxError, GfxResult};

/// Mock backend that records operations without touching a GPU
pub struct MockBackend {
    caps: Caps,
    /// Chronological log of every operation received
    pub ops: Vec<String>,
    index_buffers: FxHashMap<u16, u32>,
    vertex_buffers: FxHashMap<u16, u32>,
    layouts: FxHashMap<u16, u16>,
    shaders: FxHashMap<u16, usize>,
    programs: FxHashMap<u16, (u16, u16)>,
    textures: FxHashMap<u16, TextureInfo>,
    frame_buffers: FxHashMap<u16, usize>,
    uniforms: FxHashMap<u16, u32>,
    streaming: Option<(u16, u8, u8)>,
    device_removed: bool,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            caps: Caps {
                supported: CapsFlags::INSTANCING | CapsFlags::SWAP_CHAIN,
                formats: [FormatCaps::TEXTURE_2D; TextureFormat::COUNT],
                limits: Limits {
                    max_texture_size: 4096,
                    max_texture_layers: 256,
                    max_texture_samplers: 16,
                    max_compute_bindings: 16,
                    max_fb_attachments: MAX_FRAME_BUFFER_ATTACHMENTS,
                    max_vertex_streams: MAX_VERTEX_STREAMS,
                },
            },
            ops: Vec::new(),
            index_buffers: FxHashMap::default(),
            vertex_buffers: FxHashMap::default(),
            layouts: FxHashMap::default(),
            shaders: FxHashMap::default(),
            programs: FxHashMap::default(),
            textures: FxHashMap::default(),
            frame_buffers: FxHashMap::default(),
            uniforms: FxHashMap::default(),
            streaming: None,
            device_removed: false,
        }
    }

    /// Total live resources across all kinds
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
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for MockBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Noop
    }

    fn name(&self) -> &'static str {
        "Mock"
    }

    fn caps(&self) -> &Caps {
        &self.caps
    }

    fn is_device_removed(&self) -> bool {
        self.device_removed
    }

    fn create_index_buffer(
        &mut self,
        handle: IndexBufferHandle,
        mem: &Memory,
        _flags: BufferFlags,
    ) -> GfxResult<()> {
        self.ops.push(format!("create_index_buffer {}", handle.index()));
        self.index_buffers.insert(handle.index(), mem.len() as u32);
        Ok(())
    }

    fn destroy_index_buffer(&mut self, handle: IndexBufferHandle) -> GfxResult<()> {
        self.ops.push(format!("destroy_index_buffer {}", handle.index()));
        self.index_buffers.remove(&handle.index());
        Ok(())
    }

    fn create_dynamic_index_buffer(
        &mut self,
        handle: IndexBufferHandle,
        size: u32,
        _flags: BufferFlags,
    ) -> GfxResult<()> {
        self.ops.push(format!("create_dynamic_index_buffer {}", handle.index()));
        self.index_buffers.insert(handle.index(), size);
        Ok(())
    }

    fn update_dynamic_index_buffer(
        &mut self,
        handle: IndexBufferHandle,
        offset: u32,
        mem: &Memory,
    ) -> GfxResult<()> {
        self.ops.push(format!("update_dynamic_index_buffer {}", handle.index()));
        let size = *self
            .index_buffers
            .get(&handle.index())
            .ok_or_else(|| GfxError::InvalidArgument("unknown index buffer".to_string()))?;
        if offset as u64 + mem.len() as u64 > u64::from(size) {
            return Err(GfxError::InvalidArgument("update past end of buffer".to_string()));
        }
        Ok(())
    }

    fn destroy_dynamic_index_buffer(&mut self, handle: IndexBufferHandle) -> GfxResult<()> {
        self.destroy_index_buffer(handle)
    }

    fn create_vertex_layout(
        &mut self,
        handle: VertexLayoutHandle,
        layout: &VertexLayout,
    ) -> GfxResult<()> {
        self.ops.push(format!("create_vertex_layout {}", handle.index()));
        self.layouts.insert(handle.index(), layout.stride());
        Ok(())
    }

    fn destroy_vertex_layout(&mut self, handle: VertexLayoutHandle) -> GfxResult<()> {
        self.ops.push(format!("destroy_vertex_layout {}", handle.index()));
        self.layouts.remove(&handle.index());
        Ok(())
    }

    fn create_vertex_buffer(
        &mut self,
        handle: VertexBufferHandle,
        mem: &Memory,
        _layout: VertexLayoutHandle,
        _flags: BufferFlags,
    ) -> GfxResult<()> {
        self.ops.push(format!("create_vertex_buffer {}", handle.index()));
        self.vertex_buffers.insert(handle.index(), mem.len() as u32);
        Ok(())
    }

    fn destroy_vertex_buffer(&mut self, handle: VertexBufferHandle) -> GfxResult<()> {
        self.ops.push(format!("destroy_vertex_buffer {}", handle.index()));
        self.vertex_buffers.remove(&handle.index());
        Ok(())
    }

    fn create_dynamic_vertex_buffer(
        &mut self,
        handle: VertexBufferHandle,
        size: u32,
        _flags: BufferFlags,
    ) -> GfxResult<()> {
        self.ops.push(format!("create_dynamic_vertex_buffer {}", handle.index()));
        self.vertex_buffers.insert(handle.index(), size);
        Ok(())
    }

    fn update_dynamic_vertex_buffer(
        &mut self,
        handle: VertexBufferHandle,
        offset: u32,
        mem: &Memory,
    ) -> GfxResult<()> {
        self.ops.push(format!("update_dynamic_vertex_buffer {}", handle.index()));
        let size = *self
            .vertex_buffers
            .get(&handle.index())
            .ok_or_else(|| GfxError::InvalidArgument("unknown vertex buffer".to_string()))?;
        if offset as u64 + mem.len() as u64 > u64::from(size) {
            return Err(GfxError::InvalidArgument("update past end of buffer".to_string()));
        }
        Ok(())
    }

    fn destroy_dynamic_vertex_buffer(&mut self, handle: VertexBufferHandle) -> GfxResult<()> {
        self.destroy_vertex_buffer(handle)
    }

    fn create_shader(&mut self, handle: ShaderHandle, mem: &Memory) -> GfxResult<()> {
        self.ops.push(format!("create_shader {}", handle.index()));
        self.shaders.insert(handle.index(), mem.len());
        Ok(())
    }

    fn destroy_shader(&mut self, handle: ShaderHandle) -> GfxResult<()> {
        self.ops.push(format!("destroy_shader {}", handle.index()));
        self.shaders.remove(&handle.index());
        Ok(())
    }

    fn create_program(
        &mut self,
        handle: ProgramHandle,
        vsh: ShaderHandle,
        fsh: ShaderHandle,
    ) -> GfxResult<()> {
        self.ops.push(format!("create_program {}", handle.index()));
        self.programs.insert(handle.index(), (vsh.index(), fsh.index()));
        Ok(())
    }

    fn destroy_program(&mut self, handle: ProgramHandle) -> GfxResult<()> {
        self.ops.push(format!("destroy_program {}", handle.index()));
        self.programs.remove(&handle.index());
        Ok(())
    }

    fn create_texture(
        &mut self,
        handle: TextureHandle,
        info: &TextureInfo,
        _mem: Option<&Memory>,
        _flags: TextureFlags,
    ) -> GfxResult<Option<usize>> {
        self.ops.push(format!("create_texture {}", handle.index()));
        self.textures.insert(handle.index(), *info);
        Ok(None)
    }

    fn update_texture_begin(&mut self, handle: TextureHandle, side: u8, mip: u8) -> GfxResult<()> {
        self.ops.push(format!("update_texture_begin {}", handle.index()));
        if self.streaming.is_some() {
            return Err(GfxError::InvalidArgument("streaming already active".to_string()));
        }
        self.streaming = Some((handle.index(), side, mip));
        Ok(())
    }

    fn update_texture(
        &mut self,
        handle: TextureHandle,
        side: u8,
        mip: u8,
        _region: &TextureRegion,
        _mem: &Memory,
    ) -> GfxResult<()> {
        self.ops.push(format!("update_texture {}", handle.index()));
        match self.streaming {
            Some(target) if target == (handle.index(), side, mip) => Ok(()),
            _ => Err(GfxError::InvalidArgument("no matching streaming session".to_string())),
        }
    }

    fn update_texture_end(&mut self) -> GfxResult<()> {
        self.ops.push("update_texture_end".to_string());
        self.streaming = None;
        Ok(())
    }

    fn read_texture(&mut self, handle: TextureHandle, _dst: &mut [u8], _mip: u8) -> GfxResult<()> {
        self.ops.push(format!("read_texture {}", handle.index()));
        Ok(())
    }

    fn resize_texture(
        &mut self,
        handle: TextureHandle,
        width: u16,
        height: u16,
        num_mips: u8,
        num_layers: u16,
    ) -> GfxResult<()> {
        self.ops.push(format!("resize_texture {}", handle.index()));
        if let Some(info) = self.textures.get_mut(&handle.index()) {
            info.width = width;
            info.height = height;
            info.num_mips = num_mips;
            info.num_layers = num_layers;
        }
        Ok(())
    }

    fn override_internal(&mut self, handle: TextureHandle, _ptr: usize) -> GfxResult<()> {
        self.ops.push(format!("override_internal {}", handle.index()));
        Ok(())
    }

    fn internal(&self, _handle: TextureHandle) -> Option<usize> {
        None
    }

    fn destroy_texture(&mut self, handle: TextureHandle) -> GfxResult<()> {
        self.ops.push(format!("destroy_texture {}", handle.index()));
        self.textures.remove(&handle.index());
        Ok(())
    }

    fn create_frame_buffer(
        &mut self,
        handle: FrameBufferHandle,
        attachments: &[Attachment],
    ) -> GfxResult<()> {
        self.ops.push(format!("create_frame_buffer {}", handle.index()));
        self.frame_buffers.insert(handle.index(), attachments.len());
        Ok(())
    }

    fn create_frame_buffer_from_window(
        &mut self,
        handle: FrameBufferHandle,
        _window: RawWindowHandle,
        _width: u32,
        _height: u32,
        _format: TextureFormat,
        _depth_format: Option<TextureFormat>,
    ) -> GfxResult<()> {
        self.ops.push(format!("create_frame_buffer_from_window {}", handle.index()));
        self.frame_buffers.insert(handle.index(), 0);
        Ok(())
    }

    fn destroy_frame_buffer(&mut self, handle: FrameBufferHandle) -> GfxResult<()> {
        self.ops.push(format!("destroy_frame_buffer {}", handle.index()));
        self.frame_buffers.remove(&handle.index());
        Ok(())
    }

    fn create_uniform(
        &mut self,
        handle: UniformHandle,
        kind: UniformType,
        num: u16,
        _name: &str,
    ) -> GfxResult<()> {
        self.ops.push(format!("create_uniform {}", handle.index()));
        self.uniforms
            .insert(handle.index(), kind.size_bytes() * u32::from(num));
        Ok(())
    }

    fn destroy_uniform(&mut self, handle: UniformHandle) -> GfxResult<()> {
        self.ops.push(format!("destroy_uniform {}", handle.index()));
        self.uniforms.remove(&handle.index());
        Ok(())
    }

    fn update_uniform(&mut self, loc: u16, data: &[u8]) -> GfxResult<()> {
        self.ops.push(format!("update_uniform {}", loc));
        let size = *self
            .uniforms
            .get(&loc)
            .ok_or_else(|| GfxError::InvalidArgument("unknown uniform".to_string()))?;
        if data.len() as u32 > size {
            return Err(GfxError::InvalidArgument("uniform data too large".to_string()));
        }
        Ok(())
    }

    fn invalidate_occlusion_query(&mut self, handle: OcclusionQueryHandle) -> GfxResult<()> {
        self.ops.push(format!("invalidate_occlusion_query {}", handle.index()));
        Ok(())
    }

    fn request_screen_shot(&mut self, handle: FrameBufferHandle, file_path: &Path) {
        self.ops
            .push(format!("request_screen_shot {} {}", handle.index(), file_path.display()));
    }

    fn update_view_name(&mut self, view: ViewId, name: &str) {
        self.ops.push(format!("update_view_name {} {}", view, name));
    }

    fn set_marker(&mut self, marker: &str) {
        self.ops.push(format!("set_marker {}", marker));
    }

    fn set_name(&mut self, handle: ResourceHandle, name: &str) {
        self.ops.push(format!("set_name {:?} {}", handle, name));
    }

    fn submit(
        &mut self,
        frame: &mut Frame,
        _clear_quad: &ClearQuad,
        _blitter: &mut TextBlitter,
    ) -> GfxResult<()> {
        self.ops.push("submit".to_string());
        frame.stats.reset();
        frame.stats.cpu_time_begin = 0;
        frame.stats.cpu_time_end = 0;
        let mut num_prims = [0u32; Topology::COUNT];
        for item in &frame.items {
            num_prims[item.topology.index()] +=
                item.topology.prim_count(item.element_count()) * item.num_instances;
        }
        frame.stats.num_prims = num_prims;
        Ok(())
    }

    fn flip(&mut self) -> GfxResult<()> {
        self.ops.push("flip".to_string());
        Ok(())
    }

    fn blit_setup(&mut self, _blitter: &mut TextBlitter) -> GfxResult<()> {
        self.ops.push("blit_setup".to_string());
        Ok(())
    }

    fn blit_render(&mut self, _blitter: &mut TextBlitter, num_indices: u32) -> GfxResult<()> {
        self.ops.push(format!("blit_render {}", num_indices));
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "mock_backend_tests.rs"]
mod tests;
