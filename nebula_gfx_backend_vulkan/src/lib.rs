/*!
# Nebula GFX - Vulkan Backend

Vulkan implementation of the Nebula backend contract.

This crate provides the conforming Vulkan backend: capability and limit
declaration, handle-indexed resource registries with full lifecycle
enforcement, the texture streaming state machine, frame submission
statistics, and the `VkAllocationCallbacks` shim routing native host
allocations through the engine's tracked allocator (using the Ash
library for Vulkan bindings).

The backend registers as a factory and can be selected at runtime:

```no_run
use nebula_gfx::nebula::Context;
use nebula_gfx::nebula::gfx::Init;

nebula_gfx_backend_vulkan::register();
let ctx = Context::new("vulkan", &Init::default())?;
# Ok::<(), nebula_gfx::GfxError>(())
```
*/

// Vulkan implementation modules
mod vulkan_alloc;
mod vulkan_backend;
mod vulkan_buffer;
mod vulkan_format;
mod vulkan_frame_buffer;
mod vulkan_shader;
mod vulkan_texture;

pub use vulkan_alloc::HostAllocationCallbacks;
pub use vulkan_backend::VulkanBackend;
pub use vulkan_format::{format_caps, to_vk_format};

use nebula_gfx::nebula::gfx::{Backend, Init};
use nebula_gfx::nebula::register_backend;
use nebula_gfx::GfxResult;

/// Create a Vulkan backend directly (embedders that bypass the registry)
pub fn create_backend(init: &Init) -> GfxResult<Box<dyn Backend>> {
    Ok(Box::new(VulkanBackend::new(init)?))
}

/// Register the Vulkan backend factory under the name `"vulkan"`
pub fn register() {
    register_backend("vulkan", create_backend);
}
