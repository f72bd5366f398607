/*!
# Nebula GFX

Core traits and types for the Nebula multi-backend rendering engine.

This crate provides the backend-agnostic contract a graphics backend must
satisfy: handle-based resource lifecycle management, capability/limits
reporting, and frame submission. Backend implementations (Vulkan,
Direct3D 12, etc.) register factories at runtime and are owned by the
engine's top-level [`Context`](context::Context).

## Architecture

- **Backend**: the resource-lifecycle and frame-submission contract
- **Caps / Limits**: capability negotiation, fixed at construction
- **Memory**: reference-counted immutable resource payloads
- **TrackingAllocator**: tracked host allocator backends route native
  allocation requests through
- **Context**: owned backend lifecycle + factory registry

Backend implementations provide one conforming type implementing the
`Backend` trait.
*/

// Internal modules
mod error;

pub mod alloc;
pub mod backend;
pub mod context;
pub mod log;

// Main nebula namespace module
pub mod nebula {
    // Error types
    pub use crate::error::{GfxError, GfxResult};

    // Owned backend lifecycle
    pub use crate::context::{register_backend, Context};

    // Backend contract trait
    pub use crate::backend::Backend;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{DefaultLogger, LogEntry, LogSeverity, Logger};
        // Note: gfx_* macros are exported at the crate root, not here
    }

    // Allocation sub-module
    pub mod alloc {
        pub use crate::alloc::{AllocScope, TrackingAllocator};
    }

    // Graphics sub-module with all contract types
    pub mod gfx {
        pub use crate::backend::*;
    }
}

// Flat re-exports for backend implementations
pub use crate::error::{GfxError, GfxResult};
