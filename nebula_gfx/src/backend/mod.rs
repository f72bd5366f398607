//! Backend module - the backend contract and all types crossing it

// Module declarations
pub mod backend;
pub mod buffer;
pub mod caps;
pub mod format;
pub mod frame;
pub mod handle;
pub mod memory;
pub mod texture;
pub mod uniform;
pub mod vertex_layout;

// Re-export everything from backend.rs
pub use backend::*;

// Re-export from other modules
pub use buffer::*;
pub use caps::*;
pub use format::*;
pub use frame::*;
pub use handle::*;
pub use memory::*;
pub use texture::*;
pub use uniform::*;
pub use vertex_layout::*;

// Mock backend for tests (no GPU required)
#[cfg(test)]
pub mod mock_backend;
