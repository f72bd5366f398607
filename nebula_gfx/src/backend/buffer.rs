//! Buffer creation flags
//!
//! Index and vertex buffers come in static variants (payload supplied at
//! creation, immutable afterwards) and dynamic variants (size reserved at
//! creation, contents streamed in with partial updates). The flags below
//! qualify either variant.

use bitflags::bitflags;

bitflags! {
    /// Creation flags for index and vertex buffers
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct BufferFlags: u16 {
        /// Readable from compute shaders
        const COMPUTE_READ  = 1 << 0;
        /// Writable from compute shaders
        const COMPUTE_WRITE = 1 << 1;
        /// Usable as an indirect-draw argument buffer
        const DRAW_INDIRECT = 1 << 2;
        /// Dynamic buffer may grow on update past its declared size
        const ALLOW_RESIZE  = 1 << 3;
        /// Index buffer holds 32-bit indices (16-bit otherwise)
        const INDEX32       = 1 << 4;
    }
}
