//! Frame buffer records
//!
//! Frame buffers come in two creation forms: an explicit attachment list
//! over existing textures, or a swap-chain-backed target created from a
//! native window handle. Destruction releases both forms uniformly, so a
//! single record type carries either shape.

use nebula_gfx::nebula::gfx::{Attachment, WindowTarget};

/// Backend-side state of one frame buffer
pub(crate) enum FrameBuffer {
    /// Render-to-texture form
    Attachments(Vec<Attachment>),
    /// Swap-chain-backed form
    Window(WindowTarget),
}

impl FrameBuffer {
    /// Attachment count (0 for window-backed targets)
    pub fn num_attachments(&self) -> usize {
        match self {
            FrameBuffer::Attachments(attachments) => attachments.len(),
            FrameBuffer::Window(_) => 0,
        }
    }

    /// Whether this frame buffer presents to a swap chain
    pub fn is_window_backed(&self) -> bool {
        matches!(self, FrameBuffer::Window(_))
    }
}
