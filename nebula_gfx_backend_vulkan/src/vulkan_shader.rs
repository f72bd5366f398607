//! Shader and program records
//!
//! A shader holds the compiled/intermediate code received at creation; a
//! program links exactly one vertex and one fragment shader by handle.
//! Programs keep only the handles: destroying a shader that is still
//! linked is a caller error, and holding handles (not references) is what
//! keeps it from being able to crash the backend.

use nebula_gfx::nebula::gfx::{Memory, ShaderHandle};
use nebula_gfx::{GfxError, GfxResult};

/// Backend-side state of one shader module
pub(crate) struct Shader {
    bytecode: Vec<u8>,
}

impl Shader {
    /// Capture compiled code from a creation payload.
    ///
    /// SPIR-V words are 4 bytes; an unaligned payload cannot be valid
    /// module code.
    pub fn new(mem: &Memory) -> GfxResult<Self> {
        if mem.is_empty() || mem.len() % 4 != 0 {
            return Err(GfxError::InvalidArgument(format!(
                "shader bytecode size {} is not a positive multiple of 4",
                mem.len()
            )));
        }
        Ok(Self {
            bytecode: mem.data().to_vec(),
        })
    }

    pub fn bytecode(&self) -> &[u8] {
        &self.bytecode
    }
}

/// Backend-side state of one linked program
pub(crate) struct Program {
    pub vsh: ShaderHandle,
    pub fsh: ShaderHandle,
}

// ============================================================================
// Tests
// ============================================================================
