//! Uniform (shader constant) types
//!
//! Uniforms are named, typed, possibly array-valued shader constants.
//! Updates push raw bytes to a previously registered location and are
//! validated by size only; a type mismatch that happens to match in size
//! is a caller error the backend cannot detect.

/// Uniform value type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniformType {
    /// Texture sampler binding index
    Sampler,
    /// Four-component float vector
    Vec4,
    /// 3x3 float matrix (stored as three vec4 columns)
    Mat3,
    /// 4x4 float matrix
    Mat4,
}

impl UniformType {
    /// Byte size of one element of this type
    pub fn size_bytes(self) -> u32 {
        match self {
            UniformType::Sampler => 4,
            UniformType::Vec4 => 16,
            UniformType::Mat3 => 48,
            UniformType::Mat4 => 64,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
