//! Vertex layout description
//!
//! A [`VertexLayout`] describes the stride and attribute semantics shared
//! by vertex buffers. Layouts are created and destroyed independently of
//! any buffer instance and referenced by handle from vertex-buffer
//! creation.

/// Vertex attribute semantic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attrib {
    Position,
    Normal,
    Tangent,
    Bitangent,
    Color0,
    Color1,
    Indices,
    Weight,
    TexCoord0,
    TexCoord1,
    TexCoord2,
    TexCoord3,
}

/// Vertex attribute component type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttribType {
    Uint8,
    Int16,
    Half,
    Float,
}

impl AttribType {
    /// Size of one component in bytes
    pub fn bytes(self) -> u16 {
        match self {
            AttribType::Uint8 => 1,
            AttribType::Int16 | AttribType::Half => 2,
            AttribType::Float => 4,
        }
    }
}

/// One attribute within a vertex layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Semantic binding
    pub attrib: Attrib,
    /// Component count (1-4)
    pub num: u8,
    /// Component type
    pub kind: AttribType,
    /// Whether integer data is normalized to [0,1] / [-1,1]
    pub normalized: bool,
    /// Byte offset from the start of the vertex
    pub offset: u16,
}

/// Stride and attribute set of a vertex stream
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VertexLayout {
    attributes: Vec<VertexAttribute>,
    stride: u16,
}

impl VertexLayout {
    /// Create an empty layout
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an attribute at the current end of the vertex.
    ///
    /// Offsets and the final stride are computed from declaration order;
    /// attributes are packed without padding.
    pub fn add(&mut self, attrib: Attrib, num: u8, kind: AttribType, normalized: bool) -> &mut Self {
        debug_assert!((1..=4).contains(&num), "attribute component count must be 1-4");
        self.attributes.push(VertexAttribute {
            attrib,
            num,
            kind,
            normalized,
            offset: self.stride,
        });
        self.stride += u16::from(num) * kind.bytes();
        self
    }

    /// Byte stride of one vertex
    pub fn stride(&self) -> u16 {
        self.stride
    }

    /// All attributes in declaration order
    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }

    /// Find an attribute by semantic
    pub fn attribute(&self, attrib: Attrib) -> Option<&VertexAttribute> {
        self.attributes.iter().find(|a| a.attrib == attrib)
    }

    /// Whether the layout declares the given semantic
    pub fn has(&self, attrib: Attrib) -> bool {
        self.attribute(attrib).is_some()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "vertex_layout_tests.rs"]
mod tests;
