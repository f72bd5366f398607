use super::*;

#[test]
fn test_empty_layout_has_zero_stride() {
    let layout = VertexLayout::new();
    assert_eq!(layout.stride(), 0);
    assert!(layout.attributes().is_empty());
}

#[test]
fn test_offsets_and_stride_accumulate() {
    let mut layout = VertexLayout::new();
    layout
        .add(Attrib::Position, 3, AttribType::Float, false)
        .add(Attrib::Normal, 3, AttribType::Float, false)
        .add(Attrib::Color0, 4, AttribType::Uint8, true)
        .add(Attrib::TexCoord0, 2, AttribType::Half, false);

    assert_eq!(layout.attribute(Attrib::Position).unwrap().offset, 0);
    assert_eq!(layout.attribute(Attrib::Normal).unwrap().offset, 12);
    assert_eq!(layout.attribute(Attrib::Color0).unwrap().offset, 24);
    assert_eq!(layout.attribute(Attrib::TexCoord0).unwrap().offset, 28);
    assert_eq!(layout.stride(), 32);
}

#[test]
fn test_has_reports_declared_semantics() {
    let mut layout = VertexLayout::new();
    layout.add(Attrib::Position, 3, AttribType::Float, false);

    assert!(layout.has(Attrib::Position));
    assert!(!layout.has(Attrib::Normal));
    assert!(!layout.has(Attrib::TexCoord0));
}

#[test]
fn test_attribute_metadata_is_preserved() {
    let mut layout = VertexLayout::new();
    layout.add(Attrib::Color0, 4, AttribType::Uint8, true);

    let color = layout.attribute(Attrib::Color0).unwrap();
    assert_eq!(color.num, 4);
    assert_eq!(color.kind, AttribType::Uint8);
    assert!(color.normalized);
}

#[test]
fn test_attrib_type_bytes() {
    assert_eq!(AttribType::Uint8.bytes(), 1);
    assert_eq!(AttribType::Int16.bytes(), 2);
    assert_eq!(AttribType::Half.bytes(), 2);
    assert_eq!(AttribType::Float.bytes(), 4);
}
