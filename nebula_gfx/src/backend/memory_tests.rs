use super::*;

#[test]
fn test_from_vec_owns_bytes() {
    let mem = Memory::from_vec(vec![1, 2, 3]);
    assert_eq!(mem.len(), 3);
    assert_eq!(mem.data(), &[1, 2, 3]);
    assert!(!mem.is_empty());
}

#[test]
fn test_copy_is_independent_of_source() {
    let mut source = vec![9u8, 8, 7];
    let mem = Memory::copy(&source);
    source[0] = 0;
    assert_eq!(mem.data(), &[9, 8, 7]);
}

#[test]
fn test_clone_shares_buffer() {
    let a = Memory::from_vec(vec![0u8; 1024]);
    let b = a.clone();
    // Same underlying allocation, not a copy
    assert_eq!(a.data().as_ptr(), b.data().as_ptr());
}

#[test]
fn test_of_slice_casts_typed_data() {
    #[repr(C)]
    #[derive(Clone, Copy, bytemuck::NoUninit)]
    struct Vertex {
        position: [f32; 2],
        color: u32,
    }

    let vertices = [
        Vertex { position: [0.0, 1.0], color: 0xff00_00ff },
        Vertex { position: [1.0, 0.0], color: 0xffff_ffff },
    ];
    let mem = Memory::of_slice(&vertices);
    assert_eq!(mem.len(), 2 * std::mem::size_of::<Vertex>());
}

#[test]
fn test_empty_payload() {
    let mem = Memory::copy(&[]);
    assert!(mem.is_empty());
    assert_eq!(mem.len(), 0);
}
