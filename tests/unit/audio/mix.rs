use super::*;

#[test]
fn writes_clamped_little_endian_samples() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("mix.f32le");
    write_f32le_file(&[0.5, -2.0, 1.0], &path).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes.len(), 12);
    let back: Vec<f32> = bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    assert_eq!(back, vec![0.5, -1.0, 1.0]);
}

#[test]
fn frame_to_sample_uses_rational_fps() {
    let ntsc = Fps::new(30_000, 1001).unwrap();
    assert_eq!(frame_to_sample(0, ntsc, 48_000), 0);
    assert_eq!(frame_to_sample(30, ntsc, 48_000), 48_048);
    assert_eq!(frame_to_sample(25, Fps::integer(25).unwrap(), 48_000), 48_000);
}
