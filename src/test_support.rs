//! Fixtures shared by the unit tests.

use std::fs;
use std::path::Path;

/// Write a silent mono WAV lasting `seconds` at a tiny sample rate.
pub fn write_wav(path: &Path, seconds: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 100,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for _ in 0..(seconds * spec.sample_rate) {
        writer.write_sample(0i16).unwrap();
    }
    writer.finalize().unwrap();
}

/// Create `path` (and its parents) with junk content.
pub fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, b"not real audio").unwrap();
}
