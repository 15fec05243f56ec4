//! Reading and writing animation files.
//!
//! Bytes are passed through verbatim; validation is left to
//! [`AnimationBuffer::load`](super::AnimationBuffer::load).

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::info;

/// Read a whole animation file.
pub fn read_animation<P: AsRef<Path>>(path: P) -> io::Result<Vec<u8>> {
    let bytes = fs::read(path.as_ref())?;
    info!("Read {} bytes from {}", bytes.len(), path.as_ref().display());
    Ok(bytes)
}

/// Write animation bytes, replacing any existing file.
pub fn write_animation<P: AsRef<Path>>(path: P, bytes: &[u8]) -> io::Result<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    writer.write_all(bytes)?;
    writer.flush()?;
    info!("Wrote {} bytes to {}", bytes.len(), path.as_ref().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{Category, FRAME_SIZE};
    use crate::segment::{ExpressionEditor, RangeWrite};
    use tempfile::tempdir;

    fn sample_bytes(frames: usize) -> Vec<u8> {
        (0..frames * FRAME_SIZE).map(|i| (i % 251) as u8).collect()
    }

    #[test]
    fn test_load_save_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("roundtrip.anim");
        let bytes = sample_bytes(12);
        fs::write(&path, &bytes).unwrap();

        let mut editor = ExpressionEditor::new();
        editor.load(read_animation(&path).unwrap()).unwrap();
        write_animation(&path, editor.save().unwrap()).unwrap();

        assert_eq!(fs::read(&path).unwrap(), bytes);
    }

    #[test]
    fn test_edit_persists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("edit.anim");
        write_animation(&path, &sample_bytes(4)).unwrap();

        let mut editor = ExpressionEditor::new();
        editor.load(read_animation(&path).unwrap()).unwrap();
        editor
            .apply_range_write(&RangeWrite::new(Category::Mouth, 1, 2, 4))
            .unwrap();
        write_animation(&path, editor.save().unwrap()).unwrap();

        let mut reloaded = ExpressionEditor::new();
        reloaded.load(read_animation(&path).unwrap()).unwrap();
        let buffer = reloaded.buffer().unwrap();
        assert_eq!(Category::Mouth.decode(buffer.control_byte(1).unwrap()), 4);
        assert_eq!(Category::Mouth.decode(buffer.control_byte(2).unwrap()), 4);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let err = read_animation(dir.path().join("missing.anim")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
