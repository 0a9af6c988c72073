//! Photo capture seam. The terminal cannot pop a camera roll, so the shipped
//! source reads image bytes from a path the user types into the add form. The
//! trait keeps the form logic independent of where the bytes come from, which
//! also lets tests feed in canned blobs.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Yields zero or one photo blob per invocation. Returning `None` means the
/// user skipped the photo, which never blocks saving the food.
pub trait PhotoSource {
    fn fetch(&self, input: &str) -> Result<Option<Vec<u8>>>;
}

/// Reads the photo from a file path. Blank input counts as "no photo".
#[derive(Debug, Default)]
pub struct FilePhotoSource;

impl PhotoSource for FilePhotoSource {
    fn fetch(&self, input: &str) -> Result<Option<Vec<u8>>> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        let bytes = fs::read(Path::new(trimmed))
            .with_context(|| format!("failed to read photo file {trimmed}"))?;
        Ok(Some(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_means_no_photo() {
        let source = FilePhotoSource;
        assert!(source.fetch("").unwrap().is_none());
        assert!(source.fetch("   ").unwrap().is_none());
    }

    #[test]
    fn missing_file_is_a_recoverable_error() {
        let source = FilePhotoSource;
        assert!(source.fetch("/definitely/not/a/real/photo.png").is_err());
    }

    #[test]
    fn existing_file_bytes_are_returned() {
        let path = std::env::temp_dir().join("what-to-eat-photo-test.bin");
        fs::write(&path, [1u8, 2, 3]).unwrap();
        let source = FilePhotoSource;
        assert_eq!(source.fetch(path.to_str().unwrap()).unwrap(), Some(vec![1, 2, 3]));
        let _ = fs::remove_file(&path);
    }
}
