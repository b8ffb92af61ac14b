//! Image copying from the Datumaro `images/<split>/` folders.

use std::fs;
use std::io;
use std::path::Path;

use log::debug;
use walkdir::WalkDir;

use crate::error::ConvertError;
use crate::split::Split;

/// Copy every entry directly inside `source_dir` into `dest_dir`, keeping
/// file names. Returns the number of files copied.
///
/// Every entry must be a regular file; a subdirectory aborts the copy.
/// Existing files in `dest_dir` with the same name are overwritten.
pub fn copy_split_images(
    source_dir: &Path,
    dest_dir: &Path,
    split: Split,
) -> Result<usize, ConvertError> {
    let copy_err = |path: &Path, source: io::Error| ConvertError::ImageCopy {
        split,
        path: path.to_path_buf(),
        source,
    };

    let metadata = fs::metadata(source_dir).map_err(|source| copy_err(source_dir, source))?;
    if !metadata.is_dir() {
        return Err(copy_err(
            source_dir,
            io::Error::new(io::ErrorKind::InvalidInput, "not a directory"),
        ));
    }

    let mut copied = 0;
    for entry in WalkDir::new(source_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|err| copy_err(source_dir, io::Error::from(err)))?;

        if !entry.file_type().is_file() {
            return Err(copy_err(
                entry.path(),
                io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
            ));
        }

        let target = dest_dir.join(entry.file_name());
        fs::copy(entry.path(), &target).map_err(|source| copy_err(entry.path(), source))?;
        debug!("copied {} -> {}", entry.path().display(), target.display());
        copied += 1;
    }

    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_files_byte_for_byte() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let src = temp.path().join("src");
        let dst = temp.path().join("dst");
        fs::create_dir_all(&src).expect("create src");
        fs::create_dir_all(&dst).expect("create dst");

        fs::write(src.join("a.jpg"), [0xFF, 0xD8, 0x00, 0x01]).expect("write a");
        fs::write(src.join("b.png"), b"\x89PNG").expect("write b");

        let copied = copy_split_images(&src, &dst, Split::Train).expect("copy images");
        assert_eq!(copied, 2);
        assert_eq!(
            fs::read(dst.join("a.jpg")).expect("read a"),
            vec![0xFF, 0xD8, 0x00, 0x01]
        );
        assert_eq!(fs::read(dst.join("b.png")).expect("read b"), b"\x89PNG");
    }

    #[test]
    fn nested_directory_aborts_copy() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let src = temp.path().join("src");
        let dst = temp.path().join("dst");
        fs::create_dir_all(src.join("nested")).expect("create nested");
        fs::create_dir_all(&dst).expect("create dst");
        fs::write(src.join("nested/inner.jpg"), b"x").expect("write inner");
        fs::write(src.join("top.jpg"), b"y").expect("write top");

        let err = copy_split_images(&src, &dst, Split::Test).unwrap_err();
        match &err {
            ConvertError::ImageCopy { split, path, .. } => {
                assert_eq!(*split, Split::Test);
                assert_eq!(path, &src.join("nested"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("test images"));
        assert!(!dst.join("nested").exists());
        assert!(!dst.join("inner.jpg").exists());
    }

    #[test]
    fn missing_source_dir_names_split() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let err = copy_split_images(&temp.path().join("val"), temp.path(), Split::Val)
            .unwrap_err();

        assert!(matches!(
            err,
            ConvertError::ImageCopy {
                split: Split::Val,
                ..
            }
        ));
        assert!(err.to_string().contains("val images"));
    }
}
