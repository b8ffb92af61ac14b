//! Input and output directory layouts.
//!
//! The input is a Datumaro export with `annotations/` and `images/` trees.
//! The output is an Ultralytics-style dataset with one `images/` + `labels/`
//! pair per split and a `data.yaml` at the root.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConvertError;
use crate::split::Split;

const ANNOTATIONS_DIR: &str = "annotations";
const IMAGES_DIR: &str = "images";
const LABELS_DIR: &str = "labels";
const DATA_YAML: &str = "data.yaml";

/// Paths inside a Datumaro dataset export.
#[derive(Clone, Debug)]
pub struct DatasetLayout {
    root: PathBuf,
}

impl DatasetLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn annotations_dir(&self) -> PathBuf {
        self.root.join(ANNOTATIONS_DIR)
    }

    pub fn images_root(&self) -> PathBuf {
        self.root.join(IMAGES_DIR)
    }

    pub fn annotation_path(&self, split: Split) -> PathBuf {
        self.annotations_dir().join(split.annotation_file())
    }

    pub fn images_dir(&self, split: Split) -> PathBuf {
        self.images_root().join(split.source_name())
    }

    /// Check that the dataset root and its `annotations/` and `images/`
    /// folders exist.
    pub fn check(&self) -> Result<(), ConvertError> {
        let required = [
            ("dataset", self.root.clone()),
            (ANNOTATIONS_DIR, self.annotations_dir()),
            (IMAGES_DIR, self.images_root()),
        ];

        for (kind, path) in required {
            if !path.is_dir() {
                return Err(ConvertError::MissingFolder { kind, path });
            }
        }

        Ok(())
    }
}

/// Paths inside the generated YOLO dataset.
#[derive(Clone, Debug)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn split_dir(&self, split: Split) -> PathBuf {
        self.root.join(split.output_name())
    }

    pub fn images_dir(&self, split: Split) -> PathBuf {
        self.split_dir(split).join(IMAGES_DIR)
    }

    pub fn labels_dir(&self, split: Split) -> PathBuf {
        self.split_dir(split).join(LABELS_DIR)
    }

    pub fn data_yaml_path(&self) -> PathBuf {
        self.root.join(DATA_YAML)
    }

    /// Every directory the conversion writes into, parents first.
    pub fn directories(&self) -> Vec<PathBuf> {
        let mut dirs = vec![self.root.clone()];
        dirs.extend(Split::ALL.iter().map(|split| self.split_dir(*split)));
        dirs.extend(Split::ALL.iter().map(|split| self.images_dir(*split)));
        dirs.extend(Split::ALL.iter().map(|split| self.labels_dir(*split)));
        dirs
    }

    /// Create the output tree. Existing directories are left untouched.
    pub fn scaffold(&self) -> Result<(), ConvertError> {
        for dir in self.directories() {
            fs::create_dir_all(&dir)
                .map_err(|source| ConvertError::Scaffold { path: dir, source })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaffold_creates_all_split_directories() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let layout = OutputLayout::new(temp.path().join("out"));

        layout.scaffold().expect("scaffold output");

        for split in ["test", "train", "valid"] {
            assert!(temp.path().join("out").join(split).join("images").is_dir());
            assert!(temp.path().join("out").join(split).join("labels").is_dir());
        }
        assert_eq!(layout.directories().len(), 10);
    }

    #[test]
    fn scaffold_is_idempotent_and_keeps_existing_files() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let layout = OutputLayout::new(temp.path());
        layout.scaffold().expect("first scaffold");

        let stale = layout.labels_dir(Split::Train).join("stale.txt");
        fs::write(&stale, "0 0.5 \n").expect("write stale label");

        layout.scaffold().expect("second scaffold");
        assert!(stale.is_file());
    }

    #[test]
    fn scaffold_fails_when_root_is_a_file() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let blocker = temp.path().join("out");
        fs::write(&blocker, b"not a dir").expect("write blocker");

        let err = OutputLayout::new(&blocker).scaffold().unwrap_err();
        assert!(matches!(err, ConvertError::Scaffold { .. }));
    }

    #[test]
    fn check_reports_first_missing_folder() {
        let temp = tempfile::tempdir().expect("create temp dir");
        fs::create_dir_all(temp.path().join("annotations")).expect("create annotations");

        let err = DatasetLayout::new(temp.path()).check().unwrap_err();
        match err {
            ConvertError::MissingFolder { kind, path } => {
                assert_eq!(kind, "images");
                assert_eq!(path, temp.path().join("images"));
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = DatasetLayout::new(temp.path().join("nope")).check().unwrap_err();
        assert!(matches!(
            err,
            ConvertError::MissingFolder {
                kind: "dataset",
                ..
            }
        ));
    }

    #[test]
    fn input_paths_use_source_split_names() {
        let layout = DatasetLayout::new("/data");
        assert_eq!(
            layout.annotation_path(Split::Val),
            Path::new("/data/annotations/val.json")
        );
        assert_eq!(layout.images_dir(Split::Val), Path::new("/data/images/val"));
    }
}
