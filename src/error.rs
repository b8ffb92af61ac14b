use std::path::PathBuf;
use thiserror::Error;

use crate::split::Split;

/// Conversion stage a [`ConvertError`] originated from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Scaffold,
    InputCheck,
    AnnotationLoad,
    ImageCopy,
    LabelGeneration,
    ConfigEmission,
    Cli,
}

/// The main error type for datumaro2yolo operations.
///
/// Every variant names the stage that failed and keeps the underlying cause
/// available through [`std::error::Error::source`].
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Failed to create output directory {path}: {source}")]
    Scaffold {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Missing {kind} folder: {path}")]
    MissingFolder { kind: &'static str, path: PathBuf },

    #[error("Annotation file for split '{split}' is missing or unreadable ({path}): {source}")]
    AnnotationRead {
        split: Split,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Annotation file for split '{split}' is missing or unreadable ({path}): {source}")]
    AnnotationParse {
        split: Split,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Error copying the {split} images from {path}: {source}")]
    ImageCopy {
        split: Split,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error creating the labels for the {split} images: {source}")]
    LabelGeneration {
        split: Split,
        #[source]
        source: LabelError,
    },

    #[error("Error creating {path}: {source}")]
    ConfigEmission {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },

    #[error("Unsupported report format: {0}")]
    UnsupportedReportFormat(String),

    #[error("Failed to render conversion report: {0}")]
    ReportRender(#[source] serde_json::Error),
}

impl ConvertError {
    /// The stage this error aborted.
    pub fn stage(&self) -> Stage {
        match self {
            ConvertError::Scaffold { .. } => Stage::Scaffold,
            ConvertError::MissingFolder { .. } => Stage::InputCheck,
            ConvertError::AnnotationRead { .. } | ConvertError::AnnotationParse { .. } => {
                Stage::AnnotationLoad
            }
            ConvertError::ImageCopy { .. } => Stage::ImageCopy,
            ConvertError::LabelGeneration { .. } => Stage::LabelGeneration,
            ConvertError::ConfigEmission { .. } => Stage::ConfigEmission,
            ConvertError::UnsupportedReportFormat(_) | ConvertError::ReportRender(_) => {
                Stage::Cli
            }
        }
    }

    /// The split the failing stage was working on, if any.
    pub fn split(&self) -> Option<Split> {
        match self {
            ConvertError::AnnotationRead { split, .. }
            | ConvertError::AnnotationParse { split, .. }
            | ConvertError::ImageCopy { split, .. }
            | ConvertError::LabelGeneration { split, .. } => Some(*split),
            _ => None,
        }
    }
}

/// Failures while turning a split document into label files.
#[derive(Debug, Error)]
pub enum LabelError {
    #[error("document has no 'items' array")]
    MissingItems,

    #[error("item {index} is malformed: {source}")]
    MalformedItem {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("item '{id}' has annotations but no image size")]
    MissingSize { id: String },

    #[error("item '{id}' has an image size with {len} value(s); expected [height, width]")]
    InvalidSize { id: String, len: usize },

    #[error("item '{id}' has a zero image dimension")]
    ZeroDimension { id: String },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failures while building or writing `data.yaml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("train document has no 'categories.label.labels' list")]
    MissingClassList,

    #[error("invalid class list in train document: {0}")]
    ClassList(#[source] serde_json::Error),

    #[error("cannot resolve current directory: {0}")]
    CurrentDir(#[source] std::io::Error),

    #[error("failed to serialize data.yaml: {0}")]
    Serialize(#[source] serde_yaml::Error),

    #[error("failed to write data.yaml: {0}")]
    Write(#[source] std::io::Error),
}
