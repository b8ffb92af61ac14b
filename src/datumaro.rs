//! Datumaro JSON document reader.
//!
//! A Datumaro export stores one document per split. Only a small part of the
//! schema is used here:
//!
//! ```json
//! {
//!   "categories": { "label": { "labels": [ { "name": "cat" } ] } },
//!   "items": [
//!     {
//!       "id": "img1",
//!       "image": { "size": [100, 200] },
//!       "annotations": [ { "label_id": 0, "points": [20, 50] } ]
//!     }
//!   ]
//! }
//! ```
//!
//! Documents are parsed into a [`serde_json::Value`] up front and items are
//! decoded one at a time when labels are generated. A malformed item is
//! therefore a label-generation failure, not a load failure, and items that
//! precede it have already been written. An item is decoded in full before
//! its label file is created, so a malformed item leaves no file behind
//! rather than a truncated one.
//!
//! `annotations` is required on every item. `image.size` is only read once an
//! item has points to normalize.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{ConfigError, ConvertError, LabelError};
use crate::split::Split;

const CLASS_LIST_POINTER: &str = "/categories/label/labels";

/// A loaded split document.
#[derive(Clone, Debug)]
pub struct DatumaroDocument {
    root: Value,
}

/// One annotated image record.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Item {
    pub id: String,

    #[serde(default)]
    pub image: Option<ItemImage>,

    pub annotations: Vec<Annotation>,
}

/// Image metadata attached to an item.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ItemImage {
    /// `[height, width]` as written by the exporter. Only required once the
    /// item has points to normalize.
    #[serde(default)]
    pub size: Option<Vec<f64>>,
}

/// A labeled polygon.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Annotation {
    pub label_id: i64,

    /// Flat coordinate list, alternating between the two image axes.
    pub points: Vec<f64>,
}

/// A class entry from `categories.label.labels`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Category {
    pub name: String,
}

/// Image axis sizes used to normalize point coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisSizes {
    /// `size[0]`; divides odd-indexed points.
    pub first: f64,
    /// `size[1]`; divides even-indexed points.
    pub second: f64,
}

impl Item {
    /// Resolve the image size for normalization.
    ///
    /// Zero dimensions are rejected rather than producing infinities.
    pub fn axis_sizes(&self) -> Result<AxisSizes, LabelError> {
        let size = self
            .image
            .as_ref()
            .and_then(|image| image.size.as_deref())
            .ok_or_else(|| LabelError::MissingSize {
                id: self.id.clone(),
            })?;

        if size.len() < 2 {
            return Err(LabelError::InvalidSize {
                id: self.id.clone(),
                len: size.len(),
            });
        }

        let sizes = AxisSizes {
            first: size[0],
            second: size[1],
        };
        if sizes.first == 0.0 || sizes.second == 0.0 {
            return Err(LabelError::ZeroDimension {
                id: self.id.clone(),
            });
        }

        Ok(sizes)
    }

    /// Total number of annotations attached to this item.
    pub fn annotation_count(&self) -> usize {
        self.annotations.len()
    }
}

impl DatumaroDocument {
    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// Number of entries in `items`, or zero when the array is absent.
    pub fn item_count(&self) -> usize {
        self.root
            .get("items")
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }

    /// Decode items lazily, in document order.
    pub fn items(
        &self,
    ) -> Result<impl Iterator<Item = Result<Item, LabelError>> + '_, LabelError> {
        let items = self
            .root
            .get("items")
            .and_then(Value::as_array)
            .ok_or(LabelError::MissingItems)?;

        Ok(items.iter().enumerate().map(|(index, value)| {
            Item::deserialize(value).map_err(|source| LabelError::MalformedItem { index, source })
        }))
    }

    /// Ordered class names from `categories.label.labels`.
    pub fn class_names(&self) -> Result<Vec<String>, ConfigError> {
        let labels = self
            .root
            .pointer(CLASS_LIST_POINTER)
            .ok_or(ConfigError::MissingClassList)?;

        let categories = Vec::<Category>::deserialize(labels).map_err(ConfigError::ClassList)?;
        Ok(categories.into_iter().map(|category| category.name).collect())
    }
}

/// Reads the annotation document for `split` from `path`.
///
/// # Errors
/// Returns [`ConvertError::AnnotationRead`] when the file cannot be opened and
/// [`ConvertError::AnnotationParse`] when it is not valid JSON.
pub fn read_datumaro_json(path: &Path, split: Split) -> Result<DatumaroDocument, ConvertError> {
    let file = File::open(path).map_err(|source| ConvertError::AnnotationRead {
        split,
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let root = serde_json::from_reader(reader).map_err(|source| ConvertError::AnnotationParse {
        split,
        path: path.to_path_buf(),
        source,
    })?;

    Ok(DatumaroDocument::from_value(root))
}

/// Reads a document from a JSON string.
///
/// Useful for testing without file I/O.
pub fn from_datumaro_str(json: &str) -> Result<DatumaroDocument, serde_json::Error> {
    serde_json::from_str(json).map(DatumaroDocument::from_value)
}

/// Reads a document from a byte slice.
pub fn from_datumaro_slice(bytes: &[u8]) -> Result<DatumaroDocument, serde_json::Error> {
    serde_json::from_slice(bytes).map(DatumaroDocument::from_value)
}

/// Fuzz-only entrypoint: parse a document and decode every item.
#[cfg(feature = "fuzzing")]
pub fn fuzz_decode_document(bytes: &[u8]) -> Result<(), serde_json::Error> {
    let document = from_datumaro_slice(bytes)?;
    if let Ok(items) = document.items() {
        for item in items.flatten() {
            let _ = item.axis_sizes();
        }
    }
    let _ = document.class_names();
    Ok(())
}
