//! YOLO segmentation label writer.
//!
//! Each item becomes `<labels_dir>/<item id>.txt` with one line per
//! annotation: the class id followed by every polygon coordinate divided by
//! its image axis, each coordinate trailed by a single space.
//!
//! Axis convention: the point at index `i` is divided by `size[1]` when `i`
//! is even and by `size[0]` when `i` is odd. This mirrors what the exporter
//! writes and is kept as-is even though `size` is documented as
//! `[height, width]`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;

use crate::datumaro::{AxisSizes, DatumaroDocument, Item};
use crate::error::{ConvertError, LabelError};
use crate::split::Split;

const LABEL_EXTENSION: &str = "txt";

/// Counts produced while writing one split's labels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LabelSummary {
    pub label_files: usize,
    pub annotations: usize,
}

/// Divide raw point values by their axis size.
pub fn normalize_points(points: &[f64], sizes: AxisSizes) -> Vec<f64> {
    points
        .iter()
        .enumerate()
        .map(|(index, value)| {
            if index % 2 == 0 {
                value / sizes.second
            } else {
                value / sizes.first
            }
        })
        .collect()
}

/// Render a coordinate as the shortest decimal that round-trips, always with
/// a fractional part (`1.0`, `0.1`, `0.3333333333333333`).
///
/// Values below `1e-4` or from `1e16` up use exponent notation with a signed,
/// two-digit minimum exponent (`1e-05`, `1.5e+16`).
pub fn format_coordinate(value: f64) -> String {
    let rendered = format!("{value:?}");
    match rendered.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => rendered,
    }
}

/// Build one label line without its line terminator.
pub fn format_label_line(label_id: i64, coords: &[f64]) -> String {
    let mut line = format!("{label_id} ");
    for coord in coords {
        line.push_str(&format_coordinate(*coord));
        line.push(' ');
    }
    line
}

/// Label file name for an item id. The id is used verbatim.
pub fn label_file_name(item_id: &str) -> String {
    format!("{item_id}.{LABEL_EXTENSION}")
}

/// Write the label file for a single item and return its annotation count.
///
/// The file is created (or truncated) even when the item has no annotations.
pub fn write_item_labels(labels_dir: &Path, item: &Item) -> Result<usize, LabelError> {
    let path = labels_dir.join(label_file_name(&item.id));
    let write_err = |source| LabelError::Write {
        path: path.clone(),
        source,
    };

    let file = File::create(&path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);

    let needs_sizes = item.annotations.iter().any(|ann| !ann.points.is_empty());
    let sizes = if needs_sizes {
        Some(item.axis_sizes()?)
    } else {
        None
    };

    for ann in &item.annotations {
        let coords = match sizes {
            Some(sizes) => normalize_points(&ann.points, sizes),
            None => Vec::new(),
        };
        writeln!(writer, "{}", format_label_line(ann.label_id, &coords)).map_err(write_err)?;
    }

    writer.flush().map_err(write_err)?;
    debug!(
        "wrote {} ({} annotation(s))",
        path.display(),
        item.annotation_count()
    );

    Ok(item.annotation_count())
}

/// Write label files for every item of a split document.
///
/// Stops at the first failure; files already written stay on disk.
pub fn write_split_labels(
    document: &DatumaroDocument,
    split: Split,
    labels_dir: &Path,
) -> Result<LabelSummary, ConvertError> {
    let label_err = |source| ConvertError::LabelGeneration { split, source };

    let mut summary = LabelSummary::default();
    for item in document.items().map_err(label_err)? {
        let item = item.map_err(label_err)?;
        summary.annotations += write_item_labels(labels_dir, &item).map_err(label_err)?;
        summary.label_files += 1;
    }

    Ok(summary)
}
