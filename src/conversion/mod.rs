//! Datumaro to YOLO conversion driver.
//!
//! A conversion runs six stages in order and stops at the first failure:
//!
//! 1. scaffold the output tree
//! 2. check the input folders
//! 3. load the `test`, `train` and `val` documents
//! 4. copy each split's images
//! 5. write each split's label files
//! 6. emit `data.yaml`
//!
//! Nothing written before a failure is rolled back, and the output tree is
//! never cleared, so stale files from earlier runs may remain.

pub mod report;

pub use report::{ConversionReport, SplitReport};

use std::path::{Path, PathBuf};

use log::info;

use crate::data_yaml::DataYaml;
use crate::datumaro::{read_datumaro_json, DatumaroDocument};
use crate::error::ConvertError;
use crate::images::copy_split_images;
use crate::labels::write_split_labels;
use crate::layout::{DatasetLayout, OutputLayout};
use crate::split::Split;

/// Default dataset location used by the CLI.
pub const DEFAULT_DATASET_DIR: &str = "./temp/Data";
/// Default output location used by the CLI.
pub const DEFAULT_OUTPUT_DIR: &str = "./temp/output";

/// The three loaded split documents.
#[derive(Clone, Debug)]
pub struct SplitDocuments {
    pub test: DatumaroDocument,
    pub train: DatumaroDocument,
    pub val: DatumaroDocument,
}

impl SplitDocuments {
    /// Load all three documents in processing order.
    pub fn load(layout: &DatasetLayout) -> Result<Self, ConvertError> {
        let load = |split| {
            let path = layout.annotation_path(split);
            info!("Loading {} annotations from {}", split, path.display());
            read_datumaro_json(&path, split)
        };

        Ok(Self {
            test: load(Split::Test)?,
            train: load(Split::Train)?,
            val: load(Split::Val)?,
        })
    }

    pub fn get(&self, split: Split) -> &DatumaroDocument {
        match split {
            Split::Test => &self.test,
            Split::Train => &self.train,
            Split::Val => &self.val,
        }
    }
}

/// Convert the dataset at `dataset` into a YOLO tree at `output`.
///
/// Returns the dataset path on success.
pub fn convert(dataset: &Path, output: &Path) -> Result<PathBuf, ConvertError> {
    convert_with_report(dataset, output).map(|report| report.dataset)
}

/// Convert the dataset and report what was written.
pub fn convert_with_report(
    dataset: &Path,
    output: &Path,
) -> Result<ConversionReport, ConvertError> {
    let input = DatasetLayout::new(dataset);
    let out = OutputLayout::new(output);
    let mut report = ConversionReport::new(dataset, output);

    info!("Creating output tree at {}", out.root().display());
    out.scaffold()?;

    input.check()?;

    let documents = SplitDocuments::load(&input)?;

    for split in Split::ALL {
        let copied = copy_split_images(&input.images_dir(split), &out.images_dir(split), split)?;
        info!("Copied {} {} image(s)", copied, split);
        report.split_mut(split).images_copied = copied;
    }

    for split in Split::ALL {
        let summary = write_split_labels(documents.get(split), split, &out.labels_dir(split))?;
        info!(
            "Wrote {} {} label file(s) with {} annotation(s)",
            summary.label_files, split, summary.annotations
        );
        let entry = report.split_mut(split);
        entry.label_files = summary.label_files;
        entry.annotations = summary.annotations;
    }

    let data_yaml_path = out.data_yaml_path();
    let config_err = |source| ConvertError::ConfigEmission {
        path: data_yaml_path.clone(),
        source,
    };
    let classes = documents.train.class_names().map_err(config_err)?;
    let data = DataYaml::from_current_dir(&out, classes).map_err(config_err)?;
    data.write(&data_yaml_path).map_err(config_err)?;
    info!(
        "Wrote {} with {} class(es)",
        data_yaml_path.display(),
        data.nc
    );

    report.classes = data.names;
    report.data_yaml = data_yaml_path;
    Ok(report)
}
