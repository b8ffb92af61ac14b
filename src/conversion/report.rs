//! Conversion report: what a finished run produced.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::split::Split;

/// Summary of a successful conversion.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ConversionReport {
    /// Dataset root that was converted.
    pub dataset: PathBuf,
    /// Output root that was written.
    pub output: PathBuf,
    /// Location of the emitted `data.yaml`.
    pub data_yaml: PathBuf,
    /// Class names, in class-index order.
    pub classes: Vec<String>,
    /// Per-split counts, in processing order.
    pub splits: Vec<SplitReport>,
}

/// Counts for one split.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SplitReport {
    pub split: Split,
    pub images_copied: usize,
    pub label_files: usize,
    pub annotations: usize,
}

impl SplitReport {
    pub fn new(split: Split) -> Self {
        Self {
            split,
            images_copied: 0,
            label_files: 0,
            annotations: 0,
        }
    }
}

impl ConversionReport {
    pub fn new(dataset: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            dataset: dataset.into(),
            output: output.into(),
            splits: Split::ALL.iter().map(|split| SplitReport::new(*split)).collect(),
            ..Default::default()
        }
    }

    /// Mutable access to a split's counts.
    pub fn split_mut(&mut self, split: Split) -> &mut SplitReport {
        let index = match self.splits.iter().position(|s| s.split == split) {
            Some(index) => index,
            None => {
                self.splits.push(SplitReport::new(split));
                self.splits.len() - 1
            }
        };
        &mut self.splits[index]
    }

    pub fn split(&self, split: Split) -> Option<&SplitReport> {
        self.splits.iter().find(|s| s.split == split)
    }

    pub fn total_images(&self) -> usize {
        self.splits.iter().map(|s| s.images_copied).sum()
    }

    pub fn total_label_files(&self) -> usize {
        self.splits.iter().map(|s| s.label_files).sum()
    }

    pub fn total_annotations(&self) -> usize {
        self.splits.iter().map(|s| s.annotations).sum()
    }
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Converted {} -> {}",
            self.dataset.display(),
            self.output.display()
        )?;

        for split in &self.splits {
            writeln!(
                f,
                "  {:<6} {} image(s), {} label file(s), {} annotation(s)",
                format!("{}:", split.split.output_name()),
                split.images_copied,
                split.label_files,
                split.annotations
            )?;
        }

        writeln!(
            f,
            "  {} class(es): {}",
            self.classes.len(),
            self.classes.join(", ")
        )?;
        write!(f, "  config: {}", self.data_yaml.display())
    }
}
