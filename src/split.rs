//! Dataset splits and their on-disk names.

use serde::Serialize;
use std::fmt;

/// One of the three partitions a Datumaro export is organized into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Test,
    Train,
    Val,
}

impl Split {
    /// All splits, in processing order.
    pub const ALL: [Split; 3] = [Split::Test, Split::Train, Split::Val];

    /// Directory and document stem used by the Datumaro input.
    pub fn source_name(&self) -> &'static str {
        match self {
            Split::Test => "test",
            Split::Train => "train",
            Split::Val => "val",
        }
    }

    /// Directory name used in the YOLO output tree.
    ///
    /// Ultralytics expects `valid/`, not `val/`.
    pub fn output_name(&self) -> &'static str {
        match self {
            Split::Test => "test",
            Split::Train => "train",
            Split::Val => "valid",
        }
    }

    /// File name of this split's annotation document.
    pub fn annotation_file(&self) -> String {
        format!("{}.json", self.source_name())
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.source_name())
    }
}
