pub mod catalog;
pub mod error;
pub mod filter;
pub mod pattern;
pub mod scanner;
pub mod tree_generator;

use std::path::PathBuf;

use filter::ExclusionReason;

/// One visited entry, as buffered by a dry run.
#[derive(Debug, Clone, PartialEq)]
pub struct FileRecord {
    pub path: PathBuf,
    /// `/`-separated path relative to the scan root; `"."` for the root itself.
    pub rel_path: String,
    pub is_dir: bool,
    /// Only meaningful for included files; directories are never sniffed.
    pub is_text: bool,
    pub excluded: bool,
    pub reason: Option<ExclusionReason>,
}

/// Counters reported by a render pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub files_emitted: usize,
    pub binary_skipped: usize,
    pub entries_excluded: usize,
}

pub use catalog::ExclusionCategory;
pub use error::CoreError;
pub use filter::Filter;
pub use scanner::{DryRunListing, Scanner, SEPARATOR};
pub use tree_generator::{TreeGenerator, TreeNode};
