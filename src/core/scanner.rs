//! Walks a directory tree and renders the included text files.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use super::filter::{relative_path, ExclusionReason, Filter};
use super::tree_generator::TreeGenerator;
use super::{CoreError, FileRecord, ScanSummary};
use crate::utils::file_detection::{is_text_content, is_text_file, SNIFF_LEN};

/// Opens and closes every file block, and terminates the output.
pub const SEPARATOR: &str = "--------------------";

const CONTENT_INDENT: &[u8] = b"    ";

/// Included and excluded entries of a dry run, each sorted by relative path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DryRunListing {
    pub included: Vec<FileRecord>,
    pub excluded: Vec<FileRecord>,
}

/// Walks one directory tree with a fixed [`Filter`].
pub struct Scanner {
    filter: Filter,
}

impl Scanner {
    pub fn new(filter: Filter) -> Self {
        Self { filter }
    }

    /// Writes every included text file under `directory` to `writer`.
    ///
    /// The closing separator is written even when the walk fails; whatever was
    /// written before the failure stays written.
    pub fn scan<W: Write>(&self, directory: &Path, writer: &mut W) -> Result<ScanSummary, CoreError> {
        let root = resolve_root(directory)?;
        let mut summary = ScanSummary::default();

        let walked = self.walk(&root, |entry, reason| {
            if reason.is_some() {
                summary.entries_excluded += 1;
                return Ok(());
            }
            if entry.file_type().is_dir() || !is_regular_file(entry) {
                return Ok(());
            }

            if self.render_file(entry.path(), &root, writer)? {
                summary.files_emitted += 1;
            } else {
                summary.binary_skipped += 1;
            }
            Ok(())
        });

        let terminated = writeln!(writer, "{SEPARATOR}").map_err(CoreError::Output);
        walked?;
        terminated?;

        tracing::info!(
            "Rendered {} files from {} ({} binary skipped, {} excluded)",
            summary.files_emitted,
            root.display(),
            summary.binary_skipped,
            summary.entries_excluded
        );
        Ok(summary)
    }

    /// Writes a report of what [`scan`](Self::scan) would include and exclude.
    ///
    /// Nothing is written if the walk fails.
    pub fn dry_run<W: Write>(&self, directory: &Path, writer: &mut W) -> Result<DryRunListing, CoreError> {
        let listing = self.collect(directory)?;
        write_dry_run_report(directory, &listing, writer).map_err(CoreError::Output)?;
        Ok(listing)
    }

    /// Walks `directory` and buffers every visited entry as included or excluded.
    pub fn collect(&self, directory: &Path) -> Result<DryRunListing, CoreError> {
        let root = resolve_root(directory)?;
        let mut listing = DryRunListing::default();

        self.walk(&root, |entry, reason| {
            let is_dir = entry.file_type().is_dir();
            let excluded = reason.is_some();
            // Only regular files are opened; a FIFO would block the walk.
            let is_text =
                !excluded && !is_dir && is_regular_file(entry) && sniff_or_binary(entry.path());

            let record = FileRecord {
                path: entry.path().to_path_buf(),
                rel_path: relative_path(entry.path(), &root),
                is_dir,
                is_text,
                excluded,
                reason,
            };

            if excluded {
                listing.excluded.push(record);
            } else {
                listing.included.push(record);
            }
            Ok(())
        })?;

        listing.included.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
        listing.excluded.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
        Ok(listing)
    }

    /// Depth-first walk in file name order. `visit` sees every entry the walk
    /// reaches; excluded directories are reported once and never descended.
    fn walk<F>(&self, root: &Path, mut visit: F) -> Result<(), CoreError>
    where
        F: FnMut(&DirEntry, Option<ExclusionReason>) -> Result<(), CoreError>,
    {
        let mut entries = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();

        while let Some(entry) = entries.next() {
            let entry = entry?;
            let is_dir = entry.file_type().is_dir();
            let reason = self.filter.classify(entry.path(), root, is_dir);

            if let Some(reason) = &reason {
                tracing::debug!(
                    "Excluding {} [{}: {}]",
                    entry.path().display(),
                    reason.category,
                    reason.pattern
                );
            }

            let prune = is_dir && reason.is_some();
            visit(&entry, reason)?;
            if prune {
                entries.skip_current_dir();
            }
        }
        Ok(())
    }

    /// Emits one file block. Returns `false` without writing if the file is binary.
    fn render_file<W: Write>(&self, path: &Path, root: &Path, writer: &mut W) -> Result<bool, CoreError> {
        let mut file = File::open(path).map_err(|e| CoreError::io(e, path))?;

        let mut prefix = Vec::with_capacity(SNIFF_LEN);
        (&mut file)
            .take(SNIFF_LEN as u64)
            .read_to_end(&mut prefix)
            .map_err(|e| CoreError::io(e, path))?;

        if !is_text_content(&prefix) {
            tracing::debug!("Skipping binary file {}", path.display());
            return Ok(false);
        }

        let rel_path = relative_path(path, root);
        writeln!(writer, "{SEPARATOR}").map_err(CoreError::Output)?;
        writeln!(writer, "file: {rel_path}").map_err(CoreError::Output)?;
        writeln!(writer, "{SEPARATOR}").map_err(CoreError::Output)?;

        let mut reader = BufReader::new(prefix.as_slice().chain(file));
        let mut line = Vec::new();
        loop {
            line.clear();
            let read = reader
                .read_until(b'\n', &mut line)
                .map_err(|e| CoreError::io(e, path))?;
            if read == 0 {
                break;
            }
            write_content_line(writer, trim_line_ending(&line)).map_err(CoreError::Output)?;
        }

        Ok(true)
    }
}

/// Checks the target exists and returns its absolute, resolved form.
fn resolve_root(directory: &Path) -> Result<PathBuf, CoreError> {
    match fs::metadata(directory) {
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(CoreError::DirectoryNotFound(directory.to_path_buf()));
        }
        Err(e) => return Err(CoreError::io(e, directory)),
    }
    fs::canonicalize(directory).map_err(|e| CoreError::io(e, directory))
}

/// Regular files, and symlinks that resolve to one.
fn is_regular_file(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    if file_type.is_file() {
        return true;
    }
    let resolved = file_type.is_symlink()
        && fs::metadata(entry.path()).is_ok_and(|m| m.is_file());
    if !resolved {
        tracing::debug!("Skipping non-regular entry {}", entry.path().display());
    }
    resolved
}

fn sniff_or_binary(path: &Path) -> bool {
    is_text_file(path).unwrap_or_else(|e| {
        tracing::debug!("Could not sniff {}: {}", path.display(), e);
        false
    })
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

fn write_content_line<W: Write>(writer: &mut W, line: &[u8]) -> io::Result<()> {
    writer.write_all(CONTENT_INDENT)?;
    writer.write_all(line)?;
    writer.write_all(b"\n")
}

fn write_dry_run_report<W: Write>(
    directory: &Path,
    listing: &DryRunListing,
    writer: &mut W,
) -> io::Result<()> {
    writeln!(writer, "Dry run for directory: {}\n", directory.display())?;

    writeln!(writer, "Files that would be processed:")?;
    write_section(&listing.included, false, writer)?;

    writeln!(writer, "\nFiles that would be excluded:")?;
    write_section(&listing.excluded, true, writer)
}

fn write_section<W: Write>(records: &[FileRecord], show_reasons: bool, writer: &mut W) -> io::Result<()> {
    let tree = TreeGenerator::build(records);
    if tree.children.is_empty() {
        return writeln!(writer, "  (none)");
    }
    TreeGenerator::write_tree(&tree, show_reasons, writer)
}
