use crate::cat_entry::CatEntry;
use crate::cat_index::CatIndex;
use crate::cat_storage::{normalize_virtual_path, CatStorage, StorageOptions};
use crate::error::CatError;
use crate::extension_filter::ExtensionFilter;
use std::collections::hash_map::Entry as MapEntry;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// Outcome of an extraction run.
///
/// Per-entry failures do not abort a run; they are accumulated here and the
/// remaining entries are still extracted.
#[derive(Debug, Default)]
pub struct ExtractSummary {
    /// Number of entries extracted.
    pub extracted: usize,
    /// Number of entries skipped by the extension filter or allow-list.
    pub skipped: usize,
    /// Number of entries that failed.
    pub failed: usize,
    /// Total bytes written to the destination.
    pub bytes_extracted: u64,
    /// Detailed failures (virtual path and error message).
    pub failures: Vec<(String, String)>,
}

impl ExtractSummary {
    /// Returns true if no entry failed.
    pub fn is_ok(&self) -> bool {
        self.failed == 0
    }
}

/// Lazily opened read handles to the data files, one per catalog.
///
/// Handles are created on first access, shared across all entries owned by
/// the same catalog, and closed when the cache is dropped, including on
/// early error returns.
#[derive(Debug, Default)]
struct BlobCache {
    handles: HashMap<usize, File>,
}

impl BlobCache {
    fn reader(&mut self, index: &CatIndex) -> Result<&mut File, CatError> {
        let file = match self.handles.entry(index.order) {
            MapEntry::Occupied(slot) => slot.into_mut(),
            MapEntry::Vacant(slot) => slot.insert(File::open(&index.dat_path)?),
        };
        Ok(file)
    }
}

/// Copies resolved entries out of their data files.
///
/// Entries are selected by an [`ExtensionFilter`] and, optionally, an
/// explicit allow-list of virtual paths. Selected byte ranges are copied
/// verbatim; the format stores raw bytes, so there is nothing to decode.
#[derive(Debug)]
pub struct Extractor {
    filter: ExtensionFilter,
    files: Option<Vec<String>>,
}

impl Extractor {
    pub fn new(filter: ExtensionFilter) -> Self {
        Self {
            filter,
            files: None,
        }
    }

    /// Restricts extraction to the given virtual paths, compared ignoring
    /// case and separator style.
    pub fn files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let files = files
            .into_iter()
            .map(|file| normalize_virtual_path(file.as_ref()))
            .collect();
        self.files = Some(files);
        self
    }

    /// Extracts every selected entry of `storage` under `dest`.
    ///
    /// The destination path of an entry is the destination root joined with
    /// its virtual path; intermediate directories are created as needed and
    /// existing files are overwritten. A failed entry is recorded in the
    /// summary and extraction continues with the next one.
    pub fn run<P: AsRef<Path>>(
        &self,
        storage: &CatStorage,
        dest: P,
    ) -> Result<ExtractSummary, CatError> {
        let dest = dest.as_ref();
        let mut cache = BlobCache::default();
        let mut summary = ExtractSummary::default();

        for (index, entry) in storage.files() {
            if !self.selected(entry) {
                summary.skipped += 1;
                continue;
            }
            match extract_entry(&mut cache, index, entry, dest) {
                Ok(written) => {
                    log::debug!("extracted {} ({written} bytes)", entry.path);
                    summary.extracted += 1;
                    summary.bytes_extracted += written;
                }
                Err(err) => {
                    log::warn!("failed to extract {}: {err}", entry.path);
                    summary.failed += 1;
                    summary.failures.push((entry.path.clone(), err.to_string()));
                }
            }
        }

        log::info!(
            "extracted {} files ({} bytes), skipped {}, failed {}",
            summary.extracted,
            summary.bytes_extracted,
            summary.skipped,
            summary.failed
        );
        Ok(summary)
    }

    fn selected(&self, entry: &CatEntry) -> bool {
        if !self.filter.matches(&entry.path) {
            return false;
        }
        match &self.files {
            Some(files) => files
                .iter()
                .any(|file| *file == normalize_virtual_path(&entry.path)),
            None => true,
        }
    }
}

/// Copies one entry's byte range to its destination file.
fn extract_entry(
    cache: &mut BlobCache,
    index: &CatIndex,
    entry: &CatEntry,
    dest: &Path,
) -> Result<u64, CatError> {
    let destination = dest.join(relative_destination(&entry.path)?);
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).map_err(|err| {
            CatError::DestinationWrite(format!("{}: {err}", destination.display()))
        })?;
    }

    let blob = cache.reader(index)?;
    let end = entry
        .offset
        .checked_add(entry.size)
        .ok_or_else(|| CatError::TruncatedArchive(format!("{}: entry range overflows", entry.path)))?;
    let blob_len = blob.metadata()?.len();
    if end > blob_len {
        return Err(CatError::TruncatedArchive(format!(
            "{}: {} ends at byte {end} but {} is only {blob_len} bytes",
            entry.path,
            index.file_name(),
            index.dat_path.display()
        )));
    }

    blob.seek(SeekFrom::Start(entry.offset))?;
    let mut output = File::create(&destination).map_err(|err| {
        CatError::DestinationWrite(format!("{}: {err}", destination.display()))
    })?;
    let written = io::copy(&mut blob.take(entry.size), &mut output).map_err(|err| {
        CatError::DestinationWrite(format!("{}: {err}", destination.display()))
    })?;
    if written != entry.size {
        return Err(CatError::TruncatedArchive(format!(
            "{}: read {written} of {} bytes",
            entry.path, entry.size
        )));
    }
    Ok(written)
}

/// Maps a virtual path onto a relative destination path.
///
/// Empty and `.` components are dropped; `..` components are rejected so
/// that no entry can escape the destination root.
fn relative_destination(virtual_path: &str) -> Result<PathBuf, CatError> {
    let mut relative = PathBuf::new();
    for component in virtual_path.split(['/', '\\']) {
        match component {
            "" | "." => continue,
            ".." => {
                return Err(CatError::DestinationWrite(format!(
                    "refusing to extract outside the destination: {virtual_path}"
                )))
            }
            _ => relative.push(component),
        }
    }
    if relative.as_os_str().is_empty() {
        return Err(CatError::DestinationWrite(format!(
            "entry has no usable destination path: {virtual_path}"
        )));
    }
    Ok(relative)
}

/// Opens the archive pairs in `source_dir` and extracts every entry that
/// passes `filter` into `dest_dir`, returning the run summary.
///
/// This is the run entry point thin collaborators such as the command line
/// front end build upon.
pub fn extract<P: AsRef<Path>, Q: AsRef<Path>>(
    source_dir: P,
    dest_dir: Q,
    filter: ExtensionFilter,
    options: &StorageOptions,
) -> Result<ExtractSummary, CatError> {
    let storage = CatStorage::open(source_dir, options)?;
    Extractor::new(filter).run(&storage, dest_dir)
}
