use crate::cat_entry::CatEntry;
use crate::cat_index::CatIndex;
use crate::error::CatError;
use crate::expansion::{catalog_files, discover_expansions};
use std::collections::HashMap;
use std::path::Path;

/// Options controlling which catalogs a [`CatStorage`] loads.
#[derive(Debug, Clone, Default)]
pub struct StorageOptions {
    /// Catalog file names to load, e.g. `["01.cat"]`. When empty, every
    /// discovered catalog is loaded.
    pub include: Vec<String>,
    /// Whether to append catalogs found under `extensions/` after the base
    /// set, so expansion content overrides base content.
    pub expansions: bool,
}

/// Represents an opened set of cat/dat archive pairs, providing access to
/// the resolved file namespace.
///
/// `CatStorage` is the main entry point for interacting with Egosoft's
/// cat/dat archives. Opening a storage discovers the catalog files in a
/// source directory, parses each of them, and folds their entries into a
/// single virtual path namespace.
///
/// Catalogs are loaded in ascending file name order, with expansion catalogs
/// appended last. When two catalogs record the same virtual path, the entry
/// from the later catalog wins; this models how the game layers patches and
/// DLC content over the base archives. Path comparison is case-insensitive
/// and treats `\` and `/` alike, matching the game's target platform.
///
/// ```rust,no_run
/// use cat_rs::cat_storage::{CatStorage, StorageOptions};
///
/// let storage = CatStorage::open("path/to/X4 Foundations", &StorageOptions::default()).unwrap();
/// for (_, entry) in storage.files() {
///     println!("{} ({} bytes)", entry.path, entry.size);
/// }
/// ```
///
/// A catalog whose paired `.dat` file is missing, or whose content cannot be
/// parsed, is skipped with a warning; the remaining catalogs still load.
#[derive(Debug)]
pub struct CatStorage {
    /// The loaded catalogs, in ascending override order.
    indices: Vec<CatIndex>,
    /// Resolved namespace: normalized virtual path to (catalog, entry) positions.
    resolved: HashMap<String, (usize, usize)>,
}

impl CatStorage {
    /// Discovers and loads the archive pairs in `source_dir`.
    ///
    /// Fails with [`CatError::FileNotFound`] if the source directory does not
    /// exist or contains no catalog files at all.
    pub fn open<P: AsRef<Path>>(source_dir: P, options: &StorageOptions) -> Result<Self, CatError> {
        let source_dir = source_dir.as_ref();
        if !source_dir.is_dir() {
            return Err(CatError::FileNotFound(format!(
                "source directory {} does not exist",
                source_dir.display()
            )));
        }

        let mut catalogs = catalog_files(source_dir)?;
        if catalogs.is_empty() {
            return Err(CatError::FileNotFound(format!(
                "no catalog files found in {}",
                source_dir.display()
            )));
        }
        if options.expansions {
            catalogs.extend(discover_expansions(source_dir));
        }
        if !options.include.is_empty() {
            catalogs.retain(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| options.include.iter().any(|include| include == name))
            });
        }

        let mut indices = Vec::new();
        for (order, cat_path) in catalogs.into_iter().enumerate() {
            match CatIndex::load(&cat_path, order) {
                Ok(index) => {
                    log::debug!(
                        "loaded {} with {} entries",
                        index.file_name(),
                        index.entries.len()
                    );
                    indices.push(index);
                }
                Err(err @ (CatError::MissingDataFile(_) | CatError::MalformedCatalog(_))) => {
                    log::warn!("skipping catalog {}: {err}", cat_path.display());
                }
                Err(err) => return Err(err),
            }
        }

        let mut resolved = HashMap::new();
        for (position, index) in indices.iter().enumerate() {
            for (slot, entry) in index.entries.iter().enumerate() {
                resolved.insert(normalize_virtual_path(&entry.path), (position, slot));
            }
        }

        Ok(CatStorage { indices, resolved })
    }

    /// The loaded catalogs, in ascending override order.
    pub fn indices(&self) -> &[CatIndex] {
        &self.indices
    }

    /// Number of distinct virtual paths in the resolved namespace.
    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    /// Returns true when the storage resolved no files.
    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }

    /// Looks up a virtual path, ignoring case and separator style.
    ///
    /// Returns the winning entry together with the catalog that owns it.
    pub fn entry(&self, path: &str) -> Option<(&CatIndex, &CatEntry)> {
        let (position, slot) = self.resolved.get(&normalize_virtual_path(path))?;
        let index = self.indices.get(*position)?;
        let entry = index.entries.get(*slot)?;
        Some((index, entry))
    }

    /// Iterates over the resolved namespace in deterministic order: by
    /// catalog override order, then by the entry's position in its catalog.
    ///
    /// Entries shadowed by a later catalog are not yielded.
    pub fn files(&self) -> impl Iterator<Item = (&CatIndex, &CatEntry)> + '_ {
        self.indices
            .iter()
            .enumerate()
            .flat_map(move |(position, index)| {
                index
                    .entries
                    .iter()
                    .enumerate()
                    .filter_map(move |(slot, entry)| {
                        let winner = self.resolved.get(&normalize_virtual_path(&entry.path));
                        (winner == Some(&(position, slot))).then_some((index, entry))
                    })
            })
    }
}

/// Normalizes a virtual path for namespace comparison.
///
/// The game's target platform is case-insensitive and accepts both
/// separator styles, so the resolved namespace folds ASCII case and
/// canonicalizes `\` to `/`. Destination paths keep the recorded spelling.
pub(crate) fn normalize_virtual_path(path: &str) -> String {
    path.replace('\\', "/").to_ascii_lowercase()
}
