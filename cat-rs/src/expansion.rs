use crate::error::CatError;
use glob::glob;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory under the game root that holds official expansion content.
const EXPANSIONS_DIR: &str = "extensions";

/// Collects the catalog files directly inside `dir`, sorted by file name.
///
/// Signature catalogs (`*_sig.cat`) accompany every shipped catalog but
/// describe no packed content, so they are never returned.
pub(crate) fn catalog_files(dir: &Path) -> Result<Vec<PathBuf>, CatError> {
    let pattern = format!("{}/*.cat", dir.display());
    let paths = glob(&pattern)
        .map_err(|err| CatError::Other(format!("invalid catalog pattern {pattern}: {err}")))?;

    let mut files = Vec::new();
    for path in paths {
        let path = path.map_err(|err| CatError::Other(format!("{err}")))?;
        if is_signature_catalog(&path) {
            continue;
        }
        files.push(path);
    }
    files.sort();
    Ok(files)
}

fn is_signature_catalog(path: &Path) -> bool {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| stem.ends_with("_sig"))
}

/// Locates catalog files shipped by official expansions.
///
/// Expansions live in subdirectories of `extensions/` under the source
/// directory, each carrying its own numbered catalog/data pairs. The result
/// is ordered by expansion directory name and then by catalog name, and is
/// meant to be appended after the base catalogs so that expansion content
/// overrides base content for identical virtual paths.
///
/// This is best-effort enumeration: a missing `extensions/` directory and
/// subdirectories without catalogs are skipped silently.
pub fn discover_expansions<P: AsRef<Path>>(source_dir: P) -> Vec<PathBuf> {
    let root = source_dir.as_ref().join(EXPANSIONS_DIR);
    let entries = match fs::read_dir(&root) {
        Ok(entries) => entries,
        Err(_) => {
            log::warn!(
                "No expansions directory found under {}",
                source_dir.as_ref().display()
            );
            return Vec::new();
        }
    };

    let mut directories: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    directories.sort();

    let mut catalogs = Vec::new();
    for directory in directories {
        match catalog_files(&directory) {
            Ok(found) => catalogs.extend(found),
            Err(err) => log::debug!("ignoring expansion {}: {err}", directory.display()),
        }
    }
    catalogs
}
