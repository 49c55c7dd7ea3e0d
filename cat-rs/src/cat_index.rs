use crate::cat_entry::CatEntry;
use crate::error::CatError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Represents one parsed catalog file and its paired data file.
///
/// A catalog is a plain text file with one packed entry per line:
///
/// ```text
/// <path> <size> <timestamp> <hash>
/// ```
///
/// Fields are space separated. The path itself may contain spaces, so the
/// rightmost three tokens of a line are taken as size, timestamp and hash,
/// and everything before them is the path. Entry offsets are derived while
/// parsing as the running sum of the preceding sizes.
#[derive(Debug)]
pub struct CatIndex {
    /// Position of this catalog in the load sequence. Later catalogs
    /// override earlier ones for identical virtual paths.
    pub order: usize,
    /// Path to the catalog file.
    pub cat_path: PathBuf,
    /// Path to the paired data file (the catalog path with a `dat` extension).
    pub dat_path: PathBuf,
    /// The entries listed by this catalog, in storage order.
    pub entries: Vec<CatEntry>,
}

impl CatIndex {
    /// Loads and parses a catalog file.
    ///
    /// Fails with [`CatError::MissingDataFile`] if the paired `.dat` file does
    /// not exist, and with [`CatError::MalformedCatalog`] if any line has fewer
    /// than four fields or a size that is not a non-negative integer.
    pub fn load<P: AsRef<Path>>(cat_path: P, order: usize) -> Result<Self, CatError> {
        let cat_path = cat_path.as_ref().to_path_buf();
        let dat_path = cat_path.with_extension("dat");

        if !dat_path.is_file() {
            return Err(CatError::MissingDataFile(format!(
                "{} has no paired data file {}",
                cat_path.display(),
                dat_path.display()
            )));
        }

        let file = File::open(&cat_path)?;
        let reader = BufReader::new(file);

        let mut entries = Vec::new();
        let mut offset = 0u64;
        for (line_number, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let entry = parse_line(line, offset).map_err(|reason| {
                CatError::MalformedCatalog(format!(
                    "{}:{}: {reason}",
                    cat_path.display(),
                    line_number + 1
                ))
            })?;
            offset += entry.size;
            entries.push(entry);
        }

        Ok(CatIndex {
            order,
            cat_path,
            dat_path,
            entries,
        })
    }

    /// Returns the file name of the catalog, e.g. `01.cat`.
    pub fn file_name(&self) -> &str {
        self.cat_path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("")
    }

    /// Returns the sum of all entry sizes, which equals the expected byte
    /// length of the paired data file.
    pub fn total_size(&self) -> u64 {
        self.entries.iter().map(|entry| entry.size).sum()
    }
}

/// Parses a single catalog line into an entry at the given offset.
fn parse_line(line: &str, offset: u64) -> Result<CatEntry, String> {
    // rsplitn yields the rightmost tokens first
    let mut tokens = line.rsplitn(4, ' ');
    let hash = tokens.next().ok_or("expected at least four fields")?;
    let timestamp = tokens.next().ok_or("expected at least four fields")?;
    let size_token = tokens.next().ok_or("expected at least four fields")?;
    let path = match tokens.next() {
        Some(path) if !path.trim().is_empty() => path.trim(),
        _ => return Err("expected at least four fields".to_string()),
    };

    let size = size_token
        .parse::<u64>()
        .map_err(|_| format!("invalid size field '{size_token}'"))?;

    Ok(CatEntry {
        path: path.to_string(),
        size,
        offset,
        timestamp: timestamp.to_string(),
        hash: hash.to_string(),
    })
}
