/// A single packed file recorded by a catalog.
///
/// The offset is not stored in the catalog; it is the running sum of the
/// sizes of all preceding entries in the same catalog.
#[derive(Debug, Clone)]
pub struct CatEntry {
    /// The virtual path of the file, as recorded in the catalog.
    pub path: String,
    /// The size of the file in bytes.
    pub size: u64,
    /// The byte position of the file within the paired data file.
    pub offset: u64,
    /// The modification timestamp token, carried verbatim.
    pub timestamp: String,
    /// The content hash token, carried verbatim and never verified.
    pub hash: String,
}

impl CatEntry {
    /// Returns the final component of the virtual path.
    pub fn file_name(&self) -> &str {
        self.path
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&self.path)
    }
}
