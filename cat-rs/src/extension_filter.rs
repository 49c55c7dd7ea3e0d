use std::collections::HashSet;

/// A case-insensitive file extension predicate.
///
/// Extensions are configured without a leading dot. A path matches when the
/// substring after the last `.` in its final component equals one of the
/// configured extensions, ignoring ASCII case. Paths without a `.` never
/// match; extension-less files are always excluded.
#[derive(Debug, Clone)]
pub struct ExtensionFilter {
    extensions: HashSet<String>,
}

impl ExtensionFilter {
    /// Builds a filter from an iterator of extensions.
    ///
    /// Leading dots and surrounding whitespace are stripped, and empty
    /// items are discarded, so both `xml` and `.xml` are accepted.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .map(|ext| {
                ext.as_ref()
                    .trim()
                    .trim_start_matches('.')
                    .to_ascii_lowercase()
            })
            .filter(|ext| !ext.is_empty())
            .collect();
        Self { extensions }
    }

    /// Returns true when no extensions are configured.
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Returns true if the path's extension is in the configured set.
    pub fn matches(&self, path: &str) -> bool {
        let name = path.rsplit(['/', '\\']).next().unwrap_or(path);
        match name.rsplit_once('.') {
            Some((_, extension)) => self.extensions.contains(&extension.to_ascii_lowercase()),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ExtensionFilter;

    #[test]
    fn matches_ignore_case() {
        let filter = ExtensionFilter::new(["xml", "LUA"]);
        assert!(filter.matches("libraries/wares.xml"));
        assert!(filter.matches("ui/core.Lua"));
        assert!(!filter.matches("textures/ship.dds"));
    }

    #[test]
    fn leading_dots_are_stripped() {
        let filter = ExtensionFilter::new([".xml", " js "]);
        assert!(filter.matches("index/macros.XML"));
        assert!(filter.matches("ui/main.js"));
    }

    #[test]
    fn extension_less_paths_never_match() {
        let filter = ExtensionFilter::new(["xml"]);
        assert!(!filter.matches("README"));
        assert!(!filter.matches("dir.with.dots/README"));
    }

    #[test]
    fn only_the_last_dot_counts() {
        let filter = ExtensionFilter::new(["gz"]);
        assert!(filter.matches("logs/output.xml.gz"));
        let filter = ExtensionFilter::new(["xml"]);
        assert!(!filter.matches("logs/output.xml.gz"));
    }
}
