//! Theme tagging by case-insensitive keyword match.

use bankrev_core::ThemesFile;

/// Compiled form of the configured `{theme: [keywords]}` table.
///
/// Built once from the validated config file; keywords arrive lowercased
/// from the loader so matching is a plain substring check.
pub struct ThemeTable {
    themes: Vec<(String, Vec<String>)>,
}

impl ThemeTable {
    #[must_use]
    pub fn from_config(file: &ThemesFile) -> Self {
        Self {
            themes: file
                .themes
                .iter()
                .map(|t| (t.name.clone(), t.keywords.clone()))
                .collect(),
        }
    }

    /// Returns the names of every theme whose keyword list matches the
    /// cleaned text (case-insensitive substring). Zero matches is a valid
    /// outcome; the order follows the configured table.
    #[must_use]
    pub fn extract(&self, clean_text: &str) -> Vec<String> {
        let haystack = clean_text.to_lowercase();
        self.themes
            .iter()
            .filter(|(_, keywords)| keywords.iter().any(|k| haystack.contains(k.as_str())))
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Configured theme names, in table order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.themes.iter().map(|(name, _)| name.as_str()).collect()
    }
}
