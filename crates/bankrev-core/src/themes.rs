//! Theme keyword table: the fixed `{theme: [keywords]}` mapping used by the
//! analyzer. Loaded from YAML and validated at startup; keywords are
//! lowercased on load so matching stays case-insensitive downstream.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One theme and the keywords that map a review onto it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeEntry {
    /// Display name, e.g. `"Login Problems"`.
    pub name: String,
    /// Substrings matched case-insensitively against cleaned review text.
    pub keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ThemesFile {
    pub themes: Vec<ThemeEntry>,
}

/// Load and validate the theme keyword table from a YAML file.
///
/// Keywords are lowercased and trimmed; empty keywords are rejected rather
/// than silently dropped so a typo in the table is visible at startup.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation (empty table, duplicate theme names, empty keyword lists).
pub fn load_themes(path: &Path) -> Result<ThemesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let mut themes_file: ThemesFile = serde_yaml::from_str(&content)?;

    for theme in &mut themes_file.themes {
        for keyword in &mut theme.keywords {
            *keyword = keyword.trim().to_lowercase();
        }
    }

    validate_themes(&themes_file)?;

    Ok(themes_file)
}

fn validate_themes(themes_file: &ThemesFile) -> Result<(), ConfigError> {
    if themes_file.themes.is_empty() {
        return Err(ConfigError::Validation(
            "theme table must define at least one theme".to_string(),
        ));
    }

    let mut seen_names = HashSet::new();

    for theme in &themes_file.themes {
        if theme.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "theme name must be non-empty".to_string(),
            ));
        }

        if !seen_names.insert(theme.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate theme name: '{}'",
                theme.name
            )));
        }

        if theme.keywords.is_empty() {
            return Err(ConfigError::Validation(format!(
                "theme '{}' has no keywords",
                theme.name
            )));
        }

        if theme.keywords.iter().any(|k| k.is_empty()) {
            return Err(ConfigError::Validation(format!(
                "theme '{}' contains an empty keyword",
                theme.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn theme(name: &str, keywords: &[&str]) -> ThemeEntry {
        ThemeEntry {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
        }
    }

    #[test]
    fn validate_rejects_empty_table() {
        let file = ThemesFile { themes: vec![] };
        assert!(validate_themes(&file).is_err());
    }

    #[test]
    fn validate_rejects_duplicate_names_case_insensitively() {
        let file = ThemesFile {
            themes: vec![
                theme("Login Problems", &["login"]),
                theme("login problems", &["password"]),
            ],
        };
        let err = validate_themes(&file).unwrap_err();
        assert!(err.to_string().contains("duplicate theme name"));
    }

    #[test]
    fn validate_rejects_theme_without_keywords() {
        let file = ThemesFile {
            themes: vec![theme("Empty", &[])],
        };
        assert!(validate_themes(&file).is_err());
    }

    #[test]
    fn validate_rejects_empty_keyword() {
        let file = ThemesFile {
            themes: vec![ThemeEntry {
                name: "Login Problems".to_string(),
                keywords: vec![String::new()],
            }],
        };
        assert!(validate_themes(&file).is_err());
    }

    #[test]
    fn validate_accepts_well_formed_table() {
        let file = ThemesFile {
            themes: vec![
                theme("Login Problems", &["login", "password", "otp"]),
                theme("Transaction Issues", &["transfer", "payment"]),
            ],
        };
        assert!(validate_themes(&file).is_ok());
    }
}
