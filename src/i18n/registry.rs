//! Language registry: every language loaded from a directory of JSON files.
//!
//! The registry is built once, up front, and never changes afterwards. Each
//! `<code>.json` file in the directory becomes one language, keyed by its
//! file name without the extension. Lookups go through [`Language`] views
//! that borrow from the registry.

use crate::i18n::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use crate::i18n::dictionary::Dictionary;
use crate::i18n::error::RegistryError;
use crate::i18n::language::Language;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Directory scanned by [`LanguageRegistry::load_default`].
pub const DEFAULT_PATH: &str = "i18n";

/// Language used when none (or an unknown one) is requested.
pub const DEFAULT_LANGUAGE: &str = "ru";

const EXTENSION: &str = ".json";

/// All loaded languages.
pub struct LanguageRegistry {
    dictionaries: HashMap<String, Dictionary>,

    /// Language codes in load order
    order: Vec<String>,

    default_language: String,
    sink: Arc<dyn DiagnosticSink>,
}

impl LanguageRegistry {
    /// Load every `*.json` file directly inside `path`.
    ///
    /// Files are read in file-name order. Subdirectories and other entries
    /// are ignored.
    ///
    /// # Returns
    /// * `Ok(LanguageRegistry)` with one language per file
    /// * `Err(RegistryError::Io)` if the directory or a file cannot be read
    /// * `Err(RegistryError::Load)` if a file is not a valid dictionary
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();

        let mut files: Vec<(String, PathBuf)> = Vec::new();
        for entry in fs::read_dir(path).map_err(io_error(path))? {
            let entry = entry.map_err(io_error(path))?;
            let file_path = entry.path();

            let Some(code) = language_code(&file_path) else {
                continue;
            };
            if !file_path.is_file() {
                debug!("Skipping {}: not a regular file", file_path.display());
                continue;
            }
            files.push((code, file_path));
        }
        files.sort();

        let mut dictionaries = Vec::with_capacity(files.len());
        for (code, file_path) in files {
            let content = fs::read_to_string(&file_path).map_err(io_error(&file_path))?;
            let dictionary =
                Dictionary::from_json(&content).map_err(|source| RegistryError::Load {
                    path: file_path.clone(),
                    source,
                })?;

            debug!(
                "Loaded language \"{}\" ({} top-level keys) from {}",
                code,
                dictionary.len(),
                file_path.display()
            );
            dictionaries.push((code, dictionary));
        }

        let registry = Self::from_dictionaries(dictionaries);
        info!(
            "Loaded {} languages from {}: {:?}",
            registry.len(),
            path.display(),
            registry.available()
        );
        Ok(registry)
    }

    /// Load from the `i18n` directory relative to the working directory.
    pub fn load_default() -> Result<Self, RegistryError> {
        Self::load(DEFAULT_PATH)
    }

    /// Build a registry from dictionaries already in memory.
    ///
    /// Iteration order becomes the order of [`available`](Self::available).
    /// A repeated code replaces the earlier dictionary and keeps its position.
    pub fn from_dictionaries<I, S>(dictionaries: I) -> Self
    where
        I: IntoIterator<Item = (S, Dictionary)>,
        S: Into<String>,
    {
        let mut map = HashMap::new();
        let mut order = Vec::new();
        for (code, dictionary) in dictionaries {
            let code = code.into();
            if map.insert(code.clone(), dictionary).is_none() {
                order.push(code);
            }
        }

        Self {
            dictionaries: map,
            order,
            default_language: DEFAULT_LANGUAGE.to_string(),
            sink: Arc::new(TracingSink),
        }
    }

    /// Send diagnostics to `sink` instead of the log.
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Use `code` as the fallback language instead of [`DEFAULT_LANGUAGE`].
    pub fn with_default_language(mut self, code: impl Into<String>) -> Self {
        self.default_language = code.into();
        self
    }

    /// Codes of every loaded language.
    ///
    /// Callers should not depend on the order.
    pub fn available(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    /// Check if a language with this code was loaded.
    pub fn is_available(&self, code: &str) -> bool {
        self.dictionaries.contains_key(code)
    }

    /// Code of the fallback language.
    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Get a view over a language.
    ///
    /// `None` or an empty code selects the default language. An unknown code
    /// reports [`Diagnostic::LanguageNotFound`] and also selects the default
    /// language, so this never fails for a registry that holds the default.
    ///
    /// # Panics
    /// Panics if the default language is selected but was never loaded.
    /// Check `is_available(default_language())` at startup to rule this out.
    pub fn language(&self, code: Option<&str>) -> Language<'_> {
        if let Some(code) = code.filter(|code| !code.is_empty()) {
            if let Some(view) = self.view(code) {
                return view;
            }
            self.sink.report(&Diagnostic::LanguageNotFound {
                requested: code.to_string(),
                fallback: self.default_language.clone(),
            });
        }

        match self.view(&self.default_language) {
            Some(view) => view,
            None => panic!(
                "Default language \"{}\" is not loaded (available: {:?})",
                self.default_language,
                self.available()
            ),
        }
    }

    fn view(&self, code: &str) -> Option<Language<'_>> {
        self.dictionaries
            .get_key_value(code)
            .map(|(code, dictionary)| Language::new(code, dictionary, self.sink.as_ref()))
    }
}

impl fmt::Debug for LanguageRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LanguageRegistry")
            .field("languages", &self.order)
            .field("default_language", &self.default_language)
            .finish()
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> RegistryError {
    let path = path.to_path_buf();
    move |source| RegistryError::Io { path, source }
}

/// Language code for a file path, if the file name ends with `.json`.
fn language_code(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    match name.strip_suffix(EXTENSION) {
        Some("") => {
            debug!("Skipping {}: empty language code", path.display());
            None
        }
        Some(code) => Some(code.to_string()),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::diagnostics::MemorySink;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) {
        fs::write(dir.path().join(name), content).expect("Failed to write language file");
    }

    fn sample_dir() -> TempDir {
        let dir = TempDir::new().expect("Failed to create temp dir");
        write(&dir, "ru.json", r#"{"hello": "Привет", "menu": {"start": "Старт"}}"#);
        write(&dir, "en.json", r#"{"hello": "Hello", "menu": {"start": "Start"}}"#);
        write(&dir, "notes.txt", "not a language");
        dir
    }

    // ==================== Loading Tests ====================

    #[test]
    fn test_load_registers_json_files() {
        let dir = sample_dir();
        let registry = LanguageRegistry::load(dir.path()).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.available(), vec!["en", "ru"]);
        assert!(registry.is_available("ru"));
        assert!(!registry.is_available("notes"));
    }

    #[test]
    fn test_load_skips_json_named_directory() {
        let dir = sample_dir();
        fs::create_dir(dir.path().join("de.json")).unwrap();

        let registry = LanguageRegistry::load(dir.path()).unwrap();
        assert!(!registry.is_available("de"));
    }

    #[test]
    fn test_load_skips_bare_extension() {
        let dir = sample_dir();
        write(&dir, ".json", r#"{"a": "b"}"#);

        let registry = LanguageRegistry::load(dir.path()).unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_load_empty_directory() {
        let dir = TempDir::new().unwrap();
        let registry = LanguageRegistry::load(dir.path()).unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_load_missing_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");

        let err = LanguageRegistry::load(&missing).unwrap_err();
        assert!(matches!(err, RegistryError::Io { .. }));
        assert_eq!(err.path(), missing.as_path());
    }

    #[test]
    fn test_load_invalid_json_is_load_error() {
        let dir = sample_dir();
        write(&dir, "de.json", r#"{"hello": "#);

        let err = LanguageRegistry::load(dir.path()).unwrap_err();
        assert!(matches!(err, RegistryError::Load { .. }));
        assert!(err.path().ends_with("de.json"));
        assert!(err.to_string().contains("de.json"));
    }

    #[test]
    fn test_load_rejects_non_string_values() {
        let dir = sample_dir();
        write(&dir, "de.json", r#"{"count": 1}"#);

        let err = LanguageRegistry::load(dir.path()).unwrap_err();
        assert!(matches!(err, RegistryError::Load { .. }));
    }

    // ==================== Language Selection Tests ====================

    #[test]
    fn test_language_known_code() {
        let dir = sample_dir();
        let registry = LanguageRegistry::load(dir.path()).unwrap();

        let view = registry.language(Some("en"));
        assert_eq!(view.code(), "en");
        assert_eq!(view.t("hello"), "Hello");
    }

    #[test]
    fn test_language_none_and_empty_use_default() {
        let dir = sample_dir();
        let sink = Arc::new(MemorySink::new());
        let registry = LanguageRegistry::load(dir.path())
            .unwrap()
            .with_sink(sink.clone());

        let ru = registry.language(Some("ru"));
        assert_eq!(registry.language(None), ru);
        assert_eq!(registry.language(Some("")), ru);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_language_unknown_falls_back_with_one_diagnostic() {
        let dir = sample_dir();
        let sink = Arc::new(MemorySink::new());
        let registry = LanguageRegistry::load(dir.path())
            .unwrap()
            .with_sink(sink.clone());

        let view = registry.language(Some("xx"));
        assert_eq!(view, registry.language(Some("ru")));
        assert_eq!(
            sink.take(),
            vec![Diagnostic::LanguageNotFound {
                requested: "xx".to_string(),
                fallback: "ru".to_string(),
            }]
        );
    }

    #[test]
    fn test_with_default_language() {
        let dir = sample_dir();
        let registry = LanguageRegistry::load(dir.path())
            .unwrap()
            .with_default_language("en");

        assert_eq!(registry.default_language(), "en");
        assert_eq!(registry.language(None).code(), "en");
        assert_eq!(registry.language(Some("xx")).code(), "en");
    }

    #[test]
    #[should_panic(expected = "Default language \"ru\" is not loaded")]
    fn test_language_panics_without_default() {
        let registry = LanguageRegistry::from_dictionaries(vec![("en", Dictionary::default())]);
        registry.language(None);
    }

    #[test]
    fn test_known_language_works_without_default() {
        let registry = LanguageRegistry::from_dictionaries(vec![("en", Dictionary::default())]);
        assert_eq!(registry.language(Some("en")).code(), "en");
    }

    // ==================== In-memory Construction Tests ====================

    #[test]
    fn test_from_dictionaries_keeps_order_without_duplicates() {
        let registry = LanguageRegistry::from_dictionaries(vec![
            ("ru", Dictionary::default()),
            ("en", Dictionary::default()),
            ("ru", Dictionary::from_json(r#"{"a": "b"}"#).unwrap()),
        ]);

        assert_eq!(registry.available(), vec!["ru", "en"]);
        assert_eq!(registry.language(Some("ru")).t("a"), "b");
    }

    #[test]
    fn test_debug_lists_languages() {
        let registry = LanguageRegistry::from_dictionaries(vec![("ru", Dictionary::default())]);
        let debug = format!("{:?}", registry);
        assert!(debug.contains("ru"));
    }

    #[test]
    fn test_language_code() {
        assert_eq!(language_code(Path::new("i18n/en.json")), Some("en".to_string()));
        assert_eq!(language_code(Path::new("pt-BR.json")), Some("pt-BR".to_string()));
        assert_eq!(language_code(Path::new("en.JSON")), None);
        assert_eq!(language_code(Path::new("en.json.bak")), None);
        assert_eq!(language_code(Path::new(".json")), None);
    }

    #[test]
    fn test_registry_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LanguageRegistry>();
    }
}
