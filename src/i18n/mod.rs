//! Internationalization (i18n) module: localized text lookup by key.
//!
//! Languages are loaded once from a directory of JSON files and looked up by
//! symbolic key. Lookups never fail: an unknown language falls back to the
//! default language and an unknown key comes back as a `%key` placeholder,
//! with a diagnostic reported either way.
//!
//! # Architecture
//!
//! - `registry`: Loads the language files and selects a language, with fallback
//! - `language`: Key resolution over one language, including nested sections
//! - `dictionary`: Parsed language file, validated as strings or nested objects
//! - `diagnostics`: Sink for missing-language and missing-key reports
//! - `error`: Load-time errors
//!
//! # Example
//!
//! ```rust,ignore
//! use lang_lookup::i18n::LanguageRegistry;
//!
//! let registry = LanguageRegistry::load("i18n")?;
//! let en = registry.language(Some("en"));
//!
//! println!("{}", en.t("greeting"));
//! println!("{}", en.t("menu").t("settings"));
//! println!("{}", en.path("menu.settings"));
//! println!("{}", en.resolve(["menu", "settings"]));
//! ```

mod diagnostics;
mod dictionary;
mod error;
mod language;
mod registry;

pub use diagnostics::{Diagnostic, DiagnosticSink, MemorySink, TracingSink};
pub use dictionary::{Dictionary, Entry};
pub use error::RegistryError;
pub use language::{placeholder, Language, Leaf, Lookup};
pub use registry::{LanguageRegistry, DEFAULT_LANGUAGE, DEFAULT_PATH};
