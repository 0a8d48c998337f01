//! Language views: key resolution over one loaded dictionary.
//!
//! A [`Language`] borrows a dictionary owned by the
//! [`LanguageRegistry`](crate::i18n::LanguageRegistry) and resolves keys into
//! a [`Lookup`]. Resolution never fails: a missing key is reported to the
//! registry's diagnostic sink and comes back as a `%key` placeholder, so a
//! missing translation shows up as visibly wrong text instead of an error.

use crate::i18n::diagnostics::{Diagnostic, DiagnosticSink};
use crate::i18n::dictionary::{join_path, Dictionary, Entry};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Placeholder text returned for a key that could not be resolved.
pub fn placeholder(key: &str) -> String {
    format!("%{}", key)
}

/// Read-only view over one language, or over a nested section of it.
///
/// Cloning is cheap: the dictionary is borrowed and the section path is shared.
#[derive(Clone)]
pub struct Language<'a> {
    code: &'a str,

    /// Dotted path of the section this view wraps, `None` for the top level
    node: Option<Arc<str>>,

    dictionary: &'a Dictionary,
    sink: &'a dyn DiagnosticSink,
}

/// A resolved text value and the section it was found in.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf<'a> {
    text: &'a str,
    key: &'a str,
    parent: Language<'a>,
}

/// Result of resolving a single key.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<'a> {
    /// Translated text, verbatim from the language file
    Text(Leaf<'a>),

    /// Nested section, resolvable by further keys
    Node(Language<'a>),

    /// Key not found; holds the `%key` placeholder
    Missing(String),
}

impl<'a> Language<'a> {
    pub(crate) fn new(
        code: &'a str,
        dictionary: &'a Dictionary,
        sink: &'a dyn DiagnosticSink,
    ) -> Self {
        Self {
            code,
            node: None,
            dictionary,
            sink,
        }
    }

    /// Language identifier (file name without `.json`).
    pub fn code(&self) -> &'a str {
        self.code
    }

    /// Dotted key path of this section, or `None` for the language root.
    pub fn node(&self) -> Option<&str> {
        self.node.as_deref()
    }

    /// The dictionary this view reads from.
    pub fn dictionary(&self) -> &'a Dictionary {
        self.dictionary
    }

    /// Keys available at this level, sorted.
    pub fn keys(&self) -> Vec<&'a str> {
        self.dictionary.keys()
    }

    /// Resolve one key.
    ///
    /// # Returns
    /// * `Lookup::Text` if the key holds a string
    /// * `Lookup::Node` if the key holds a nested section
    /// * `Lookup::Missing("%key")` if the key is absent; a
    ///   [`Diagnostic::KeyNotFound`] is reported first
    pub fn t(&self, key: &str) -> Lookup<'a> {
        match self.dictionary.get_key_value(key) {
            Some((key, Entry::Text(text))) => Lookup::Text(Leaf {
                text: text.as_str(),
                key,
                parent: self.clone(),
            }),
            Some((key, Entry::Node(child))) => Lookup::Node(Language {
                code: self.code,
                node: Some(Arc::from(join_path(self.node().unwrap_or(""), key))),
                dictionary: child,
                sink: self.sink,
            }),
            None => self.missing(key),
        }
    }

    /// Resolve a key and render it as text.
    ///
    /// Shorthand for `self.t(key).into_text()`.
    pub fn text(&self, key: &str) -> Cow<'a, str> {
        self.t(key).into_text()
    }

    /// Resolve a sequence of keys, one level per key.
    ///
    /// Equivalent to chaining [`t`](Self::t) and [`Lookup::t`], except that
    /// resolution stops at the first key that is absent and returns its
    /// placeholder. Every failing key is reported exactly once.
    pub fn resolve<'k, I>(&self, keys: I) -> Lookup<'a>
    where
        I: IntoIterator<Item = &'k str>,
    {
        let mut keys = keys.into_iter();
        let mut current = self.t(keys.next().unwrap_or_default());

        for key in keys {
            if current.is_missing() {
                break;
            }
            current = current.t(key);
        }

        current
    }

    /// Resolve a dotted key path such as `"menu.settings.title"`.
    ///
    /// Shorthand for `resolve(path.split('.'))`. Keys that themselves contain
    /// a `.` cannot be addressed this way; reach them with [`t`](Self::t) or
    /// [`resolve`](Self::resolve).
    pub fn path(&self, path: &str) -> Lookup<'a> {
        self.resolve(path.split('.'))
    }

    fn missing(&self, key: &str) -> Lookup<'a> {
        self.report_missing(self.node().map(str::to_string), key)
    }

    fn report_missing(&self, node: Option<String>, key: &str) -> Lookup<'a> {
        self.sink.report(&Diagnostic::KeyNotFound {
            language: self.code.to_string(),
            node,
            key: key.to_string(),
        });
        Lookup::Missing(placeholder(key))
    }
}

impl PartialEq for Language<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code && self.node == other.node && self.dictionary == other.dictionary
    }
}

impl fmt::Debug for Language<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Language")
            .field("code", &self.code)
            .field("node", &self.node)
            .field("keys", &self.dictionary.len())
            .finish()
    }
}

impl<'a> Leaf<'a> {
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Key this text was stored under.
    pub fn key(&self) -> &'a str {
        self.key
    }

    /// Dotted path of this text within its language.
    pub fn path(&self) -> String {
        join_path(self.parent.node().unwrap_or(""), self.key)
    }
}

impl<'a> Lookup<'a> {
    /// Resolve `key` inside this result, for chained access such as
    /// `view.t("menu").t("title")`.
    ///
    /// Only a `Node` can be navigated. Chaining from a `Text` reports the key
    /// as missing under the text's own path. Chaining from a `Missing` result
    /// yields the placeholder for `key` without a second report, since the
    /// absent parent was already reported.
    pub fn t(&self, key: &str) -> Lookup<'a> {
        match self {
            Lookup::Node(view) => view.t(key),
            Lookup::Text(leaf) => leaf.parent.report_missing(Some(leaf.path()), key),
            Lookup::Missing(_) => Lookup::Missing(placeholder(key)),
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Lookup::Text(_))
    }

    pub fn is_node(&self) -> bool {
        matches!(self, Lookup::Node(_))
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Lookup::Missing(_))
    }

    /// The text, if this result is a leaf.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Lookup::Text(leaf) => Some(leaf.text),
            _ => None,
        }
    }

    /// The nested view, if this result is a section.
    pub fn as_node(&self) -> Option<&Language<'a>> {
        match self {
            Lookup::Node(view) => Some(view),
            _ => None,
        }
    }

    /// Render as text without consuming the result.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Lookup::Text(leaf) => Cow::Borrowed(leaf.text),
            Lookup::Missing(placeholder) => Cow::Borrowed(placeholder.as_str()),
            Lookup::Node(view) => Cow::Owned(node_placeholder(view)),
        }
    }

    /// Render as text.
    ///
    /// A section is not text, so it renders as the placeholder of its own key.
    pub fn into_text(self) -> Cow<'a, str> {
        match self {
            Lookup::Text(leaf) => Cow::Borrowed(leaf.text),
            Lookup::Missing(placeholder) => Cow::Owned(placeholder),
            Lookup::Node(view) => Cow::Owned(node_placeholder(&view)),
        }
    }
}

fn node_placeholder(view: &Language<'_>) -> String {
    let key = view
        .node()
        .and_then(|path| path.rsplit('.').next())
        .unwrap_or(view.code());
    placeholder(key)
}

impl fmt::Display for Lookup<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl PartialEq<str> for Lookup<'_> {
    fn eq(&self, other: &str) -> bool {
        match self {
            Lookup::Text(leaf) => leaf.text == other,
            Lookup::Missing(placeholder) => placeholder == other,
            Lookup::Node(_) => false,
        }
    }
}

impl PartialEq<&str> for Lookup<'_> {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
