//! Identifier parsing.
//!
//! Splits a dataset identifier such as `02_intermediate/data.profile.html`
//! into directory, name and extension, given the set of extensions the
//! registry knows about.

use std::cmp::Ordering;
use wings_api::models::{PATH_SEPARATOR, WingInfo};

/// Registered extensions, kept in matching priority order.
///
/// An identifier is matched against the extension with the most dot
/// separated segments first (`.profile.html` before `.html`), then against
/// the longest literal (`.jpeg` before `.jpg`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionMatcher {
    extensions: Vec<String>,
}

impl ExtensionMatcher {
    pub fn new<I>(extensions: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        // An empty pattern would be a suffix of every identifier.
        let mut extensions: Vec<String> = extensions
            .into_iter()
            .map(|e| e.as_ref().to_string())
            .filter(|e| !e.is_empty())
            .collect();
        extensions.sort_by(|a, b| match_priority(a, b));
        extensions.dedup();
        Self { extensions }
    }

    /// Extensions in the order they are tried.
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// The highest priority extension that is a literal suffix of `identifier`.
    pub fn find(&self, identifier: &str) -> Option<&str> {
        self.extensions
            .iter()
            .find(|ext| identifier.ends_with(ext.as_str()))
            .map(String::as_str)
    }

    pub fn parse<S: AsRef<str>>(&self, identifier: &str, namespaces: &[S]) -> Option<WingInfo> {
        let extension = self.find(identifier)?;
        let cleaned = &identifier[..identifier.len() - extension.len()];

        let (cleaned, namespace) = strip_namespace(cleaned, namespaces);

        let (directory, name) = match cleaned.rsplit_once(PATH_SEPARATOR) {
            Some((directory, name)) => (directory, name),
            None => ("", cleaned),
        };

        let basename = match namespace {
            Some(ns) => format!("{name}.{ns}{extension}"),
            None => format!("{name}{extension}"),
        };

        Some(WingInfo {
            directory: directory.to_string(),
            name: name.to_string(),
            extension: extension.to_string(),
            basename,
            namespace: namespace.unwrap_or_default().to_string(),
        })
    }
}

/// Parse `identifier` against a set of extensions.
///
/// Returns `None` when no extension is a suffix of the identifier; such an
/// identifier is expected to be declared in the catalog by hand.
pub fn parse_wing_info<I, S>(identifier: &str, extensions: I, namespaces: &[S]) -> Option<WingInfo>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
    S: AsRef<str>,
{
    ExtensionMatcher::new(extensions).parse(identifier, namespaces)
}

fn segment_count(extension: &str) -> usize {
    extension.split('.').count()
}

fn match_priority(a: &str, b: &str) -> Ordering {
    segment_count(b)
        .cmp(&segment_count(a))
        .then_with(|| b.len().cmp(&a.len()))
        .then_with(|| a.cmp(b))
}

/// Strip the first `"<ns>."` prefix found, in caller order.
fn strip_namespace<'a, 'n, S: AsRef<str>>(
    cleaned: &'a str,
    namespaces: &'n [S],
) -> (&'a str, Option<&'n str>) {
    for ns in namespaces {
        let ns = ns.as_ref();
        if ns.is_empty() {
            continue;
        }
        if let Some(rest) = cleaned
            .strip_prefix(ns)
            .and_then(|rest| rest.strip_prefix('.'))
        {
            return (rest, Some(ns));
        }
    }
    (cleaned, None)
}
