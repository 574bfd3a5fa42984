//! Validated install-relative path newtype.
//!
//! Manifest paths are always relative to the distribution root, use `/`
//! separators regardless of platform, and never contain dot components. The
//! empty path denotes the root itself. Joining the install root, a package
//! path, and an entry name yields the absolute location of an installed
//! file.

use crate::error::{ManifestError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated path relative to the distribution root.
///
/// # Examples
///
/// ```
/// use windlass_manifest::RelativePath;
///
/// let path = RelativePath::try_from("maps/campaign").expect("valid path");
/// assert_eq!(path.components().count(), 2);
/// assert!(!path.is_root());
/// assert!(RelativePath::root().is_root());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RelativePath(String);

impl RelativePath {
    /// Return the empty path denoting the distribution root.
    #[must_use]
    pub const fn root() -> Self {
        Self(String::new())
    }

    /// Build a path from individual components, validating each.
    ///
    /// An empty iterator yields the root path. This is the constructor the
    /// compiler uses, so platform separators never reach the wire format.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::InvalidRelativePath`] when a component is
    /// empty, contains a separator, or is a dot component.
    pub fn from_components<'a, I>(components: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut joined = String::new();
        for component in components {
            validate_component(component, component)?;
            if !joined.is_empty() {
                joined.push('/');
            }
            joined.push_str(component);
        }
        Ok(Self(joined))
    }

    /// Whether this is the empty root path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Return the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Iterate over the path's components.
    ///
    /// The root path yields no components.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|c| !c.is_empty())
    }

    /// Resolve this path beneath `root`, using platform separators.
    #[must_use]
    pub fn resolve_under(&self, root: &Utf8Path) -> Utf8PathBuf {
        self.components()
            .fold(root.to_owned(), |acc, component| acc.join(component))
    }
}

impl TryFrom<&str> for RelativePath {
    type Error = ManifestError;

    fn try_from(value: &str) -> Result<Self> {
        validate_relative_path(value)?;
        Ok(Self(value.to_owned()))
    }
}

impl TryFrom<String> for RelativePath {
    type Error = ManifestError;

    fn try_from(value: String) -> Result<Self> {
        validate_relative_path(&value)?;
        Ok(Self(value))
    }
}

impl From<RelativePath> for String {
    fn from(path: RelativePath) -> Self {
        path.0
    }
}

impl AsRef<str> for RelativePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validate a whole path string in canonical wire form.
fn validate_relative_path(value: &str) -> Result<()> {
    if value.is_empty() {
        return Ok(());
    }
    if value.starts_with('/') {
        return Err(invalid(value, "leading separator is not permitted"));
    }
    if value.contains('\\') {
        return Err(invalid(value, "backslash separators are not permitted"));
    }
    if value.contains(':') {
        return Err(invalid(value, "drive or stream separators are not permitted"));
    }
    for component in value.split('/') {
        validate_component(component, value)?;
    }
    Ok(())
}

/// Validate a single component, reporting against the full `context` value.
fn validate_component(component: &str, context: &str) -> Result<()> {
    if component.is_empty() {
        return Err(invalid(context, "empty component"));
    }
    if component == "." || component == ".." {
        return Err(invalid(context, "dot components are not permitted"));
    }
    if component.contains(['/', '\\', ':']) {
        return Err(invalid(context, "component contains a separator"));
    }
    Ok(())
}

fn invalid(value: &str, reason: &str) -> ManifestError {
    ManifestError::InvalidRelativePath {
        value: value.to_owned(),
        reason: reason.to_owned(),
    }
}
