//! Package metadata parsing.
//!
//! The patchbay package keeps its facts in `patchbay/core/metadata.py` as
//! plain `__name__ = 'value'` assignment lines. They are parsed textually:
//! importing the module instead would execute daemon code whose
//! dependencies are not installed yet at this point of the build.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context as _, Result};
use regex::Regex;

use crate::layout;

static ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"__([a-z][a-z_]*)__\s*=\s*'([^']+)'").expect("assignment pattern is valid")
});

/// Facts parsed from the package metadata file.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    values: BTreeMap<String, String>,
}

impl Metadata {
    /// Parse `__name__ = 'value'` assignments out of Python source text.
    ///
    /// Non-matching lines are ignored, so an unparseable file yields an
    /// empty set of facts rather than an error.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut values = BTreeMap::new();
        for cap in ASSIGNMENT.captures_iter(text) {
            if let (Some(key), Some(value)) = (cap.get(1), cap.get(2)) {
                values.insert(key.as_str().to_string(), value.as_str().to_string());
            }
        }
        Self { values }
    }

    /// Read and parse the metadata file under `source_root`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn from_source(source_root: &Path) -> Result<Self> {
        let path = source_root.join(layout::METADATA_FILE);
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        Ok(Self::parse(&text))
    }

    /// Look up a fact by its inner name (`version`, `author`, ...).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Package version.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.get("version")
    }

    /// One-line package description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.get("description")
    }

    /// Project home page.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.get("url")
    }

    /// Package author.
    #[must_use]
    pub fn author(&self) -> Option<&str> {
        self.get("author")
    }

    /// Package author contact address.
    #[must_use]
    pub fn author_email(&self) -> Option<&str> {
        self.get("author_email")
    }

    /// License identifier.
    #[must_use]
    pub fn license(&self) -> Option<&str> {
        self.get("license")
    }
}
