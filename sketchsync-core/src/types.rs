//! Domain types shared by the comparator and the packager.
//!
//! Paths inside a tree are carried as [`RelPath`] (UTF-8 segments) so report
//! lines and archive entry names use `/` on every platform. Filesystem paths
//! at the edges stay `PathBuf`.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize, Serializer};

// ---------------------------------------------------------------------------
// RelPath
// ---------------------------------------------------------------------------

/// A path relative to some tree root, stored as its segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RelPath(Vec<String>);

impl RelPath {
    /// The empty path, i.e. the tree root itself.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Build from an already split list of segments.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Parse a `/`-separated path. Empty segments are dropped.
    pub fn from_slash(s: &str) -> Self {
        Self::from_segments(s.split('/').filter(|seg| !seg.is_empty()))
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// A new path with `segment` appended.
    pub fn join(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    /// Drops the last segment. `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.0.split_last()?;
        Some(Self(rest.to_vec()))
    }

    /// The last segment. `None` for the root.
    pub fn file_name(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Resolve against a native `root` directory.
    pub fn under(&self, root: &Path) -> PathBuf {
        let mut path = root.to_path_buf();
        for segment in &self.0 {
            path.push(segment);
        }
        path
    }
}

impl fmt::Display for RelPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("/"))
    }
}

impl Serialize for RelPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ---------------------------------------------------------------------------
// SuffixFilter
// ---------------------------------------------------------------------------

/// Matches files whose name ends with a fixed suffix (`.pde` by default).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SuffixFilter(pub String);

impl SuffixFilter {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self(suffix.into())
    }

    /// An empty suffix matches every file.
    pub fn matches(&self, file_name: &str) -> bool {
        file_name.ends_with(self.0.as_str())
    }
}

impl Default for SuffixFilter {
    fn default() -> Self {
        Self::new(".pde")
    }
}

impl fmt::Display for SuffixFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for SuffixFilter {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

/// How two same-named files are checked for equality.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompareMode {
    /// Equal size and mtime count as unchanged without reading content.
    #[default]
    Shallow,
    /// Always compare content.
    Full,
}

impl fmt::Display for CompareMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CompareMode::Shallow => "shallow",
            CompareMode::Full => "full",
        };
        f.write_str(s)
    }
}

/// Outcome of comparing one source file against its counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonStatus {
    Missing,
    Modified,
    Unchanged,
}

impl fmt::Display for ComparisonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ComparisonStatus::Missing => "missing",
            ComparisonStatus::Modified => "modified",
            ComparisonStatus::Unchanged => "unchanged",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileComparison {
    pub path: RelPath,
    pub status: ComparisonStatus,
}

// ---------------------------------------------------------------------------
// SketchGroup
// ---------------------------------------------------------------------------

/// One archivable sketch folder: `category/sketch` under the source tree.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SketchGroup {
    /// Possibly empty when the sketch sits directly under the source root.
    pub category: RelPath,
    pub sketch: String,
}

impl SketchGroup {
    /// Split a sketch directory at its last segment. `None` for the root.
    pub fn from_dir(dir: &RelPath) -> Option<Self> {
        let sketch = dir.file_name()?.to_owned();
        let category = dir.parent()?;
        Some(Self { category, sketch })
    }

    /// `category/sketch`
    pub fn rel_dir(&self) -> RelPath {
        self.category.join(self.sketch.clone())
    }
}

impl fmt::Display for SketchGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.rel_dir().fmt(f)
    }
}
