//! Remote media folder entries.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::PathBuf;

/// One item of a directory listing returned by the node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderEntry {
    pub name: String,

    /// Path relative to the node's media folder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    pub is_file: bool,
}

impl FolderEntry {
    pub fn folder(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
            is_file: false,
        }
    }

    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
            is_file: true,
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Value to send as `requested_path` when listing this entry's children.
    pub fn request_path(&self) -> String {
        self.path.as_ref().map_or_else(
            || self.name.clone(),
            |p| p.to_string_lossy().into_owned(),
        )
    }
}

/// Case-insensitive name order; lowercase sorts first on ties.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Sort a listing: folders before files, each group by name.
///
/// Two stable passes, name first and kind second, so names stay ordered
/// inside each group.
pub fn sort_entries(entries: &mut [FolderEntry]) {
    entries.sort_by(|a, b| compare_names(&a.name, &b.name));
    entries.sort_by_key(|e| e.is_file);
}

/// Folder entry in the browser tree, with lazily loaded children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollapsableFolderEntry {
    #[serde(flatten)]
    pub entry: FolderEntry,

    #[serde(default)]
    pub is_opened: bool,

    /// `None` until the children have been fetched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nested: Option<Vec<CollapsableFolderEntry>>,
}

/// A row of the flattened tree as it would be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRow<'a> {
    pub depth: usize,
    pub entry: &'a CollapsableFolderEntry,
}

impl From<FolderEntry> for CollapsableFolderEntry {
    fn from(entry: FolderEntry) -> Self {
        Self {
            entry,
            is_opened: false,
            nested: None,
        }
    }
}

impl CollapsableFolderEntry {
    /// Wrap a listing as tree roots.
    pub fn roots(entries: Vec<FolderEntry>) -> Vec<Self> {
        entries.into_iter().map(Self::from).collect()
    }

    pub fn is_loaded(&self) -> bool {
        self.nested.is_some()
    }

    /// Store fetched children, sorted, replacing any previous ones.
    pub fn set_children(&mut self, mut entries: Vec<FolderEntry>) {
        sort_entries(&mut entries);
        self.nested = Some(Self::roots(entries));
    }

    /// Flip open/closed. Files never open. Returns the new state.
    pub fn toggle(&mut self) -> bool {
        if self.entry.is_file {
            return false;
        }
        self.is_opened = !self.is_opened;
        self.is_opened
    }

    /// Find a loaded node by its request path.
    pub fn find_mut(&mut self, request_path: &str) -> Option<&mut Self> {
        if self.entry.request_path() == request_path {
            return Some(self);
        }
        self.nested
            .as_mut()?
            .iter_mut()
            .find_map(|child| child.find_mut(request_path))
    }

    /// Depth-first rows of `roots`, descending only into opened folders.
    pub fn visible_rows(roots: &[Self]) -> Vec<VisibleRow<'_>> {
        let mut rows = Vec::new();
        for root in roots {
            root.collect_rows(0, &mut rows);
        }
        rows
    }

    fn collect_rows<'a>(&'a self, depth: usize, rows: &mut Vec<VisibleRow<'a>>) {
        rows.push(VisibleRow { depth, entry: self });
        if !self.is_opened {
            return;
        }
        for child in self.nested.iter().flatten() {
            child.collect_rows(depth + 1, rows);
        }
    }
}
