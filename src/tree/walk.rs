use globset::{Glob, GlobSet, GlobSetBuilder};
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

use super::{sort_tree, NodeId, Tree, TreePayload};
use crate::error::{Error, Result};

/// Descriptor for one filesystem entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileNode {
    /// Base name of the entry.
    pub name: String,
    /// Full path of the entry (under the canonical root).
    pub path: PathBuf,
    pub is_dir: bool,
    /// Size in bytes as reported by the filesystem.
    pub size: u64,
    /// Last modification time, when the platform reports one.
    pub modified: Option<SystemTime>,
}

impl FileNode {
    fn from_metadata(name: String, path: PathBuf, meta: &Metadata) -> Self {
        Self {
            name,
            path,
            is_dir: meta.is_dir(),
            size: meta.len(),
            modified: meta.modified().ok(),
        }
    }

    fn directory(name: &str, path: PathBuf) -> Self {
        Self {
            name: name.to_string(),
            path,
            is_dir: true,
            ..Self::default()
        }
    }

    /// Lowercased extension, if the name has one.
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
    }
}

impl TreePayload for FileNode {
    fn is_container(&self) -> bool {
        self.is_dir
    }
}

/// Options for the filesystem walk.
#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// Include dotfiles and descend into dot-directories.
    pub show_hidden: bool,
    /// Follow symbolic links during traversal.
    pub follow_symlinks: bool,
    /// Patterns (relative to the root) for entries to exclude.
    pub ignore_patterns: GlobSet,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            show_hidden: false,
            follow_symlinks: false,
            ignore_patterns: GlobSet::empty(),
        }
    }
}

/// Build a GlobSet from user patterns. Invalid patterns are skipped.
pub fn build_ignore_set(patterns: &[String]) -> GlobSet {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        match Glob::new(pattern) {
            Ok(g) => {
                builder.add(g);
            }
            Err(e) => {
                tracing::warn!(%pattern, error = %e, "invalid ignore pattern skipped");
            }
        }
    }
    builder.build().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to build ignore set");
        GlobSet::empty()
    })
}

/// Walk `root` and build a sorted tree of its entries.
///
/// The root node describes `root` itself. Hidden entries (and everything
/// below a hidden directory) are left out unless `options.show_hidden` is
/// set. Any walk error aborts the build; no partial tree is returned.
pub fn build_filesystem_tree(root: &Path, options: &WalkOptions) -> Result<Tree<FileNode>> {
    let root = root.canonicalize().map_err(|e| Error::from_io(root, e))?;
    let meta = std::fs::metadata(&root).map_err(|e| Error::from_io(&root, e))?;

    let root_name = root
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| root.to_string_lossy().to_string());
    let mut tree = Tree::new(
        root_name.clone(),
        FileNode::from_metadata(root_name, root.clone(), &meta),
    );

    let show_hidden = options.show_hidden;
    let ignore_patterns = options.ignore_patterns.clone();
    let filter_root = root.clone();
    let iter = WalkDir::new(&root)
        .follow_links(options.follow_symlinks)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |entry| {
            if entry.depth() == 0 {
                return true;
            }
            let name = entry.file_name().to_string_lossy();
            if !show_hidden && name.starts_with('.') {
                tracing::trace!(path = %entry.path().display(), "skipping hidden entry");
                return false;
            }
            let relative = entry
                .path()
                .strip_prefix(&filter_root)
                .unwrap_or_else(|_| entry.path());
            !ignore_patterns.is_match(relative)
        });

    let mut inserted = 0usize;
    for entry in iter {
        let entry = entry.map_err(|e| Error::from_walk(&root, e))?;
        if entry.depth() == 0 {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(&root)
            .unwrap_or_else(|_| entry.path());
        let segments: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().to_string())
            .collect();

        let meta = entry.metadata().map_err(|e| Error::from_walk(&root, e))?;
        let name = entry.file_name().to_string_lossy().to_string();
        let mut node = FileNode::from_metadata(name, entry.path().to_path_buf(), &meta);
        node.is_dir = entry.file_type().is_dir();

        insert_entry(&mut tree, &root, &segments, node);
        inserted += 1;
    }

    sort_tree(&mut tree);
    tracing::debug!(root = %root.display(), entries = inserted, "built filesystem tree");
    Ok(tree)
}

/// Find-or-create each directory along `segments`, then append `node`
/// under the last one. Lookups only consider directory-typed siblings.
fn insert_entry(tree: &mut Tree<FileNode>, root: &Path, segments: &[String], node: FileNode) {
    let Some((last, parents)) = segments.split_last() else {
        return;
    };

    let mut current = NodeId::ROOT;
    let mut dir_path = root.to_path_buf();
    for segment in parents {
        dir_path.push(segment);
        current = match tree.find_child(current, segment, |n| n.payload.is_dir) {
            Some(existing) => existing,
            None => {
                let dir = FileNode::directory(segment, dir_path.clone());
                tree.add_child(current, segment.as_str(), dir)
            }
        };
    }
    tree.add_child(current, last.as_str(), node);
}
