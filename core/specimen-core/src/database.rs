//! The persisted font database and its lookup API.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::discovery::{FontDiscovery, PathDiscovery};
use crate::face::{FontFace, FontFile};
use crate::hash::{self, HashBucket};
use crate::link::{self, NamedIndices};
use crate::scan::{scan_paths, BuildOptions};

/// Everything a consumer needs to resolve font names to files.
///
/// `file` is indexed by global face index; `link` and `fontset` entries refer
/// to faces by that index, and the hash lists refer to positions in `link` /
/// `fontset`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontDatabase {
    pub file: Vec<FontFace>,
    pub file_count: usize,
    pub link_count: usize,
    pub link: Vec<NamedIndices>,
    pub fontset: Vec<NamedIndices>,
    pub link_hash: Vec<HashBucket>,
    pub fontset_hash: Vec<HashBucket>,
}

impl FontDatabase {
    /// Fold per-file results into one database. Face indices follow the order
    /// of `files` and of the faces within each file.
    pub fn from_files(files: impl IntoIterator<Item = FontFile>) -> Self {
        let file: Vec<FontFace> = files.into_iter().flat_map(|f| f.faces).collect();

        let link = link::build_links(&file).into_entries();
        let fontset = link::build_fontsets(&file).into_entries();
        let link_hash = hash::build_buckets(&link);
        let fontset_hash = hash::build_buckets(&fontset);

        log::info!(
            "indexed {} faces, {} links, {} font sets",
            file.len(),
            link.len(),
            fontset.len()
        );

        Self {
            file_count: file.len(),
            link_count: link.len(),
            file,
            link,
            fontset,
            link_hash,
            fontset_hash,
        }
    }

    /// Link entry for an alias (PostScript name, full name, `Family-Style`...).
    pub fn find_link(&self, name: &str) -> Option<&NamedIndices> {
        hash::lookup(&self.link_hash, &self.link, name)
    }

    /// Font set entry for a family name.
    pub fn find_fontset(&self, name: &str) -> Option<&NamedIndices> {
        hash::lookup(&self.fontset_hash, &self.fontset, name)
    }

    /// The first face an alias resolves to.
    pub fn search_name(&self, name: &str) -> Option<&FontFace> {
        let entry = self.find_link(name)?;
        entry.inst.first().and_then(|&index| self.face(index))
    }

    /// Every face of a family with at least two members.
    pub fn search_family(&self, name: &str) -> Vec<&FontFace> {
        self.find_fontset(name)
            .map(|entry| entry.inst.iter().filter_map(|&i| self.face(i)).collect())
            .unwrap_or_default()
    }

    pub fn face(&self, index: usize) -> Option<&FontFace> {
        self.file.get(index)
    }
}

/// Every candidate file under `roots`, in face-numbering order.
pub fn discover_fonts(roots: &[PathBuf], opts: &BuildOptions) -> Result<Vec<PathBuf>> {
    PathDiscovery::new(roots.iter().cloned())
        .follow_symlinks(opts.follow_symlinks)
        .discover()
}

/// Scan already discovered `paths` and fold them.
pub fn build_from_paths(paths: &[PathBuf], opts: &BuildOptions) -> Result<FontDatabase> {
    log::info!("scanning {} files", paths.len());
    let files = scan_paths(paths, opts)?;
    Ok(FontDatabase::from_files(files))
}

/// Discover, scan and fold the fonts under `roots`.
pub fn build_database(roots: &[PathBuf], opts: &BuildOptions) -> Result<FontDatabase> {
    let paths = discover_fonts(roots, opts)?;
    build_from_paths(&paths, opts)
}
