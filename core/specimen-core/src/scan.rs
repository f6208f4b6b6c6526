//! Per-file parsing, run in parallel over the discovered paths.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

use crate::error::FontDbError;
use crate::face::{FontFace, FontFile};
use crate::fvar::InstanceTable;
use crate::name::decode_names;
use crate::sfnt::{directory_offsets, TableRanges};

#[derive(Debug, Default, Clone)]
pub struct BuildOptions {
    pub follow_symlinks: bool,
    pub jobs: Option<usize>,
}

/// Decode every face in one in-memory font file.
///
/// Non-font buffers produce a file with no faces. A collection member that
/// fails to parse is skipped on its own; the remaining members keep their
/// original face index.
pub fn parse_font_file(path: &Path, data: &[u8]) -> Result<FontFile, FontDbError> {
    let offsets = directory_offsets(data)?;
    let mut faces = Vec::with_capacity(offsets.len());

    for (face_index, directory) in offsets.into_iter().enumerate() {
        let face_index = face_index as u32;
        match parse_face(path, data, face_index, directory) {
            Ok(face) => faces.push(face),
            Err(err) => log::warn!("skipping {}#{face_index}: {err}", path.display()),
        }
    }

    Ok(FontFile {
        path: path.to_path_buf(),
        faces,
    })
}

fn parse_face(
    path: &Path,
    data: &[u8],
    face_index: u32,
    directory: u32,
) -> Result<FontFace, FontDbError> {
    let tables = TableRanges::resolve(data, directory)?;
    let instances = InstanceTable::decode(tables.fvar_data(data))?;
    let records = decode_names(tables.name_data(data), &instances)?;
    Ok(FontFace::from_records(path, face_index, &records, &instances))
}

/// Read and decode one file from disk.
pub fn read_font_file(path: &Path) -> Result<FontFile, FontDbError> {
    let data = fs::read(path).map_err(|source| FontDbError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_font_file(path, &data)
}

/// Decode `paths` in parallel, preserving their order. Files that cannot be
/// read or parsed are logged and left out.
pub fn scan_paths(paths: &[PathBuf], opts: &BuildOptions) -> Result<Vec<FontFile>> {
    let run_scan = || -> Vec<FontFile> {
        paths
            .par_iter()
            .filter_map(|path| match read_font_file(path) {
                Ok(file) => Some(file),
                Err(err) => {
                    log::warn!("skipping {}: {err}", path.display());
                    None
                }
            })
            .collect()
    };

    if let Some(jobs) = opts.jobs {
        let pool = ThreadPoolBuilder::new().num_threads(jobs).build()?;
        Ok(pool.install(run_scan))
    } else {
        Ok(run_scan())
    }
}
