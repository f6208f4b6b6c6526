/// specimen-core: a font database builder for XeTeX
///
/// XeTeX asks for fonts by name: a PostScript name, a full name, a
/// `Family-Style` pair, sometimes just a family. This crate walks the font
/// directories once, reads the `name` and `fvar` tables of every face it
/// finds, and writes down which file answers to which name. The result is a
/// small JSON database that can be loaded and queried without opening a
/// single font file again.
///
/// ## How a Database Comes Together
///
/// **Discovery**: every regular file under the roots is a candidate
/// - Paths are made absolute, sorted and deduplicated
/// - Non-fonts are weeded out later by their magic number
///
/// **Scanning**: each file is decoded in parallel
/// - Single fonts (`OTTO`, `0x00010000`) and collections (`ttcf`)
/// - Name records for family, style, full, PostScript and typographic names
/// - Named instances of variable fonts, with their coordinates
///
/// **Folding**: per-file results become the database
/// - `link`: every alias a face answers to
/// - `fontset`: families with two or more faces
/// - `link_hash` / `fontset_hash`: sorted buckets for quick lookup
///
/// ## A Short Session
///
/// ```rust,no_run
/// use std::path::PathBuf;
/// use specimen_core::database::build_database;
/// use specimen_core::scan::BuildOptions;
///
/// let roots = vec![PathBuf::from("/usr/share/fonts")];
/// let db = build_database(&roots, &BuildOptions::default())?;
///
/// if let Some(face) = db.search_name("LatinModernRoman-Bold") {
///     println!("{}#{}", face.file_path.display(), face.face_index);
/// }
/// for face in db.search_family("Latin Modern Roman") {
///     println!("  {:?}", face.style);
/// }
/// #
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// ## The Cast
///
/// - [`FontDatabase`]: the persisted result and its lookup API
/// - [`FontFace`]: one face and its classified names
/// - [`NamedIndices`]: a name and the faces it resolves to
/// - [`HashBucket`]: one bucket of the lookup hash
pub mod config;
pub mod database;
pub mod discovery;
pub mod error;
pub mod face;
pub mod fvar;
pub mod hash;
pub mod link;
pub mod name;
pub mod output;
pub mod scan;
pub mod sfnt;

#[cfg(test)]
mod testdata;

pub use database::{build_database, build_from_paths, discover_fonts, FontDatabase};
pub use error::FontDbError;
pub use face::{FontFace, FontFile, NameKey};
pub use hash::{hash_code, HashBucket};
pub use link::NamedIndices;
pub use scan::BuildOptions;
