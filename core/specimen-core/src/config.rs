//! Database location and default font directories.
//!
//! Both are resolved from the environment. The lookup is passed in as a
//! closure so the resolution order can be exercised without touching the
//! process environment.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{anyhow, Result};

/// File name of the database inside the data directory.
pub const DATABASE_FILE: &str = "xetex-fontdb.json";

/// Full path override for the database file.
pub const DATABASE_ENV: &str = "SPECIMEN_FONTDB";

/// `:`/`;` separated override for the default font directories.
pub const FONT_DIRS_ENV: &str = "SPECIMEN_FONT_DIRS";

pub fn default_database_path() -> Result<PathBuf> {
    database_path_from(|key| env::var_os(key))
}

/// `SPECIMEN_FONTDB`, else `xetex-fontdb.json` under `APPDATA`,
/// `XDG_DATA_HOME` or `$HOME/.local/share`, whichever is set first.
pub fn database_path_from(lookup: impl Fn(&str) -> Option<OsString>) -> Result<PathBuf> {
    let set = |key: &str| lookup(key).filter(|value| !value.is_empty());

    if let Some(path) = set(DATABASE_ENV) {
        return Ok(PathBuf::from(path));
    }

    let dir = set("APPDATA")
        .or_else(|| set("XDG_DATA_HOME"))
        .map(PathBuf::from)
        .or_else(|| set("HOME").map(|home| PathBuf::from(home).join(".local/share")))
        .ok_or_else(|| {
            anyhow!("cannot locate the font database: set {DATABASE_ENV}, APPDATA or HOME")
        })?;

    Ok(dir.join(DATABASE_FILE))
}

/// Font directories to scan when none are given explicitly.
pub fn system_font_roots() -> Result<Vec<PathBuf>> {
    font_roots_from(|key| env::var_os(key))
}

/// `SPECIMEN_FONT_DIRS` entries when set, else the platform's font
/// directories. Only directories that exist are returned, sorted.
pub fn font_roots_from(lookup: impl Fn(&str) -> Option<OsString>) -> Result<Vec<PathBuf>> {
    let (mut roots, source) = match lookup(FONT_DIRS_ENV) {
        Some(raw) => (split_dir_list(&raw), FONT_DIRS_ENV),
        None => (platform_font_dirs(&lookup), "this platform"),
    };

    roots.retain(|dir| dir.is_dir());
    roots.sort();
    roots.dedup();

    if roots.is_empty() {
        return Err(anyhow!("no font directories found for {source}"));
    }
    Ok(roots)
}

/// Split a `:` or `;` separated directory list, dropping empty entries.
fn split_dir_list(raw: &OsString) -> Vec<PathBuf> {
    raw.to_string_lossy()
        .split([':', ';'])
        .filter(|entry| !entry.is_empty())
        .map(PathBuf::from)
        .collect()
}

fn platform_font_dirs(lookup: &impl Fn(&str) -> Option<OsString>) -> Vec<PathBuf> {
    let under = |key: &str, rel: &str| lookup(key).map(|base| PathBuf::from(base).join(rel));
    let mut dirs = Vec::new();

    if cfg!(target_os = "macos") {
        dirs.push(PathBuf::from("/System/Library/Fonts"));
        dirs.push(PathBuf::from("/Library/Fonts"));
        dirs.extend(under("HOME", "Library/Fonts"));
    } else if cfg!(windows) {
        dirs.extend(under("SYSTEMROOT", "Fonts"));
        dirs.extend(under("LOCALAPPDATA", "Microsoft/Windows/Fonts"));
    } else {
        for dir in [
            "/usr/share/fonts",
            "/usr/local/share/fonts",
            "/usr/share/texmf-dist/fonts/opentype",
            "/usr/share/texmf-dist/fonts/truetype",
        ] {
            dirs.push(PathBuf::from(dir));
        }
        dirs.extend(under("HOME", ".local/share/fonts"));
    }

    dirs
}
