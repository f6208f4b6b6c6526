//! Database persistence helpers.

use std::io::{Read, Write};

use anyhow::{Context, Result};

use crate::database::FontDatabase;

/// Write the database as compact JSON, the form consumers load.
pub fn write_json(db: &FontDatabase, mut w: impl Write) -> Result<()> {
    serde_json::to_writer(&mut w, db)?;
    w.flush()?;
    Ok(())
}

/// Write the database as indented JSON.
pub fn write_json_pretty(db: &FontDatabase, mut w: impl Write) -> Result<()> {
    let json = serde_json::to_string_pretty(db)?;
    w.write_all(json.as_bytes())?;
    Ok(())
}

pub fn read_json(r: impl Read) -> Result<FontDatabase> {
    serde_json::from_reader(r).context("parsing font database")
}
