//! Container sniffing and table directory lookup.
//!
//! Only two tables matter for the database: `name` and `fvar`. Everything
//! else in the directory is skipped by tag.

use std::ops::Range;

use read_fonts::types::Tag;
use read_fonts::{FontData, ReadError};

use crate::error::{FontDbError, Result};

pub const NAME: Tag = Tag::new(b"name");
pub const FVAR: Tag = Tag::new(b"fvar");

const TTCF: Tag = Tag::new(b"ttcf");
const OTTO: Tag = Tag::new(b"OTTO");
const TRUETYPE: Tag = Tag::new(&[0, 1, 0, 0]);

const TABLE_RECORD_LEN: usize = 16;

/// Offsets of every table directory in `data`, in face order.
///
/// Single fonts yield `[0]`; collections yield their directory list. Any
/// other magic (including buffers shorter than four bytes) yields nothing.
pub fn directory_offsets(data: &[u8]) -> Result<Vec<u32>> {
    let font = FontData::new(data);
    let Ok(magic) = font.read_at::<Tag>(0) else {
        return Ok(Vec::new());
    };

    if magic == OTTO || magic == TRUETYPE {
        return Ok(vec![0]);
    }
    if magic != TTCF {
        return Ok(Vec::new());
    }

    let count: u32 = font
        .read_at(8)
        .map_err(FontDbError::parse("collection header"))?;
    (0..count as usize)
        .map(|i| font.read_at::<u32>(12 + i * 4))
        .collect::<Result<Vec<_>, _>>()
        .map_err(FontDbError::parse("collection directory offsets"))
}

/// Byte ranges of the tables we decode, relative to the start of the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRanges {
    pub name: Option<Range<usize>>,
    pub fvar: Option<Range<usize>>,
}

impl TableRanges {
    /// Walk the table directory at `directory` and record `name` / `fvar`.
    ///
    /// The first record for a tag wins; later duplicates are ignored.
    pub fn resolve(data: &[u8], directory: u32) -> Result<Self> {
        let font = FontData::new(data);
        let base = directory as usize;
        let num_tables: u16 = font
            .read_at(base + 4)
            .map_err(FontDbError::parse("table directory"))?;

        let mut ranges = TableRanges::default();
        for i in 0..num_tables as usize {
            let record = base + 12 + i * TABLE_RECORD_LEN;
            let tag: Tag = font
                .read_at(record)
                .map_err(FontDbError::parse("table record"))?;

            let slot = if tag == NAME {
                &mut ranges.name
            } else if tag == FVAR {
                &mut ranges.fvar
            } else {
                continue;
            };
            if slot.is_some() {
                log::debug!("ignoring duplicate '{tag}' table record");
                continue;
            }

            let offset: u32 = font
                .read_at(record + 8)
                .map_err(FontDbError::parse("table record"))?;
            let length: u32 = font
                .read_at(record + 12)
                .map_err(FontDbError::parse("table record"))?;
            let range = offset as usize..offset as usize + length as usize;
            if data.get(range.clone()).is_none() {
                return Err(FontDbError::Parse {
                    what: "table data",
                    source: ReadError::OutOfBounds,
                });
            }
            *slot = Some(range);
        }

        Ok(ranges)
    }

    /// Bytes of the `name` table, empty when the font has none.
    pub fn name_data<'a>(&self, data: &'a [u8]) -> &'a [u8] {
        table_bytes(data, self.name.as_ref())
    }

    /// Bytes of the `fvar` table, empty for static fonts.
    pub fn fvar_data<'a>(&self, data: &'a [u8]) -> &'a [u8] {
        table_bytes(data, self.fvar.as_ref())
    }
}

fn table_bytes<'a>(data: &'a [u8], range: Option<&Range<usize>>) -> &'a [u8] {
    range
        .and_then(|range| data.get(range.clone()))
        .unwrap_or_default()
}
