//! `name` table decoding.

use read_fonts::tables::name::{MacRomanMapping, NameId};
use read_fonts::FontData;

use crate::error::{FontDbError, Result};
use crate::fvar::InstanceTable;
use crate::sfnt::NAME;

const NAME_RECORD_LEN: usize = 12;

/// Name-ids that are always decoded, regardless of `fvar` content.
pub const CLASSIFIED_NAME_IDS: [NameId; 6] = [
    NameId::FAMILY_NAME,
    NameId::SUBFAMILY_NAME,
    NameId::FULL_NAME,
    NameId::POSTSCRIPT_NAME,
    NameId::TYPOGRAPHIC_FAMILY_NAME,
    NameId::TYPOGRAPHIC_SUBFAMILY_NAME,
];

/// One decoded, non-empty name string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRecord {
    pub platform_id: u16,
    pub encoding_id: u16,
    pub language_id: u16,
    pub name_id: NameId,
    pub text: String,
}

/// Decode the records of interest from a raw `name` table.
///
/// Interesting records are the classified ids plus every id referenced by a
/// named instance in `instances`. Records in encodings we cannot decode, or
/// whose string lies outside the table, are dropped.
pub fn decode_names(data: &[u8], instances: &InstanceTable) -> Result<Vec<NameRecord>> {
    if data.is_empty() {
        return Ok(Vec::new());
    }

    let table = FontData::new(data);
    let read16 = |offset: usize, what| table.read_at::<u16>(offset).map_err(FontDbError::parse(what));

    let version = read16(0, "name header")?;
    let count = read16(2, "name header")?;
    let storage = read16(4, "name header")? as usize;
    if version > 1 {
        let unsupported = FontDbError::UnsupportedVersion {
            table: NAME,
            major: version,
            minor: 0,
        };
        log::debug!("{unsupported}; ignoring names");
        return Ok(Vec::new());
    }

    let mut records = Vec::new();
    for i in 0..count as usize {
        let at = 6 + i * NAME_RECORD_LEN;
        let platform_id = read16(at, "name record")?;
        let encoding_id = read16(at + 2, "name record")?;
        let language_id = read16(at + 4, "name record")?;
        let raw_id = read16(at + 6, "name record")?;
        let length = read16(at + 8, "name record")? as usize;
        let offset = read16(at + 10, "name record")? as usize;

        let name_id = NameId::new(raw_id);
        if !CLASSIFIED_NAME_IDS.contains(&name_id) && !instances.names_instance(raw_id) {
            continue;
        }

        let start = storage + offset;
        let Some(bytes) = data.get(start..start + length) else {
            log::debug!("name record {raw_id} points outside the name table");
            continue;
        };
        let Some(text) = decode_text(platform_id, encoding_id, language_id, bytes) else {
            continue;
        };

        let text: String = text.chars().filter(|&c| c != '\0').collect();
        if text.is_empty() {
            continue;
        }

        records.push(NameRecord {
            platform_id,
            encoding_id,
            language_id,
            name_id,
            text,
        });
    }

    Ok(records)
}

fn decode_text(platform: u16, encoding: u16, language: u16, bytes: &[u8]) -> Option<String> {
    match (platform, encoding, language) {
        (1, 0, 0) => Some(bytes.iter().map(|&b| MacRomanMapping.decode(b)).collect()),
        (0 | 3, _, _) => {
            let units = bytes
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]));
            Some(
                char::decode_utf16(units)
                    .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
                    .collect(),
            )
        }
        _ => None,
    }
}
