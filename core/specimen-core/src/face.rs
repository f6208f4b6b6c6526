//! Per-face name classification.

use std::path::{Path, PathBuf};

use read_fonts::tables::name::NameId;
use serde::{Deserialize, Serialize};

use crate::fvar::InstanceTable;
use crate::name::NameRecord;

/// All faces found in one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFile {
    pub path: PathBuf,
    pub faces: Vec<FontFace>,
}

/// The six classified name buckets of a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameKey {
    Family,
    Style,
    FullName,
    PreferFamily,
    PreferStyle,
    PostScript,
}

const NAME_KEYS: [(NameId, NameKey); 6] = [
    (NameId::FAMILY_NAME, NameKey::Family),
    (NameId::SUBFAMILY_NAME, NameKey::Style),
    (NameId::FULL_NAME, NameKey::FullName),
    (NameId::POSTSCRIPT_NAME, NameKey::PostScript),
    (NameId::TYPOGRAPHIC_FAMILY_NAME, NameKey::PreferFamily),
    (NameId::TYPOGRAPHIC_SUBFAMILY_NAME, NameKey::PreferStyle),
];

impl NameKey {
    pub fn from_name_id(name_id: NameId) -> Option<Self> {
        NAME_KEYS
            .iter()
            .find(|(id, _)| *id == name_id)
            .map(|&(_, key)| key)
    }
}

/// One face of a font file with its names sorted into buckets.
///
/// Every bucket keeps first-seen order and holds no duplicate text. The
/// instance lists pair a name with the ordinal of the `fvar` instance that
/// uses it and may repeat text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontFace {
    #[serde(rename = "path")]
    pub file_path: PathBuf,
    #[serde(rename = "index")]
    pub face_index: u32,
    pub family: Vec<String>,
    pub style: Vec<String>,
    pub full: Vec<String>,
    pub postscript: Vec<String>,
    pub prefer_family: Vec<String>,
    pub prefer_style: Vec<String>,
    pub inst_style: Vec<(String, usize)>,
    pub inst_postscript: Vec<(String, usize)>,
    /// Raw 16.16 coordinates per named instance.
    #[serde(rename = "inst_tuple")]
    pub inst_axis_tuples: Vec<Vec<i32>>,
}

impl FontFace {
    pub fn from_records(
        file_path: &Path,
        face_index: u32,
        records: &[NameRecord],
        instances: &InstanceTable,
    ) -> Self {
        let mut face = FontFace {
            file_path: file_path.to_path_buf(),
            face_index,
            inst_axis_tuples: instances.tuples(),
            ..Default::default()
        };

        for record in records {
            if let Some(key) = NameKey::from_name_id(record.name_id) {
                let bucket = face.names_mut(key);
                if !bucket.contains(&record.text) {
                    bucket.push(record.text.clone());
                }
            }

            let raw_id = record.name_id.to_u16();
            for ordinal in instances.subfamily_ordinals(raw_id) {
                face.inst_style.push((record.text.clone(), ordinal));
            }
            for ordinal in instances.postscript_ordinals(raw_id) {
                face.inst_postscript.push((record.text.clone(), ordinal));
            }
        }

        face
    }

    pub fn names(&self, key: NameKey) -> &[String] {
        match key {
            NameKey::Family => &self.family,
            NameKey::Style => &self.style,
            NameKey::FullName => &self.full,
            NameKey::PreferFamily => &self.prefer_family,
            NameKey::PreferStyle => &self.prefer_style,
            NameKey::PostScript => &self.postscript,
        }
    }

    fn names_mut(&mut self, key: NameKey) -> &mut Vec<String> {
        match key {
            NameKey::Family => &mut self.family,
            NameKey::Style => &mut self.style,
            NameKey::FullName => &mut self.full,
            NameKey::PreferFamily => &mut self.prefer_family,
            NameKey::PreferStyle => &mut self.prefer_style,
            NameKey::PostScript => &mut self.postscript,
        }
    }

    /// Family names that group this face: preferred family when present.
    pub fn primary_families(&self) -> &[String] {
        if self.prefer_family.is_empty() {
            &self.family
        } else {
            &self.prefer_family
        }
    }

    /// Names a consumer should present for this face.
    ///
    /// The preferred family/style pair is used only when both halves exist;
    /// otherwise the legacy pair.
    pub fn lookup_names(&self) -> LookupNames<'_> {
        let (families, styles) = if !self.prefer_family.is_empty() && !self.prefer_style.is_empty()
        {
            (&self.prefer_family, &self.prefer_style)
        } else {
            (&self.family, &self.style)
        };

        LookupNames {
            families,
            styles,
            full_names: &self.full,
            postscript: self.postscript.first().map(String::as_str),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupNames<'a> {
    pub families: &'a [String],
    pub styles: &'a [String],
    pub full_names: &'a [String],
    pub postscript: Option<&'a str>,
}
