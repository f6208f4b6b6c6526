//! Alias links and family font sets.
//!
//! Both are insertion-ordered `name -> [face index]` maps; the order in which
//! faces and aliases are visited is what ends up in the database.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::face::FontFace;

/// A name and the global face indices it resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedIndices {
    pub name: String,
    pub inst: Vec<usize>,
}

/// Ordered `name -> faces` accumulator. Face lists never repeat an index.
#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    entries: IndexMap<String, Vec<usize>>,
}

impl NameIndex {
    pub fn insert(&mut self, name: &str, face: usize) {
        let faces = self.entries.entry(name.to_owned()).or_default();
        if !faces.contains(&face) {
            faces.push(face);
        }
    }

    pub fn get(&self, name: &str) -> Option<&[usize]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<NamedIndices> {
        self.entries
            .into_iter()
            .map(|(name, inst)| NamedIndices { name, inst })
            .collect()
    }
}

/// `families`, then every `family-style` pair, without repeats.
///
/// Only meaningful when both lists are non-empty; callers check that.
pub fn join<F, S>(families: &[F], styles: &[S]) -> Vec<String>
where
    F: AsRef<str>,
    S: AsRef<str>,
{
    let mut out: IndexSet<String> = families.iter().map(|f| f.as_ref().to_owned()).collect();
    for family in families {
        for style in styles {
            out.insert(format!("{}-{}", family.as_ref(), style.as_ref()));
        }
    }
    out.into_iter().collect()
}

/// Every alias that should resolve to `face`, in insertion order.
pub fn face_aliases(face: &FontFace) -> Vec<String> {
    let mut aliases: Vec<String> = face
        .inst_postscript
        .iter()
        .map(|(name, _)| name.clone())
        .collect();
    aliases.extend(face.postscript.iter().cloned());
    aliases.extend(face.full.iter().cloned());

    if !face.family.is_empty() && !face.inst_style.is_empty() {
        let inst_styles: Vec<&str> = face.inst_style.iter().map(|(n, _)| n.as_str()).collect();
        aliases.extend(join(&face.family, &inst_styles));
    }

    if !face.prefer_family.is_empty() && !face.prefer_style.is_empty() {
        aliases.extend(join(&face.prefer_family, &face.prefer_style));
    } else if !face.family.is_empty() && !face.style.is_empty() {
        aliases.extend(join(&face.family, &face.style));
    }

    aliases
}

/// Alias index over `faces`; positions in the slice are the face indices.
pub fn build_links(faces: &[FontFace]) -> NameIndex {
    let mut links = NameIndex::default();
    for (index, face) in faces.iter().enumerate() {
        for alias in face_aliases(face) {
            links.insert(&alias, index);
        }
    }
    links
}

/// Family groups with at least two members.
pub fn build_fontsets(faces: &[FontFace]) -> NameIndex {
    let mut sets = NameIndex::default();
    for (index, face) in faces.iter().enumerate() {
        for family in face.primary_families() {
            sets.insert(family, index);
        }
    }
    sets.entries.retain(|_, members| members.len() > 1);
    sets
}
